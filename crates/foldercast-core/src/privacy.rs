//! Privacy settings category
//!
//! Privacy toggles do not patch each resource directly: the provider keeps
//! one global restriction list per setting (resource ids the setting is
//! turned *off* for). Enabling a setting folder-wide removes the folder's
//! members from that list; disabling adds them. The list arithmetic lives
//! here as a pure function; issuing the replacements is the engine's job.

use crate::builder::EditablePatch;
use crate::field::Field;
use crate::ids::ResourceId;
use chrono::{DateTime, Utc};

/// Provider-side restriction list a privacy toggle maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionList {
    /// Resources direct messages are blocked for
    DirectMessages,
    /// Resources message-request filtering is disabled for
    MessageRequests,
    /// Resources activity status is hidden from
    ActivityStatus,
    /// Resources activity joining is blocked for
    ActivityJoining,
}

impl std::fmt::Display for RestrictionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DirectMessages => "restricted_guild_ids",
            Self::MessageRequests => "message_request_restricted_guild_ids",
            Self::ActivityStatus => "activity_restricted_guild_ids",
            Self::ActivityJoining => "activity_joining_restricted_guild_ids",
        };
        write!(f, "{name}")
    }
}

/// Sparse privacy patch for one editing session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivacyPatch {
    /// Allow direct messages from members
    pub direct_messages: Field<bool>,
    /// Filter messages from unknown members
    pub message_requests: Field<bool>,
    /// Share activity status
    pub activity_status: Field<bool>,
    /// Allow joining your activity
    pub activity_joining: Field<bool>,
}

/// One user edit to a [`PrivacyPatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyEdit {
    /// Edit the direct-message toggle
    DirectMessages(Field<bool>),
    /// Edit the message-request toggle
    MessageRequests(Field<bool>),
    /// Edit the activity-status toggle
    ActivityStatus(Field<bool>),
    /// Edit the activity-joining toggle
    ActivityJoining(Field<bool>),
}

impl EditablePatch for PrivacyPatch {
    type Edit = PrivacyEdit;

    fn apply_edit(&mut self, edit: PrivacyEdit, _now: DateTime<Utc>) {
        match edit {
            PrivacyEdit::DirectMessages(field) => self.direct_messages = field,
            PrivacyEdit::MessageRequests(field) => self.message_requests = field,
            PrivacyEdit::ActivityStatus(field) => self.activity_status = field,
            PrivacyEdit::ActivityJoining(field) => self.activity_joining = field,
        }
    }
}

impl PrivacyPatch {
    /// Restriction-list updates this patch calls for, in fixed field order.
    ///
    /// `Unset` toggles are skipped; a `Sentinel` toggle means "checkbox
    /// ticked, switch untouched" and reads as enabled.
    #[must_use]
    pub fn restriction_edits(&self) -> Vec<(RestrictionList, bool)> {
        let fields = [
            (RestrictionList::DirectMessages, self.direct_messages),
            (RestrictionList::MessageRequests, self.message_requests),
            (RestrictionList::ActivityStatus, self.activity_status),
            (RestrictionList::ActivityJoining, self.activity_joining),
        ];
        fields
            .into_iter()
            .filter_map(|(list, field)| match field {
                Field::Unset => None,
                Field::Sentinel => Some((list, true)),
                Field::Value(allow) => Some((list, allow)),
            })
            .collect()
    }
}

/// Compute the replacement restriction list for one setting.
///
/// `allow` removes every folder member from the list; `!allow` appends the
/// members not already present. Existing order is preserved and members are
/// appended in folder order, so the result is deterministic.
#[must_use]
pub fn apply_restriction(
    current: &[ResourceId],
    members: &[ResourceId],
    allow: bool,
) -> Vec<ResourceId> {
    if allow {
        current
            .iter()
            .filter(|id| !members.contains(id))
            .cloned()
            .collect()
    } else {
        let mut next: Vec<ResourceId> = current.to_vec();
        for member in members {
            if !next.contains(member) {
                next.push(member.clone());
            }
        }
        next
    }
}
