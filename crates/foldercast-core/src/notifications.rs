//! Notification settings category
//!
//! Seven user-facing toggles plus a mute duration whose absolute expiry
//! timestamp is derived at edit time. Wire vocabulary follows the provider:
//! `muted`, `message_notifications`, `suppress_everyone`, `suppress_roles`,
//! `notify_highlights`, `mute_scheduled_events`, `mobile_push`, and the
//! composite `mute_config { selected_time_window, end_time }`.

use crate::builder::EditablePatch;
use crate::field::Field;
use crate::wire::{Normalize, WirePatch};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

/// Wire property names for the notification category
mod wire_keys {
    pub(super) const MUTED: &str = "muted";
    pub(super) const MESSAGE_NOTIFICATIONS: &str = "message_notifications";
    pub(super) const SUPPRESS_EVERYONE: &str = "suppress_everyone";
    pub(super) const SUPPRESS_ROLES: &str = "suppress_roles";
    pub(super) const NOTIFY_HIGHLIGHTS: &str = "notify_highlights";
    pub(super) const MUTE_SCHEDULED_EVENTS: &str = "mute_scheduled_events";
    pub(super) const MOBILE_PUSH: &str = "mobile_push";
    pub(super) const MUTE_CONFIG: &str = "mute_config";
    pub(super) const SELECTED_TIME_WINDOW: &str = "selected_time_window";
    pub(super) const END_TIME: &str = "end_time";
}

/// Message notification level.
///
/// `Disabled` is the category's disabled sentinel: a concrete value meaning
/// "leave this setting entirely alone", never sent on the wire. It is
/// distinct from `NoMessages`, which is a real provider level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PingMode {
    /// Notify for every message
    AllMessages,
    /// Notify only for direct mentions
    OnlyMentions,
    /// Never notify
    NoMessages,
    /// Defer to the server's default level
    ServerDefaults,
    /// Disabled sentinel: do not touch this setting at all
    Disabled,
}

impl PingMode {
    /// Numeric wire encoding of this level.
    ///
    /// `Disabled` has an encoding for completeness but is always stripped
    /// by normalization before it could reach the wire.
    #[inline]
    #[must_use]
    pub fn wire_value(self) -> u64 {
        match self {
            Self::AllMessages => 0,
            Self::OnlyMentions => 1,
            Self::NoMessages => 2,
            Self::ServerDefaults => 3,
            Self::Disabled => 4,
        }
    }
}

/// Relative mute window, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MuteDuration(u32);

impl MuteDuration {
    /// 15 minutes
    pub const FIFTEEN_MINUTES: Self = Self(900);
    /// 1 hour
    pub const ONE_HOUR: Self = Self(3600);
    /// 8 hours
    pub const EIGHT_HOURS: Self = Self(28_800);
    /// 24 hours
    pub const TWENTY_FOUR_HOURS: Self = Self(86_400);

    /// Arbitrary window in seconds
    #[inline]
    #[must_use]
    pub fn from_secs(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Window length in seconds
    #[inline]
    #[must_use]
    pub fn as_secs(self) -> u32 {
        self.0
    }

    /// Window as a chrono duration
    #[inline]
    #[must_use]
    pub fn as_chrono(self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.0))
    }
}

/// Sparse notification patch for one editing session.
///
/// Created all-unset, mutated through [`crate::PatchBuilder`], consumed
/// exactly once at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationPatch {
    /// Mute the whole server
    pub muted: Field<bool>,
    /// Message notification level
    pub pings: Field<PingMode>,
    /// Suppress @everyone and @here
    pub everyone: Field<bool>,
    /// Suppress all role mentions
    pub roles: Field<bool>,
    /// Suppress highlights
    pub highlights: Field<bool>,
    /// Mute new scheduled events
    pub events: Field<bool>,
    /// Mobile push notifications
    pub mobile: Field<bool>,
    /// Relative mute window; `Sentinel` means "mute indefinitely"
    pub mute_duration: Field<MuteDuration>,
    /// Absolute mute expiry, derived from `mute_duration` at edit time
    mute_end: Option<DateTime<Utc>>,
}

impl NotificationPatch {
    /// Derived absolute mute expiry, if a finite window is selected.
    ///
    /// Recomputed on every `mute_duration` edit; never edited directly.
    #[inline]
    #[must_use]
    pub fn mute_end(&self) -> Option<DateTime<Utc>> {
        self.mute_end
    }
}

/// One user edit to a [`NotificationPatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEdit {
    /// Edit the mute toggle
    Muted(Field<bool>),
    /// Edit the notification level
    Pings(Field<PingMode>),
    /// Edit @everyone/@here suppression
    Everyone(Field<bool>),
    /// Edit role-mention suppression
    Roles(Field<bool>),
    /// Edit highlight suppression
    Highlights(Field<bool>),
    /// Edit scheduled-event muting
    Events(Field<bool>),
    /// Edit mobile push
    Mobile(Field<bool>),
    /// Edit the mute window (recomputes the derived expiry)
    MuteDuration(Field<MuteDuration>),
}

impl EditablePatch for NotificationPatch {
    type Edit = NotificationEdit;

    fn apply_edit(&mut self, edit: NotificationEdit, now: DateTime<Utc>) {
        match edit {
            NotificationEdit::Muted(field) => self.muted = field,
            NotificationEdit::Pings(field) => self.pings = field,
            NotificationEdit::Everyone(field) => self.everyone = field,
            NotificationEdit::Roles(field) => self.roles = field,
            NotificationEdit::Highlights(field) => self.highlights = field,
            NotificationEdit::Events(field) => self.events = field,
            NotificationEdit::Mobile(field) => self.mobile = field,
            NotificationEdit::MuteDuration(field) => {
                self.mute_duration = field;
                // Derived field: a finite window pins the absolute expiry at
                // edit time; unset or indefinite clears it.
                self.mute_end = match field {
                    Field::Value(window) => Some(now + window.as_chrono()),
                    Field::Unset | Field::Sentinel => None,
                };
            }
        }
    }
}

/// `Unset` drops the key, `Sentinel` means "checkbox ticked, switch
/// untouched" and maps to the provider's enabled state.
fn push_toggle(wire: &mut WirePatch, key: &str, field: Field<bool>) {
    match field {
        Field::Unset => {}
        Field::Sentinel => wire.insert(key, Value::Bool(true)),
        Field::Value(value) => wire.insert(key, Value::Bool(value)),
    }
}

impl Normalize for NotificationPatch {
    fn normalize(&self) -> WirePatch {
        let mut wire = WirePatch::new();

        push_toggle(&mut wire, wire_keys::MUTED, self.muted);
        push_toggle(&mut wire, wire_keys::SUPPRESS_EVERYONE, self.everyone);
        push_toggle(&mut wire, wire_keys::SUPPRESS_ROLES, self.roles);
        push_toggle(&mut wire, wire_keys::NOTIFY_HIGHLIGHTS, self.highlights);
        push_toggle(&mut wire, wire_keys::MUTE_SCHEDULED_EVENTS, self.events);
        push_toggle(&mut wire, wire_keys::MOBILE_PUSH, self.mobile);

        // The select's sentinel placeholder is the disabled marker itself,
        // so both Sentinel and Value(Disabled) strip the key.
        if let Field::Value(mode) = self.pings {
            if mode != PingMode::Disabled {
                wire.insert(wire_keys::MESSAGE_NOTIFICATIONS, json!(mode.wire_value()));
            }
        }

        // Composite sub-object: only present when at least one member
        // survived the stripping rules above.
        let mut mute_config = Map::new();
        if let Field::Value(window) = self.mute_duration {
            mute_config.insert(
                wire_keys::SELECTED_TIME_WINDOW.to_owned(),
                json!(window.as_secs()),
            );
        }
        if let Some(end) = self.mute_end {
            mute_config.insert(
                wire_keys::END_TIME.to_owned(),
                json!(end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        if !mute_config.is_empty() {
            wire.insert(wire_keys::MUTE_CONFIG, Value::Object(mute_config));
        }

        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn all_unset_normalizes_to_empty() {
        assert!(NotificationPatch::default().normalize().is_empty());
    }

    #[test]
    fn unset_fields_are_absent() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Mobile(Field::Value(false)), noon());

        let wire = patch.normalize();
        assert_eq!(wire.get("mobile_push"), Some(&json!(false)));
        assert!(!wire.contains_key("muted"));
        assert!(!wire.contains_key("suppress_everyone"));
        assert_eq!(wire.len(), 1);
    }

    #[test]
    fn disabled_pings_strips_the_key() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Pings(Field::Value(PingMode::Disabled)), noon());
        assert!(!patch.normalize().contains_key("message_notifications"));
    }

    #[test]
    fn no_messages_is_a_real_level() {
        // NO_MESSAGES must reach the wire; only DISABLED is stripped.
        let mut patch = NotificationPatch::default();
        patch.apply_edit(
            NotificationEdit::Pings(Field::Value(PingMode::NoMessages)),
            noon(),
        );
        assert_eq!(patch.normalize().get("message_notifications"), Some(&json!(2)));
    }

    #[test]
    fn sentinel_pings_strips_the_key() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Pings(Field::Sentinel), noon());
        assert!(!patch.normalize().contains_key("message_notifications"));
    }

    #[test]
    fn sentinel_mute_with_finite_window() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Muted(Field::Sentinel), noon());
        patch.apply_edit(
            NotificationEdit::MuteDuration(Field::Value(MuteDuration::FIFTEEN_MINUTES)),
            noon(),
        );

        let wire = patch.normalize();
        assert_eq!(wire.get("muted"), Some(&json!(true)));
        assert_eq!(
            wire.get("mute_config"),
            Some(&json!({
                "selected_time_window": 900,
                "end_time": "2026-03-01T12:15:00Z",
            }))
        );
    }

    #[test]
    fn unticking_duration_removes_mute_config() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Muted(Field::Sentinel), noon());
        patch.apply_edit(
            NotificationEdit::MuteDuration(Field::Value(MuteDuration::FIFTEEN_MINUTES)),
            noon(),
        );
        patch.apply_edit(NotificationEdit::MuteDuration(Field::Unset), noon());

        let wire = patch.normalize();
        assert_eq!(wire.get("muted"), Some(&json!(true)));
        assert!(!wire.contains_key("mute_config"));
    }

    #[test]
    fn indefinite_mute_has_no_config_object() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Muted(Field::Value(true)), noon());
        patch.apply_edit(NotificationEdit::MuteDuration(Field::Sentinel), noon());

        let wire = patch.normalize();
        assert_eq!(wire.get("muted"), Some(&json!(true)));
        assert!(!wire.contains_key("mute_config"));
    }

    #[test]
    fn normalization_is_deterministic() {
        let mut patch = NotificationPatch::default();
        patch.apply_edit(NotificationEdit::Muted(Field::Value(true)), noon());
        patch.apply_edit(NotificationEdit::Everyone(Field::Sentinel), noon());
        patch.apply_edit(
            NotificationEdit::Pings(Field::Value(PingMode::OnlyMentions)),
            noon(),
        );

        assert_eq!(patch.normalize(), patch.normalize());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn toggle_field() -> impl Strategy<Value = Field<bool>> {
            prop_oneof![
                Just(Field::Unset),
                Just(Field::Sentinel),
                any::<bool>().prop_map(Field::Value),
            ]
        }

        fn ping_field() -> impl Strategy<Value = Field<PingMode>> {
            prop_oneof![
                Just(Field::Unset),
                Just(Field::Sentinel),
                prop_oneof![
                    Just(PingMode::AllMessages),
                    Just(PingMode::OnlyMentions),
                    Just(PingMode::NoMessages),
                    Just(PingMode::ServerDefaults),
                    Just(PingMode::Disabled),
                ]
                .prop_map(Field::Value),
            ]
        }

        fn duration_field() -> impl Strategy<Value = Field<MuteDuration>> {
            prop_oneof![
                Just(Field::Unset),
                Just(Field::Sentinel),
                (1_u32..1_000_000).prop_map(|s| Field::Value(MuteDuration::from_secs(s))),
            ]
        }

        fn arb_patch() -> impl Strategy<Value = NotificationPatch> {
            (
                toggle_field(),
                ping_field(),
                toggle_field(),
                toggle_field(),
                toggle_field(),
                toggle_field(),
                toggle_field(),
                duration_field(),
            )
                .prop_map(|(muted, pings, everyone, roles, highlights, events, mobile, dur)| {
                    let mut patch = NotificationPatch::default();
                    let now = noon();
                    patch.apply_edit(NotificationEdit::Muted(muted), now);
                    patch.apply_edit(NotificationEdit::Pings(pings), now);
                    patch.apply_edit(NotificationEdit::Everyone(everyone), now);
                    patch.apply_edit(NotificationEdit::Roles(roles), now);
                    patch.apply_edit(NotificationEdit::Highlights(highlights), now);
                    patch.apply_edit(NotificationEdit::Events(events), now);
                    patch.apply_edit(NotificationEdit::Mobile(mobile), now);
                    patch.apply_edit(NotificationEdit::MuteDuration(dur), now);
                    patch
                })
        }

        proptest! {
            #[test]
            fn normalize_is_idempotent(patch in arb_patch()) {
                prop_assert_eq!(patch.normalize(), patch.normalize());
            }

            #[test]
            fn disabled_marker_never_reaches_the_wire(patch in arb_patch()) {
                let wire = patch.normalize();
                prop_assert_ne!(
                    wire.get("message_notifications"),
                    Some(&json!(PingMode::Disabled.wire_value()))
                );
            }

            #[test]
            fn only_known_wire_keys_appear(patch in arb_patch()) {
                const KNOWN: [&str; 8] = [
                    "muted",
                    "message_notifications",
                    "suppress_everyone",
                    "suppress_roles",
                    "notify_highlights",
                    "mute_scheduled_events",
                    "mobile_push",
                    "mute_config",
                ];
                for (key, _) in patch.normalize().iter() {
                    prop_assert!(KNOWN.contains(&key.as_str()));
                }
            }
        }
    }
}
