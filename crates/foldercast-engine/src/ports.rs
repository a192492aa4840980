//! Capability ports the engine depends on
//!
//! The host integration layer supplies these: folder membership lookup, the
//! actual provider transport, the per-setting restriction lists behind the
//! privacy category, and user-visible notifications. Keeping them as traits
//! keeps the engine unit-testable with fakes.

use crate::error::{DirectoryError, TransportError};
use async_trait::async_trait;
use foldercast_core::{GroupId, ResourceId, RestrictionList, WirePatch};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Folder membership lookup
#[async_trait]
pub trait Directory: Send + Sync {
    /// Expand a folder into its member resources, in folder order
    async fn resolve_group_members(
        &self,
        group: &GroupId,
    ) -> Result<Vec<ResourceId>, DirectoryError>;
}

/// Provider transport for settings updates
#[async_trait]
pub trait Transport: Send + Sync {
    /// Apply the wire patch to one target
    async fn apply_single(
        &self,
        target: &ResourceId,
        patch: &WirePatch,
    ) -> Result<(), TransportError>;

    /// Apply per-target wire patches in one provider call.
    ///
    /// The provider gives no per-target outcome; success means only that
    /// the request was accepted as a whole.
    async fn apply_bulk(
        &self,
        patches: &BTreeMap<ResourceId, Arc<WirePatch>>,
    ) -> Result<(), TransportError>;
}

/// Per-setting restriction lists used by the privacy category
#[async_trait]
pub trait RestrictionStore: Send + Sync {
    /// Current contents of one restriction list
    async fn current(&self, list: RestrictionList) -> Result<Vec<ResourceId>, TransportError>;

    /// Replace one restriction list wholesale
    async fn replace(
        &self,
        list: RestrictionList,
        ids: Vec<ResourceId>,
    ) -> Result<(), TransportError>;
}

/// Kind of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Dispatch started
    Info,
    /// Batch finished (optimistic; no per-target confirmation)
    Success,
}

/// Fire-and-forget user-visible notifications
pub trait Notifier: Send + Sync {
    /// Emit one notification
    fn notify(&self, kind: NoticeKind, message: &str);
}
