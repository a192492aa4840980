//! Testing utilities for the foldercast workspace
//!
//! Scripted and recording implementations of the engine's capability
//! ports.

#![allow(missing_docs)]

use async_trait::async_trait;
use foldercast_core::{GroupId, ResourceId, RestrictionList, WirePatch};
use foldercast_engine::{
    Directory, DirectoryError, Notifier, NoticeKind, RestrictionStore, Transport, TransportError,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::time::Instant;

/// Directory fake backed by a fixed group table
#[derive(Debug, Default)]
pub struct ScriptedDirectory {
    groups: HashMap<GroupId, Vec<ResourceId>>,
}

impl ScriptedDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>, members: &[&str]) -> Self {
        self.groups.insert(
            GroupId::new(group),
            members.iter().map(|id| ResourceId::from(*id)).collect(),
        );
        self
    }
}

#[async_trait]
impl Directory for ScriptedDirectory {
    async fn resolve_group_members(
        &self,
        group: &GroupId,
    ) -> Result<Vec<ResourceId>, DirectoryError> {
        self.groups
            .get(group)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(group.clone()))
    }
}

/// One recorded transport call
#[derive(Debug, Clone)]
pub enum TransportCall {
    Single {
        target: ResourceId,
        patch: WirePatch,
        /// Tokio instant at the start of the call; honest under a paused
        /// test clock
        at: Instant,
    },
    Bulk {
        patches: Vec<(ResourceId, WirePatch)>,
        at: Instant,
    },
}

/// Transport fake recording every call, optionally failing chosen targets
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportCall>>,
    failing: Mutex<HashSet<ResourceId>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `apply_single` fail for this target
    pub fn fail_target(&self, target: impl Into<String>) {
        self.failing.lock().insert(ResourceId::new(target));
    }

    /// Everything recorded so far
    #[must_use]
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    /// Targets of recorded single calls, in call order
    #[must_use]
    pub fn single_targets(&self) -> Vec<ResourceId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Single { target, .. } => Some(target.clone()),
                TransportCall::Bulk { .. } => None,
            })
            .collect()
    }

    /// Start instants of recorded single calls, in call order
    #[must_use]
    pub fn single_call_starts(&self) -> Vec<Instant> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Single { at, .. } => Some(*at),
                TransportCall::Bulk { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn apply_single(
        &self,
        target: &ResourceId,
        patch: &WirePatch,
    ) -> Result<(), TransportError> {
        self.calls.lock().push(TransportCall::Single {
            target: target.clone(),
            patch: patch.clone(),
            at: Instant::now(),
        });
        if self.failing.lock().contains(target) {
            return Err(TransportError::Rejected(format!("scripted failure for {target}")));
        }
        Ok(())
    }

    async fn apply_bulk(
        &self,
        patches: &BTreeMap<ResourceId, Arc<WirePatch>>,
    ) -> Result<(), TransportError> {
        self.calls.lock().push(TransportCall::Bulk {
            patches: patches
                .iter()
                .map(|(id, patch)| (id.clone(), WirePatch::clone(patch)))
                .collect(),
            at: Instant::now(),
        });
        Ok(())
    }
}

/// Notifier fake recording every notice
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().clone()
    }

    #[must_use]
    pub fn count_of(&self, kind: NoticeKind) -> usize {
        self.notices.lock().iter().filter(|(k, _)| *k == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().push((kind, message.to_owned()));
    }
}

/// Restriction-list fake backed by in-memory lists
#[derive(Debug, Default)]
pub struct FakeRestrictionStore {
    lists: Mutex<HashMap<RestrictionList, Vec<ResourceId>>>,
}

impl FakeRestrictionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_list(self, list: RestrictionList, ids: &[&str]) -> Self {
        self.lists
            .lock()
            .insert(list, ids.iter().map(|id| ResourceId::from(*id)).collect());
        self
    }

    #[must_use]
    pub fn list(&self, list: RestrictionList) -> Vec<ResourceId> {
        self.lists.lock().get(&list).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RestrictionStore for FakeRestrictionStore {
    async fn current(&self, list: RestrictionList) -> Result<Vec<ResourceId>, TransportError> {
        Ok(self.list(list))
    }

    async fn replace(
        &self,
        list: RestrictionList,
        ids: Vec<ResourceId>,
    ) -> Result<(), TransportError> {
        self.lists.lock().insert(list, ids);
        Ok(())
    }
}
