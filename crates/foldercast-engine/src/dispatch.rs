//! Dual-strategy dispatch engine
//!
//! Fans one normalized wire patch out to every member of a folder. Bulk
//! issues a single provider call and reports success optimistically;
//! sequential enqueues one delay-spaced job per target on a fresh FIFO
//! queue, emitting the success notification only when the last job drains.
//!
//! Failure semantics are inherited from the source design: no retries, no
//! rollback of earlier sequential calls, and a sequential job's transport
//! failure is logged to the ambient error channel rather than surfaced to
//! the dispatch caller.

use crate::config::{DispatchConfig, Strategy};
use crate::error::DispatchError;
use crate::ports::{Directory, Notifier, NoticeKind, RestrictionStore, Transport};
use crate::queue::TaskQueue;
use foldercast_core::{apply_restriction, GroupId, PrivacyPatch, ResourceId, WirePatch};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// One dispatch action, immutable after construction.
///
/// The wire patch is shared by reference across every job of a sequential
/// run; targets keep the folder's member order.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Normalized wire patch, shared across all targets
    pub patch: Arc<WirePatch>,
    /// Target resources, in folder order
    pub targets: Vec<ResourceId>,
    /// Delivery strategy
    pub strategy: Strategy,
    /// Delay before each sequential call
    pub inter_call_delay: Duration,
}

/// Handle to a submitted dispatch.
///
/// Sequential jobs outlive the dispatch call; `wait` lets a caller that
/// cares (tests, shutdown paths) await the natural drain. Dropping the
/// receipt never cancels anything.
#[derive(Debug)]
pub struct DispatchReceipt {
    targets: usize,
    queue: Option<TaskQueue>,
}

impl DispatchReceipt {
    fn empty() -> Self {
        Self {
            targets: 0,
            queue: None,
        }
    }

    /// Number of targets the dispatch covered
    #[inline]
    #[must_use]
    pub fn targets(&self) -> usize {
        self.targets
    }

    /// Jobs still pending, including the in-flight one (bulk: always 0)
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.as_ref().map_or(0, TaskQueue::size)
    }

    /// Wait for every enqueued job to complete
    pub async fn wait(&self) {
        if let Some(queue) = &self.queue {
            queue.drained().await;
        }
    }
}

/// Patch fan-out engine over injected capability ports
pub struct DispatchEngine<D, T, N> {
    directory: Arc<D>,
    transport: Arc<T>,
    notifier: Arc<N>,
    config: DispatchConfig,
}

impl<D, T, N> DispatchEngine<D, T, N>
where
    D: Directory + 'static,
    T: Transport + 'static,
    N: Notifier + 'static,
{
    /// Create an engine over the given ports
    pub fn new(
        directory: Arc<D>,
        transport: Arc<T>,
        notifier: Arc<N>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            directory,
            transport,
            notifier,
            config,
        }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Apply one normalized patch to every resource in a folder.
    ///
    /// `label` is the user-visible folder name for notifications, falling
    /// back to the group id. Resolution failures surface as
    /// [`DispatchError::UnknownGroup`] with no calls and no notifications;
    /// an empty folder is a silent no-op.
    ///
    /// Under `Sequential`, this returns as soon as the batch is enqueued.
    pub async fn dispatch(
        &self,
        group: &GroupId,
        label: Option<&str>,
        patch: WirePatch,
    ) -> Result<DispatchReceipt, DispatchError> {
        let targets = self.directory.resolve_group_members(group).await?;
        if targets.is_empty() {
            tracing::debug!(%group, "folder resolved to no members, nothing to dispatch");
            return Ok(DispatchReceipt::empty());
        }

        let request = DispatchRequest {
            patch: Arc::new(patch),
            targets,
            strategy: self.config.strategy,
            inter_call_delay: self.config.inter_call_delay(),
        };

        let scope = label.unwrap_or(group.as_str()).to_owned();
        self.notifier.notify(
            NoticeKind::Info,
            &format!(
                "Applying settings to {} servers in {scope}...",
                request.targets.len()
            ),
        );
        tracing::info!(
            %group,
            targets = request.targets.len(),
            strategy = ?request.strategy,
            "dispatching folder settings"
        );

        match request.strategy {
            Strategy::Bulk => self.dispatch_bulk(&request, &scope).await,
            Strategy::Sequential => Ok(self.dispatch_sequential(&request, &scope)),
        }
    }

    /// One provider call for the whole folder.
    ///
    /// The success notification is optimistic: the provider reports no
    /// per-target outcome, only that it accepted the request.
    async fn dispatch_bulk(
        &self,
        request: &DispatchRequest,
        scope: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        let patches: BTreeMap<ResourceId, Arc<WirePatch>> = request
            .targets
            .iter()
            .map(|target| (target.clone(), Arc::clone(&request.patch)))
            .collect();

        self.transport.apply_bulk(&patches).await?;

        self.notifier.notify(
            NoticeKind::Success,
            &format!("Settings in {scope} set successfully!"),
        );
        Ok(DispatchReceipt {
            targets: request.targets.len(),
            queue: None,
        })
    }

    /// One delay-spaced job per target on a fresh queue, strict folder
    /// order. The final job in folder order emits the success notice:
    /// FIFO draining guarantees it finishes last, even at zero delay,
    /// where a queue-size probe could race the enqueue loop.
    fn dispatch_sequential(&self, request: &DispatchRequest, scope: &str) -> DispatchReceipt {
        let queue = TaskQueue::new();
        let done_message = format!("Settings in {scope} set successfully!");
        let last_index = request.targets.len() - 1;

        for (index, target) in request.targets.iter().enumerate() {
            let target = target.clone();
            let patch = Arc::clone(&request.patch);
            let transport = Arc::clone(&self.transport);
            let notifier = Arc::clone(&self.notifier);
            let delay = request.inter_call_delay;
            let done_message = done_message.clone();
            let is_last = index == last_index;

            queue.push(async move {
                tokio::time::sleep(delay).await;
                match transport.apply_single(&target, &patch).await {
                    Ok(()) => tracing::debug!(%target, "settings applied"),
                    Err(err) => {
                        // Ambient error channel: later jobs still run, and
                        // earlier successes are not rolled back.
                        tracing::error!(%target, error = %err, "settings update failed");
                    }
                }
                if is_last {
                    notifier.notify(NoticeKind::Success, &done_message);
                }
            });
        }

        DispatchReceipt {
            targets: request.targets.len(),
            queue: Some(queue),
        }
    }

    /// Apply a privacy patch to a folder through the restriction lists.
    ///
    /// Resolves members once, computes each touched list's replacement in
    /// core, and enqueues one replacement job per setting. Same resolution
    /// and notification semantics as [`Self::dispatch`].
    pub async fn apply_privacy<S>(
        &self,
        store: Arc<S>,
        group: &GroupId,
        label: Option<&str>,
        patch: &PrivacyPatch,
    ) -> Result<DispatchReceipt, DispatchError>
    where
        S: RestrictionStore + 'static,
    {
        let members = self.directory.resolve_group_members(group).await?;
        if members.is_empty() {
            tracing::debug!(%group, "folder resolved to no members, nothing to apply");
            return Ok(DispatchReceipt::empty());
        }

        let edits = patch.restriction_edits();
        if edits.is_empty() {
            return Ok(DispatchReceipt::empty());
        }

        let scope = label.unwrap_or(group.as_str()).to_owned();
        self.notifier.notify(
            NoticeKind::Info,
            &format!("Updating privacy settings in {scope}..."),
        );
        tracing::info!(%group, settings = edits.len(), "applying privacy settings");

        let queue = TaskQueue::new();
        let members = Arc::new(members);
        let done_message = format!("Privacy settings in {scope} set successfully!");
        let last_index = edits.len() - 1;

        for (index, (list, allow)) in edits.into_iter().enumerate() {
            let store = Arc::clone(&store);
            let notifier = Arc::clone(&self.notifier);
            let members = Arc::clone(&members);
            let done_message = done_message.clone();
            let is_last = index == last_index;

            queue.push(async move {
                let outcome = async {
                    let current = store.current(list).await?;
                    let next = apply_restriction(&current, &members, allow);
                    store.replace(list, next).await
                }
                .await;
                match outcome {
                    Ok(()) => tracing::debug!(%list, allow, "restriction list updated"),
                    Err(err) => {
                        tracing::error!(%list, error = %err, "restriction update failed");
                    }
                }
                if is_last {
                    notifier.notify(NoticeKind::Success, &done_message);
                }
            });
        }

        Ok(DispatchReceipt {
            targets: members.len(),
            queue: Some(queue),
        })
    }
}
