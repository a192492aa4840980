//! Foldercast Engine - Patch fan-out
//!
//! Takes a normalized wire patch plus a folder of target resources and
//! delivers it under one of two strategies:
//! - **Bulk**: one provider call covering every target, reported
//!   optimistically (per-target outcomes are unknown to the caller).
//! - **Sequential**: one call per target on a strictly ordered FIFO task
//!   queue, spaced by a client-side delay to stay under provider rate
//!   limits.
//!
//! The engine depends only on capability ports (directory, transport,
//! notifier, restriction store) supplied by the host integration layer,
//! which keeps it unit-testable against fakes.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod ports;
pub mod queue;

// Re-exports for convenience
pub use config::{DispatchConfig, Strategy};
pub use dispatch::{DispatchEngine, DispatchReceipt, DispatchRequest};
pub use error::{DirectoryError, DispatchError, TransportError};
pub use ports::{Directory, Notifier, NoticeKind, RestrictionStore, Transport};
pub use queue::TaskQueue;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dispatch engine
    pub use crate::{
        Directory, DispatchConfig, DispatchEngine, DispatchError, Notifier, NoticeKind, Strategy,
        TaskQueue, Transport,
    };
    pub use foldercast_core::{GroupId, Normalize, ResourceId, WirePatch};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
