//! Foldercast Core - Sparse tri-state settings patches
//!
//! The data model behind folder-wide settings propagation:
//! - Tri-state fields (`Unset` / `Sentinel` / `Value`)
//! - Per-category patch types (notifications, privacy, profile)
//! - Copy-on-write patch builder with derived-field hooks
//! - Normalization of a sparse patch into the provider wire object
//!
//! # Example
//!
//! ```rust
//! use foldercast_core::{Field, MuteDuration, NotificationEdit, NotificationPatch,
//!     Normalize, PatchBuilder, PingMode};
//!
//! let mut builder = PatchBuilder::new(NotificationPatch::default());
//! builder.apply(NotificationEdit::Muted(Field::Sentinel));
//! builder.apply(NotificationEdit::Pings(Field::Value(PingMode::OnlyMentions)));
//! builder.apply(NotificationEdit::MuteDuration(Field::Value(
//!     MuteDuration::FIFTEEN_MINUTES,
//! )));
//!
//! let wire = builder.into_patch().normalize();
//! assert_eq!(wire.get("muted"), Some(&serde_json::json!(true)));
//! assert_eq!(wire.get("message_notifications"), Some(&serde_json::json!(1)));
//! assert!(wire.get("mute_config").is_some());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod builder;
pub mod clock;
pub mod field;
pub mod ids;
pub mod notifications;
pub mod privacy;
pub mod profile;
pub mod wire;

// Re-exports for convenience
pub use builder::{EditablePatch, PatchBuilder};
pub use clock::{Clock, SystemClock};
pub use field::Field;
pub use ids::{GroupId, ResourceId};
pub use notifications::{MuteDuration, NotificationEdit, NotificationPatch, PingMode};
pub use privacy::{apply_restriction, PrivacyEdit, PrivacyPatch, RestrictionList};
pub use profile::{ProfileEdit, ProfilePatch};
pub use wire::{Normalize, WirePatch};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
