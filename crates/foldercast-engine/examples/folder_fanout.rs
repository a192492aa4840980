//! Fan a notification patch out to a three-server folder, sequentially.
//!
//! Run with: `cargo run --example folder_fanout`

use foldercast_core::{
    Field, GroupId, MuteDuration, Normalize, NotificationEdit, NotificationPatch, PatchBuilder,
    PingMode,
};
use foldercast_engine::{DispatchConfig, DispatchEngine};
use foldercast_test_utils::{RecordingNotifier, RecordingTransport, ScriptedDirectory};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    // Session: user ticks mute (15 minutes) and only-mentions pings.
    let mut builder = PatchBuilder::new(NotificationPatch::default());
    builder.apply(NotificationEdit::Muted(Field::Sentinel));
    builder.apply(NotificationEdit::MuteDuration(Field::Value(
        MuteDuration::FIFTEEN_MINUTES,
    )));
    builder.apply(NotificationEdit::Pings(Field::Value(PingMode::OnlyMentions)));
    let wire = builder.into_patch().normalize();
    println!("wire patch: {}", serde_json::to_string_pretty(&wire)?);

    let directory = Arc::new(ScriptedDirectory::new().with_group("folder-1", &["g1", "g2", "g3"]));
    let transport = Arc::new(RecordingTransport::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let engine = DispatchEngine::new(
        directory,
        Arc::clone(&transport),
        Arc::clone(&notifier),
        DispatchConfig::new().with_inter_call_delay_ms(200),
    );

    let receipt = engine
        .dispatch(&GroupId::from("folder-1"), Some("Gaming"), wire)
        .await?;
    receipt.wait().await;

    for (kind, message) in notifier.notices() {
        println!("[{kind:?}] {message}");
    }
    println!("calls issued: {}", transport.calls().len());
    Ok(())
}
