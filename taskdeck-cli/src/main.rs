//! # Taskdeck CLI
//!
//! Single-user, in-memory todo manager with a numbered menu. All state
//! lives in the process: exiting discards every task, by design.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdeck-cli
//! ```

use std::io;

use taskdeck_cli::{menu, store::TaskStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Quiet by default; RUST_LOG=taskdeck_cli=debug for diagnostics on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut store = TaskStore::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?;

    tracing::debug!(tasks = store.len(), "Exiting; in-memory state discarded");

    Ok(())
}
