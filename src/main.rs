//! QuickCRM Form Builder
//!
//! Desktop entry point: build, preview and export lead-capture forms.

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .pretty()
        .init();

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   ⚡ QuickCRM Form Builder v{:<30}║", env!("CARGO_PKG_VERSION"));
    println!("║   Build, preview and embed lead-capture forms             ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting form builder");
    quickcrm_ui::launch();
}
