//! Generates a QR code and saves it without a terminal UI.
//!
//! ```sh
//! cargo run --example headless_export -- "https://example.com" ./out
//! ```

use std::path::PathBuf;

use qrsnap::{
    config::DEFAULT_FILENAME,
    controller::{ExportStatus, MainController},
    platform::{DesktopPlatform, PermissionStatus},
    QrEncoder,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "https://example.com".to_string());
    let out = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let encoder = QrEncoder::new();
    println!("Encoder: {}", encoder.metadata());

    let platform = DesktopPlatform::new(
        Some(out.clone()),
        Some(out),
        qrsnap::config::DEFAULT_AUTHORITY,
        PermissionStatus::Granted,
    );
    let mut main = MainController::new(encoder, platform, DEFAULT_FILENAME);

    let img = main.generate(&text)?;
    println!("{}\n", img.modules().to_str(1));

    if let ExportStatus::Saved(path) = main.export()? {
        println!("Saved {}", path.display());
    }
    let share = main.share()?;
    println!("Share URI {}", share.stream);

    Ok(())
}
