//! # qrsnap
//!
//! Type some text, get a QR code. The image can be saved to the user's Downloads
//! directory or handed to the platform's share sheet.
//!
//! ## Features
//!
//! - **Fixed size output**: every code is a 400x400 black-on-white raster, whatever the
//!   symbol version, with a 4 module quiet zone
//! - **Crash-free saving**: files are written next to the target and renamed into place,
//!   so `QRCode.png` is either the old image or the new one
//! - **Lazy permissions**: saving asks for storage access on first use and resumes once
//!   it is granted
//! - **Sharing**: files are exposed as `content://` URIs with a temporary read grant
//!
//! ## Quick Start
//!
//! ### Encoding text
//!
//! ```rust
//! use qrsnap::QrEncoder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = QrEncoder::new().encode("https://example.com")?;
//! assert_eq!(img.dimensions(), (400, 400));
//! assert!(img.is_two_tone());
//! # Ok(())
//! # }
//! ```
//!
//! ### Driving the main screen
//!
//! ```rust,no_run
//! use qrsnap::{
//!     controller::{ExportStatus, MainController},
//!     platform::{DesktopPlatform, PermissionStatus},
//!     QrEncoder,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let platform = DesktopPlatform::new(
//!     dirs::download_dir(),
//!     dirs::picture_dir(),
//!     "com.app.qrcodegenerator.fileprovider",
//!     PermissionStatus::Granted,
//! );
//! let mut main = MainController::new(QrEncoder::new(), platform, "QRCode.png");
//!
//! main.generate("https://example.com")?;
//! if let ExportStatus::Saved(path) = main.export()? {
//!     println!("Saved to {}", path.display());
//! }
//! let share = main.share()?;
//! println!("Shared {} as {}", share.stream, share.mime_type);
//! # Ok(())
//! # }
//! ```
//!
//! ## Screens
//!
//! - **Splash**: shown for 3 seconds, then replaced by the main screen for good
//! - **Main**: text field, QR preview, Download and Share actions, one dialog at a time

pub mod app;
pub mod config;
pub mod controller;
pub mod encoder;
pub mod error;
pub mod platform;
pub mod raster;
pub mod splash;
pub mod storage;
pub mod tui;

pub use app::{App, AppEvent};
pub use config::Config;
pub use controller::MainController;
pub use encoder::{ECLevel, QrEncoder};
pub use error::{AppError, EncodeError, StorageError};
pub use raster::GeneratedImage;
pub use splash::SplashController;
