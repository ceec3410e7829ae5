//! The main screen: one text field, one image, export and share.
//!
//! ```text
//!          generate ok                    generate ok / failed
//!   Idle ──────────────> Ready ──────┐    (image replaced / kept)
//!    │ ^                   ^  <──────┘
//!    └─┘ empty / failed    └── export, share
//! ```

use std::path::PathBuf;

use crate::encoder::QrEncoder;
use crate::error::{Action, AppError, Result, StorageError};
use crate::platform::{Directory, Permission, PermissionStatus, Platform, ShareRequest};
use crate::raster::GeneratedImage;
use crate::storage::persist;

pub const DOWNLOAD_SUCCESSFUL: &str = "Download Successful";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    Idle,
    Ready,
}

/// What the screen shows and which controls accept input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ViewState {
    pub image_visible: bool,
    pub placeholder_visible: bool,
    pub export_enabled: bool,
    pub share_enabled: bool,
}

impl ViewState {
    fn idle() -> Self {
        Self {
            image_visible: false,
            placeholder_visible: true,
            export_enabled: false,
            share_enabled: false,
        }
    }

    fn ready() -> Self {
        Self {
            image_visible: true,
            placeholder_visible: false,
            export_enabled: true,
            share_enabled: true,
        }
    }
}

/// Blocking acknowledgement with a single dismissal control.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Dialog {
    pub message: String,
}

impl Dialog {
    pub const DISMISS_LABEL: &'static str = "OK";

    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ExportStatus {
    Saved(PathBuf),
    /// Deferred until [`MainController::on_permission_result`].
    AwaitingPermission,
}

// Main controller
//------------------------------------------------------------------------------

pub struct MainController<P: Platform> {
    encoder: QrEncoder,
    platform: P,
    filename: String,
    image: Option<GeneratedImage>,
    view: ViewState,
    dialog: Option<Dialog>,
    pending_export: bool,
}

impl<P: Platform> MainController<P> {
    pub fn new(encoder: QrEncoder, platform: P, filename: impl Into<String>) -> Self {
        Self {
            encoder,
            platform,
            filename: filename.into(),
            image: None,
            view: ViewState::idle(),
            dialog: None,
            pending_export: false,
        }
    }

    pub fn state(&self) -> State {
        if self.image.is_some() {
            State::Ready
        } else {
            State::Idle
        }
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        self.image.as_ref()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn awaiting_permission(&self) -> bool {
        self.pending_export
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Encodes `text` and makes it the current image. On failure the previous image,
    /// if any, stays current.
    pub fn generate(&mut self, text: &str) -> Result<&GeneratedImage> {
        if text.is_empty() {
            return Err(self.fail(AppError::EmptyInput));
        }

        match self.encoder.encode(text) {
            Ok(img) => {
                self.view = ViewState::ready();
                Ok(&*self.image.insert(img))
            }
            Err(err) => Err(self.fail(err.into())),
        }
    }

    /// Saves the current image to the public downloads directory. Without the storage
    /// permission the export is parked and the platform asked for it; a permission
    /// refused for good fails right away.
    pub fn export(&mut self) -> Result<ExportStatus> {
        if self.image.is_none() {
            return Err(self.fail(AppError::NoImageAvailable(Action::Export)));
        }

        match self.platform.permission(Permission::WriteStorage) {
            PermissionStatus::Granted => {}
            PermissionStatus::Prompt => {
                tracing::info!("Export waiting for storage permission");
                self.pending_export = true;
                self.platform.request_permission(Permission::WriteStorage);
                return Ok(ExportStatus::AwaitingPermission);
            }
            PermissionStatus::Denied => return Err(self.fail(AppError::PermissionDenied)),
        }

        self.save_to_downloads().map(ExportStatus::Saved)
    }

    /// Answer to the permission request started by [`Self::export`]. A grant runs the
    /// parked export; a denial drops it.
    pub fn on_permission_result(&mut self, granted: bool) -> Result<Option<PathBuf>> {
        self.platform.permission_result(Permission::WriteStorage, granted);
        let pending = std::mem::take(&mut self.pending_export);

        if !granted {
            return Err(self.fail(AppError::PermissionDenied));
        }
        if !pending {
            return Ok(None);
        }
        self.save_to_downloads().map(Some)
    }

    /// Saves the current image to the public pictures directory and hands a content
    /// URI for it to the platform's share sheet.
    pub fn share(&mut self) -> Result<ShareRequest> {
        let uri = self.persist_current(Directory::Pictures, Action::Share).and_then(|path| {
            self.platform
                .content_uri(&path)
                .map_err(|source| AppError::Storage { action: Action::Share, source })
        });

        match uri {
            Ok(uri) => {
                let request = ShareRequest::png(uri);
                self.platform.share(request.clone());
                Ok(request)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn save_to_downloads(&mut self) -> Result<PathBuf> {
        let path = match self.persist_current(Directory::Downloads, Action::Export) {
            Ok(path) => path,
            Err(err) => return Err(self.fail(err)),
        };

        // Only a completely written file reaches the media index
        if let Err(source) = self.platform.register_media(&path) {
            return Err(self.fail(AppError::Storage { action: Action::Export, source }));
        }

        self.dialog = Some(Dialog::new(DOWNLOAD_SUCCESSFUL));
        Ok(path)
    }

    fn persist_current(&self, dir: Directory, action: Action) -> Result<PathBuf> {
        let image = self.image.as_ref().ok_or(AppError::NoImageAvailable(action))?;
        let storage_err = |source| AppError::Storage { action, source };

        let dir_path = self
            .platform
            .public_dir(dir)
            .ok_or_else(|| storage_err(StorageError::NoDirectory(dir)))?;
        persist(image, &dir_path, &self.filename).map_err(storage_err)
    }

    /// Logs `err` and raises its dialog.
    fn fail(&mut self, err: AppError) -> AppError {
        match &err {
            AppError::Storage { .. } => tracing::error!(error = %err, "Storage failure"),
            _ => tracing::warn!(error = %err, "Request rejected"),
        }
        self.dialog = Some(Dialog::new(err.user_message()));
        err
    }
}
