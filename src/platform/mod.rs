//! Host services the main screen depends on but does not own: public directories,
//! the runtime permission system, the media index and the share sheet.

mod desktop;
mod provider;

pub use desktop::DesktopPlatform;
pub use provider::{ContentUri, FileProvider};

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::StorageError;

pub const PNG_MIME_TYPE: &str = "image/png";
pub const SHARE_CHOOSER_TITLE: &str = "Share QR Code";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Directory {
    Downloads,
    Pictures,
}

impl Directory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Downloads => "downloads",
            Self::Pictures => "pictures",
        }
    }
}

impl Display for Directory {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Permission {
    WriteStorage,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    /// Not granted yet; asking may grant it.
    #[default]
    Prompt,
    /// Refused for good. Requests are not shown to the user anymore.
    Denied,
}

// Share request
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShareAction {
    Send,
}

/// A generic "send" of one attachment to whichever application the user picks.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ShareRequest {
    pub action: ShareAction,
    pub mime_type: &'static str,
    pub stream: ContentUri,
    /// Receiver may read `stream` for the duration of the share.
    pub grant_read: bool,
    pub chooser_title: &'static str,
}

impl ShareRequest {
    pub fn png(stream: ContentUri) -> Self {
        Self {
            action: ShareAction::Send,
            mime_type: PNG_MIME_TYPE,
            stream,
            grant_read: true,
            chooser_title: SHARE_CHOOSER_TITLE,
        }
    }
}

// Platform
//------------------------------------------------------------------------------

pub trait Platform {
    /// Public, user visible directory of the given kind, if the host has one.
    fn public_dir(&self, dir: Directory) -> Option<PathBuf>;

    fn permission(&self, permission: Permission) -> PermissionStatus;

    /// Starts the host's permission flow. The answer comes back through
    /// [`crate::controller::MainController::on_permission_result`].
    fn request_permission(&mut self, permission: Permission);

    /// Records the user's answer to a permission request.
    fn permission_result(&mut self, _permission: Permission, _granted: bool) {}

    /// Makes a fully written file show up in gallery and file browsers.
    fn register_media(&mut self, path: &Path) -> Result<(), StorageError>;

    fn content_uri(&self, path: &Path) -> Result<ContentUri, StorageError>;

    fn share(&mut self, request: ShareRequest);
}

#[cfg(test)]
mod platform_tests {
    use super::{ContentUri, ShareAction, ShareRequest};

    #[test]
    fn test_png_share_request() {
        let uri = ContentUri::new("content://app.fileprovider/pictures/QRCode.png");
        let req = ShareRequest::png(uri.clone());
        assert_eq!(req.action, ShareAction::Send);
        assert_eq!(req.mime_type, "image/png");
        assert_eq!(req.stream, uri);
        assert!(req.grant_read);
        assert_eq!(req.chooser_title, "Share QR Code");
    }
}
