use std::path::{Path, PathBuf};

use super::{
    ContentUri, Directory, FileProvider, Permission, PermissionStatus, Platform, ShareRequest,
};
use crate::config::StorageConfig;
use crate::error::StorageError;

/// Desktop host: XDG style user directories, an in-memory permission state answered
/// through the frontend prompt, and logged media registrations and shares.
#[derive(Debug)]
pub struct DesktopPlatform {
    downloads: Option<PathBuf>,
    pictures: Option<PathBuf>,
    provider: FileProvider,
    storage_permission: PermissionStatus,
    permission_requests: usize,
    media: Vec<PathBuf>,
    shares: Vec<ShareRequest>,
}

impl DesktopPlatform {
    pub fn new(
        downloads: Option<PathBuf>,
        pictures: Option<PathBuf>,
        authority: &str,
        storage_permission: PermissionStatus,
    ) -> Self {
        let mut provider = FileProvider::new(authority);
        if let Some(dir) = &downloads {
            provider.root(Directory::Downloads.name(), dir);
        }
        if let Some(dir) = &pictures {
            provider.root(Directory::Pictures.name(), dir);
        }

        Self {
            downloads,
            pictures,
            provider,
            storage_permission,
            permission_requests: 0,
            media: Vec::new(),
            shares: Vec::new(),
        }
    }

    /// Configured directories win over the user's `dirs` defaults.
    pub fn from_config(config: &StorageConfig) -> Self {
        let downloads = config.downloads_dir.clone().or_else(dirs::download_dir);
        let pictures = config.pictures_dir.clone().or_else(dirs::picture_dir);
        tracing::debug!(?downloads, ?pictures, "Resolved public directories");
        Self::new(downloads, pictures, &config.authority, config.permission)
    }

    pub fn file_provider(&self) -> &FileProvider {
        &self.provider
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests
    }

    pub fn registered_media(&self) -> &[PathBuf] {
        &self.media
    }

    pub fn shares(&self) -> &[ShareRequest] {
        &self.shares
    }

    pub fn last_share(&self) -> Option<&ShareRequest> {
        self.shares.last()
    }
}

impl Platform for DesktopPlatform {
    fn public_dir(&self, dir: Directory) -> Option<PathBuf> {
        match dir {
            Directory::Downloads => self.downloads.clone(),
            Directory::Pictures => self.pictures.clone(),
        }
    }

    fn permission(&self, permission: Permission) -> PermissionStatus {
        match permission {
            Permission::WriteStorage => self.storage_permission,
        }
    }

    fn request_permission(&mut self, permission: Permission) {
        tracing::info!(?permission, "Requesting permission");
        self.permission_requests += 1;
    }

    fn permission_result(&mut self, permission: Permission, granted: bool) {
        tracing::info!(?permission, granted, "Permission answered");
        match permission {
            Permission::WriteStorage => {
                // A single refusal can be asked again; only a configured denial is final
                self.storage_permission =
                    if granted { PermissionStatus::Granted } else { PermissionStatus::Prompt };
            }
        }
    }

    fn register_media(&mut self, path: &Path) -> Result<(), StorageError> {
        let meta = std::fs::metadata(path)
            .map_err(|source| StorageError::Io { path: path.to_path_buf(), source })?;
        if !meta.is_file() || meta.len() == 0 {
            return Err(StorageError::MediaIndex {
                path: path.to_path_buf(),
                reason: "not a complete file".to_string(),
            });
        }

        tracing::info!(path = %path.display(), bytes = meta.len(), "Registered media");
        if !self.media.iter().any(|p| p == path) {
            self.media.push(path.to_path_buf());
        }
        Ok(())
    }

    fn content_uri(&self, path: &Path) -> Result<ContentUri, StorageError> {
        self.provider.uri_for(path)
    }

    fn share(&mut self, request: ShareRequest) {
        tracing::info!(
            uri = %request.stream,
            mime = request.mime_type,
            grant_read = request.grant_read,
            "Dispatching share"
        );
        self.shares.push(request);
    }
}
