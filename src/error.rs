use std::path::PathBuf;

use thiserror::Error;

use crate::platform::Directory;

// Error
//------------------------------------------------------------------------------

pub type Result<T> = std::result::Result<T, AppError>;

/// Everything the main screen can report back to the user. None of these are fatal.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("empty input")]
    EmptyInput,

    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodeError),

    #[error("{action} failed: {source}")]
    Storage {
        action: Action,
        #[source]
        source: StorageError,
    },

    #[error("permission to write to storage was denied")]
    PermissionDenied,

    #[error("no image available to {0}")]
    NoImageAvailable(Action),
}

/// User initiated operations that need a generated image.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Export,
    Share,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Export => f.write_str("export"),
            Self::Share => f.write_str("share"),
        }
    }
}

impl AppError {
    /// Short message shown in the acknowledgement dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Please Enter Any Text or Link".to_string(),
            Self::Encoding(EncodeError::DataTooLong) => {
                "Text is too long to fit in a QR Code.".to_string()
            }
            Self::Encoding(EncodeError::Unrepresentable { charset }) => {
                format!("Text contains characters that cannot be encoded as {charset}.")
            }
            Self::Encoding(_) => "Could not generate the QR Code.".to_string(),
            Self::Storage { action: Action::Export, .. } => "Could not save the QR Code.".to_string(),
            Self::Storage { action: Action::Share, .. } => "Could not share the QR Code.".to_string(),
            Self::PermissionDenied => "Permission denied to write to storage.".to_string(),
            Self::NoImageAvailable(Action::Export) => "No QR Code Generated To Save.".to_string(),
            Self::NoImageAvailable(Action::Share) => "No QR Code generated to share.".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("empty data")]
    EmptyData,

    #[error("data too long")]
    DataTooLong,

    #[error("text cannot be represented in {charset}")]
    Unrepresentable { charset: &'static str },

    #[error("unknown character set: {0}")]
    UnknownCharset(String),

    #[error("unsupported canvas {width}x{height} with a quiet zone of {quiet_zone}")]
    UnsupportedCanvas { width: u32, height: u32, quiet_zone: u32 },

    #[error("symbol error: {0}")]
    Symbol(qrcode::types::QrError),
}

impl From<qrcode::types::QrError> for EncodeError {
    fn from(err: qrcode::types::QrError) -> Self {
        match err {
            qrcode::types::QrError::DataTooLong => Self::DataTooLong,
            other => Self::Symbol(other),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no public {0} directory on this platform")]
    NoDirectory(Directory),

    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG for {path}: {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to register {path} with the media index: {reason}")]
    MediaIndex { path: PathBuf, reason: String },

    #[error("no content URI for {path}: {reason}")]
    ContentUri { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("no config directory on this platform")]
    NoConfigDir,
}

#[cfg(test)]
mod error_tests {
    use test_case::test_case;

    use super::{Action, AppError, EncodeError, StorageError};
    use crate::platform::Directory;

    #[test_case(AppError::EmptyInput, "Please Enter Any Text or Link"; "empty_input")]
    #[test_case(AppError::PermissionDenied, "Permission denied to write to storage."; "permission")]
    #[test_case(AppError::NoImageAvailable(Action::Export), "No QR Code Generated To Save."; "no_image_export")]
    #[test_case(AppError::NoImageAvailable(Action::Share), "No QR Code generated to share."; "no_image_share")]
    #[test_case(AppError::Encoding(EncodeError::DataTooLong), "Text is too long to fit in a QR Code."; "too_long")]
    #[test_case(AppError::Encoding(EncodeError::UnsupportedCanvas { width: 100_000, height: 100_000, quiet_zone: 4 }), "Could not generate the QR Code."; "unsupported_canvas")]
    #[test_case(AppError::Storage { action: Action::Export, source: StorageError::NoDirectory(Directory::Downloads) }, "Could not save the QR Code."; "storage_export")]
    #[test_case(AppError::Storage { action: Action::Share, source: StorageError::NoDirectory(Directory::Pictures) }, "Could not share the QR Code."; "storage_share")]
    fn test_user_message(err: AppError, msg: &str) {
        assert_eq!(err.user_message(), msg);
    }

    #[test]
    fn test_qr_error_conversion() {
        let err: EncodeError = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, EncodeError::DataTooLong));

        let err: EncodeError = qrcode::types::QrError::InvalidVersion.into();
        assert!(matches!(err, EncodeError::Symbol(_)));
    }

    #[test]
    fn test_display_chain() {
        let err = AppError::from(EncodeError::Unrepresentable { charset: "Shift_JIS" });
        assert_eq!(err.to_string(), "encoding failed: text cannot be represented in Shift_JIS");
        assert_eq!(
            err.user_message(),
            "Text contains characters that cannot be encoded as Shift_JIS."
        );
    }
}
