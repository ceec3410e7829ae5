//! Writing the generated image to disk.
//!
//! Export and share go through the same [`persist`]: encode into a temporary sibling,
//! flush and sync it, then rename it over the target. A failed write never leaves a
//! truncated `QRCode.png` behind and never clobbers the previous one.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageReader};

use crate::error::StorageError;
use crate::raster::GeneratedImage;

pub fn persist(image: &GeneratedImage, dir: &Path, filename: &str) -> Result<PathBuf, StorageError> {
    if filename.is_empty() || Path::new(filename).file_name() != Some(OsStr::new(filename)) {
        return Err(StorageError::InvalidFileName(filename.to_string()));
    }

    fs::create_dir_all(dir)
        .map_err(|source| StorageError::Io { path: dir.to_path_buf(), source })?;

    let target = dir.join(filename);
    let part = dir.join(format!(".{filename}.part"));

    if let Err(err) = write_png(image, &part) {
        if let Err(rm_err) = fs::remove_file(&part) {
            tracing::debug!(path = %part.display(), error = %rm_err, "Temporary file not removed");
        }
        return Err(err);
    }

    if let Err(source) = fs::rename(&part, &target) {
        let _ = fs::remove_file(&part);
        return Err(StorageError::Io { path: target, source });
    }

    tracing::info!(path = %target.display(), "Saved QR code");
    Ok(target)
}

/// The file handle is closed when this returns, on success and on every error.
fn write_png(image: &GeneratedImage, path: &Path) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    image.write_png(&mut writer).map_err(|source| match source {
        image::ImageError::IoError(source) => io_err(source),
        source => StorageError::Png { path: path.to_path_buf(), source },
    })?;

    writer.flush().map_err(io_err)?;
    let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.sync_all().map_err(io_err)?;
    Ok(())
}

/// Reads a saved image back as 8-bit grayscale.
pub fn load_png(path: &Path) -> Result<GrayImage, StorageError> {
    let io_err = |source| StorageError::Io { path: path.to_path_buf(), source };

    let reader = ImageReader::open(path).map_err(io_err)?.with_guessed_format().map_err(io_err)?;
    let decoded =
        reader.decode().map_err(|source| StorageError::Png { path: path.to_path_buf(), source })?;
    Ok(decoded.to_luma8())
}
