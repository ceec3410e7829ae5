use std::fmt::{Display, Formatter};
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Opaque handle to a shared file: `content://<authority>/<root>/<relative path>`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn authority(&self) -> Option<&str> {
        self.0.strip_prefix("content://")?.split('/').next()
    }
}

impl Display for ContentUri {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// File provider
//------------------------------------------------------------------------------

/// Maps files below a set of named roots to content URIs and back, so receivers
/// never see raw filesystem paths.
#[derive(Debug, Clone)]
pub struct FileProvider {
    authority: String,
    roots: Vec<(String, PathBuf)>,
}

impl FileProvider {
    pub fn new(authority: impl Into<String>) -> Self {
        Self { authority: authority.into(), roots: Vec::new() }
    }

    pub fn root(&mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> &mut Self {
        self.roots.push((name.into(), dir.into()));
        self
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn uri_for(&self, path: &Path) -> Result<ContentUri, StorageError> {
        let not_shared = |reason: &str| StorageError::ContentUri {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        // Longest root wins when roots are nested
        let (name, rel) = self
            .roots
            .iter()
            .filter_map(|(name, root)| path.strip_prefix(root).ok().map(|rel| (name, root, rel)))
            .max_by_key(|(_, root, _)| root.components().count())
            .map(|(name, _, rel)| (name, rel))
            .ok_or_else(|| not_shared("path is outside every shared root"))?;

        let mut uri = format!("content://{}/{}", self.authority, encode_segment(name));
        for comp in rel.components() {
            match comp {
                Component::Normal(seg) => {
                    let seg = seg.to_str().ok_or_else(|| not_shared("path is not valid UTF-8"))?;
                    uri.push('/');
                    uri.push_str(&encode_segment(seg));
                }
                _ => return Err(not_shared("path must not contain relative components")),
            }
        }
        if rel.as_os_str().is_empty() {
            return Err(not_shared("path is a shared root, not a file"));
        }

        Ok(ContentUri(uri))
    }

    /// Inverse of [`Self::uri_for`]; what a receiving application reads from.
    pub fn resolve(&self, uri: &ContentUri) -> Option<PathBuf> {
        let rest = uri.as_str().strip_prefix("content://")?;
        let mut segs = rest.split('/');
        if segs.next()? != self.authority {
            return None;
        }

        let name = decode_segment(segs.next()?)?;
        let (_, root) = self.roots.iter().find(|(n, _)| *n == name)?;
        let mut path = root.clone();
        for seg in segs {
            let seg = decode_segment(seg)?;
            if seg.is_empty() || seg == "." || seg == ".." {
                return None;
            }
            path.push(seg);
        }
        Some(path)
    }
}

fn encode_segment(seg: &str) -> String {
    let mut out = String::with_capacity(seg.len());
    for b in seg.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

fn decode_segment(seg: &str) -> Option<String> {
    let bytes = seg.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = seg.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
