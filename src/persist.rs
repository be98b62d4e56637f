//! Writing encoded images to disk.
//!
//! The encoder itself never touches the filesystem. This module resolves a
//! destination name, then replaces whatever is at that path with the
//! encoded bytes: the data goes to a uniquely named sibling temporary file
//! which is flushed, synced and renamed over the destination.

use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use enough::Stop;
use tempfile::NamedTempFile;

use crate::error::BitmapError;
use crate::image::EncodedImage;
use crate::pixel::Pixel;
use crate::EncodeRequest;

/// Name used when the caller passes an empty destination.
pub const DEFAULT_FILE_NAME: &str = "defaultOutput.bmp";

const EXTENSION: &str = ".bmp";

/// Errors from saving an encoded image.
///
/// Kept apart from [`BitmapError`] so callers can tell encoding failures
/// from I/O failures.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SaveError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding failed: {0}")]
    Encode(#[from] BitmapError),
}

/// How the `.bmp` extension is applied to destination names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtensionPolicy {
    /// Append `.bmp` unless the name already ends with it (any case).
    #[default]
    AppendIfMissing,
    /// Always append `.bmp`, even to names that already carry it.
    Always,
    /// Use the name as given.
    Never,
}

/// Destination naming options for [`SaveOptions::save`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOptions {
    pub extension: ExtensionPolicy,
    /// Substituted when the destination name is empty.
    pub default_name: String,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            extension: ExtensionPolicy::default(),
            default_name: DEFAULT_FILE_NAME.into(),
        }
    }
}

impl SaveOptions {
    pub fn with_extension(mut self, extension: ExtensionPolicy) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// The path `name` will be written to.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        if name.is_empty() {
            return PathBuf::from(&self.default_name);
        }
        let has_ext = name.len() >= EXTENSION.len()
            && name.is_char_boundary(name.len() - EXTENSION.len())
            && name[name.len() - EXTENSION.len()..].eq_ignore_ascii_case(EXTENSION);
        let append = match self.extension {
            ExtensionPolicy::AppendIfMissing => !has_ext,
            ExtensionPolicy::Always => true,
            ExtensionPolicy::Never => false,
        };
        if append {
            PathBuf::from(std::format!("{name}{EXTENSION}"))
        } else {
            PathBuf::from(name)
        }
    }

    /// Write `image` to the resolved destination, replacing any existing file.
    ///
    /// Returns the path that was written.
    pub fn save(&self, name: &str, image: &EncodedImage) -> Result<PathBuf, SaveError> {
        let path = self.resolve_path(name);
        write_replacing(&path, image.as_bytes()).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Save with [`SaveOptions::default`].
pub fn save(name: &str, image: &EncodedImage) -> Result<PathBuf, SaveError> {
    SaveOptions::default().save(name, image)
}

/// Encode `pixels` and save the result with default options.
pub fn encode_and_save(
    name: &str,
    pixels: &[Pixel],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<PathBuf, SaveError> {
    let image = EncodeRequest::new().encode(pixels, width, height, stop)?;
    save(name, &image)
}

/// Directory the temporary file is created in: the destination's parent.
fn temp_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut prefix = OsString::from(".");
    prefix.push(path.file_name().unwrap_or_default());
    prefix.push(".");
    // Dropping the temp file on any early return removes it.
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(temp_dir(path))?;
    write_synced(&mut tmp, bytes)?;

    if path.exists() {
        log::debug!("replacing existing file {}", path.display());
    }
    tmp.persist(path).map_err(|e| {
        log::warn!("failed to move {} into place: {}", e.file.path().display(), e.error);
        e.error
    })?;
    Ok(())
}

fn write_synced(tmp: &mut NamedTempFile, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(tmp.as_file_mut());
    writer.write_all(bytes)?;
    writer.flush()?;
    drop(writer);
    tmp.as_file().sync_all()
}
