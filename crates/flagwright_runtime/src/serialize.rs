//! Declaration tree serialization.
//!
//! Trees are stored as JSON (`.json`) or `MessagePack` (`.msgpack`,
//! `.mp`). Every loaded tree is validated before it is returned.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flagwright_foundation::{Error, ErrorKind, Result};
use flagwright_syntax::SourceFile;

/// On-disk tree format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `serde_json`, pretty-printed on save.
    Json,
    /// `rmp-serde` with named fields.
    MessagePack,
}

impl Format {
    /// Picks the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("msgpack" | "mp") => Ok(Self::MessagePack),
            other => Err(Error::new(ErrorKind::Serialization(format!(
                "cannot infer tree format of '{}' from extension {other:?}",
                path.display()
            )))),
        }
    }
}

/// Serializes a tree.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(file: &SourceFile, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Json => serde_json::to_vec_pretty(file).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string()))),
        Format::MessagePack => {
            rmp_serde::to_vec_named(file).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
        }
    }
}

/// Deserializes and validates a tree.
///
/// # Errors
///
/// Returns an error if deserialization fails or the tree is malformed.
pub fn from_bytes(bytes: &[u8], format: Format) -> Result<SourceFile> {
    let file: SourceFile = match format {
        Format::Json => {
            serde_json::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))?
        }
        Format::MessagePack => {
            rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))?
        }
    };
    file.validate()?;
    Ok(file)
}

/// Saves a tree, choosing the format from the extension.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(file: &SourceFile, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(file, Format::from_path(path)?)?;

    let handle = File::create(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;
    let mut writer = BufWriter::new(handle);

    writer.write_all(&bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to write to file '{}': {e}",
            path.display()
        )))
    })?;

    writer.flush().map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to flush file '{}': {e}",
            path.display()
        )))
    })?;

    Ok(())
}

/// Loads and validates a tree, choosing the format from the extension.
///
/// The returned tree's `path` is set to `path` when the stored tree has
/// none.
///
/// # Errors
///
/// Returns an error if the file cannot be read, if deserialization
/// fails, or if the tree is malformed.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<SourceFile> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    let handle = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to open file '{}': {e}",
            path.display()
        )))
    })?;

    let mut reader = BufReader::new(handle);
    let mut bytes = Vec::new();

    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;

    let mut file = from_bytes(&bytes, format).map_err(|err| {
        let context = err
            .context
            .clone()
            .unwrap_or_default()
            .with_source(path.display().to_string());
        err.with_context(context)
    })?;
    if file.path.is_none() {
        file.path = Some(path.display().to_string());
    }
    tracing::debug!(path = %path.display(), declarations = file.declarations.len(), "loaded tree");
    Ok(file)
}
