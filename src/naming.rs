//! Output file names: `name.ext` compresses to `name.ext.huf`, which
//! decompresses to `name_unc.ext`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const COMPRESSED_EXTENSION: &str = "huf";

const UNCOMPRESSED_SUFFIX: &str = "_unc";

pub fn compressed_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

/// Strips the trailing `.huf` and inserts `_unc` before the remaining
/// extension, if there is one.
pub fn decompressed_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || Error::InvalidFileName(path.to_path_buf());

    if path.extension().map_or(true, |ext| ext != COMPRESSED_EXTENSION) {
        return Err(invalid());
    }
    let base = path.with_extension("");
    let stem = base.file_stem().ok_or_else(invalid)?;

    let mut name = OsString::from(stem);
    name.push(UNCOMPRESSED_SUFFIX);
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }

    Ok(base.with_file_name(name))
}
