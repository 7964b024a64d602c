//! Input fingerprinting for skipping unchanged rebuilds.
//!
//! The fingerprint covers the artifact format version and the name and contents of every
//! input file. When it matches the one stored beside the artifacts, the index is current.

use std::{
    fs,
    hash::{Hash, Hasher},
    io,
    path::Path,
};

use siphasher::sip::SipHasher24;

use crate::{IndexError, InputFiles, location::fingerprint_path};

/// Artifact format version. Bump this when the artifact layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// Computes the fingerprint of `inputs` as a 16-character hex string.
pub fn compute_fingerprint(inputs: &InputFiles) -> Result<String, IndexError> {
    let mut hasher = SipHasher24::new();
    FORMAT_VERSION.hash(&mut hasher);

    for path in inputs.all() {
        path.file_name().hash(&mut hasher);
        fs::read(path)?.hash(&mut hasher);
    }

    Ok(format!("{:016x}", hasher.finish()))
}

/// Reads the stored fingerprint from an index directory.
///
/// Returns `None` if the file doesn't exist or can't be read.
pub fn read_stored_fingerprint(index_dir: &Path) -> Option<String> {
    fs::read_to_string(fingerprint_path(index_dir))
        .ok()
        .map(|s| s.trim().to_string())
}

/// Writes the fingerprint into an index directory, creating the directory if needed.
pub fn write_fingerprint(index_dir: &Path, fingerprint: &str) -> io::Result<()> {
    fs::create_dir_all(index_dir)?;
    fs::write(fingerprint_path(index_dir), fingerprint)
}
