//! Index location resolution.
//!
//! The three artifacts and the input fingerprint live together in the configured output
//! directory under the data directory (`<data_dir>/xref/` by default).

use std::path::{Path, PathBuf};

use xref_config::Config;

/// By-term artifact file name.
pub const BY_TERM_FILE: &str = "xref.json";
/// By-spec artifact file name.
pub const BY_SPEC_FILE: &str = "specs.json";
/// Spec map artifact file name.
pub const SPEC_MAP_FILE: &str = "specmap.json";
/// File holding the fingerprint of the inputs the artifacts were built from.
const FINGERPRINT_FILE: &str = ".fingerprint";

/// Directory the index artifacts are written to.
pub fn index_directory(config: &Config) -> PathBuf {
    config.output_dir()
}

/// Path of the by-term artifact.
pub fn by_term_path(index_dir: &Path) -> PathBuf {
    index_dir.join(BY_TERM_FILE)
}

/// Path of the by-spec artifact.
pub fn by_spec_path(index_dir: &Path) -> PathBuf {
    index_dir.join(BY_SPEC_FILE)
}

/// Path of the spec map artifact.
pub fn spec_map_path(index_dir: &Path) -> PathBuf {
    index_dir.join(SPEC_MAP_FILE)
}

/// Path of the stored input fingerprint.
pub fn fingerprint_path(index_dir: &Path) -> PathBuf {
    index_dir.join(FINGERPRINT_FILE)
}

#[cfg(test)]
mod test {
    use xref_config::Settings;

    use super::*;

    #[test]
    fn index_directory_under_data_dir() {
        let config = Config {
            settings: Settings {
                data_dir: PathBuf::from("/srv/xref-data"),
            },
            ..Default::default()
        };
        assert_eq!(index_directory(&config), PathBuf::from("/srv/xref-data/xref"));
    }

    #[test]
    fn artifact_paths_in_index_dir() {
        let dir = PathBuf::from("/data/xref");
        assert_eq!(by_term_path(&dir), PathBuf::from("/data/xref/xref.json"));
        assert_eq!(by_spec_path(&dir), PathBuf::from("/data/xref/specs.json"));
        assert_eq!(spec_map_path(&dir), PathBuf::from("/data/xref/specmap.json"));
        assert_eq!(fingerprint_path(&dir), PathBuf::from("/data/xref/.fingerprint"));
    }
}
