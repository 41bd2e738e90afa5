use std::path::{Path, PathBuf};

use dualpage_dom::ElementScope;
use serde::{Deserialize, Serialize};

use crate::error::{IoOp, MergeError, MergeResult};

/// Configuration for one merge run.
///
/// File names are resolved against `static_dir`; an absolute file name
/// replaces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Directory holding the build output.
    pub static_dir: PathBuf,
    /// Document produced by the legacy build.
    pub legacy_file: PathBuf,
    /// Document produced by the modern build.
    pub modern_file: PathBuf,
    /// Composite document written by the merge.
    pub output_file: PathBuf,
    /// Which body elements are classified.
    pub scope: ElementScope,
    /// When `true`, the inputs are left on disk after a successful write.
    pub keep_inputs: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("dist/static"),
            legacy_file: PathBuf::from("legacy.index.html"),
            modern_file: PathBuf::from("modern.index.html"),
            output_file: PathBuf::from("index.html"),
            scope: ElementScope::Children,
            keep_inputs: false,
        }
    }
}

impl MergeConfig {
    /// Parse a TOML document; missing keys take their default values.
    pub fn from_toml_str(text: &str) -> MergeResult<Self> {
        toml::from_str(text).map_err(|e| MergeError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> MergeResult<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| MergeError::io(IoOp::Read, path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.static_dir.join(&self.legacy_file)
    }

    pub fn modern_path(&self) -> PathBuf {
        self.static_dir.join(&self.modern_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.static_dir.join(&self.output_file)
    }
}
