//! Filesystem boundary: reading the two inputs, writing the composite
//! document, removing the inputs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use tracing::{debug, info, warn};

use crate::error::{IoOp, MergeError, MergeResult};

/// Raw text of both input documents.
#[derive(Clone, Debug)]
pub struct SourcePair {
    pub legacy: String,
    pub modern: String,
}

/// Read both inputs. Nothing is read from `modern` if `legacy` fails.
pub fn load_documents(legacy: &Path, modern: &Path) -> MergeResult<SourcePair> {
    let legacy = read_text(legacy)?;
    let modern = read_text(modern)?;
    Ok(SourcePair { legacy, modern })
}

fn read_text(path: &Path) -> MergeResult<String> {
    let text = fs::read_to_string(path).map_err(|e| MergeError::io(IoOp::Read, path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "loaded document");
    Ok(text)
}

/// What happened to the inputs after the composite document was written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cleanup {
    pub removed: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
}

/// Write `document` to `output`, then remove `inputs` unless `keep_inputs`.
///
/// The document is written to a temporary file next to `output` and renamed
/// over it, so `output` is either absent, unchanged, or complete. Inputs are
/// only touched after the rename succeeded. An input that is the output path
/// itself is never removed.
pub fn write_and_cleanup(
    output: &Path,
    document: &str,
    inputs: &[&Path],
    keep_inputs: bool,
) -> MergeResult<Cleanup> {
    write_atomic(output, document)?;
    info!(path = %output.display(), bytes = document.len(), "composite document written");

    let mut cleanup = Cleanup::default();
    for input in inputs {
        if keep_inputs {
            cleanup.kept.push(input.to_path_buf());
        } else if *input == output {
            warn!(path = %input.display(), "input is the output path; not removing");
            cleanup.kept.push(input.to_path_buf());
        } else {
            fs::remove_file(input).map_err(|e| MergeError::io(IoOp::Remove, *input, e))?;
            debug!(path = %input.display(), "removed input");
            cleanup.removed.push(input.to_path_buf());
        }
    }
    Ok(cleanup)
}

fn write_atomic(output: &Path, document: &str) -> MergeResult<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |e: std::io::Error| MergeError::io(IoOp::Write, output, e);

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(document.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }
    // On failure the temporary file is dropped and deleted.
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}
