//! Asset group discovery.
//!
//! Scans the immediate subdirectories of a root directory. A subdirectory
//! is an asset group if it directly contains at least one file with a
//! recognized extension. Discovery is deliberately one level deep: nested
//! directories inside a group are ignored, and files directly in the root
//! belong to no group.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::naming;

/// One audio file within a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// File name relative to the group directory.
    pub file_name: String,
    /// Sanitized identifier, unique within the group.
    pub identifier: String,
    /// Dense 0-based value in file-name order.
    pub ordinal: u32,
}

/// One qualifying directory and its assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroup {
    /// Directory holding the assets.
    pub dir: PathBuf,
    /// Module name derived from the directory name.
    pub name: String,
    /// Assets in ordinal order.
    pub assets: Vec<Asset>,
}

/// Discovers every asset group under `root`, sorted by directory name.
pub fn scan_root(root: &Path, extensions: &[String]) -> GenerateResult<Vec<AssetGroup>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| GenerateError::io(root, e))? {
        let path = entry.map_err(|e| GenerateError::io(root, e))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut groups = Vec::new();
    for dir in dirs {
        match scan_group(&dir, extensions)? {
            Some(group) => groups.push(group),
            None => debug!("Skipping {}: no audio files", dir.display()),
        }
    }
    Ok(groups)
}

/// Builds the group for `dir`, or `None` if it holds no recognized files.
pub fn scan_group(dir: &Path, extensions: &[String]) -> GenerateResult<Option<AssetGroup>> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| GenerateError::io(dir, e))? {
        let path = entry.map_err(|e| GenerateError::io(dir, e))?.path();
        if !path.is_file() || !has_extension(&path, extensions) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(GenerateError::InvalidName {
                group: dir_name,
                file: path.to_string_lossy().into_owned(),
            });
        };
        files.push(file_name.to_string());
    }

    if files.is_empty() {
        return Ok(None);
    }
    files.sort();

    let mut claimed: HashMap<String, &str> = HashMap::with_capacity(files.len());
    let mut assets = Vec::with_capacity(files.len());
    for (ordinal, file_name) in files.iter().enumerate() {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let Some(identifier) = naming::asset_identifier(stem) else {
            return Err(GenerateError::InvalidName {
                group: dir_name,
                file: file_name.clone(),
            });
        };
        if let Some(first) = claimed.get(&identifier) {
            return Err(GenerateError::NameCollision {
                group: dir_name,
                identifier,
                first: (*first).to_string(),
                second: file_name.clone(),
            });
        }
        claimed.insert(identifier.clone(), file_name);

        debug!("{}: {} -> {} = {}", dir_name, file_name, identifier, ordinal);
        assets.push(Asset {
            file_name: file_name.clone(),
            identifier,
            ordinal: ordinal as u32,
        });
    }

    Ok(Some(AssetGroup {
        dir: dir.to_path_buf(),
        name: naming::group_name(&dir_name),
        assets,
    }))
}

/// Case-insensitive extension match.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}
