//! Discovery of item definition files for folder conversion.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FdError, Result};

/// Find the `item*.json` files directly inside `dir`, sorted by path so
/// batch runs process them in a stable order.
pub fn find_item_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FdError::Io {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_file() && is_item_file(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Whether a file name matches the `item*.json` input pattern.
pub fn is_item_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with("item") && name.ends_with(".json")
}
