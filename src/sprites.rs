//! Sprite asset naming and resolution.
//!
//! An item's sprite lives next to its definition file as
//! `sprite@<itemID>.png`, or `sprite@<itemID>_<n>.png` when the item
//! animates over several sprites. Item ids in the wild are written
//! inconsistently with spaces and underscores, so resolution probes the
//! exact name first and then both separator spellings before giving up.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{FdError, Result};

/// Sprite field value plus the on-disk files it refers to.
#[derive(Debug)]
pub struct ResolvedSprites {
    /// Value for the output `sprite` field: one filename, or a list of
    /// filenames for multi-sprite items.
    pub field: Value,
    /// Full paths of the resolved files, for copying.
    pub paths: Vec<PathBuf>,
}

/// Extract the item id from an input path: the text between the first `@`
/// in the file name and the `.json` suffix.
pub fn item_id(path: &Path) -> Result<String> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let rest = name.split_once('@').map(|(_, rest)| rest).ok_or_else(|| FdError::Input {
        path: path.to_path_buf(),
        message: "file name has no `@<itemID>` segment".to_string(),
        help: Some("item files are named like `item@Torch.json`".to_string()),
    })?;
    let id = rest.find(".json").map_or(rest, |end| &rest[..end]);
    Ok(id.to_string())
}

/// Resolve the sprite file(s) for the item at `input`.
///
/// `count` is the source `NumOfSprites`; anything above one switches to
/// indexed sprite names.
pub fn resolve_sprites(input: &Path, count: i64) -> Result<ResolvedSprites> {
    let id = item_id(input)?;
    let dir = input.parent().map(Path::to_path_buf).unwrap_or_default();

    if count > 1 {
        let mut names = Vec::new();
        let mut paths = Vec::new();
        for index in 0..count {
            let (name, path) = resolve_one(&dir, format!("sprite@{id}_{index}.png"))?;
            names.push(Value::String(name));
            paths.push(path);
        }
        Ok(ResolvedSprites {
            field: Value::Array(names),
            paths,
        })
    } else {
        let (name, path) = resolve_one(&dir, format!("sprite@{id}.png"))?;
        Ok(ResolvedSprites {
            field: Value::String(name),
            paths: vec![path],
        })
    }
}

fn resolve_one(dir: &Path, name: String) -> Result<(String, PathBuf)> {
    match resolve_variant(dir, &name) {
        Some(found) => {
            let path = dir.join(&found);
            Ok((found, path))
        }
        None => Err(FdError::Input {
            path: dir.join(&name),
            message: "sprite does not exist".to_string(),
            help: Some("also tried the name with spaces and underscores swapped".to_string()),
        }),
    }
}

/// Try the exact name, then spaces as underscores, then underscores as
/// spaces. Returns the spelling that exists.
fn resolve_variant(dir: &Path, name: &str) -> Option<String> {
    if dir.join(name).exists() {
        return Some(name.to_string());
    }
    let underscored = name.replace(' ', "_");
    if dir.join(&underscored).exists() {
        return Some(underscored);
    }
    let spaced = name.replace('_', " ");
    if dir.join(&spaced).exists() {
        return Some(spaced);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_item_id_extraction() {
        assert_eq!(item_id(Path::new("item@Torch.json")).unwrap(), "Torch");
        assert_eq!(
            item_id(Path::new("/mods/items/item@Fire Bomb.json")).unwrap(),
            "Fire Bomb"
        );
        assert_eq!(item_id(Path::new("itemNew@Axe.json")).unwrap(), "Axe");
    }

    #[test]
    fn test_item_id_requires_marker() {
        let err = item_id(Path::new("torch.json")).unwrap_err();
        assert!(err.to_string().contains("@"));
    }

    #[test]
    fn test_resolve_exact_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sprite@Torch.png"), b"png").unwrap();
        let input = dir.path().join("item@Torch.json");

        let resolved = resolve_sprites(&input, 1).unwrap();
        assert_eq!(resolved.field, Value::String("sprite@Torch.png".to_string()));
        assert_eq!(resolved.paths, vec![dir.path().join("sprite@Torch.png")]);
    }

    #[test]
    fn test_resolve_falls_back_to_underscores() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sprite@Fire_Bomb.png"), b"png").unwrap();
        let input = dir.path().join("item@Fire Bomb.json");

        let resolved = resolve_sprites(&input, 1).unwrap();
        assert_eq!(
            resolved.field,
            Value::String("sprite@Fire_Bomb.png".to_string())
        );
    }

    #[test]
    fn test_resolve_falls_back_to_spaces() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sprite@Fire Bomb.png"), b"png").unwrap();
        let input = dir.path().join("item@Fire_Bomb.json");

        let resolved = resolve_sprites(&input, 1).unwrap();
        assert_eq!(
            resolved.field,
            Value::String("sprite@Fire Bomb.png".to_string())
        );
    }

    #[test]
    fn test_resolve_missing_sprite_is_fatal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("item@Ghost.json");

        let err = resolve_sprites(&input, 1).unwrap_err();
        assert!(err.to_string().contains("sprite@Ghost.png"));
    }

    #[test]
    fn test_resolve_indexed_sprites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sprite@Fan_0.png"), b"png").unwrap();
        fs::write(dir.path().join("sprite@Fan_1.png"), b"png").unwrap();
        let input = dir.path().join("item@Fan.json");

        let resolved = resolve_sprites(&input, 2).unwrap();
        assert_eq!(
            resolved.field,
            Value::Array(vec![
                Value::String("sprite@Fan_0.png".to_string()),
                Value::String("sprite@Fan_1.png".to_string()),
            ])
        );
        assert_eq!(resolved.paths.len(), 2);
    }

    #[test]
    fn test_resolve_indexed_sprites_missing_frame() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sprite@Fan_0.png"), b"png").unwrap();
        let input = dir.path().join("item@Fan.json");

        assert!(resolve_sprites(&input, 2).is_err());
    }
}
