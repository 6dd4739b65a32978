//! Conversion of Farlands item documents to the BPHMod item schema.
//!
//! [`convert_item`] drives the whole transformation for one document:
//! scalar field remapping, sprite resolution, footprint rasterization, the
//! nested trigger/effect/modifier converters, and the final pruning pass
//! that strips omitted and empty fields. Fields are written in a fixed
//! order so converted documents diff cleanly across runs.

pub mod effects;
mod fields;
pub mod prune;
pub mod shape;

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::{FdError, Result};
use crate::sprites;

use fields::{
    as_object, as_text, coerce_int, has_data, opt_val, put, require, require_array,
    require_object, val_or,
};

/// Result of converting one item document.
#[derive(Debug)]
pub struct Conversion {
    /// The converted, pruned item document.
    pub item: Value,
    /// Full paths of the item's resolved sprite files, for copying.
    pub sprites: Vec<PathBuf>,
    /// Notes about source features that were dropped rather than converted.
    pub warnings: Vec<String>,
}

/// Convert a parsed item document.
///
/// `path` is the document's input path; it names the item (the text between
/// `@` and `.json`), anchors sprite resolution, and contextualises errors.
pub fn convert_item(doc: &Value, path: &Path) -> Result<Conversion> {
    let src = as_object(doc, "item document", path)?;
    let mut out = Map::new();
    let mut warnings = Vec::new();

    out.insert(
        "name".to_string(),
        require(src, "Name", "item", path)?.clone(),
    );

    let sprite_count = match src.get("NumOfSprites") {
        Some(count) => coerce_int(count, "`NumOfSprites`", path)?,
        None => 1,
    };
    let resolved = sprites::resolve_sprites(path, sprite_count)?;
    out.insert("sprite".to_string(), resolved.field);

    out.insert(
        "type".to_string(),
        require(src, "ItemType", "item", path)?.clone(),
    );
    out.insert("rarity".to_string(), val_or(src, "Rarity", json!("common")));

    // These three fall away when they match engine defaults.
    put(
        &mut out,
        "animation",
        opt_val(src, "Animation").filter(|v| v.as_str() != Some("UseItem")),
    );
    put(
        &mut out,
        "soundeffect",
        opt_val(src, "SoundEffect")
            .filter(|v| v.as_str() != Some("") && v.as_str() != Some("None")),
    );
    put(
        &mut out,
        "playtype",
        opt_val(src, "Playtype").filter(|v| v.as_str() != Some("active")),
    );

    let rects = shape::parse_rects(require(src, "ItemShape", "item", path)?, path)?;
    out.insert("shape".to_string(), Value::from(shape::rasterize(&rects)));

    if has_data(src, "ItemUseCosts") {
        out.insert("use_costs".to_string(), convert_use_costs(src, path)?);
    }

    convert_flavor(src, &mut out, path)?;

    if has_data(src, "UseLimits") {
        out.insert("use_limits".to_string(), convert_use_limits(src, path)?);
    }

    if has_data(src, "SpawnLimits") {
        let spawn = as_object(&src["SpawnLimits"], "`SpawnLimits`", path)?;
        if has_data(spawn, "Characters") {
            out.insert(
                "supported_characters".to_string(),
                spawn["Characters"].clone(),
            );
        }
        if has_data(spawn, "Zones") {
            out.insert("found_in".to_string(), spawn["Zones"].clone());
        }
    }

    if has_data(src, "Effects") {
        let mut converted = Vec::new();
        for entry in require_array(src, "Effects", "item", path)? {
            let entry = as_object(entry, "`Effects` entry", path)?;
            let mut combat = Map::new();
            combat.extend(effects::convert_trigger(require_object(
                entry,
                "Trigger",
                "combat effect",
                path,
            )?));
            combat.extend(effects::convert_effect(
                require_object(entry, "Effect", "combat effect", path)?,
                path,
            )?);
            converted.push(Value::Object(combat));
        }
        out.insert("combat_effects".to_string(), Value::Array(converted));
    }

    if has_data(src, "CreateEffects") {
        let converted =
            convert_section(src, "CreateEffects", path, effects::convert_create_effect)?;
        out.insert("create_effects".to_string(), converted);
    }

    if has_data(src, "Modifiers") {
        let converted = convert_section(src, "Modifiers", path, effects::convert_modifier)?;
        out.insert("modifiers".to_string(), converted);
    }

    if has_data(src, "AddModifiers") {
        let converted = convert_section(src, "AddModifiers", path, effects::convert_add_modifier)?;
        out.insert("add_modifiers".to_string(), converted);
    }

    if has_data(src, "ItemStatuses") {
        let converted = convert_section(src, "ItemStatuses", path, effects::convert_item_status)?;
        out.insert("item_status_effects".to_string(), converted);
    }

    if has_data(src, "MovementEffects") {
        let converted =
            convert_section(src, "MovementEffects", path, effects::convert_movement_effect)?;
        out.insert("movement_effects".to_string(), converted);
    }

    let mut movable = Map::new();
    put(
        &mut movable,
        "area",
        opt_val(src, "MoveArea").filter(|v| v.as_str() != Some("self")),
    );
    put(
        &mut movable,
        "distance",
        opt_val(src, "MoveDistance").filter(|v| v.as_str() != Some("all")),
    );
    put(
        &mut movable,
        "place_on_type",
        opt_val(src, "MustBePlacedOnItemType").filter(|v| v.as_str() != Some("Grid")),
    );
    put(
        &mut movable,
        "place_on_type_combat",
        opt_val(src, "MustBePlacedOnItemTypeInCombat").filter(|v| v.as_str() != Some("Grid")),
    );
    out.insert("movable".to_string(), Value::Object(movable));

    if has_data(src, "ManaStonePower") {
        let power = coerce_int(&src["ManaStonePower"], "`ManaStonePower`", path)?;
        if power > 0 {
            out.insert("manastone".to_string(), json!({"max_mana": power}));
        }
    }

    if has_data(src, "ContextMenuOptions") {
        warnings.push("context menu options are not supported and were dropped".to_string());
    }

    let item = prune::prune(Value::Object(out)).unwrap_or_else(|| Value::Object(Map::new()));
    Ok(Conversion {
        item,
        sprites: resolved.paths,
        warnings,
    })
}

/// Convert one of the repeated nested sections with the given converter.
fn convert_section(
    src: &Map<String, Value>,
    key: &str,
    file: &Path,
    convert: impl Fn(&Map<String, Value>, &Path) -> Result<Map<String, Value>>,
) -> Result<Value> {
    let mut converted = Vec::new();
    for entry in require_array(src, key, "item", file)? {
        let entry = as_object(entry, &format!("`{key}` entry"), file)?;
        converted.push(Value::Object(convert(entry, file)?));
    }
    Ok(Value::Array(converted))
}

/// Flatten `ItemUseCosts` into a map of cost type to amount. An entry
/// without an explicit type charges energy; an entry with neither type nor
/// value charges nothing and is skipped.
fn convert_use_costs(src: &Map<String, Value>, file: &Path) -> Result<Value> {
    let mut costs = Map::new();
    for cost in require_array(src, "ItemUseCosts", "item", file)? {
        let cost = as_object(cost, "use cost", file)?;
        if let Some(kind) = cost.get("type") {
            let kind = as_text(kind, "use cost `type`", file)?;
            let amount = coerce_int(
                require(cost, "value", "use cost", file)?,
                "use cost `value`",
                file,
            )?;
            costs.insert(kind.to_string(), Value::from(amount));
        } else if let Some(value) = cost.get("value") {
            let amount = coerce_int(value, "use cost `value`", file)?;
            costs.insert("energy".to_string(), Value::from(amount));
        }
    }
    Ok(Value::Object(costs))
}

/// Flatten `UseLimits` into a map of limit type to amount. Untyped limits
/// count total uses.
fn convert_use_limits(src: &Map<String, Value>, file: &Path) -> Result<Value> {
    let mut limits = Map::new();
    for limit in require_array(src, "UseLimits", "item", file)? {
        let limit = as_object(limit, "use limit", file)?;
        let kind = match limit.get("type") {
            Some(kind) => as_text(kind, "use limit `type`", file)?.to_string(),
            None => "total".to_string(),
        };
        let amount = coerce_int(
            require(limit, "value", "use limit", file)?,
            "use limit `value`",
            file,
        )?;
        limits.insert(kind, Value::from(amount));
    }
    Ok(Value::Object(limits))
}

/// Pick the item's flavor text: `Flavor` when present, otherwise the
/// single-language `descriptions` list joined together. Multi-language
/// description tables have no target equivalent and are fatal.
fn convert_flavor(src: &Map<String, Value>, out: &mut Map<String, Value>, file: &Path) -> Result<()> {
    if has_data(src, "Flavor") {
        out.insert("flavor".to_string(), src["Flavor"].clone());
        return Ok(());
    }
    if !has_data(src, "descriptions") {
        return Ok(());
    }

    let mut text = String::new();
    for entry in require_array(src, "descriptions", "item", file)? {
        match entry {
            Value::String(part) => text.push_str(part),
            Value::Object(_) => {
                return Err(FdError::Input {
                    path: file.to_path_buf(),
                    message: "multi-language `descriptions` cannot be converted".to_string(),
                    help: Some(
                        "rename the field to `Flavor` with a single-language string".to_string(),
                    ),
                })
            }
            other => {
                return Err(FdError::input(
                    file,
                    format!("`descriptions` entries must be text, got {other}"),
                ))
            }
        }
    }
    out.insert("flavor".to_string(), Value::String(text));
    Ok(())
}
