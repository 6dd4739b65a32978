//! Converters for the nested trigger, effect and modifier structures.
//!
//! Every combat block in the source schema hangs off the same trigger
//! shape, so [`convert_trigger`] is shared and its output is merged into
//! whichever block owns the trigger. The other converters each map one
//! nested structure and recurse where the source nests (effects carry
//! status effects, add-modifiers carry a whole modifier).
//!
//! The schemas share a convention: a field whose value equals the engine
//! default (`["self"]` areas, `["Any"]` type filters, `"all"` distances) is
//! simply left out of the target document.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::error::Result;

use super::fields::{
    as_object, coerce_number, has_data, opt_val, put, require, require_array, require_object,
    val_or,
};

/// Convert a trigger block. The result is merged into the owning block
/// rather than nested.
pub fn convert_trigger(trigger: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert(
        "trigger".to_string(),
        val_or(trigger, "trigger", json!("constant")),
    );
    if has_data(trigger, "areas") && trigger["areas"] != json!(["self"]) {
        out.insert("trigger_area".to_string(), trigger["areas"].clone());
    }
    if has_data(trigger, "types") && trigger["types"] != json!(["Any"]) {
        out.insert("trigger_on_type".to_string(), trigger["types"].clone());
    }
    if has_data(trigger, "areaDistance") && trigger["areaDistance"] != json!("all") {
        out.insert("trigger_distance".to_string(), trigger["areaDistance"].clone());
    }
    if has_data(trigger, "requiresActivation") {
        out.insert(
            "needs_activation".to_string(),
            trigger["requiresActivation"].clone(),
        );
    }
    out
}

/// Convert an effect block: what happens when its trigger fires.
pub fn convert_effect(effect: &Map<String, Value>, file: &Path) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    out.insert("type".to_string(), val_or(effect, "type", json!("damage")));

    let value = match effect.get("value") {
        Some(value) => Some(coerce_number(value, "effect `value`", file)?),
        None => None,
    };
    put(&mut out, "value", value);

    let target = opt_val(effect, "target").filter(|t| t.as_str() != Some("unspecified"));
    put(&mut out, "target", target);

    if effect.get("mathType").and_then(Value::as_str) == Some("multiplicative") {
        out.insert("math".to_string(), json!("mul"));
    }

    if has_data(effect, "statuses") {
        let mut statuses = Vec::new();
        for status in require_array(effect, "statuses", "effect", file)? {
            let status = as_object(status, "status effect", file)?;
            statuses.push(Value::Object(convert_item_status(status, file)?));
        }
        out.insert("item_status_effects".to_string(), Value::Array(statuses));
    }

    Ok(out)
}

/// Convert a status effect applied by an item or effect.
pub fn convert_item_status(status: &Map<String, Value>, file: &Path) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    put(&mut out, "apply_immediately", opt_val(status, "applyRightAway"));
    out.insert(
        "type".to_string(),
        require(status, "type", "status effect", file)?.clone(),
    );

    let value = match status.get("value") {
        Some(value) => Some(coerce_number(value, "status effect `value`", file)?),
        None => None,
    };
    put(&mut out, "value", value);

    out.insert(
        "length".to_string(),
        require(status, "length", "status effect", file)?.clone(),
    );
    Ok(out)
}

/// Convert a modifier: a timed aura that applies effects over an area.
pub fn convert_modifier(modifier: &Map<String, Value>, file: &Path) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    if has_data(modifier, "areas") && modifier["areas"] != json!(["self"]) {
        out.insert("mod_area".to_string(), modifier["areas"].clone());
    }
    if has_data(modifier, "affectedTypes") && modifier["affectedTypes"] != json!(["Any"]) {
        out.insert("mod_types".to_string(), modifier["affectedTypes"].clone());
    }
    if has_data(modifier, "areaDistance") && modifier["areaDistance"] != json!("all") {
        out.insert("mod_distance".to_string(), modifier["areaDistance"].clone());
    }
    put(&mut out, "length", opt_val(modifier, "length"));
    put(&mut out, "mod_length", opt_val(modifier, "lengthForThisModifier"));

    out.extend(convert_trigger(require_object(
        modifier, "Trigger", "modifier", file,
    )?));

    let mut effects = Vec::new();
    for effect in require_array(modifier, "effects", "modifier", file)? {
        let effect = as_object(effect, "modifier effect", file)?;
        effects.push(Value::Object(convert_effect(effect, file)?));
    }
    out.insert("effects".to_string(), Value::Array(effects));

    Ok(out)
}

/// Convert an add-modifier block: a trigger that attaches a modifier to
/// items elsewhere on the board.
pub fn convert_add_modifier(addmod: &Map<String, Value>, file: &Path) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    out.extend(convert_trigger(require_object(
        addmod,
        "Trigger",
        "add-modifier",
        file,
    )?));

    if has_data(addmod, "areas") && addmod["areas"] != json!(["self"]) {
        out.insert("addmod_area".to_string(), addmod["areas"].clone());
    }
    if has_data(addmod, "affectedTypes") && addmod["affectedTypes"] != json!(["Any"]) {
        out.insert("addmod_types".to_string(), addmod["affectedTypes"].clone());
    }
    if has_data(addmod, "areaDistance") && addmod["areaDistance"] != json!("all") {
        out.insert("addmod_distance".to_string(), addmod["areaDistance"].clone());
    }
    put(&mut out, "addmod_length", opt_val(addmod, "lengthForThisModifier"));

    let modifier = require_object(addmod, "modifier", "add-modifier", file)?;
    out.insert(
        "modifier".to_string(),
        Value::Object(convert_modifier(modifier, file)?),
    );
    Ok(out)
}

/// Convert a create-effect block: a trigger that spawns new items.
pub fn convert_create_effect(effect: &Map<String, Value>, file: &Path) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    out.extend(convert_trigger(require_object(
        effect,
        "Trigger",
        "create effect",
        file,
    )?));

    out.insert(
        "create_type".to_string(),
        val_or(effect, "createType", json!("set")),
    );

    let areas = if has_data(effect, "allowedAreas") {
        effect["allowedAreas"].clone()
    } else {
        json!(["self"])
    };
    put(&mut out, "create_areas", (areas != json!(["self"])).then_some(areas));

    if has_data(effect, "areaDistance") && effect["areaDistance"] != json!("all") {
        out.insert("create_distance".to_string(), effect["areaDistance"].clone());
    }

    out.insert(
        "create_items".to_string(),
        val_or(effect, "itemsToCreate", json!([])),
    );
    out.insert(
        "create_types".to_string(),
        val_or(effect, "typesToCreate", json!([])),
    );
    // "raritesToCreate" is misspelled in the source schema itself.
    out.insert(
        "create_rarities".to_string(),
        val_or(effect, "raritesToCreate", json!([])),
    );
    Ok(out)
}

/// Convert a movement effect: a trigger that moves or rotates items.
pub fn convert_movement_effect(
    movement: &Map<String, Value>,
    file: &Path,
) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    out.extend(convert_trigger(require_object(
        movement,
        "Trigger",
        "movement effect",
        file,
    )?));

    if has_data(movement, "MoveAreas") && movement["MoveAreas"] != json!(["self"]) {
        out.insert("affected_area".to_string(), movement["MoveAreas"].clone());
    }
    if has_data(movement, "areaDistance") && movement["areaDistance"] != json!("all") {
        out.insert(
            "affected_area_distance".to_string(),
            movement["areaDistance"].clone(),
        );
    }

    let motion = require_object(movement, "Movement", "movement effect", file)?;
    if has_data(motion, "move") {
        // The move step is an {x, y} pair merged straight into the block.
        let step = as_object(&motion["move"], "movement `move`", file)?;
        out.extend(step.clone());
    }
    if has_data(motion, "rotation") {
        out.insert("rotation".to_string(), motion["rotation"].clone());
    }
    if has_data(motion, "type") {
        out.insert("movement_type".to_string(), motion["type"].clone());
    }
    if has_data(motion, "length") {
        out.insert("movement_length".to_string(), motion["length"].clone());
    }
    Ok(out)
}
