use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Name of the sibling file the amended config gets written to whenever
/// normalization had to fill in at least one default.
pub const AMENDED_FILE_NAME: &str = "config_amended";

/// Parse the configuration document, which must be a top-level array of
/// panel objects. Anything else is a structural error and fatal for startup.
pub fn parse_document(text: &str) -> Result<Vec<Map<String, Value>>, ConfigError> {
    let document: Value = serde_json::from_str(text)?;
    let panels = match document {
        Value::Array(panels) => panels,
        other => {
            return Err(ConfigError::Structure(format!(
                "expected a top-level array of panel objects, found {}",
                json_type_name(&other)
            )))
        }
    };
    panels
        .into_iter()
        .enumerate()
        .map(|(index, panel)| match panel {
            Value::Object(map) => Ok(map),
            other => Err(ConfigError::Structure(format!(
                "panel entry {} is not an object, found {}",
                index,
                json_type_name(&other)
            ))),
        })
        .collect()
}

/// Serialize the (possibly amended) document back into the same shape as the
/// input. Key order is preserved.
pub fn render_document(panels: &[Map<String, Value>]) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(panels)?)
}

/// Fill every missing recognized key of a single panel object with its
/// documented default, returning whether anything had to be inserted.
///
/// Idempotent: running this on an already-normalized panel inserts nothing
/// and returns `false`. Missing keys are never an error.
pub fn normalize_panel(panel: &mut Map<String, Value>, output_width: i32) -> bool {
    let mut amended = false;

    amended |= check_key(panel, "position", Value::from("top"));
    amended |= check_key(panel, "layer", Value::from("top"));
    amended |= check_key(panel, "width", Value::from(output_width));
    amended |= check_key(panel, "height", Value::from(0));
    amended |= check_key(panel, "margin-top", Value::from(0));
    amended |= check_key(panel, "margin-bottom", Value::from(0));
    amended |= check_key(panel, "padding-vertical", Value::from(0));
    amended |= check_key(panel, "padding-horizontal", Value::from(0));
    amended |= check_key(panel, "items-padding", Value::from(0));
    amended |= check_key(panel, "spacing", Value::from(6));
    amended |= check_key(panel, "homogeneous", Value::from(false));
    amended |= check_key(panel, "css-name", Value::from(""));
    amended |= check_key(panel, "icons", Value::from("light"));
    amended |= check_key(panel, "modules-left", Value::Array(vec![]));
    amended |= check_key(panel, "modules-center", Value::Array(vec![]));
    amended |= check_key(panel, "modules-right", Value::Array(vec![]));
    amended |= check_key(panel, "controls", Value::from(false));
    amended |= check_key(panel, "controls-settings", Value::Object(Map::new()));

    if let Some(Value::Object(controls)) = panel.get_mut("controls-settings") {
        amended |= check_key(controls, "alignment", Value::from("right"));
        amended |= check_key(controls, "show-values", Value::from(false));
    }

    amended
}

fn check_key(object: &mut Map<String, Value>, key: &str, default: Value) -> bool {
    if object.contains_key(key) {
        return false;
    }
    log::debug!("key '{}' missing from config, using default {}", key, default);
    object.insert(key.to_string(), default);
    true
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
