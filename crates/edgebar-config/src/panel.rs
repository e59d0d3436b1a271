use serde::Deserialize;
use serde_json::{Map, Value};
use smart_default::SmartDefault;

/// Screen edge a panel is anchored to. Margins apply on the anchored edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Top,
    Bottom,
}

/// Layer-shell layer the panel surface is stacked on, independent of the
/// anchored edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Right,
}

/// Settings for the system-controls widget and its popup window. Two
/// instances (one per alignment) may coexist on a single panel.
#[derive(Debug, Clone, PartialEq, Deserialize, SmartDefault)]
#[serde(rename_all = "kebab-case", default)]
pub struct ControlsConfig {
    pub alignment: Alignment,
    pub show_values: bool,
    #[default(vec!["volume".to_string(), "brightness".to_string()])]
    pub components: Vec<String>,
}

/// Fully-specified configuration of a single panel, deserialized from a
/// normalized panel object. **Normalize first** — deserializing a raw panel
/// object works (every field defaults), but width defaulting against the
/// output geometry only happens in the normalizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PanelConfig {
    pub output: String,
    #[serde(default)]
    pub position: Edge,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub margin_top: i32,
    #[serde(default)]
    pub margin_bottom: i32,
    #[serde(default)]
    pub padding_vertical: u32,
    #[serde(default)]
    pub padding_horizontal: u32,
    #[serde(default = "default_spacing")]
    pub spacing: i32,
    #[serde(default)]
    pub homogeneous: bool,
    #[serde(default)]
    pub css_name: String,
    #[serde(default = "default_icons")]
    pub icons: String,
    #[serde(default)]
    pub items_padding: u32,
    #[serde(default)]
    pub modules_left: Vec<String>,
    #[serde(default)]
    pub modules_center: Vec<String>,
    #[serde(default)]
    pub modules_right: Vec<String>,
    /// Optional marker for the output that should end up focused once all
    /// panels are built. Any JSON-truthy value counts as marked.
    #[serde(default)]
    pub focus: Option<Value>,
    #[serde(default)]
    pub controls: bool,
    #[serde(default)]
    pub controls_settings: ControlsConfig,
    /// Per-module sub-specs, keyed by the tags used in the module lists.
    #[serde(flatten)]
    pub module_specs: Map<String, Value>,
}

fn default_spacing() -> i32 {
    6
}

fn default_icons() -> String {
    "light".to_string()
}

impl PanelConfig {
    /// Look up the sub-spec for a module tag, if the panel defines one.
    pub fn module_spec(&self, tag: &str) -> Option<&Value> {
        self.module_specs.get(tag).filter(|spec| spec.is_object())
    }

    pub fn is_focus_marked(&self) -> bool {
        self.focus.as_ref().is_some_and(is_truthy)
    }

    /// Width of the controls popup window, derived from the panel width.
    pub fn popup_width(&self) -> i32 {
        self.width / 6
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalize::normalize_panel;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse_panel(mut value: Value) -> PanelConfig {
        let map = value.as_object_mut().unwrap();
        normalize_panel(map, 1920);
        serde_json::from_value(Value::Object(map.clone())).unwrap()
    }

    #[test]
    fn normalized_panel_deserializes_into_typed_config() {
        let panel = parse_panel(json!({
            "output": "eDP-1",
            "position": "bottom",
            "layer": "bottom",
            "margin-bottom": 10,
            "modules-left": ["sway-workspaces", "button-launch"],
            "button-launch": { "command": "foot" },
        }));

        assert_eq!(panel.output, "eDP-1");
        assert_eq!(panel.position, Edge::Bottom);
        assert_eq!(panel.layer, Layer::Bottom);
        assert_eq!(panel.margin_bottom, 10);
        assert_eq!(panel.width, 1920);
        assert_eq!(panel.spacing, 6);
        assert_eq!(panel.modules_left, vec!["sway-workspaces", "button-launch"]);
        assert!(panel.module_spec("button-launch").is_some());
        assert!(panel.module_spec("sway-workspaces").is_none());
    }

    #[test]
    fn focus_marker_accepts_any_truthy_value() {
        assert!(parse_panel(json!({ "output": "A", "focus": "yes" })).is_focus_marked());
        assert!(parse_panel(json!({ "output": "A", "focus": true })).is_focus_marked());
        assert!(parse_panel(json!({ "output": "A", "focus": 1 })).is_focus_marked());
        assert!(!parse_panel(json!({ "output": "A", "focus": "" })).is_focus_marked());
        assert!(!parse_panel(json!({ "output": "A", "focus": false })).is_focus_marked());
        assert!(!parse_panel(json!({ "output": "A" })).is_focus_marked());
    }

    #[test]
    fn popup_width_is_a_sixth_of_the_panel() {
        let panel = parse_panel(json!({ "output": "A", "width": 1920 }));
        assert_eq!(panel.popup_width(), 320);
    }

    #[test]
    fn controls_settings_deserialize_with_defaults() {
        let panel = parse_panel(json!({
            "output": "A",
            "controls": true,
            "controls-settings": { "alignment": "left" },
        }));
        assert!(panel.controls);
        assert_eq!(panel.controls_settings.alignment, Alignment::Left);
        assert!(!panel.controls_settings.show_values);
        assert_eq!(panel.controls_settings.components, vec!["volume", "brightness"]);
    }
}
