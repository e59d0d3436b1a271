use crate::panel::PanelConfig;

/// Closed set of module kinds a panel zone can contain.
///
/// Singleton kinds are matched by their exact tag. `Button` and `Executor`
/// are parametrized: any tag with the matching prefix names an independent
/// instance, so one zone can hold `button-launcher` next to `button-power`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    Taskbar,
    Workspaces,
    Clock,
    Playerctl,
    Button(String),
    Executor(String),
}

impl ModuleKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sway-taskbar" => Some(ModuleKind::Taskbar),
            "sway-workspaces" => Some(ModuleKind::Workspaces),
            "clock" => Some(ModuleKind::Clock),
            "playerctl" => Some(ModuleKind::Playerctl),
            t if t.starts_with("button-") => Some(ModuleKind::Button(t.to_string())),
            t if t.starts_with("executor-") => Some(ModuleKind::Executor(t.to_string())),
            _ => None,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ModuleKind::Taskbar => "sway-taskbar",
            ModuleKind::Workspaces => "sway-workspaces",
            ModuleKind::Clock => "clock",
            ModuleKind::Playerctl => "playerctl",
            ModuleKind::Button(tag) | ModuleKind::Executor(tag) => tag,
        }
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Resolve a zone's ordered tag list into the module kinds that will
/// actually be instantiated, preserving input order.
///
/// Unrecognized tags and recognized tags without a matching sub-spec are
/// skipped with a diagnostic; neither aborts the zone. The clock is the one
/// kind that may run without a sub-spec, falling back to its defaults.
pub fn plan_zone(panel: &PanelConfig, tags: &[String]) -> Vec<ModuleKind> {
    tags.iter()
        .filter_map(|tag| {
            let kind = match ModuleKind::from_tag(tag) {
                Some(kind) => kind,
                None => {
                    log::warn!("unrecognized module tag '{}', skipping", tag);
                    return None;
                }
            };
            if panel.module_spec(tag).is_none() && kind != ModuleKind::Clock {
                log::warn!("'{}' not defined in this panel instance", tag);
                return None;
            }
            Some(kind)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse_panel(value: serde_json::Value) -> PanelConfig {
        serde_json::from_value(value).unwrap()
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn plan_preserves_tag_order() {
        let panel = parse_panel(json!({
            "output": "eDP-1",
            "sway-workspaces": {},
            "sway-taskbar": {},
            "clock": {},
        }));
        let plan = plan_zone(&panel, &tags(&["sway-workspaces", "sway-taskbar", "clock"]));
        assert_eq!(plan, vec![ModuleKind::Workspaces, ModuleKind::Taskbar, ModuleKind::Clock]);
    }

    #[test]
    fn prefixed_tags_instantiate_independently() {
        let panel = parse_panel(json!({
            "output": "eDP-1",
            "button-a": { "command": "a" },
            "button-b": { "command": "b" },
            "clock": {},
        }));
        let zone = tags(&["button-a", "clock", "button-b"]);
        let plan = plan_zone(&panel, &zone);
        assert_eq!(
            plan,
            vec![
                ModuleKind::Button("button-a".to_string()),
                ModuleKind::Clock,
                ModuleKind::Button("button-b".to_string()),
            ]
        );

        // dropping one sub-spec removes only that instance, leaving the
        // sibling and its position relative to the clock untouched
        let panel = parse_panel(json!({
            "output": "eDP-1",
            "button-b": { "command": "b" },
            "clock": {},
        }));
        let plan = plan_zone(&panel, &zone);
        assert_eq!(plan, vec![ModuleKind::Clock, ModuleKind::Button("button-b".to_string())]);
    }

    #[test]
    fn unconfigured_and_unknown_tags_are_skipped() {
        let panel = parse_panel(json!({ "output": "eDP-1", "clock": {} }));
        let plan = plan_zone(&panel, &tags(&["sway-taskbar", "no-such-module", "clock"]));
        assert_eq!(plan, vec![ModuleKind::Clock]);
    }

    #[test]
    fn clock_runs_without_a_sub_spec() {
        let panel = parse_panel(json!({ "output": "eDP-1" }));
        let plan = plan_zone(&panel, &tags(&["clock"]));
        assert_eq!(plan, vec![ModuleKind::Clock]);
    }

    #[test]
    fn executor_prefix_matches() {
        assert_eq!(
            ModuleKind::from_tag("executor-cpu"),
            Some(ModuleKind::Executor("executor-cpu".to_string()))
        );
        assert_eq!(ModuleKind::from_tag("executor"), None);
        assert_eq!(ModuleKind::from_tag("a-button-x"), None);
    }
}
