use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::Value;
use swayipc::Connection;

/// A panel referenced an output that wasn't in the set discovered at
/// startup. Fatal for that panel only, never for the process.
#[derive(Debug, thiserror::Error)]
#[error("unknown output '{0}', not among the outputs discovered at startup")]
pub struct UnknownOutput(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub name: String,
    pub width: i32,
    pub height: i32,
}

/// The set of physical outputs known to the compositor, captured once at
/// startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct OutputSet {
    outputs: HashMap<String, OutputDescriptor>,
}

impl OutputSet {
    pub fn discover(sway: &mut SwayClient) -> Result<Self> {
        let outputs = sway
            .connection
            .get_outputs()
            .context("Failed to list outputs over the sway IPC socket")?
            .into_iter()
            .map(|output| {
                let descriptor =
                    OutputDescriptor { name: output.name.clone(), width: output.rect.width, height: output.rect.height };
                (output.name, descriptor)
            })
            .collect();
        Ok(OutputSet { outputs })
    }

    pub fn resolve(&self, id: &str) -> Result<&OutputDescriptor, UnknownOutput> {
        self.outputs.get(id).ok_or_else(|| UnknownOutput(id.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.outputs.keys().map(|name| name.as_str()).collect()
    }

    #[cfg(test)]
    pub fn from_descriptors(descriptors: Vec<OutputDescriptor>) -> Self {
        OutputSet { outputs: descriptors.into_iter().map(|d| (d.name.clone(), d)).collect() }
    }
}

/// One task extracted from a tree snapshot, backing a taskbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub con_id: i64,
    pub title: String,
    pub app_id: String,
    pub focused: bool,
    pub output: Option<String>,
}

/// Opaque, comparable representation of the compositor's scene tree.
/// The poller only ever compares snapshots by value; the taskbar walks the
/// same structure to extract its task list.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot(Value);

impl TreeSnapshot {
    pub(crate) fn from_value(value: Value) -> Self {
        TreeSnapshot(value)
    }

    /// All leaf windows in the tree, in tree order, optionally filtered to a
    /// single output. Scratchpad and other internal outputs are skipped.
    pub fn tasks(&self, output_filter: Option<&str>) -> Vec<Task> {
        let mut tasks = Vec::new();
        collect_tasks(&self.0, None, output_filter, &mut tasks);
        tasks
    }
}

fn collect_tasks<'a>(node: &'a Value, output: Option<&'a str>, filter: Option<&str>, tasks: &mut Vec<Task>) {
    let node_type = node.get("type").and_then(Value::as_str).unwrap_or_default();
    let name = node.get("name").and_then(Value::as_str);

    let output = if node_type == "output" { name.or(output) } else { output };
    if output.is_some_and(|name| name.starts_with("__")) {
        return;
    }

    let app_id = node.get("app_id").and_then(Value::as_str);
    let window_class =
        node.get("window_properties").and_then(|props| props.get("class")).and_then(Value::as_str);

    if matches!(node_type, "con" | "floating_con") && (app_id.is_some() || window_class.is_some()) {
        let on_wanted_output = filter.is_none() || output == filter;
        if on_wanted_output {
            tasks.push(Task {
                con_id: node.get("id").and_then(Value::as_i64).unwrap_or_default(),
                title: name.unwrap_or_default().to_string(),
                app_id: app_id.or(window_class).unwrap_or_default().to_string(),
                focused: node.get("focused").and_then(Value::as_bool).unwrap_or_default(),
                output: output.map(str::to_string),
            });
        }
    }

    for key in ["nodes", "floating_nodes"] {
        if let Some(Value::Array(children)) = node.get(key) {
            for child in children {
                collect_tasks(child, output, filter, tasks);
            }
        }
    }
}

/// Thin wrapper around the sway IPC connection. The wire protocol is fully
/// owned by the `swayipc` crate; edgebar only issues commands and fetches
/// snapshots through it.
pub struct SwayClient {
    connection: Connection,
}

impl SwayClient {
    pub fn connect() -> Result<Self> {
        Ok(SwayClient { connection: Connection::new().context("Failed to connect to the sway IPC socket")? })
    }

    pub fn run_command(&mut self, command: &str) -> Result<()> {
        let outcomes =
            self.connection.run_command(command).with_context(|| format!("Failed to run sway command '{}'", command))?;
        // the transport can succeed while sway rejects the command itself
        first_command_failure(outcomes).with_context(|| format!("Sway rejected command '{}'", command))?;
        Ok(())
    }

    pub fn focus_output(&mut self, name: &str) -> Result<()> {
        self.run_command(&format!("focus output {}", name))
    }

    pub fn tree_snapshot(&mut self) -> Result<TreeSnapshot> {
        let tree = self.connection.get_tree().context("Failed to fetch the sway tree")?;
        Ok(TreeSnapshot::from_value(serde_json::to_value(tree)?))
    }
}

/// A command payload yields one outcome per command it contained; the whole
/// dispatch counts as failed as soon as any of them failed.
fn first_command_failure<E>(outcomes: Vec<Result<(), E>>) -> Result<(), E> {
    outcomes.into_iter().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot() -> TreeSnapshot {
        TreeSnapshot::from_value(json!({
            "type": "root",
            "name": "root",
            "nodes": [
                {
                    "type": "output",
                    "name": "__i3",
                    "nodes": [
                        { "type": "con", "name": "hidden", "id": 1, "app_id": "scratch", "nodes": [] }
                    ]
                },
                {
                    "type": "output",
                    "name": "eDP-1",
                    "nodes": [
                        {
                            "type": "workspace",
                            "name": "1",
                            "nodes": [
                                { "type": "con", "name": "term", "id": 10, "app_id": "foot", "focused": true, "nodes": [] },
                                {
                                    "type": "con",
                                    "name": null,
                                    "id": 11,
                                    "nodes": [
                                        { "type": "con", "name": "editor", "id": 12, "app_id": "nvim", "nodes": [] }
                                    ]
                                }
                            ],
                            "floating_nodes": [
                                {
                                    "type": "floating_con",
                                    "name": "xterm",
                                    "id": 13,
                                    "window_properties": { "class": "XTerm" },
                                    "nodes": []
                                }
                            ]
                        }
                    ]
                },
                {
                    "type": "output",
                    "name": "HDMI-A-1",
                    "nodes": [
                        {
                            "type": "workspace",
                            "name": "2",
                            "nodes": [
                                { "type": "con", "name": "browser", "id": 20, "app_id": "firefox", "nodes": [] }
                            ]
                        }
                    ]
                }
            ]
        }))
    }

    #[test]
    fn resolve_fails_for_unknown_output_only() {
        let outputs = OutputSet::from_descriptors(vec![OutputDescriptor {
            name: "eDP-1".to_string(),
            width: 1920,
            height: 1080,
        }]);
        assert!(outputs.resolve("eDP-1").is_ok());
        let err = outputs.resolve("HDMI-9").unwrap_err();
        assert_eq!(err.0, "HDMI-9");
    }

    #[test]
    fn tasks_are_collected_in_tree_order() {
        let tasks: Vec<i64> = snapshot().tasks(None).iter().map(|t| t.con_id).collect();
        assert_eq!(tasks, vec![10, 12, 13, 20]);
    }

    #[test]
    fn tasks_can_be_filtered_by_output() {
        let tasks = snapshot().tasks(Some("HDMI-A-1"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "browser");
        assert_eq!(tasks[0].app_id, "firefox");
        assert_eq!(tasks[0].output.as_deref(), Some("HDMI-A-1"));
    }

    #[test]
    fn scratchpad_windows_are_ignored() {
        assert!(snapshot().tasks(None).iter().all(|t| t.app_id != "scratch"));
    }

    #[test]
    fn x11_windows_fall_back_to_their_class() {
        let tasks = snapshot().tasks(Some("eDP-1"));
        let xterm = tasks.iter().find(|t| t.title == "xterm").unwrap();
        assert_eq!(xterm.app_id, "XTerm");
    }

    #[test]
    fn a_rejected_command_is_an_error_even_when_the_transport_succeeded() {
        assert!(first_command_failure::<String>(vec![Ok(()), Ok(())]).is_ok());
        let err = first_command_failure(vec![Ok(()), Err("Unknown output HDMI-9".to_string())]).unwrap_err();
        assert_eq!(err, "Unknown output HDMI-9");
    }

    #[test]
    fn snapshots_compare_by_value() {
        assert_eq!(snapshot(), snapshot());
        let other = TreeSnapshot::from_value(json!({ "type": "root", "nodes": [] }));
        assert_ne!(snapshot(), other);
    }
}
