use anyhow::{bail, Result};
use edgebar_config::PanelConfig;
use gtk::prelude::*;
use serde::Deserialize;
use smart_default::SmartDefault;

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExecutorConfig {
    pub script: String,
    /// Refresh interval in seconds.
    #[default(1)]
    pub interval: u32,
}

/// Label showing the first output line of a script, re-run on its own
/// interval. Parametrized by its `executor-*` tag.
pub fn build(panel: &PanelConfig, tag: &str) -> Result<gtk::Label> {
    let config: ExecutorConfig = super::module_config(panel, tag)?;
    if config.script.is_empty() {
        bail!("executor '{}' has no script configured", tag);
    }

    let label = gtk::Label::new(None);
    run_script(&label, &config.script);

    let label_handle = label.clone();
    glib::timeout_add_seconds_local(config.interval.max(1), move || {
        run_script(&label_handle, &config.script);
        glib::Continue(true)
    });
    Ok(label)
}

fn run_script(label: &gtk::Label, script: &str) {
    match std::process::Command::new("/bin/sh").arg("-c").arg(script).output() {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            label.set_text(stdout.lines().next().unwrap_or(""));
        }
        Err(err) => log::warn!("Executor script '{}' failed: {}", script, err),
    }
}
