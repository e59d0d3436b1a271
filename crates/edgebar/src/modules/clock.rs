use anyhow::Result;
use edgebar_config::PanelConfig;
use gtk::prelude::*;
use serde::Deserialize;
use smart_default::SmartDefault;

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClockConfig {
    #[default("%a, %d. %b  %H:%M:%S".to_string())]
    pub format: String,
}

/// The clock is the one module that runs without a sub-spec, falling back
/// to its default format.
pub fn build(panel: &PanelConfig) -> Result<gtk::Label> {
    let config: ClockConfig = super::module_config(panel, "clock")?;
    let label = gtk::Label::new(None);
    set_time(&label, &config.format);

    let label_handle = label.clone();
    glib::timeout_add_seconds_local(1, move || {
        set_time(&label_handle, &config.format);
        glib::Continue(true)
    });
    Ok(label)
}

fn set_time(label: &gtk::Label, format: &str) {
    label.set_text(&chrono::Local::now().format(format).to_string());
}
