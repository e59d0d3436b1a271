use anyhow::Result;
use edgebar_config::PanelConfig;
use gtk::prelude::*;
use serde::Deserialize;

use crate::util::spawn_command;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct ButtonConfig {
    pub command: String,
    pub icon: String,
    pub label: String,
}

/// Custom launcher button, parametrized by its `button-*` tag.
pub fn build(panel: &PanelConfig, tag: &str) -> Result<gtk::Button> {
    let config: ButtonConfig = super::module_config(panel, tag)?;
    let button = gtk::Button::new();
    if !config.icon.is_empty() {
        let image = gtk::Image::from_icon_name(Some(&config.icon), gtk::IconSize::Menu);
        button.set_image(Some(&image));
        button.set_always_show_image(true);
    }
    if !config.label.is_empty() {
        button.set_label(&config.label);
    }
    button.connect_clicked(move |_| {
        if config.command.is_empty() {
            log::warn!("button has no command configured");
        } else {
            spawn_command(&config.command);
        }
    });
    Ok(button)
}
