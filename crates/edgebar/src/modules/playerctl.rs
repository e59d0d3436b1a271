use anyhow::Result;
use edgebar_config::PanelConfig;
use gtk::prelude::*;
use serde::Deserialize;

use crate::util::spawn_command;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct PlayerctlConfig {
    /// Restrict to a single player (passed as `--player`); empty means any.
    pub player: String,
}

const BUTTONS: [(&str, &str); 3] = [
    ("previous", "media-skip-backward"),
    ("play-pause", "media-playback-start"),
    ("next", "media-skip-forward"),
];

/// Media control strip driving `playerctl`.
pub fn build(panel: &PanelConfig) -> Result<gtk::Box> {
    let config: PlayerctlConfig = super::module_config(panel, "playerctl")?;
    let container = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    for (action, icon) in BUTTONS {
        let button = gtk::Button::new();
        let image = gtk::Image::from_icon_name(Some(icon), gtk::IconSize::Menu);
        button.set_image(Some(&image));
        button.set_always_show_image(true);

        let command = if config.player.is_empty() {
            format!("playerctl {}", action)
        } else {
            format!("playerctl --player {} {}", config.player, action)
        };
        button.connect_clicked(move |_| spawn_command(&command));
        container.pack_start(&button, false, false, 0);
    }
    Ok(container)
}
