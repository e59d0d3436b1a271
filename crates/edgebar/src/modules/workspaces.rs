use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use edgebar_config::PanelConfig;
use gtk::prelude::*;
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::{print_result_err, sway::SwayClient};

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "kebab-case", default)]
pub struct WorkspacesConfig {
    #[default((1..=8).map(|n| n.to_string()).collect())]
    pub numbers: Vec<String>,
}

/// Workspace switcher: one button per configured workspace number.
pub fn build(panel: &PanelConfig, sway: &Rc<RefCell<SwayClient>>) -> Result<gtk::Box> {
    let config: WorkspacesConfig = super::module_config(panel, "sway-workspaces")?;
    let container = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    for number in config.numbers {
        let button = gtk::Button::with_label(&number);
        let sway = sway.clone();
        button.connect_clicked(move |_| {
            print_result_err!(
                "switching workspace",
                sway.borrow_mut().run_command(&format!("workspace number {}", number)),
            );
        });
        container.pack_start(&button, false, false, 0);
    }
    Ok(container)
}
