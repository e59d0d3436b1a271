use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use edgebar_config::PanelConfig;
use gtk::prelude::*;
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::{print_result_err, registry::RefreshTasks, sway::SwayClient, util::ellipsize};

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "kebab-case", default)]
pub struct TaskbarConfig {
    /// Show tasks from every output instead of only the panel's own.
    pub all_outputs: bool,
    #[default(24)]
    pub name_max_len: usize,
}

/// One button per open window, rebuilt from a fresh tree snapshot on every
/// refresh. Clicking a button focuses the window.
pub struct Taskbar {
    config: TaskbarConfig,
    output: String,
    container: gtk::Box,
    sway: Rc<RefCell<SwayClient>>,
}

impl Taskbar {
    pub fn new(panel: &PanelConfig, sway: &Rc<RefCell<SwayClient>>) -> Result<Self> {
        let config: TaskbarConfig = super::module_config(panel, "sway-taskbar")?;
        let container = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        let taskbar = Taskbar { config, output: panel.output.clone(), container, sway: sway.clone() };
        taskbar.render()?;
        Ok(taskbar)
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.container
    }

    fn render(&self) -> Result<()> {
        for child in self.container.children() {
            self.container.remove(&child);
        }

        let snapshot = self.sway.borrow_mut().tree_snapshot()?;
        let output_filter = (!self.config.all_outputs).then_some(self.output.as_str());
        for task in snapshot.tasks(output_filter) {
            let button = gtk::Button::with_label(&ellipsize(&task.title, self.config.name_max_len));
            button.set_tooltip_text(Some(&task.app_id));
            if task.focused {
                button.style_context().add_class("focused");
            }
            let sway = self.sway.clone();
            button.connect_clicked(move |_| {
                print_result_err!(
                    "focusing task from taskbar",
                    sway.borrow_mut().run_command(&format!("[con_id={}] focus", task.con_id)),
                );
            });
            self.container.pack_start(&button, false, false, 0);
        }
        self.container.show_all();
        Ok(())
    }
}

impl RefreshTasks for Taskbar {
    fn refresh(&self) -> Result<()> {
        self.render()
    }
}
