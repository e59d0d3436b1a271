use std::{cell::RefCell, rc::Rc};

use anyhow::{Context, Result};
use edgebar_config::{plan_zone, ModuleKind, PanelConfig};
use gtk::prelude::*;
use serde::de::DeserializeOwned;

use crate::{registry::RegistryContext, sway::SwayClient};

pub mod button;
pub mod clock;
pub mod controls;
pub mod executor;
pub mod playerctl;
pub mod taskbar;
pub mod workspaces;

/// Construct one module per planned kind for a zone and pack it into the
/// zone's container. A failing module constructor is logged and skipped;
/// it never takes its siblings or the panel down with it.
pub fn populate_zone(
    container: &gtk::Box,
    panel: &PanelConfig,
    tags: &[String],
    sway: &Rc<RefCell<SwayClient>>,
    registry: &Rc<RefCell<RegistryContext>>,
) {
    for kind in plan_zone(panel, tags) {
        let widget: Result<gtk::Widget> = match &kind {
            ModuleKind::Taskbar => taskbar::Taskbar::new(panel, sway).map(|taskbar| {
                let widget = taskbar.widget().clone().upcast();
                registry.borrow_mut().register_taskbar(Rc::new(taskbar));
                widget
            }),
            ModuleKind::Workspaces => workspaces::build(panel, sway).map(|w| w.upcast()),
            ModuleKind::Clock => clock::build(panel).map(|w| w.upcast()),
            ModuleKind::Playerctl => playerctl::build(panel).map(|w| w.upcast()),
            ModuleKind::Button(tag) => button::build(panel, tag).map(|w| w.upcast()),
            ModuleKind::Executor(tag) => executor::build(panel, tag).map(|w| w.upcast()),
        };
        match widget {
            Ok(widget) => container.pack_start(&widget, false, false, panel.items_padding),
            Err(err) => log::error!("Failed to construct module '{}': {:?}", kind, err),
        }
    }
}

/// Deserialize a module's sub-spec from the panel, falling back to the
/// module's defaults when the panel doesn't define one.
pub(crate) fn module_config<T: DeserializeOwned + Default>(panel: &PanelConfig, tag: &str) -> Result<T> {
    match panel.module_spec(tag) {
        Some(spec) => {
            serde_json::from_value(spec.clone()).with_context(|| format!("Invalid configuration for module '{}'", tag))
        }
        None => Ok(T::default()),
    }
}
