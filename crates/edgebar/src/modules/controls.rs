use anyhow::Result;
use edgebar_config::{Alignment, Edge, PanelConfig};
use gtk::prelude::*;

use crate::{registry::PopupHandle, util::spawn_command};

/// System-controls widget: a panel button toggling a layer-shell popup
/// with one slider row per configured component. The popup is registered
/// with the registry so a tree change forces it closed while visible.
pub struct Controls {
    button: gtk::Button,
    popup: gtk::Window,
}

impl Controls {
    pub fn new(panel: &PanelConfig) -> Result<Self> {
        let button = gtk::Button::new();
        let image = gtk::Image::from_icon_name(Some("open-menu-symbolic"), gtk::IconSize::Menu);
        button.set_image(Some(&image));
        button.set_always_show_image(true);

        let popup = build_popup(panel)?;
        let popup_handle = popup.clone();
        button.connect_clicked(move |_| {
            if popup_handle.is_visible() {
                popup_handle.hide();
            } else {
                popup_handle.show_all();
            }
        });

        Ok(Controls { button, popup })
    }

    pub fn widget(&self) -> &gtk::Button {
        &self.button
    }
}

impl PopupHandle for Controls {
    fn popup_visible(&self) -> bool {
        self.popup.is_visible()
    }

    fn hide_popup(&self) {
        self.popup.hide();
    }
}

fn build_popup(panel: &PanelConfig) -> Result<gtk::Window> {
    let settings = &panel.controls_settings;
    let window = gtk::Window::new(gtk::WindowType::Toplevel);
    window.set_size_request(panel.popup_width(), 0);

    gtk_layer_shell::init_for_window(&window);
    gtk_layer_shell::set_layer(&window, gtk_layer_shell::Layer::Top);

    // sits just inside the panel's edge, on the alignment side
    let (edge, edge_margin) = match panel.position {
        Edge::Top => (gtk_layer_shell::Edge::Top, panel.height + panel.margin_top + 6),
        Edge::Bottom => (gtk_layer_shell::Edge::Bottom, panel.height + panel.margin_bottom + 6),
    };
    gtk_layer_shell::set_anchor(&window, edge, true);
    gtk_layer_shell::set_margin(&window, edge, edge_margin);
    let side = match settings.alignment {
        Alignment::Left => gtk_layer_shell::Edge::Left,
        Alignment::Right => gtk_layer_shell::Edge::Right,
    };
    gtk_layer_shell::set_anchor(&window, side, true);
    gtk_layer_shell::set_margin(&window, side, 6);

    let vbox = gtk::Box::new(gtk::Orientation::Vertical, 6);
    for component in &settings.components {
        match component.as_str() {
            "volume" => vbox.pack_start(
                &slider_row("audio-volume-high-symbolic", "pamixer --set-volume {}", settings.show_values),
                false,
                false,
                0,
            ),
            "brightness" => vbox.pack_start(
                &slider_row("display-brightness-symbolic", "brightnessctl set {}%", settings.show_values),
                false,
                false,
                0,
            ),
            other => log::warn!("unknown controls component '{}', skipping", other),
        }
    }
    window.add(&vbox);
    Ok(window)
}

fn slider_row(icon: &str, command_template: &'static str, show_value: bool) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let image = gtk::Image::from_icon_name(Some(icon), gtk::IconSize::Menu);
    row.pack_start(&image, false, false, 0);

    let scale = gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 100.0, 1.0);
    scale.set_draw_value(show_value);
    scale.connect_value_changed(move |scale| {
        spawn_command(&command_template.replace("{}", &format!("{}", scale.value() as i64)));
    });
    row.pack_start(&scale, true, true, 0);
    row
}
