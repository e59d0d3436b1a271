use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use edgebar_config::{Alignment, Edge, Layer, PanelConfig};
use gtk::prelude::*;

use crate::{
    modules::{self, controls::Controls},
    registry::RegistryContext,
    sway::SwayClient,
};

/// Assemble the container tree for one panel and turn the window into an
/// anchored layer-shell surface.
///
/// The tree is: an outer vertical box holding one horizontal row; the row
/// holds an inner horizontal box (optionally homogeneous); the inner box
/// holds the three zones. The caller must already have focused the panel's
/// output so the surface lands on it.
pub fn build_panel(
    panel: &PanelConfig,
    sway: &Rc<RefCell<SwayClient>>,
    registry: &Rc<RefCell<RegistryContext>>,
) -> Result<gtk::Window> {
    let window = gtk::Window::new(gtk::WindowType::Toplevel);
    if !panel.css_name.is_empty() {
        window.set_widget_name(&panel.css_name);
    }
    window.set_size_request(panel.width, panel.height);

    let vbox = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    vbox.pack_start(&row, true, true, panel.padding_vertical);

    let inner_box = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    inner_box.set_homogeneous(panel.homogeneous);
    row.pack_start(&inner_box, true, true, panel.padding_horizontal);

    let left_box = gtk::Box::new(gtk::Orientation::Horizontal, panel.spacing);
    inner_box.pack_start(&left_box, false, true, 0);
    if panel.controls && panel.controls_settings.alignment == Alignment::Left {
        match Controls::new(panel) {
            Ok(controls) => {
                left_box.pack_start(controls.widget(), false, false, 0);
                registry.borrow_mut().register_controls(Rc::new(controls));
            }
            Err(err) => log::error!("Failed to construct controls for output {}: {:?}", panel.output, err),
        }
    }
    modules::populate_zone(&left_box, panel, &panel.modules_left, sway, registry);

    let center_box = gtk::Box::new(gtk::Orientation::Horizontal, panel.spacing);
    inner_box.pack_start(&center_box, true, false, 0);
    modules::populate_zone(&center_box, panel, &panel.modules_center, sway, registry);

    // end-packing with padding doesn't compose with the rest of the row,
    // so the right zone lives inside a wrapping box packed from the end
    let right_box = gtk::Box::new(gtk::Orientation::Horizontal, panel.spacing);
    let helper_box = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    helper_box.pack_end(&right_box, false, false, 0);
    inner_box.pack_start(&helper_box, false, true, 0);
    modules::populate_zone(&right_box, panel, &panel.modules_right, sway, registry);

    if panel.controls && panel.controls_settings.alignment == Alignment::Right {
        match Controls::new(panel) {
            Ok(controls) => {
                right_box.pack_end(controls.widget(), false, false, 0);
                registry.borrow_mut().register_controls(Rc::new(controls));
            }
            Err(err) => log::error!("Failed to construct controls for output {}: {:?}", panel.output, err),
        }
    }

    window.add(&vbox);
    init_layer_surface(&window, panel);

    window.show_all();
    window.connect_destroy(|_| gtk::main_quit());
    Ok(window)
}

fn init_layer_surface(window: &gtk::Window, panel: &PanelConfig) {
    gtk_layer_shell::init_for_window(window);
    gtk_layer_shell::auto_exclusive_zone_enable(window);

    match panel.layer {
        Layer::Top => gtk_layer_shell::set_layer(window, gtk_layer_shell::Layer::Top),
        Layer::Bottom => gtk_layer_shell::set_layer(window, gtk_layer_shell::Layer::Bottom),
    }

    match panel.position {
        Edge::Top => {
            gtk_layer_shell::set_anchor(window, gtk_layer_shell::Edge::Top, true);
            gtk_layer_shell::set_margin(window, gtk_layer_shell::Edge::Top, panel.margin_top);
        }
        Edge::Bottom => {
            gtk_layer_shell::set_anchor(window, gtk_layer_shell::Edge::Bottom, true);
            gtk_layer_shell::set_margin(window, gtk_layer_shell::Edge::Bottom, panel.margin_bottom);
        }
    }
}
