use std::{cell::RefCell, rc::Rc};

use anyhow::{Context, Result};
use edgebar_config::{normalize, PanelConfig};
use gtk::prelude::CssProviderExt;
use serde_json::Value;

use crate::{
    opts::Opt,
    panel,
    paths::PanelPaths,
    poll, print_result_err,
    registry::RegistryContext,
    sway::{OutputSet, SwayClient},
};

pub fn run(opts: Opt) -> Result<()> {
    let paths = opts
        .config_dir
        .map(PanelPaths::from_config_dir)
        .unwrap_or_else(PanelPaths::default)
        .context("Failed to initialize edgebar paths")?;
    log::info!("Loading paths: {}", &paths);

    std::fs::write(paths.get_pid_file(), std::process::id().to_string())
        .with_context(|| format!("Failed to write PID file {}", paths.get_pid_file().display()))?;

    let config_text = std::fs::read_to_string(paths.get_config_file())
        .with_context(|| format!("Failed to read config file {}", paths.get_config_file().display()))?;
    // a structurally invalid document is the one fatal config error
    let mut panels = normalize::parse_document(&config_text).context("Invalid configuration document")?;

    let sway = Rc::new(RefCell::new(SwayClient::connect()?));
    let outputs = OutputSet::discover(&mut sway.borrow_mut())?;
    log::info!("Discovered outputs: {}", outputs.names().join(", "));

    gtk::init()?;
    load_css(&paths);

    let registry = Rc::new(RefCell::new(RegistryContext::new()));
    let mut amended = false;
    let mut composed: Vec<PanelConfig> = Vec::new();

    for panel_value in &mut panels {
        let output_id = match panel_value.get("output").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                log::error!("Skipping panel without an output id");
                continue;
            }
        };
        let descriptor = match outputs.resolve(&output_id) {
            Ok(descriptor) => descriptor.clone(),
            Err(err) => {
                log::error!("Skipping panel: {}", err);
                continue;
            }
        };

        // focusing the output places the surface on it; it must happen
        // before composing the panel
        print_result_err!("focusing output before panel construction", sway.borrow_mut().focus_output(&output_id));

        amended |= normalize::normalize_panel(panel_value, descriptor.width);
        let panel_config: PanelConfig = match serde_json::from_value(Value::Object(panel_value.clone())) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Skipping panel on output {}: {}", output_id, err);
                continue;
            }
        };
        match panel::build_panel(&panel_config, &sway, &registry) {
            Ok(_window) => {
                log::info!("Created panel on output {}", panel_config.output);
                composed.push(panel_config);
            }
            Err(err) => log::error!("Failed to build panel on output {}: {:?}", panel_config.output, err),
        }
    }

    // construction leaves the last-built panel's output focused; the panel
    // carrying the focus marker wins as the very last startup step
    if let Some(output) = select_focus_target(&composed) {
        print_result_err!("focusing marked output", sway.borrow_mut().focus_output(&output));
    }

    if amended {
        let amended_file = paths.get_amended_config_file();
        log::info!("Saving amended config to {}", amended_file.display());
        let rendered = normalize::render_document(&panels)?;
        std::fs::write(&amended_file, rendered)
            .with_context(|| format!("Failed to write amended config {}", amended_file.display()))?;
    }

    let initial_snapshot = sway.borrow_mut().tree_snapshot().context("Failed to fetch the initial tree snapshot")?;
    poll::arm(sway, registry, initial_snapshot);

    gtk::main();
    log::info!("main loop finished");
    Ok(())
}

/// Which output should end up focused once every panel is built. With
/// several marked panels, the last one in document order wins.
fn select_focus_target(panels: &[PanelConfig]) -> Option<String> {
    panels.iter().rev().find(|panel| panel.is_focus_marked()).map(|panel| panel.output.clone())
}

fn load_css(paths: &PanelPaths) {
    let css_file = paths.get_css_file();
    let provider = gtk::CssProvider::new();
    if let Err(err) = provider.load_from_path(&css_file.to_string_lossy()) {
        log::warn!("Not loading {}: {}", css_file.display(), err);
        return;
    }
    if let Some(screen) = gdk::Screen::default() {
        gtk::StyleContext::add_provider_for_screen(&screen, &provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
    }
}
