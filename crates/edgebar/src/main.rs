extern crate gtk;
extern crate gtk_layer_shell;

mod modules;
mod opts;
mod panel;
mod paths;
mod poll;
mod registry;
mod server;
mod sway;
mod util;

fn main() {
    let opts: opts::Opt = opts::Opt::from_env();

    let log_level_filter = if opts.debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder().filter(Some("edgebar"), log_level_filter).init();
    }

    if let Err(err) = server::run(opts) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}
