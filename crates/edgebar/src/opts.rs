use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author = "edgebar developers", version, about)]
pub struct Opt {
    /// Override the default configuration directory ($XDG_CONFIG_HOME/edgebar)
    #[arg(short = 'c', long = "config")]
    pub config_dir: Option<PathBuf>,

    /// Log debug information
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Opt {
    pub fn from_env() -> Self {
        Self::parse()
    }
}
