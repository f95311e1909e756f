use clap::{Args, Subcommand};
use serde::Serialize;

use deckhand::defaults::{self, Defaults};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    pub path: String,
    pub exists: bool,
    pub defaults: Defaults,
}

pub fn run(args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show => {
            let path = defaults::config_path();
            let exists = std::path::Path::new(&path).exists();
            let output = ConfigOutput {
                path,
                exists,
                defaults: defaults::load_defaults(),
            };
            Ok((output, 0))
        }
    }
}
