use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw(RawOutputMode),
}

#[derive(Debug, Clone, Copy)]
enum RawOutputMode {
    InteractivePassthrough,
    CastText,
}

mod commands;
mod output;
mod tty;

use commands::{cast, config, remote, repo, workspace};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "deckhand")]
#[command(version = VERSION)]
#[command(about = "CLI toolkit for CI pipeline plumbing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query refs on a git remote
    Remote(remote::RemoteArgs),
    /// Drive a local state-dir + worktree repository
    Repo(repo::RepoArgs),
    /// Compose, inspect, and play terminal session casts
    Cast(cast::CastArgs),
    /// Workspace hygiene utilities
    Workspace(workspace::WorkspaceArgs),
    /// Manage global Deckhand configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Cast(args) if cast::is_interactive(args) => {
            ResponseMode::Raw(RawOutputMode::InteractivePassthrough)
        }
        Commands::Cast(args) if cast::is_raw_cast(args) => {
            ResponseMode::Raw(RawOutputMode::CastText)
        }
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let mode = response_mode(&cli.command);

    if let ResponseMode::Raw(RawOutputMode::InteractivePassthrough) = mode {
        if !tty::require_tty_for_interactive() {
            let err = deckhand::Error::validation_invalid_argument(
                "tty",
                "This command requires an interactive TTY",
                None,
                None,
            );
            output::print_result::<serde_json::Value>(Err(err)).ok();
            return std::process::ExitCode::from(2);
        }
    }

    if let ResponseMode::Raw(RawOutputMode::CastText) = mode {
        return match commands::run_raw(cli.command, &global) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                output::print_result::<serde_json::Value>(Err(err)).ok();
                std::process::ExitCode::from(1)
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    match mode {
        ResponseMode::Json => {
            output::print_json_result(json_result).ok();
        }
        ResponseMode::Raw(_) => {}
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
