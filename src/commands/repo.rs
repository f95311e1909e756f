use clap::{Args, Subcommand};
use serde::Serialize;

use deckhand::git::{GitOutput, Repository};

use super::{expand_path, CmdResult};

#[derive(Args)]
pub struct RepoArgs {
    /// Repository state directory (bare git dir)
    #[arg(long, global = true, default_value = ".deckhand/state")]
    git_dir: String,

    /// Worktree directory
    #[arg(long, global = true, default_value = ".deckhand/worktree")]
    work_tree: String,

    #[command(subcommand)]
    command: RepoCommand,
}

#[derive(Subcommand)]
enum RepoCommand {
    /// Initialize a bare state dir + worktree pair
    Init,
    /// Run a git command against the repository
    Run {
        /// Fail (nonzero exit) instead of capturing a failed invocation
        #[arg(long)]
        check: bool,

        /// Git arguments (e.g., -- log --oneline)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Add a remote to the repository
    AddRemote {
        /// Remote name (e.g., origin)
        name: String,

        /// Remote URL
        url: String,
    },
    /// Checkout a ref into the worktree
    Checkout {
        /// Tag name, branch name, or commit digest
        reference: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOutput {
    pub git_dir: String,
    pub work_tree: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRemoteOutput {
    pub name: String,
    pub url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutput {
    pub reference: String,
    pub work_tree: String,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RepoOutput {
    Init(InitOutput),
    Run(GitOutput),
    AddRemote(AddRemoteOutput),
    Checkout(CheckoutOutput),
}

pub fn run(args: RepoArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RepoOutput> {
    let git_dir = expand_path(&args.git_dir);
    let work_tree = expand_path(&args.work_tree);

    match args.command {
        RepoCommand::Init => {
            let repo = Repository::init(&git_dir, &work_tree)?;
            let output = InitOutput {
                git_dir: repo.git_dir.display().to_string(),
                work_tree: repo.work_tree.display().to_string(),
            };
            Ok((RepoOutput::Init(output), 0))
        }
        RepoCommand::Run { check, args: git_args } => {
            if git_args.is_empty() {
                return Err(deckhand::Error::validation_missing_argument(vec![
                    "args".to_string(),
                ]));
            }
            let repo = Repository::open(&git_dir, &work_tree)?;
            let output = repo.git_command(git_args).capture()?;
            if check && !output.success {
                let detail = if output.stderr.trim().is_empty() {
                    output.stdout.trim().to_string()
                } else {
                    output.stderr.trim().to_string()
                };
                return Err(deckhand::Error::git_command_failed(format!(
                    "git {} failed: {}",
                    output.args.join(" "),
                    detail
                )));
            }
            let exit_code = output.exit_code;
            Ok((RepoOutput::Run(output), exit_code))
        }
        RepoCommand::AddRemote { name, url } => {
            let repo = Repository::open(&git_dir, &work_tree)?;
            repo.with_remote(&name, &url)?;
            Ok((RepoOutput::AddRemote(AddRemoteOutput { name, url }), 0))
        }
        RepoCommand::Checkout { reference } => {
            let repo = Repository::open(&git_dir, &work_tree)?;
            let tree = repo.checkout(&reference)?;
            let output = CheckoutOutput {
                reference,
                work_tree: tree.display().to_string(),
            };
            Ok((RepoOutput::Checkout(output), 0))
        }
    }
}
