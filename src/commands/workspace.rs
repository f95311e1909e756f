use clap::{Args, Subcommand};

use deckhand::log_status;
use deckhand::workspace::{clean_go_workspace, ModuleRewrite};
use deckhand::{BulkResult, BulkSummary, ItemOutcome};

use super::{expand_path, CmdResult};

#[derive(Args)]
pub struct WorkspaceArgs {
    #[command(subcommand)]
    command: WorkspaceCommand,
}

#[derive(Subcommand)]
enum WorkspaceCommand {
    /// Rename `module main` go.mod declarations to the directory name
    CleanGo {
        /// Workspace root directory
        dir: String,
    },
}

pub fn run(
    args: WorkspaceArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<BulkResult<ModuleRewrite>> {
    match args.command {
        WorkspaceCommand::CleanGo { dir } => {
            let root = expand_path(&dir);
            let rewrites = clean_go_workspace(&root)?;

            let renamed = rewrites.iter().filter(|r| r.renamed).count();
            log_status!(
                "workspace",
                "Rewrote {} of {} go.mod files",
                renamed,
                rewrites.len()
            );

            let total = rewrites.len();
            let results = rewrites
                .into_iter()
                .map(|rewrite| ItemOutcome {
                    id: rewrite.dir.clone(),
                    result: Some(rewrite),
                    error: None,
                })
                .collect();

            let output = BulkResult {
                action: "clean-go".to_string(),
                results,
                summary: BulkSummary {
                    total,
                    succeeded: total,
                    failed: 0,
                },
            };
            Ok((output, 0))
        }
    }
}
