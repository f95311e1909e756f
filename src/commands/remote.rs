use clap::{Args, Subcommand};
use serde::Serialize;

use deckhand::git::{Remote, RemoteBranch, RemoteTag};

use super::CmdResult;

#[derive(Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    command: RemoteCommand,
}

#[derive(Subcommand)]
enum RemoteCommand {
    /// List tags in a remote
    Tags {
        /// Remote URL
        url: String,

        /// Only include tags matching this regular expression
        #[arg(long)]
        filter: Option<String>,

        /// Exclude peeled ^{} entries (like `git ls-remote --refs`)
        #[arg(long)]
        refs: bool,
    },
    /// List branches in a remote
    Branches {
        /// Remote URL
        url: String,

        /// Only include branches matching this regular expression
        #[arg(long)]
        filter: Option<String>,
    },
    /// Lookup a single tag
    Tag {
        /// Remote URL
        url: String,

        /// Tag name (e.g., v0.1.2)
        name: String,
    },
    /// Lookup a single branch
    Branch {
        /// Remote URL
        url: String,

        /// Branch name (e.g., main)
        name: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagListOutput {
    pub url: String,
    pub count: usize,
    pub tags: Vec<RemoteTag>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchListOutput {
    pub url: String,
    pub count: usize,
    pub branches: Vec<RemoteBranch>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RemoteOutput {
    Tags(TagListOutput),
    Branches(BranchListOutput),
    Tag(RemoteTag),
    Branch(RemoteBranch),
}

pub fn run(args: RemoteArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RemoteOutput> {
    match args.command {
        RemoteCommand::Tags { url, filter, refs } => {
            let tags = Remote::new(&url).tags(filter.as_deref(), refs)?;
            let output = TagListOutput {
                url,
                count: tags.len(),
                tags,
            };
            Ok((RemoteOutput::Tags(output), 0))
        }
        RemoteCommand::Branches { url, filter } => {
            let branches = Remote::new(&url).branches(filter.as_deref())?;
            let output = BranchListOutput {
                url,
                count: branches.len(),
                branches,
            };
            Ok((RemoteOutput::Branches(output), 0))
        }
        RemoteCommand::Tag { url, name } => {
            let tag = Remote::new(&url).tag(&name)?;
            Ok((RemoteOutput::Tag(tag), 0))
        }
        RemoteCommand::Branch { url, name } => {
            let branch = Remote::new(&url).branch(&name)?;
            Ok((RemoteOutput::Branch(branch), 0))
        }
    }
}
