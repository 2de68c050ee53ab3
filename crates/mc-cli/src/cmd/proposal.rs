use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use mc_core::proposal::{self, ProposalStatus};
use std::path::Path;

#[derive(Subcommand)]
pub enum ProposalSubcommand {
    /// File a proposal for review
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Who is proposing (agent or bot name)
        #[arg(long)]
        source: Option<String>,
    },
    /// List proposals
    List {
        /// Only show proposals awaiting a decision
        #[arg(long)]
        pending: bool,
    },
    /// Approve a pending proposal
    Approve {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Reject a pending proposal
    Reject {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: ProposalSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProposalSubcommand::Add {
            title,
            description,
            source,
        } => add(root, &title.join(" "), description, source, json),
        ProposalSubcommand::List { pending } => list(root, pending, json),
        ProposalSubcommand::Approve { id, note } => {
            decide(root, &id, ProposalStatus::Approved, note, json)
        }
        ProposalSubcommand::Reject { id, note } => {
            decide(root, &id, ProposalStatus::Rejected, note, json)
        }
    }
}

fn add(
    root: &Path,
    title: &str,
    description: String,
    source: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let p = proposal::add(root, title, description, source).context("failed to add proposal")?;
    if json {
        print_json(&p)?;
    } else {
        println!("Filed proposal [{}]: {}", p.id, p.title);
    }
    Ok(())
}

fn list(root: &Path, pending_only: bool, json: bool) -> anyhow::Result<()> {
    let proposals: Vec<_> = proposal::list(root)?
        .into_iter()
        .filter(|p| !pending_only || p.status == ProposalStatus::Pending)
        .collect();
    if json {
        return print_json(&proposals);
    }
    let rows = proposals
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.status.to_string(),
                or_dash(p.source.as_deref()),
                p.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "SOURCE", "TITLE"], rows);
    Ok(())
}

fn decide(
    root: &Path,
    id: &str,
    decision: ProposalStatus,
    note: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let p = proposal::decide(root, id, decision, note)?;
    if json {
        print_json(&p)?;
    } else {
        println!("Proposal [{}] {}", p.id, p.status);
    }
    Ok(())
}
