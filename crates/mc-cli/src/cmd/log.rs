use crate::output::{or_dash, print_json, print_table};
use clap::Subcommand;
use mc_core::action_log;
use std::path::Path;

#[derive(Subcommand)]
pub enum LogSubcommand {
    /// Append an entry
    Add {
        /// Who did it (agent, bot, or "me")
        actor: String,
        #[arg(required = true)]
        action: Vec<String>,
        #[arg(long)]
        detail: Option<String>,
    },
    /// Show recent entries, newest first
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

pub fn run(root: &Path, subcmd: LogSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        LogSubcommand::Add {
            actor,
            action,
            detail,
        } => {
            let entry = action_log::append(root, &actor, &action.join(" "), detail)?;
            if json {
                print_json(&entry)?;
            } else {
                println!("Logged [{}] {}: {}", entry.id, entry.actor, entry.action);
            }
            Ok(())
        }
        LogSubcommand::List { limit } => {
            let entries = action_log::recent(root, limit)?;
            if json {
                return print_json(&entries);
            }
            let rows = entries
                .iter()
                .map(|e| {
                    vec![
                        e.at.format("%Y-%m-%d %H:%M").to_string(),
                        e.actor.clone(),
                        e.action.clone(),
                        or_dash(e.detail.as_deref()),
                    ]
                })
                .collect();
            print_table(&["AT", "ACTOR", "ACTION", "DETAIL"], rows);
            Ok(())
        }
    }
}
