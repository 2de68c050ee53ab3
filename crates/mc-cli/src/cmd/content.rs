use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use mc_core::content::{self, ContentPatch, ContentStatus, NewContent};
use std::path::Path;

#[derive(Subcommand)]
pub enum ContentSubcommand {
    /// Add an idea to the pipeline
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// Target platform (default: x)
        #[arg(long)]
        platform: Option<String>,
        /// Draft text
        #[arg(long, default_value = "")]
        body: String,
    },
    /// List pipeline items
    List,
    /// Move an item to idea, draft, scheduled or posted
    Status {
        id: String,
        status: String,
        /// Publish time (RFC 3339); required when scheduling
        #[arg(long)]
        at: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: ContentSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ContentSubcommand::Add {
            title,
            platform,
            body,
        } => add(
            root,
            NewContent {
                title: title.join(" "),
                body,
                platform,
            },
            json,
        ),
        ContentSubcommand::List => list(root, json),
        ContentSubcommand::Status { id, status, at } => {
            set_status(root, &id, &status, at.as_deref(), json)
        }
    }
}

fn add(root: &Path, new: NewContent, json: bool) -> anyhow::Result<()> {
    let item = content::add(root, new).context("failed to add content")?;
    if json {
        print_json(&item)?;
    } else {
        println!("Added [{}] for {}: {}", item.id, item.platform, item.title);
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let items = content::list(root)?;
    if json {
        return print_json(&items);
    }
    let rows = items
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.status.to_string(),
                c.platform.clone(),
                c.scheduled_for
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                c.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "PLATFORM", "SCHEDULED", "TITLE"], rows);
    Ok(())
}

fn set_status(
    root: &Path,
    id: &str,
    status: &str,
    at: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let status: ContentStatus = status.parse()?;
    let scheduled_for = at
        .map(|raw| {
            raw.parse::<DateTime<Utc>>()
                .with_context(|| format!("invalid --at '{raw}': expected RFC 3339"))
        })
        .transpose()?;
    let item = content::update(
        root,
        id,
        ContentPatch {
            status: Some(status),
            scheduled_for,
            ..Default::default()
        },
    )?;
    if json {
        print_json(&item)?;
    } else {
        println!("Content [{}] is now {}", item.id, item.status);
    }
    Ok(())
}
