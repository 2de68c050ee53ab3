use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use mc_core::task::{self, Task, TaskStatus};
use std::path::Path;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// Group under a project
        #[arg(long)]
        project: Option<String>,
    },
    /// List tasks
    List {
        /// Only show tasks with this status (todo, in_progress, done)
        #[arg(long)]
        status: Option<String>,
    },
    /// Move a task to in_progress
    Start { id: String },
    /// Mark a task done
    Done { id: String },
    /// Delete a task
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::Add { title, project } => add(root, &title.join(" "), project, json),
        TaskSubcommand::List { status } => list(root, status.as_deref(), json),
        TaskSubcommand::Start { id } => set_status(root, &id, TaskStatus::InProgress, json),
        TaskSubcommand::Done { id } => set_status(root, &id, TaskStatus::Done, json),
        TaskSubcommand::Delete { id } => delete(root, &id, json),
    }
}

fn add(root: &Path, title: &str, project: Option<String>, json: bool) -> anyhow::Result<()> {
    let t = task::add(root, title, project).context("failed to add task")?;
    if json {
        print_json(&t)?;
    } else {
        println!("Added task [{}]: {}", t.id, t.title);
    }
    Ok(())
}

fn list(root: &Path, status: Option<&str>, json: bool) -> anyhow::Result<()> {
    let filter = status.map(str::parse::<TaskStatus>).transpose()?;
    let tasks: Vec<Task> = task::list(root)?
        .into_iter()
        .filter(|t| filter.map_or(true, |s| t.status == s))
        .collect();

    if json {
        return print_json(&tasks);
    }
    let rows = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.status.to_string(),
                or_dash(t.project.as_deref()),
                t.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "PROJECT", "TITLE"], rows);
    if !tasks.is_empty() {
        println!("\n{}", task::summarize(&tasks));
    }
    Ok(())
}

fn set_status(root: &Path, id: &str, status: TaskStatus, json: bool) -> anyhow::Result<()> {
    let t = task::set_status(root, id, status)?;
    if json {
        print_json(&t)?;
    } else {
        println!("Task [{}] is now {}", t.id, t.status);
    }
    Ok(())
}

fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    if !task::delete(root, id)? {
        anyhow::bail!("task not found: {id}");
    }
    if json {
        print_json(&serde_json::json!({ "deleted": true, "id": id }))?;
    } else {
        println!("Deleted task [{id}]");
    }
    Ok(())
}
