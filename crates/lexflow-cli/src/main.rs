//! Lexflow CLI: terminal client for the legal workflow intranet.
//!
//! Reads the same environment as the API server (`.env` is honored).

use anyhow::Context;
use clap::{Parser, Subcommand};
use lexflow_cli::files::load_attachment;
use lexflow_cli::interactive::InteractiveSession;
use lexflow_cli::Services;
use lexflow_core::models::{MatterChoice, MatterPicklist, WorkflowFields, WorkflowForm, WorkflowId};
use lexflow_core::{Config, Session};
use lexflow_infra::init_cli_tracing;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexflow", about = "Legal workflow intranet CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: sign in, pick a workflow, fill in the form
    Shell,
    /// Print the workflow catalog
    Workflows,
    /// Print the active Clio matters
    Matters,
    /// Submit one workflow form without prompting
    Submit {
        /// Workflow id, e.g. demand-letter or motion
        #[arg(long)]
        workflow: WorkflowId,
        /// Matter value, or "other" together with --matter-other
        #[arg(long)]
        matter: String,
        /// Free-text matter used when --matter is "other"
        #[arg(long)]
        matter_other: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Stowers demand flag (demand-letter only)
        #[arg(long)]
        stowers_demand: bool,
        /// Motion type (motion only)
        #[arg(long)]
        motion_type: Option<String>,
        /// Attachment to upload; repeat for several
        #[arg(long = "file")]
        files: Vec<PathBuf>,
        #[arg(long, env = "LEXFLOW_USERNAME")]
        username: String,
        #[arg(long, env = "LEXFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_cli_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config
        .validate()
        .context("Configuration validation failed")?;
    let services = Services::from_config(&config)?;

    match cli.command {
        Commands::Shell => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            InteractiveSession::new(services, stdin.lock(), stdout.lock())
                .run()
                .await?;
        }
        Commands::Workflows => {
            for workflow in services.submissions.catalog().iter() {
                let status = if workflow.is_configured() {
                    "configured"
                } else {
                    "not configured"
                };
                println!("{:<20} {:<28} {}", workflow.id, workflow.title, status);
            }
        }
        Commands::Matters => match services.clio.lookup().await {
            MatterPicklist::Loaded(matters) => {
                for matter in &matters {
                    println!("{:>10}  {}", matter.id, matter.label());
                }
            }
            MatterPicklist::Unavailable { reason } => {
                anyhow::bail!("Matter lookup failed: {}", reason);
            }
        },
        Commands::Submit {
            workflow,
            matter,
            matter_other,
            notes,
            stowers_demand,
            motion_type,
            files,
            username,
            password,
        } => {
            let session = Session::open(&username, &password)
                .context("Invalid credentials. Please try again.")?;

            let mut attachments = Vec::with_capacity(files.len());
            for path in &files {
                attachments.push(load_attachment(path).await?);
            }

            let form = WorkflowForm::new(MatterChoice::from_selection(
                &matter,
                matter_other.as_deref(),
            ))
            .with_notes(notes)
            .with_fields(WorkflowFields {
                stowers_demand: Some(stowers_demand),
                motion_type,
            });

            let receipt = services
                .submissions
                .submit(session.username(), workflow, &form, &attachments)
                .await?;
            print_json(&receipt)?;

            if !receipt.delivery.is_delivered() {
                anyhow::bail!("Error submitting workflow: {}", receipt.delivery);
            }
        }
    }

    Ok(())
}
