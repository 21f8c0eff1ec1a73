//! # roster: command-line client for the student roster API
//!
//! Every subcommand loads the roster into a `Synchronizer`, applies one
//! action, and prints the derived view or the resulting status.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use roster::Field;
use roster_client::{
    collator_for, default_collator,
    state::Action,
    ui::{render_student, render_summary, render_table, status_lines},
    ApiClient, Collator, FormRules, StudentApi, Synchronizer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the roster server
    #[arg(long, global = true, env = "ROSTER_API_URL", default_value = "http://localhost:5000")]
    api_url: String,
    /// Collation used to order names (vi or base)
    #[arg(long, global = true, default_value = "vi")]
    collation: String,
    /// Minimum class length accepted by the form
    #[arg(long, global = true, default_value_t = 1)]
    min_class_len: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List students, optionally filtered by a search keyword
    List(ListArgs),
    /// Show a single student
    Show { id: String },
    /// Add a new student
    Add(AddArgs),
    /// Edit an existing student; omitted fields keep their current value
    Edit(EditArgs),
    /// Delete a student
    Delete { id: String },
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Keyword matched against names, ignoring case and diacritics
    #[arg(long)]
    search: Option<String>,
    /// Sort Z → A instead of A → Z
    #[arg(long)]
    desc: bool,
}

#[derive(Parser, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: String,
    #[arg(long)]
    class: String,
}

#[derive(Parser, Debug)]
struct EditArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    class: Option<String>,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let cli = Cli::parse();
    let Some(collator) = collator_for(&cli.collation) else {
        bail!(
            "Unknown collation '{}'. Expected one of: vi, base (default {}).",
            cli.collation,
            default_collator().name()
        );
    };
    let rules = FormRules {
        min_class_len: cli.min_class_len,
    };
    let api = ApiClient::new(cli.api_url);
    info!("Using roster server at {}", api.base_url());
    let mut sync = Synchronizer::new(api, collator, rules);

    match cli.command {
        Commands::List(args) => {
            sync.load().await;
            if let Some(keyword) = args.search {
                sync.dispatch(Action::SetKeyword(keyword));
            }
            if args.desc {
                sync.dispatch(Action::ToggleSort);
            }
            print!("{}", render_table(&sync.view()));
            println!("{}", render_summary(&sync.summary()));
        }
        Commands::Show { id } => {
            let student = sync.api().get(&id).await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print!("{}", render_student(&student));
            return Ok(());
        }
        Commands::Add(args) => {
            sync.load().await;
            sync.dispatch(Action::EditField(Field::Name, args.name));
            sync.dispatch(Action::EditField(Field::Age, args.age));
            sync.dispatch(Action::EditField(Field::Class, args.class));
            if let Some(student) = sync.submit().await {
                print!("{}", render_student(&student));
            }
        }
        Commands::Edit(args) => {
            sync.load().await;
            sync.dispatch(Action::SelectForEdit(args.id));
            if sync.state().session.target().is_some() {
                let edits = [
                    (Field::Name, args.name),
                    (Field::Age, args.age),
                    (Field::Class, args.class),
                ];
                for (field, value) in edits {
                    if let Some(value) = value {
                        sync.dispatch(Action::EditField(field, value));
                    }
                }
                if let Some(student) = sync.submit().await {
                    print!("{}", render_student(&student));
                }
            }
        }
        Commands::Delete { id } => {
            sync.delete(&id).await;
        }
    }

    let state = sync.state();
    for line in status_lines(state) {
        println!("{line}");
    }
    if state.load_error.is_some() || state.notice.as_ref().is_some_and(|n| n.is_error) {
        bail!("Command failed");
    }
    Ok(())
}
