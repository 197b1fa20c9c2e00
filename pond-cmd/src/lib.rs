//! Command implementations for the pond analyzer CLI.
//!
//! Each subcommand opens the SQLite store, builds an analysis session on top
//! of it and drives one step of the workflow: analyzing, browsing history,
//! or editing the endpoint configuration.

use clap::Subcommand;
use pond_core::client::PredictionClient;
use pond_core::parameters::ParameterField;
use pond_core::workflow::{AnalysisSession, WorkflowOptions};
use pond_db::Database;
use std::path::Path;

pub mod analyze;
pub mod history;
pub mod render;
pub mod settings;

/// A `FIELD=VALUE` edit applied to the form before submitting.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub field: ParameterField,
    pub text: String,
}

/// Parse `FIELD=VALUE`. The value is kept as text; it is validated on submit.
pub fn parse_edit(s: &str) -> Result<FieldEdit, String> {
    let (name, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
    let field = name.parse::<ParameterField>().map_err(|e| e.to_string())?;
    Ok(FieldEdit {
        field,
        text: text.to_string(),
    })
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit pond parameters for a suitability prediction
    Analyze {
        /// Override a parameter, e.g. --set ph=7.2 (repeatable)
        #[arg(short = 's', long = "set", value_parser = parse_edit)]
        edits: Vec<FieldEdit>,

        /// Save this prediction endpoint URL before analyzing
        #[arg(short = 'e', long)]
        endpoint: Option<String>,
    },

    /// List recent predictions, most recent first
    History,

    /// Show a past prediction without calling the endpoint
    Show {
        /// Position in the history list (0 = most recent)
        index: usize,
    },

    /// Delete all saved predictions
    ClearHistory,

    /// Show or change the prediction endpoint URL
    Endpoint {
        /// New URL to save
        url: Option<String>,
    },

    /// List the pond parameters with defaults, units and descriptions
    Fields,
}

/// Start a session on an open database with default timings.
pub fn session_on(db: Database) -> AnalysisSession<Database> {
    AnalysisSession::new(db, PredictionClient::new(), WorkflowOptions::default())
}

/// Open the store and start a session with default timings.
pub fn open_session(store: &Path) -> anyhow::Result<AnalysisSession<Database>> {
    Ok(session_on(Database::open(store)?))
}

pub async fn run(store: &Path, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze { edits, endpoint } => {
            let session = open_session(store)?;
            let output = analyze::run_analyze(&session, &edits, endpoint.as_deref()).await?;
            println!("{}", output);
            Ok(())
        }
        Command::History => {
            let session = open_session(store)?;
            println!("{}", history::run_history(&session));
            Ok(())
        }
        Command::Show { index } => {
            let session = open_session(store)?;
            println!("{}", history::run_show(&session, index)?);
            Ok(())
        }
        Command::ClearHistory => {
            let session = open_session(store)?;
            history::run_clear(&session);
            println!("Prediction history cleared");
            Ok(())
        }
        Command::Endpoint { url } => {
            let db = Database::open(store)?;
            let session = session_on(db.clone());
            println!(
                "{}",
                settings::run_endpoint_command(&session, &db, url.as_deref())?
            );
            Ok(())
        }
        Command::Fields => {
            println!("{}", render::render_fields());
            Ok(())
        }
    }
}
