//! Endpoint configuration command.

use pond_core::store::{KeyValueStore, ENDPOINT_KEY};
use pond_core::workflow::AnalysisSession;
use pond_db::Database;

/// Print the endpoint, or save a new one first.
pub fn run_endpoint<S: KeyValueStore>(session: &AnalysisSession<S>, url: Option<&str>) -> String {
    match url {
        Some(url) => {
            session.set_endpoint(url.trim());
            format!("API URL updated: {}", session.endpoint())
        }
        None => session.endpoint(),
    }
}

/// Like [`run_endpoint`], noting when a saved URL was last written.
pub fn run_endpoint_command(
    session: &AnalysisSession<Database>,
    db: &Database,
    url: Option<&str>,
) -> anyhow::Result<String> {
    let output = run_endpoint(session, url);
    if url.is_some() {
        return Ok(output);
    }
    Ok(match db.updated_at(ENDPOINT_KEY)? {
        Some(saved) => format!("{} (saved {})", output, saved),
        None => format!("{} (default)", output),
    })
}
