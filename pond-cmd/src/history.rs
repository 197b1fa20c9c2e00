//! History commands: list, replay and clear past predictions.

use crate::render::{render_history_line, render_parameters, render_result};
use pond_core::store::KeyValueStore;
use pond_core::workflow::AnalysisSession;

pub fn run_history<S: KeyValueStore>(session: &AnalysisSession<S>) -> String {
    let entries = session.history();
    if entries.is_empty() {
        return "No predictions yet.".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| render_history_line(i, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replay a stored prediction into the result view.
pub fn run_show<S: KeyValueStore>(
    session: &AnalysisSession<S>,
    index: usize,
) -> anyhow::Result<String> {
    let entry = session.select_entry(index)?;
    Ok(format!(
        "Recorded {}\n\n{}\n\nParameters\n{}",
        entry.timestamp,
        render_result(&entry.results, &entry.params),
        render_parameters(&entry.params)
    ))
}

pub fn run_clear<S: KeyValueStore>(session: &AnalysisSession<S>) {
    session.clear_history();
}
