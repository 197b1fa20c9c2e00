//! The `analyze` command: edit the form, submit, render the verdict.

use crate::render::{render_parameters, render_result};
use crate::FieldEdit;
use log::info;
use pond_core::store::KeyValueStore;
use pond_core::workflow::{AnalysisSession, LoadingStage};

/// Apply the edits, submit once, and return the rendered result.
///
/// Loading text changes are reported through the log while the request is
/// pending. Ctrl-C tears the session down, abandoning the request.
pub async fn run_analyze<S: KeyValueStore>(
    session: &AnalysisSession<S>,
    edits: &[FieldEdit],
    endpoint: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(url) = endpoint {
        session.set_endpoint(url);
    }
    for edit in edits {
        session.set_field(edit.field, edit.text.as_str());
    }
    info!("Analyzing pond via {}", session.endpoint());

    let mut stage = session.loading_stage();
    let submit = session.submit();
    tokio::pin!(submit);

    let result = loop {
        tokio::select! {
            outcome = &mut submit => break outcome?,
            Ok(()) = stage.changed() => {
                let current = *stage.borrow_and_update();
                if current != LoadingStage::Idle {
                    info!("{}", current.text());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, abandoning prediction");
                session.teardown();
            }
        }
    };

    let params = session.form().build_request()?;
    Ok(format!(
        "{}\n\nParameters\n{}",
        render_result(&result, &params),
        render_parameters(&params)
    ))
}
