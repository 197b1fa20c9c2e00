//! The pond analysis workflow.
//!
//! An [`AnalysisSession`] is the context object shared by the parameter form,
//! the prediction client and the history ledger for one run of the analysis
//! screen. It is single-threaded and driven by `&self` event handlers, the way
//! UI callbacks share it.
//!
//! State machine:
//!
//! ```text
//! Form --submit--> Submitting --ok--> Results
//!                      |
//!                      +--err--> Form (last_error set)
//! Results --modify_parameters / reset--> Form
//! Form --view_results (when a result exists)--> Results
//! ```
//!
//! At most one prediction may be in flight per session. While a request is
//! pending an advisory timer walks the loading text through
//! [`LoadingStage::StillWorking`] and [`LoadingStage::AlmostThere`]; the timer
//! is owned by a guard and stops on every exit path.

use crate::client::PredictionClient;
use crate::endpoint::EndpointConfig;
use crate::error::WorkflowError;
use crate::history::{HistoryEntry, HistoryLedger};
use crate::parameters::{ParameterField, ParameterForm};
use crate::prediction::PredictionResult;
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Delay before the loading text changes to "Still working...".
pub const STILL_WORKING_AFTER: Duration = Duration::from_secs(5);

/// Further delay before it changes to "Almost there...".
pub const ALMOST_THERE_AFTER: Duration = Duration::from_secs(5);

/// Advisory progress text shown while a prediction is pending.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadingStage {
    Idle,
    Analyzing,
    StillWorking,
    AlmostThere,
}

impl LoadingStage {
    pub fn text(self) -> &'static str {
        match self {
            LoadingStage::Idle => "Analyze pond",
            LoadingStage::Analyzing => "Analyzing...",
            LoadingStage::StillWorking => "Still working...",
            LoadingStage::AlmostThere => "Almost there...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkflowOptions {
    pub still_working_after: Duration,
    pub almost_there_after: Duration,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            still_working_after: STILL_WORKING_AFTER,
            almost_there_after: ALMOST_THERE_AFTER,
        }
    }
}

/// Which view the workflow is showing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WorkflowState {
    Form,
    Submitting,
    Results,
}

/// Runs the loading-text timer for as long as it is alive.
///
/// Dropping the guard stops the timer task and puts the stage back to
/// `Idle`. A tick racing the drop is discarded: ticks only land while
/// `active` is set, checked under the channel's lock.
struct AdvisoryTimer {
    handle: JoinHandle<()>,
    active: Arc<AtomicBool>,
    stage: Arc<watch::Sender<LoadingStage>>,
}

impl AdvisoryTimer {
    fn start(stage: Arc<watch::Sender<LoadingStage>>, options: WorkflowOptions) -> Self {
        stage.send_replace(LoadingStage::Analyzing);
        let active = Arc::new(AtomicBool::new(true));

        let task_stage = stage.clone();
        let task_active = active.clone();
        let handle = tokio::spawn(async move {
            let advance = |next: LoadingStage| {
                task_stage.send_if_modified(|current| {
                    if task_active.load(Ordering::SeqCst) {
                        *current = next;
                        true
                    } else {
                        false
                    }
                });
            };
            tokio::time::sleep(options.still_working_after).await;
            advance(LoadingStage::StillWorking);
            tokio::time::sleep(options.almost_there_after).await;
            advance(LoadingStage::AlmostThere);
        });

        Self {
            handle,
            active,
            stage,
        }
    }
}

impl Drop for AdvisoryTimer {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.handle.abort();
        self.stage.send_replace(LoadingStage::Idle);
    }
}

/// Clears the single-flight flag however the submit ends.
struct FlightGuard<'a>(&'a Cell<bool>);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

struct View {
    state: WorkflowState,
    results: Option<PredictionResult>,
    last_error: Option<String>,
}

/// One analysis session: form, endpoint, history and current view.
pub struct AnalysisSession<S> {
    form: RefCell<ParameterForm>,
    ledger: RefCell<HistoryLedger<S>>,
    endpoint: RefCell<EndpointConfig<S>>,
    view: RefCell<View>,
    client: PredictionClient,
    options: WorkflowOptions,
    in_flight: Cell<bool>,
    stage: Arc<watch::Sender<LoadingStage>>,
    cancel: CancellationToken,
}

impl<S: KeyValueStore + Clone> AnalysisSession<S> {
    /// Start a session: default form, saved endpoint, saved history.
    pub fn new(store: S, client: PredictionClient, options: WorkflowOptions) -> Self {
        let endpoint = EndpointConfig::load(store.clone());
        let ledger = HistoryLedger::load(store);
        let (stage, _) = watch::channel(LoadingStage::Idle);
        Self {
            form: RefCell::new(ParameterForm::new()),
            ledger: RefCell::new(ledger),
            endpoint: RefCell::new(endpoint),
            view: RefCell::new(View {
                state: WorkflowState::Form,
                results: None,
                last_error: None,
            }),
            client,
            options,
            in_flight: Cell::new(false),
            stage: Arc::new(stage),
            cancel: CancellationToken::new(),
        }
    }
}

impl<S: KeyValueStore> AnalysisSession<S> {
    fn ensure_idle(&self) -> Result<(), WorkflowError> {
        if self.cancel.is_cancelled() {
            return Err(WorkflowError::Cancelled);
        }
        if self.in_flight.get() {
            return Err(WorkflowError::Busy);
        }
        Ok(())
    }

    /// Store raw text for a field. Nothing is validated here.
    pub fn set_field(&self, field: ParameterField, raw_text: impl Into<String>) {
        self.form.borrow_mut().set_field(field, raw_text);
    }

    pub fn field_text(&self, field: ParameterField) -> String {
        self.form.borrow().field(field).to_string()
    }

    pub fn form(&self) -> ParameterForm {
        self.form.borrow().clone()
    }

    /// Submit the current form to the prediction endpoint.
    ///
    /// Validation failures never reach the network. On success the result
    /// becomes the current view and is appended to history; on failure the
    /// form is left as it was and the message is kept in
    /// [`last_error`](Self::last_error).
    pub async fn submit(&self) -> Result<PredictionResult, WorkflowError> {
        self.ensure_idle()?;
        self.in_flight.set(true);
        let _flight = FlightGuard(&self.in_flight);

        let request = match self.form.borrow().build_request() {
            Ok(request) => request,
            Err(e) => {
                info!("Parameter {} rejected: {}", e.field, e);
                self.view.borrow_mut().last_error = Some(e.to_string());
                return Err(e.into());
            }
        };
        let url = self.endpoint.borrow().url().to_string();
        {
            let mut view = self.view.borrow_mut();
            view.state = WorkflowState::Submitting;
            view.last_error = None;
        }

        let outcome = {
            let _timer = AdvisoryTimer::start(self.stage.clone(), self.options);
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                result = self.client.submit(&request, &url) => Some(result),
            }
        };

        match outcome {
            None => {
                debug!("Prediction abandoned: session torn down");
                Err(WorkflowError::Cancelled)
            }
            Some(Ok(result)) => {
                info!(
                    "Prediction: {} ({:.2})",
                    result.pond_suitability_label, result.pond_suitability_score
                );
                self.ledger
                    .borrow_mut()
                    .append(HistoryEntry::new(request, result.clone()));
                let mut view = self.view.borrow_mut();
                view.state = WorkflowState::Results;
                view.results = Some(result.clone());
                Ok(result)
            }
            Some(Err(e)) => {
                warn!("Prediction error: {}", e);
                let mut view = self.view.borrow_mut();
                view.state = WorkflowState::Form;
                view.last_error = Some(e.message.clone());
                Err(e.into())
            }
        }
    }

    /// Back to the form, keeping the parameters that were submitted.
    pub fn modify_parameters(&self) -> Result<(), WorkflowError> {
        self.ensure_idle()?;
        self.view.borrow_mut().state = WorkflowState::Form;
        Ok(())
    }

    /// Return from the form to the result already on screen.
    pub fn view_results(&self) -> Result<(), WorkflowError> {
        self.ensure_idle()?;
        let mut view = self.view.borrow_mut();
        if view.results.is_none() {
            return Err(WorkflowError::NoResults);
        }
        view.state = WorkflowState::Results;
        Ok(())
    }

    /// Restore default parameters and drop the current result.
    pub fn reset(&self) -> Result<(), WorkflowError> {
        self.ensure_idle()?;
        self.form.borrow_mut().reset();
        let mut view = self.view.borrow_mut();
        view.state = WorkflowState::Form;
        view.results = None;
        view.last_error = None;
        Ok(())
    }

    /// Show a past prediction without calling the endpoint.
    pub fn select_entry(&self, index: usize) -> Result<HistoryEntry, WorkflowError> {
        self.ensure_idle()?;
        let entry = self
            .ledger
            .borrow()
            .get(index)
            .cloned()
            .ok_or(WorkflowError::NoSuchEntry(index))?;
        self.form.borrow_mut().fill_from(&entry.params);
        let mut view = self.view.borrow_mut();
        view.state = WorkflowState::Results;
        view.results = Some(entry.results.clone());
        Ok(entry)
    }

    pub fn clear_history(&self) {
        self.ledger.borrow_mut().clear();
        info!("Prediction history cleared");
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.ledger.borrow().entries().to_vec()
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.borrow().url().to_string()
    }

    pub fn set_endpoint(&self, url: impl Into<String>) {
        self.endpoint.borrow_mut().set_url(url);
    }

    pub fn state(&self) -> WorkflowState {
        self.view.borrow().state
    }

    pub fn results(&self) -> Option<PredictionResult> {
        self.view.borrow().results.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.view.borrow().last_error.clone()
    }

    pub fn dismiss_error(&self) {
        self.view.borrow_mut().last_error = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Watch the loading text of the pending request.
    pub fn loading_stage(&self) -> watch::Receiver<LoadingStage> {
        self.stage.subscribe()
    }

    /// Token that tears the session down when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// End the session. A pending submit returns `Cancelled` without
    /// recording a result or an error.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

impl<S> Drop for AnalysisSession<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
