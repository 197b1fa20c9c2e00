//! Core of the pond suitability analyzer.
//!
//! Parameters are entered as text through a [`parameters::ParameterForm`],
//! validated into a numeric [`parameters::PondParameters`] request, sent to
//! the prediction endpoint, and every successful verdict is kept in a
//! bounded [`history::HistoryLedger`]. [`workflow::AnalysisSession`] ties the
//! pieces together for one run of the analysis screen.

pub mod endpoint;
pub mod error;
pub mod history;
pub mod parameters;
pub mod prediction;
pub mod store;

#[cfg(feature = "api")]
pub mod client;
#[cfg(feature = "api")]
pub mod workflow;
