//! Plain-text rendering of results, history and parameter metadata.

use pond_core::history::HistoryEntry;
use pond_core::parameters::{ParameterField, PondParameters};
use pond_core::prediction::PredictionResult;
use pond_data::metrics::performance_metrics;
use pond_data::projection::growth_projection;
use pond_data::recommendations::recommend;
use pond_utils::numbers::format_fixed;
use std::fmt::Write;

fn with_unit(field: ParameterField) -> String {
    if field.unit().is_empty() {
        field.label().to_string()
    } else {
        format!("{} ({})", field.label(), field.unit())
    }
}

/// Full result view: verdict, details, recommendations, metrics and projection.
pub fn render_result(result: &PredictionResult, params: &PondParameters) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Suitability: {}", result.pond_suitability_label);
    let _ = writeln!(
        out,
        "Score: {}",
        format_fixed(result.pond_suitability_score, 2)
    );
    if let Some(summary) = pond_data::summary(&result.pond_suitability_label) {
        let _ = writeln!(out, "{}", summary);
    }

    let _ = writeln!(out, "\nPerformance Details");
    let _ = writeln!(out, "  Growth Rate:           {} g/day", format_fixed(result.growth_rate, 2));
    let _ = writeln!(out, "  Survival Rate:         {}%", format_fixed(result.survival_rate, 2));
    let _ = writeln!(out, "  Expected Yield:        {} kg/ha", format_fixed(result.yield_kg_per_ha, 2));
    let _ = writeln!(out, "  Feed Conversion Ratio: {}", format_fixed(result.fcr, 2));

    let _ = writeln!(out, "\nRecommendations");
    for rec in recommend(result, params) {
        let marker = if rec.action_needed { "!" } else { "-" };
        let _ = writeln!(out, "  {} {}", marker, rec.text);
    }

    let _ = writeln!(out, "\nPerformance Metrics (survival /10, yield /100)");
    for metric in performance_metrics(result) {
        let _ = writeln!(out, "  {:<9}{}", metric.label, format_fixed(metric.value, 2));
    }

    let _ = writeln!(out, "\nGrowth Projection");
    let weeks: Vec<String> = growth_projection(result)
        .iter()
        .map(|p| format!("{} {}", p.week, format_fixed(p.growth, 2)))
        .collect();
    let _ = write!(out, "  {}", weeks.join("  "));
    out
}

/// The parameters a prediction was made with.
pub fn render_parameters(params: &PondParameters) -> String {
    ParameterField::ALL
        .iter()
        .map(|&field| format!("  {:<28}{}", with_unit(field), params.get(field)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One history card: index, label, score to one decimal, timestamp.
pub fn render_history_line(index: usize, entry: &HistoryEntry) -> String {
    format!(
        "[{}] {:<10} Score: {:<6} {}",
        index,
        entry.results.pond_suitability_label,
        format_fixed(entry.results.pond_suitability_score, 1),
        entry.timestamp
    )
}

pub fn render_fields() -> String {
    ParameterField::ALL
        .iter()
        .map(|&field| {
            format!(
                "{:<18} {:<28} default {:<7} {}",
                field.name(),
                with_unit(field),
                field.default_text(),
                field.tooltip()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pond_core::parameters::ParameterForm;

    fn sample() -> (PredictionResult, PondParameters) {
        let result = PredictionResult::from_json(
            br#"{"pond_suitability_label":"Good","pond_suitability_score":78.5,
                "growth_rate":1.2,"survival_rate":85.0,"yield":4500,"fcr":1.6}"#,
        )
        .unwrap();
        (result, ParameterForm::new().build_request().unwrap())
    }

    #[test]
    fn result_view_lists_verdict_and_advice() {
        let (result, params) = sample();
        let text = render_result(&result, &params);
        assert!(text.starts_with("Suitability: Good\nScore: 78.50\n"));
        assert!(text.contains("Good conditions, minor adjustments may help."));
        assert!(text.contains("Expected Yield:        4500.00 kg/ha"));
        assert!(text.contains("- Maintain current aeration practices."));
        assert!(text.contains("W1 0.60"));
        assert!(text.contains("W6 1.68"));
    }

    #[test]
    fn history_line_rounds_score() {
        let (result, params) = sample();
        let entry = HistoryEntry {
            timestamp: "3/7/2025, 2:05:09 PM".to_string(),
            params,
            results: result,
        };
        let line = render_history_line(0, &entry);
        assert!(line.starts_with("[0] Good"));
        assert!(line.contains("Score: 78.5"));
        assert!(line.ends_with("3/7/2025, 2:05:09 PM"));
    }

    #[test]
    fn fields_and_parameters_cover_all_eleven() {
        assert_eq!(render_fields().lines().count(), 11);
        assert!(render_fields().contains("Dissolved Oxygen (mg/L)"));
        let (_, params) = sample();
        let text = render_parameters(&params);
        assert_eq!(text.lines().count(), 11);
        assert!(text.contains("pH"));
        assert!(text.contains("145"));
    }
}
