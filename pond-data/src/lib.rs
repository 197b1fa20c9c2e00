//! Derived data for presenting a pond prediction.
//!
//! This crate turns a raw [`PredictionResult`] into the pieces the result
//! view shows: a one-line summary of the verdict, management
//! recommendations, the scaled performance metrics, and a weekly growth
//! projection.

use pond_core::parameters::PondParameters;
use pond_core::prediction::{PredictionResult, SuitabilityLabel};

/// Short verdict text for a suitability label. Unknown labels have none.
pub fn summary(label: &SuitabilityLabel) -> Option<&'static str> {
    match label {
        SuitabilityLabel::Excellent => Some("Optimal conditions for high productivity."),
        SuitabilityLabel::Good => Some("Good conditions, minor adjustments may help."),
        SuitabilityLabel::Fair => Some("Acceptable, but consider improvements."),
        SuitabilityLabel::Poor => Some("Requires immediate attention to improve conditions."),
        SuitabilityLabel::Other(_) => None,
    }
}

/// Management advice derived from water quality and feed efficiency.
pub mod recommendations {
    use super::{PondParameters, PredictionResult};
    use serde::Serialize;

    /// Dissolved oxygen below this (mg/L) calls for more aeration.
    pub const LOW_OXYGEN: f64 = 4.0;
    /// Ammonia above this (mg/L) calls for more water exchange.
    pub const HIGH_AMMONIA: f64 = 0.2;
    /// Nitrite above this (mg/L) calls for more water exchange.
    pub const HIGH_NITRITE: f64 = 0.1;
    /// FCR above this calls for a feeding review.
    pub const HIGH_FCR: f64 = 2.0;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Topic {
        Aeration,
        WaterExchange,
        Feeding,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Recommendation {
        pub topic: Topic,
        /// True when the advice asks for a change rather than confirming current practice.
        pub action_needed: bool,
        pub text: &'static str,
    }

    /// Build the three recommendations for a result.
    ///
    /// Water-quality readings come from the endpoint's input echo when it
    /// sent one, otherwise from the request that produced the result.
    pub fn recommend(result: &PredictionResult, params: &PondParameters) -> Vec<Recommendation> {
        let oxygen = result
            .echoed("dissolved_oxygen")
            .unwrap_or(params.dissolved_oxygen);
        let ammonia = result.echoed("ammonia").unwrap_or(params.ammonia);
        let nitrite = result.echoed("nitrite").unwrap_or(params.nitrite);

        let low_oxygen = oxygen < LOW_OXYGEN;
        let nitrogen_high = ammonia > HIGH_AMMONIA || nitrite > HIGH_NITRITE;
        let fcr_high = result.fcr > HIGH_FCR;

        vec![
            Recommendation {
                topic: Topic::Aeration,
                action_needed: low_oxygen,
                text: if low_oxygen {
                    "Increase aeration to improve oxygen levels."
                } else {
                    "Maintain current aeration practices."
                },
            },
            Recommendation {
                topic: Topic::WaterExchange,
                action_needed: nitrogen_high,
                text: if nitrogen_high {
                    "Improve water exchange to reduce nitrogen compounds."
                } else {
                    "Current water quality management is effective."
                },
            },
            Recommendation {
                topic: Topic::Feeding,
                action_needed: fcr_high,
                text: if fcr_high {
                    "Review feeding strategy to improve FCR."
                } else {
                    "Current feeding strategy is efficient."
                },
            },
        ]
    }

}

/// Scaled values for the performance bar chart.
pub mod metrics {
    use super::PredictionResult;
    use pond_utils::numbers::round_to;
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Metric {
        pub label: &'static str,
        pub value: f64,
    }

    /// Score, growth, survival/10, yield/100 and FCR, rounded to two decimals.
    ///
    /// Survival and yield are scaled down so all five bars share one axis.
    pub fn performance_metrics(result: &PredictionResult) -> Vec<Metric> {
        vec![
            Metric {
                label: "Score",
                value: round_to(result.pond_suitability_score, 2),
            },
            Metric {
                label: "Growth",
                value: round_to(result.growth_rate, 2),
            },
            Metric {
                label: "Survival",
                value: round_to(result.survival_rate / 10.0, 2),
            },
            Metric {
                label: "Yield",
                value: round_to(result.yield_kg_per_ha / 100.0, 2),
            },
            Metric {
                label: "FCR",
                value: round_to(result.fcr, 2),
            },
        ]
    }

}

/// Weekly growth trajectory.
pub mod projection {
    use super::PredictionResult;
    use serde::Serialize;

    /// Multipliers applied to the growth rate for weeks one through six.
    pub const WEEKLY_FACTORS: [f64; 6] = [0.5, 0.8, 1.0, 1.2, 1.3, 1.4];

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct WeekPoint {
        pub week: String,
        pub growth: f64,
    }

    pub fn growth_projection(result: &PredictionResult) -> Vec<WeekPoint> {
        WEEKLY_FACTORS
            .iter()
            .enumerate()
            .map(|(i, factor)| WeekPoint {
                week: format!("W{}", i + 1),
                growth: result.growth_rate * factor,
            })
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_for_known_labels() {
        assert_eq!(
            summary(&SuitabilityLabel::Poor),
            Some("Requires immediate attention to improve conditions.")
        );
        assert_eq!(
            summary(&SuitabilityLabel::Excellent),
            Some("Optimal conditions for high productivity.")
        );
        assert_eq!(summary(&SuitabilityLabel::Other("Unknown".into())), None);
    }
}
