//! Pond parameters: the eleven water and stocking measurements sent to the
//! prediction endpoint, plus the editable text form they are entered through.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eleven named pond parameters.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    PondArea,
    PondDepth,
    StockingDensity,
    DissolvedOxygen,
    WaterTemperature,
    Ph,
    Salinity,
    Ammonia,
    Nitrite,
    Alkalinity,
    Transparency,
}

impl ParameterField {
    /// All fields in form order.
    pub const ALL: [ParameterField; 11] = [
        ParameterField::PondArea,
        ParameterField::PondDepth,
        ParameterField::StockingDensity,
        ParameterField::DissolvedOxygen,
        ParameterField::WaterTemperature,
        ParameterField::Ph,
        ParameterField::Salinity,
        ParameterField::Ammonia,
        ParameterField::Nitrite,
        ParameterField::Alkalinity,
        ParameterField::Transparency,
    ];

    /// Wire name, as used in the JSON request body.
    pub fn name(self) -> &'static str {
        match self {
            ParameterField::PondArea => "pond_area",
            ParameterField::PondDepth => "pond_depth",
            ParameterField::StockingDensity => "stocking_density",
            ParameterField::DissolvedOxygen => "dissolved_oxygen",
            ParameterField::WaterTemperature => "water_temperature",
            ParameterField::Ph => "ph",
            ParameterField::Salinity => "salinity",
            ParameterField::Ammonia => "ammonia",
            ParameterField::Nitrite => "nitrite",
            ParameterField::Alkalinity => "alkalinity",
            ParameterField::Transparency => "transparency",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterField::PondArea => "Pond Area",
            ParameterField::PondDepth => "Pond Depth",
            ParameterField::StockingDensity => "Stocking Density",
            ParameterField::DissolvedOxygen => "Dissolved Oxygen",
            ParameterField::WaterTemperature => "Water Temperature",
            ParameterField::Ph => "pH",
            ParameterField::Salinity => "Salinity",
            ParameterField::Ammonia => "Ammonia",
            ParameterField::Nitrite => "Nitrite",
            ParameterField::Alkalinity => "Alkalinity",
            ParameterField::Transparency => "Transparency",
        }
    }

    /// Unit of measure; empty for pH.
    pub fn unit(self) -> &'static str {
        match self {
            ParameterField::PondArea => "hectares",
            ParameterField::PondDepth => "m",
            ParameterField::StockingDensity => "pcs/m²",
            ParameterField::DissolvedOxygen => "mg/L",
            ParameterField::WaterTemperature => "°C",
            ParameterField::Ph => "",
            ParameterField::Salinity => "ppt",
            ParameterField::Ammonia => "mg/L",
            ParameterField::Nitrite => "mg/L",
            ParameterField::Alkalinity => "mg/L",
            ParameterField::Transparency => "cm",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            ParameterField::PondArea => "The total surface area of your pond in hectares. This affects the total production capacity.",
            ParameterField::PondDepth => "Average water depth in meters. Optimal depth varies by species and culture system.",
            ParameterField::StockingDensity => "Number of organisms per square meter. Higher density requires better management.",
            ParameterField::DissolvedOxygen => "Amount of oxygen dissolved in water. Critical for aquatic life (4-7 mg/L is typically good).",
            ParameterField::WaterTemperature => "Water temperature affects metabolism, growth, and oxygen levels.",
            ParameterField::Ph => "Measure of water acidity/alkalinity. Most aquaculture species prefer 6.5-9.0.",
            ParameterField::Salinity => "Salt concentration in water. Different species have different optimal ranges.",
            ParameterField::Ammonia => "Toxic compound from waste. Should be kept below 0.5 mg/L.",
            ParameterField::Nitrite => "Intermediate compound in nitrification. Should be kept below 0.5 mg/L.",
            ParameterField::Alkalinity => "Water's capacity to resist pH changes. 100-150 mg/L is often ideal.",
            ParameterField::Transparency => "Water clarity measured by Secchi disk. 30-45 cm is often recommended.",
        }
    }

    /// Sample value the form starts with.
    pub fn default_text(self) -> &'static str {
        match self {
            ParameterField::PondArea => "1.2",
            ParameterField::PondDepth => "1.4",
            ParameterField::StockingDensity => "18.0",
            ParameterField::DissolvedOxygen => "4.8",
            ParameterField::WaterTemperature => "29.5",
            ParameterField::Ph => "7.8",
            ParameterField::Salinity => "16.0",
            ParameterField::Ammonia => "0.15",
            ParameterField::Nitrite => "0.08",
            ParameterField::Alkalinity => "145.0",
            ParameterField::Transparency => "38.0",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown pond parameter '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for ParameterField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ParameterField::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// A fully numeric, validated prediction request.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct PondParameters {
    pub pond_area: f64,
    pub pond_depth: f64,
    pub stocking_density: f64,
    pub dissolved_oxygen: f64,
    pub water_temperature: f64,
    pub ph: f64,
    pub salinity: f64,
    pub ammonia: f64,
    pub nitrite: f64,
    pub alkalinity: f64,
    pub transparency: f64,
}

impl PondParameters {
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::PondArea => self.pond_area,
            ParameterField::PondDepth => self.pond_depth,
            ParameterField::StockingDensity => self.stocking_density,
            ParameterField::DissolvedOxygen => self.dissolved_oxygen,
            ParameterField::WaterTemperature => self.water_temperature,
            ParameterField::Ph => self.ph,
            ParameterField::Salinity => self.salinity,
            ParameterField::Ammonia => self.ammonia,
            ParameterField::Nitrite => self.nitrite,
            ParameterField::Alkalinity => self.alkalinity,
            ParameterField::Transparency => self.transparency,
        }
    }

    fn from_values(values: [f64; 11]) -> Self {
        let [pond_area, pond_depth, stocking_density, dissolved_oxygen, water_temperature, ph, salinity, ammonia, nitrite, alkalinity, transparency] =
            values;
        PondParameters {
            pond_area,
            pond_depth,
            stocking_density,
            dissolved_oxygen,
            water_temperature,
            ph,
            salinity,
            ammonia,
            nitrite,
            alkalinity,
            transparency,
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Editable text values for every parameter.
///
/// Text is stored as typed so partially entered numbers ("4.", "-") survive;
/// nothing is checked until [`ParameterForm::build_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterForm {
    values: [String; 11],
}

impl Default for ParameterForm {
    fn default() -> Self {
        Self {
            values: ParameterField::ALL.map(|field| field.default_text().to_string()),
        }
    }
}

impl ParameterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: ParameterField, raw_text: impl Into<String>) {
        self.values[field.index()] = raw_text.into();
    }

    pub fn field(&self, field: ParameterField) -> &str {
        &self.values[field.index()]
    }

    /// Restore the default sample values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Overwrite every field with the values of an earlier request.
    pub fn fill_from(&mut self, params: &PondParameters) {
        for field in ParameterField::ALL {
            self.values[field.index()] = params.get(field).to_string();
        }
    }

    /// Parse and range-check every field.
    ///
    /// Fields are parsed in form order and the first bad one is reported.
    /// pH must lie in [0, 14] and dissolved oxygen must not be negative.
    pub fn build_request(&self) -> Result<PondParameters, ValidationError> {
        let mut parsed = [0f64; 11];
        for field in ParameterField::ALL {
            parsed[field.index()] = parse_finite(self.field(field))
                .ok_or_else(|| ValidationError::not_a_number(field))?;
        }
        let request = PondParameters::from_values(parsed);

        if !(0.0..=14.0).contains(&request.ph) {
            return Err(ValidationError::out_of_range(
                ParameterField::Ph,
                "pH must be between 0 and 14",
            ));
        }
        if request.dissolved_oxygen < 0.0 {
            return Err(ValidationError::out_of_range(
                ParameterField::DissolvedOxygen,
                "Dissolved Oxygen cannot be negative",
            ));
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(field: ParameterField, text: &str) -> ParameterForm {
        let mut form = ParameterForm::new();
        form.set_field(field, text);
        form
    }

    #[test]
    fn defaults_build_the_sample_request() {
        let request = ParameterForm::new().build_request().unwrap();
        assert_eq!(
            request,
            PondParameters {
                pond_area: 1.2,
                pond_depth: 1.4,
                stocking_density: 18.0,
                dissolved_oxygen: 4.8,
                water_temperature: 29.5,
                ph: 7.8,
                salinity: 16.0,
                ammonia: 0.15,
                nitrite: 0.08,
                alkalinity: 145.0,
                transparency: 38.0,
            }
        );
    }

    #[test]
    fn every_field_rejects_non_numeric_text() {
        for field in ParameterField::ALL {
            for bad in ["abc", "", "  ", "NaN", "inf", "1.2.3", "4x"] {
                let err = form_with(field, bad).build_request().unwrap_err();
                assert_eq!(err.field, field, "input {:?} for {}", bad, field);
            }
        }
    }

    #[test]
    fn first_bad_field_is_reported() {
        let mut form = ParameterForm::new();
        form.set_field(ParameterField::Salinity, "x");
        form.set_field(ParameterField::PondDepth, "y");
        let err = form.build_request().unwrap_err();
        assert_eq!(err.field, ParameterField::PondDepth);
    }

    #[test]
    fn ph_bounds_are_inclusive() {
        for bad in ["-0.1", "14.1"] {
            let err = form_with(ParameterField::Ph, bad).build_request().unwrap_err();
            assert_eq!(err.field, ParameterField::Ph);
            assert_eq!(err.reason, "pH must be between 0 and 14");
        }
        for good in ["0", "14"] {
            let request = form_with(ParameterField::Ph, good).build_request().unwrap();
            assert_eq!(request.ph, good.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn dissolved_oxygen_must_not_be_negative() {
        let err = form_with(ParameterField::DissolvedOxygen, "-0.01")
            .build_request()
            .unwrap_err();
        assert_eq!(err.field, ParameterField::DissolvedOxygen);
        let request = form_with(ParameterField::DissolvedOxygen, "0")
            .build_request()
            .unwrap();
        assert_eq!(request.dissolved_oxygen, 0.0);
    }

    #[test]
    fn whitespace_around_numbers_is_accepted() {
        let request = form_with(ParameterField::Ammonia, " 0.3 ")
            .build_request()
            .unwrap();
        assert_eq!(request.ammonia, 0.3);
    }

    #[test]
    fn set_field_keeps_raw_text_and_reset_restores_defaults() {
        let mut form = ParameterForm::new();
        form.set_field(ParameterField::Nitrite, "0.");
        assert_eq!(form.field(ParameterField::Nitrite), "0.");
        form.reset();
        assert_eq!(form, ParameterForm::new());
        assert_eq!(form.field(ParameterField::Nitrite), "0.08");
    }

    #[test]
    fn fill_from_round_trips_through_build() {
        let mut params = ParameterForm::new().build_request().unwrap();
        params.ph = 6.5;
        params.alkalinity = 120.25;
        let mut form = ParameterForm::new();
        form.fill_from(&params);
        assert_eq!(form.build_request().unwrap(), params);
    }

    #[test]
    fn field_names_parse_back() {
        for field in ParameterField::ALL {
            assert_eq!(field.name().parse::<ParameterField>().unwrap(), field);
        }
        assert!("depth".parse::<ParameterField>().is_err());
        assert_eq!(
            "PH".parse::<ParameterField>().unwrap(),
            ParameterField::Ph
        );
    }

    #[test]
    fn request_serializes_with_wire_names() {
        let json = serde_json::to_value(ParameterForm::new().build_request().unwrap()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 11);
        for field in ParameterField::ALL {
            assert!(object[field.name()].is_number(), "missing {}", field);
        }
    }
}
