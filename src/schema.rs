//! Declarative description of an animation's tunable parameters.
//!
//! A [`Schema`] is an ordered list of keyed parameters. The order is the
//! settings panel order. Every stored value satisfies its parameter's
//! constraints: range values are clamped and snapped to their step, colors are
//! `#rrggbb`, select values are one of the declared options.
use std::fmt;

use eframe::egui::Color32;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Errors produced while building, validating or writing a schema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("unknown parameter '{0}'")]
    UnknownKey(String),

    #[error("parameter '{0}' is declared twice")]
    DuplicateKey(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a #rrggbb color")]
    InvalidColor(String),

    #[error("'{0}' is not one of the options")]
    NotAnOption(String),

    #[error("expected a {expected} value")]
    WrongKind { expected: &'static str },

    #[error("range {min}..={max} (step {step}) is empty or malformed")]
    InvalidRange { min: f64, max: f64, step: f64 },

    #[error("value {value} lies outside {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Kind-specific constraints of a parameter
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamKind {
    Range { min: f64, max: f64, step: f64 },
    Color,
    Select { options: Vec<String> },
    /// A trigger: firing it never changes the stored value
    Button,
}

impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Range { .. } => "range",
            ParamKind::Color => "color",
            ParamKind::Select { .. } => "select",
            ParamKind::Button => "button",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Unparsed user input for one parameter
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Trigger,
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Param {
    #[serde(flatten)]
    pub kind: ParamKind,
    pub label: String,
    pub value: ParamValue,
}

impl Param {
    /// Parses `raw` according to this parameter's kind and constrains it.
    ///
    /// Does not store anything; see [`Schema::apply`].
    pub fn parse(&self, raw: RawValue) -> SchemaResult<ParamValue> {
        match (&self.kind, raw) {
            (ParamKind::Button, _) => Ok(ParamValue::Flag(true)),
            (ParamKind::Range { min, max, step }, RawValue::Number(n)) => {
                constrain_number(n, *min, *max, *step)
            }
            (ParamKind::Range { min, max, step }, RawValue::Text(text)) => {
                let n = text
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| SchemaError::NotANumber(text.clone()))?;
                constrain_number(n, *min, *max, *step)
            }
            (ParamKind::Color, RawValue::Text(text)) => parse_hex_color(&text)
                .map(|color| ParamValue::Text(color_to_hex(color)))
                .ok_or(SchemaError::InvalidColor(text)),
            (ParamKind::Select { options }, RawValue::Text(text)) => {
                if options.iter().any(|option| *option == text) {
                    Ok(ParamValue::Text(text))
                } else {
                    Err(SchemaError::NotAnOption(text))
                }
            }
            (kind, _) => Err(SchemaError::WrongKind {
                expected: kind.name(),
            }),
        }
    }

    fn validate(&self) -> SchemaResult<()> {
        match (&self.kind, &self.value) {
            (ParamKind::Range { min, max, step }, ParamValue::Number(value)) => {
                if !(min.is_finite() && max.is_finite() && min <= max && *step >= 0.0) {
                    return Err(SchemaError::InvalidRange {
                        min: *min,
                        max: *max,
                        step: *step,
                    });
                }
                if !(*min..=*max).contains(value) {
                    return Err(SchemaError::OutOfRange {
                        value: *value,
                        min: *min,
                        max: *max,
                    });
                }
                Ok(())
            }
            (ParamKind::Color, ParamValue::Text(text)) => parse_hex_color(text)
                .map(|_| ())
                .ok_or_else(|| SchemaError::InvalidColor(text.clone())),
            (ParamKind::Select { options }, ParamValue::Text(text)) => {
                if options.contains(text) {
                    Ok(())
                } else {
                    Err(SchemaError::NotAnOption(text.clone()))
                }
            }
            (ParamKind::Button, ParamValue::Flag(_)) => Ok(()),
            (kind, _) => Err(SchemaError::WrongKind {
                expected: kind.name(),
            }),
        }
    }
}

/// Ordered parameter set of one animation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, Param)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, key: &str, label: &str, kind: ParamKind, value: ParamValue) -> Self {
        self.entries.push((
            key.to_owned(),
            Param {
                kind,
                label: label.to_owned(),
                value,
            },
        ));
        self
    }

    pub fn range(self, key: &str, label: &str, min: f64, max: f64, step: f64, value: f64) -> Self {
        self.with(
            key,
            label,
            ParamKind::Range { min, max, step },
            ParamValue::Number(value),
        )
    }

    pub fn color(self, key: &str, label: &str, value: &str) -> Self {
        self.with(key, label, ParamKind::Color, ParamValue::Text(value.to_owned()))
    }

    pub fn select(self, key: &str, label: &str, options: &[&str], value: &str) -> Self {
        let options = options.iter().map(|option| (*option).to_owned()).collect();
        self.with(
            key,
            label,
            ParamKind::Select { options },
            ParamValue::Text(value.to_owned()),
        )
    }

    pub fn button(self, key: &str, label: &str) -> Self {
        self.with(key, label, ParamKind::Button, ParamValue::Flag(false))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(key, param)| (key.as_str(), param))
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, param)| param)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Param> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, param)| param)
    }

    pub fn value(&self, key: &str) -> Option<&ParamValue> {
        self.get(key).map(|param| &param.value)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.value(key).and_then(ParamValue::as_number)
    }

    /// Numeric value of `key`, or `default` when the key is missing
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(ParamValue::as_text)
    }

    pub fn color_or(&self, key: &str, default: Color32) -> Color32 {
        self.text(key).and_then(parse_hex_color).unwrap_or(default)
    }

    /// Checks every declared parameter against its own constraints
    pub fn validate(&self) -> SchemaResult<()> {
        for (index, (key, param)) in self.entries.iter().enumerate() {
            if self.entries[..index].iter().any(|(k, _)| k == key) {
                return Err(SchemaError::DuplicateKey(key.clone()));
            }
            param.validate()?;
        }
        Ok(())
    }

    /// Parses user input for `key`, stores it and returns the stored value.
    ///
    /// Triggers return `Flag(true)` and leave the schema untouched.
    pub fn apply(&mut self, key: &str, raw: RawValue) -> SchemaResult<ParamValue> {
        let param = self
            .get_mut(key)
            .ok_or_else(|| SchemaError::UnknownKey(key.to_owned()))?;
        let value = param.parse(raw)?;
        if param.kind != ParamKind::Button {
            param.value = value.clone();
        }
        Ok(value)
    }

    /// Overwrites a value from inside a module (e.g. a theme-coupled color).
    pub fn set(&mut self, key: &str, value: ParamValue) -> SchemaResult<()> {
        let param = self
            .get_mut(key)
            .ok_or_else(|| SchemaError::UnknownKey(key.to_owned()))?;
        let previous = std::mem::replace(&mut param.value, value);
        if let Err(err) = param.validate() {
            param.value = previous;
            return Err(err);
        }
        Ok(())
    }

    /// The schema in its external JSON form, keys in declaration order
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, param) in &self.entries {
            map.serialize_entry(key, param)?;
        }
        map.end()
    }
}

fn constrain_number(value: f64, min: f64, max: f64, step: f64) -> SchemaResult<ParamValue> {
    if !value.is_finite() {
        return Err(SchemaError::NotANumber(value.to_string()));
    }
    let clamped = value.clamp(min, max);
    if step <= 0.0 {
        return Ok(ParamValue::Number(clamped));
    }
    let snapped = min + ((clamped - min) / step).round() * step;
    let scale = 10f64.powi(step_decimals(step));
    let rounded = (snapped * scale).round() / scale;
    Ok(ParamValue::Number(rounded.clamp(min, max)))
}

/// Number of decimal places needed to represent `step` exactly
fn step_decimals(step: f64) -> i32 {
    let text = step.to_string();
    text.split_once('.')
        .map(|(_, fraction)| fraction.len().min(10) as i32)
        .unwrap_or(0)
}

/// Parses `#rrggbb` (case-insensitive)
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let hex = text.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new()
            .range("count", "Particle Count", 20.0, 200.0, 1.0, 80.0)
            .range("speed", "Speed", 0.1, 5.0, 0.1, 1.0)
            .color("color", "Color", "#ffffff")
            .select("shape", "Shape", &["Square", "Circle"], "Square")
            .button("randomize", "Randomize Colors")
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = sample();
        let keys: Vec<&str> = schema.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["count", "speed", "color", "shape", "randomize"]);
    }

    #[test]
    fn test_range_input_is_clamped() {
        let mut schema = sample();
        assert_eq!(schema.apply("count", 500.0.into()), Ok(ParamValue::Number(200.0)));
        assert_eq!(schema.number("count"), Some(200.0));
        assert_eq!(schema.apply("count", "-3".into()), Ok(ParamValue::Number(20.0)));
        assert_eq!(schema.number("count"), Some(20.0));
    }

    #[test]
    fn test_range_input_snaps_to_step() {
        let mut schema = sample();
        schema.apply("speed", 2.46.into()).unwrap();
        assert_eq!(schema.number("speed"), Some(2.5));
        schema.apply("count", "150.4".into()).unwrap();
        assert_eq!(schema.number("count"), Some(150.0));
    }

    #[test]
    fn test_rejected_input_leaves_value_alone() {
        let mut schema = sample();
        assert!(matches!(
            schema.apply("speed", "fast".into()),
            Err(SchemaError::NotANumber(_))
        ));
        assert!(schema.apply("speed", f64::NAN.into()).is_err());
        assert!(matches!(
            schema.apply("shape", "Blob".into()),
            Err(SchemaError::NotAnOption(_))
        ));
        assert!(matches!(
            schema.apply("color", "red".into()),
            Err(SchemaError::InvalidColor(_))
        ));
        assert!(matches!(
            schema.apply("missing", "1".into()),
            Err(SchemaError::UnknownKey(_))
        ));
        assert_eq!(schema, sample());
    }

    #[test]
    fn test_color_is_normalized() {
        let mut schema = sample();
        schema.apply("color", "#FF00FF".into()).unwrap();
        assert_eq!(schema.text("color"), Some("#ff00ff"));
        assert_eq!(schema.color_or("color", Color32::BLACK), Color32::from_rgb(255, 0, 255));
    }

    #[test]
    fn test_trigger_is_not_stored() {
        let mut schema = sample();
        assert_eq!(schema.apply("randomize", RawValue::Trigger), Ok(ParamValue::Flag(true)));
        assert_eq!(schema.value("randomize"), Some(&ParamValue::Flag(false)));
    }

    #[test]
    fn test_validate_catches_bad_declarations() {
        assert!(sample().validate().is_ok());

        let duplicated = sample().range("count", "Again", 0.0, 1.0, 0.1, 0.5);
        assert_eq!(
            duplicated.validate(),
            Err(SchemaError::DuplicateKey("count".to_owned()))
        );

        let out_of_range = Schema::new().range("size", "Size", 10.0, 20.0, 1.0, 40.0);
        assert!(matches!(out_of_range.validate(), Err(SchemaError::OutOfRange { .. })));

        let bad_option = Schema::new().select("shape", "Shape", &["Square"], "Circle");
        assert!(bad_option.validate().is_err());
    }

    #[test]
    fn test_set_rejects_out_of_constraint_values() {
        let mut schema = sample();
        assert!(schema.set("color", ParamValue::Text("#000000".to_owned())).is_ok());
        assert!(schema.set("count", ParamValue::Number(9000.0)).is_err());
        assert_eq!(schema.number("count"), Some(80.0));
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["count"]["kind"], "range");
        assert_eq!(json["count"]["min"], 20.0);
        assert_eq!(json["count"]["value"], 80.0);
        assert_eq!(json["color"]["kind"], "color");
        assert_eq!(json["color"]["value"], "#ffffff");
        assert_eq!(json["shape"]["options"][1], "Circle");
        assert_eq!(json["randomize"]["kind"], "button");
        assert_eq!(json["randomize"]["label"], "Randomize Colors");
    }

    #[test]
    fn test_json_keeps_declaration_order() {
        let text = sample().to_json().unwrap();
        let count = text.find("\"count\"").unwrap();
        let shape = text.find("\"shape\"").unwrap();
        assert!(count < shape);
    }
}
