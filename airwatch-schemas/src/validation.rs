//! Wire Format Validation
//!
//! Checks an arbitrary JSON document against the telemetry contract: required
//! fields, JSON types, units, display precision, score range and label set.
//! Used to audit documents read back from the sink and to check what the
//! delivery path sends in tests.

use airwatch_core::AirQualityLabel;
use serde_json::{Map, Value};

use crate::telemetry::Unit;

/// Validation report containing all issues found
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Validation errors (must be fixed)
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (should be reviewed)
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, issue_type: IssueType, field: &str, message: String) {
        self.errors.push(ValidationIssue {
            issue_type,
            field: field.to_string(),
            message,
            severity: Severity::Error,
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, issue_type: IssueType, field: &str, message: String) {
        self.warnings.push(ValidationIssue {
            issue_type,
            field: field.to_string(),
            message,
            severity: Severity::Warning,
        });
    }

    /// Get total issue count
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Check whether any error of a given type was reported
    pub fn has_error(&self, issue_type: IssueType) -> bool {
        self.errors.iter().any(|e| e.issue_type == issue_type)
    }
}

/// Individual validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Type of issue
    pub issue_type: IssueType,

    /// Dotted path of the offending field
    pub field: String,

    /// Human-readable message
    pub message: String,

    /// Issue severity
    pub severity: Severity,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    /// Required field is missing
    MissingField,

    /// JSON type doesn't match the contract
    TypeMismatch,

    /// Unit string differs from the one fixed for the channel
    UnitMismatch,

    /// More decimals than the channel's display precision
    PrecisionExceeded,

    /// Score outside 0-100 or negative concentration
    OutOfRange,

    /// Description is not one of the nine labels
    UnknownLabel,

    /// Label disagrees with the score's threshold band
    LabelMismatch,

    /// Field not part of the contract
    UnexpectedField,
}

/// Issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Should be reviewed
    Warning,

    /// Must be fixed
    Error,
}

/// Display precision per numeric channel (`None` = integer)
const CHANNELS: [(&str, Unit, Option<i32>); 4] = [
    ("co", Unit::Ppm, Some(2)),
    ("co2", Unit::Ppm, None),
    ("temperature", Unit::Celsius, Some(1)),
    ("humidity", Unit::Percent, Some(1)),
];

const TOP_LEVEL: [&str; 4] = ["timestamp", "device_id", "sensors", "air_quality"];

/// Validator for telemetry documents
#[derive(Debug, Clone)]
pub struct WireValidator {
    /// Report unknown fields as warnings
    warn_unexpected: bool,
}

impl Default for WireValidator {
    fn default() -> Self {
        Self { warn_unexpected: true }
    }
}

impl WireValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept extra fields silently
    pub fn allow_unexpected(mut self) -> Self {
        self.warn_unexpected = false;
        self
    }

    /// Validate a document
    pub fn validate(&self, value: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(root) = value.as_object() else {
            report.add_error(IssueType::TypeMismatch, "", "Expected JSON object".to_string());
            return report;
        };

        match root.get("timestamp") {
            None => missing(&mut report, "timestamp"),
            Some(ts) if !ts.is_u64() => report.add_error(
                IssueType::TypeMismatch,
                "timestamp",
                format!("Expected epoch seconds, got {}", ts),
            ),
            Some(_) => {}
        }

        match root.get("device_id") {
            None => missing(&mut report, "device_id"),
            Some(Value::String(id)) if id.is_empty() => report.add_error(
                IssueType::OutOfRange,
                "device_id",
                "Device id is empty".to_string(),
            ),
            Some(Value::String(_)) => {}
            Some(other) => report.add_error(
                IssueType::TypeMismatch,
                "device_id",
                format!("Expected string, got {}", other),
            ),
        }

        if let Some(sensors) = object_field(&mut report, root, "sensors", "sensors") {
            self.validate_sensors(&mut report, sensors);
        }

        if let Some(aq) = object_field(&mut report, root, "air_quality", "air_quality") {
            self.validate_air_quality(&mut report, aq);
        }

        if self.warn_unexpected {
            unexpected(&mut report, root, &TOP_LEVEL, "");
        }

        report
    }

    fn validate_sensors(&self, report: &mut ValidationReport, sensors: &Map<String, Value>) {
        for (name, unit, decimals) in CHANNELS {
            let path = format!("sensors.{}", name);
            let Some(channel) = object_field(report, sensors, name, &path) else {
                continue;
            };

            match channel.get("unit") {
                None => missing(report, &format!("{}.unit", path)),
                Some(Value::String(u)) if u == unit.as_str() => {}
                Some(other) => report.add_error(
                    IssueType::UnitMismatch,
                    &format!("{}.unit", path),
                    format!("Expected \"{}\", got {}", unit.as_str(), other),
                ),
            }

            let value_path = format!("{}.value", path);
            match (channel.get("value"), decimals) {
                (None, _) => missing(report, &value_path),
                (Some(v), None) => {
                    if !v.is_u64() {
                        report.add_error(
                            IssueType::TypeMismatch,
                            &value_path,
                            format!("Expected non-negative integer, got {}", v),
                        );
                    }
                }
                (Some(v), Some(places)) => match v.as_f64() {
                    None => report.add_error(
                        IssueType::TypeMismatch,
                        &value_path,
                        format!("Expected number, got {}", v),
                    ),
                    Some(x) => {
                        if !has_at_most_decimals(x, places) {
                            report.add_error(
                                IssueType::PrecisionExceeded,
                                &value_path,
                                format!("{} has more than {} decimals", x, places),
                            );
                        }
                        if unit == Unit::Ppm && x < 0.0 {
                            report.add_error(
                                IssueType::OutOfRange,
                                &value_path,
                                format!("Negative concentration {}", x),
                            );
                        }
                    }
                },
            }

            if self.warn_unexpected {
                unexpected(report, channel, &["value", "unit"], &path);
            }
        }

        if self.warn_unexpected {
            let names: Vec<&str> = CHANNELS.iter().map(|(n, _, _)| *n).collect();
            unexpected(report, sensors, &names, "sensors");
        }
    }

    fn validate_air_quality(&self, report: &mut ValidationReport, aq: &Map<String, Value>) {
        let score = match aq.get("score") {
            None => {
                missing(report, "air_quality.score");
                None
            }
            Some(v) => match v.as_u64() {
                Some(s) if s <= 100 => Some(s as u8),
                Some(s) => {
                    report.add_error(
                        IssueType::OutOfRange,
                        "air_quality.score",
                        format!("Score {} above 100", s),
                    );
                    None
                }
                None => {
                    report.add_error(
                        IssueType::TypeMismatch,
                        "air_quality.score",
                        format!("Expected integer 0-100, got {}", v),
                    );
                    None
                }
            },
        };

        let label = match aq.get("description") {
            None => {
                missing(report, "air_quality.description");
                None
            }
            Some(Value::String(text)) => {
                let parsed = AirQualityLabel::from_wire(text);
                if parsed.is_none() {
                    report.add_error(
                        IssueType::UnknownLabel,
                        "air_quality.description",
                        format!("Unknown label \"{}\"", text),
                    );
                }
                parsed
            }
            Some(other) => {
                report.add_error(
                    IssueType::TypeMismatch,
                    "air_quality.description",
                    format!("Expected string, got {}", other),
                );
                None
            }
        };

        if let (Some(score), Some(label)) = (score, label) {
            let expected = AirQualityLabel::from_score(score);
            if expected != label {
                report.add_error(
                    IssueType::LabelMismatch,
                    "air_quality.description",
                    format!("Score {} maps to \"{}\", not \"{}\"", score, expected, label),
                );
            }
        }

        if self.warn_unexpected {
            unexpected(report, aq, &["score", "description"], "air_quality");
        }
    }
}

fn missing(report: &mut ValidationReport, field: &str) {
    report.add_error(
        IssueType::MissingField,
        field,
        format!("Required field '{}' is missing", field),
    );
}

fn object_field<'a>(
    report: &mut ValidationReport,
    parent: &'a Map<String, Value>,
    name: &str,
    path: &str,
) -> Option<&'a Map<String, Value>> {
    match parent.get(name) {
        None => {
            missing(report, path);
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            report.add_error(
                IssueType::TypeMismatch,
                path,
                format!("Expected object, got {}", other),
            );
            None
        }
    }
}

fn unexpected(report: &mut ValidationReport, map: &Map<String, Value>, known: &[&str], path: &str) {
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            let field = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            report.add_warning(
                IssueType::UnexpectedField,
                &field,
                format!("Field '{}' is not part of the telemetry schema", field),
            );
        }
    }
}

fn has_at_most_decimals(x: f64, places: i32) -> bool {
    let scaled = x * 10f64.powi(places);
    (scaled - scaled.round()).abs() < 1e-6
}
