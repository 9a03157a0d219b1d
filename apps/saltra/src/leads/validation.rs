//! Lead field constraints, kept as data.
//!
//! `LEAD_VALIDATION` is the declarative table. Nothing here runs during a fetch;
//! forms call `validate_lead` / `validate_update` explicitly before submitting.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::leads::models::{LeadBase, LeadUpdateSchema};

/// Optional leading `+`, then 1 to 15 digits.
pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{1,15}$").expect("phone pattern is valid"));

#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Character count, inclusive on both ends.
    Length { min: usize, max: usize },
    /// Numeric bounds, inclusive. `max: None` means unbounded.
    Range { min: f64, max: Option<f64> },
    Pattern(&'static LazyLock<Regex>),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraint: Constraint,
}

pub static LEAD_VALIDATION: &[FieldRule] = &[
    FieldRule {
        field: "first_name",
        constraint: Constraint::Length { min: 2, max: 100 },
    },
    FieldRule {
        field: "last_name",
        constraint: Constraint::Length { min: 2, max: 100 },
    },
    FieldRule {
        field: "company",
        constraint: Constraint::Length { min: 2, max: 100 },
    },
    FieldRule {
        field: "company_size",
        constraint: Constraint::Range { min: 1.0, max: None },
    },
    FieldRule {
        field: "score",
        constraint: Constraint::Range {
            min: 0.0,
            max: Some(100.0),
        },
    },
    FieldRule {
        field: "phone",
        constraint: Constraint::Pattern(&PHONE_PATTERN),
    },
];

/// Looks up the rule for a field name, if that field is constrained.
pub fn rule_for(field: &str) -> Option<&'static FieldRule> {
    LEAD_VALIDATION.iter().find(|rule| rule.field == field)
}

/// A value handed to `Constraint::check`.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl Constraint {
    /// Returns a human-readable reason when `value` breaks the constraint.
    pub fn check(&self, value: FieldValue<'_>) -> Option<String> {
        match (self, value) {
            (Constraint::Length { min, max }, FieldValue::Text(text)) => {
                let len = text.chars().count();
                if len < *min {
                    Some(format!("must be at least {min} characters"))
                } else if len > *max {
                    Some(format!("must be at most {max} characters"))
                } else {
                    None
                }
            }
            (Constraint::Range { min, max }, FieldValue::Number(n)) => {
                if n.is_nan() || n < *min {
                    Some(format!("must be at least {min}"))
                } else if let Some(max) = max.filter(|max| n > *max) {
                    Some(format!("must be at most {max}"))
                } else {
                    None
                }
            }
            (Constraint::Pattern(pattern), FieldValue::Text(text)) => {
                if pattern.is_match(text) {
                    None
                } else {
                    Some(format!("must match {}", pattern.as_str()))
                }
            }
            (Constraint::Length { .. } | Constraint::Pattern(_), FieldValue::Number(_)) => {
                Some("expected text".to_string())
            }
            (Constraint::Range { .. }, FieldValue::Text(_)) => Some("expected a number".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadValidationReport {
    pub passed: bool,
    pub violations: Vec<FieldViolation>,
}

impl LeadValidationReport {
    fn from_violations(violations: Vec<FieldViolation>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
        }
    }
}

/// Checks one field against the table. Unconstrained fields always pass.
pub fn check_field(field: &str, value: FieldValue<'_>) -> Option<FieldViolation> {
    let rule = rule_for(field)?;
    rule.constraint.check(value).map(|reason| FieldViolation {
        field: field.to_string(),
        reason,
    })
}

/// Validates the constrained fields of a full lead.
pub fn validate_lead(lead: &LeadBase) -> LeadValidationReport {
    let mut checks = vec![
        ("first_name", FieldValue::Text(&lead.first_name)),
        ("last_name", FieldValue::Text(&lead.last_name)),
        ("company", FieldValue::Text(&lead.company)),
        ("company_size", FieldValue::Number(f64::from(lead.company_size))),
    ];
    if let Some(phone) = &lead.phone {
        checks.push(("phone", FieldValue::Text(phone)));
    }

    LeadValidationReport::from_violations(
        checks
            .into_iter()
            .filter_map(|(field, value)| check_field(field, value))
            .collect(),
    )
}

/// Validates only the fields a patch actually sets.
pub fn validate_update(patch: &LeadUpdateSchema) -> LeadValidationReport {
    let texts = [
        ("first_name", patch.first_name.as_deref()),
        ("last_name", patch.last_name.as_deref()),
        ("company", patch.company.as_deref()),
        ("phone", patch.phone.as_deref()),
    ];

    let mut violations: Vec<FieldViolation> = texts
        .into_iter()
        .filter_map(|(field, value)| value.and_then(|v| check_field(field, FieldValue::Text(v))))
        .collect();

    if let Some(size) = patch.company_size {
        violations.extend(check_field("company_size", FieldValue::Number(f64::from(size))));
    }

    LeadValidationReport::from_violations(violations)
}

pub fn validate_score(score: f64) -> LeadValidationReport {
    LeadValidationReport::from_violations(
        check_field("score", FieldValue::Number(score))
            .into_iter()
            .collect(),
    )
}
