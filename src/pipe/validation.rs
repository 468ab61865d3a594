//! Field constraints.
//!
//! A type opts in by implementing [`Validate`], calling the rule functions
//! in this module for each of its fields in declaration order. The
//! [`ValidationPipe`] runs those checks on a freshly bound value before any
//! handler sees it.

use crate::pipe::binding::{BindingResult, TYPE_MISMATCH};
use crate::pipe::{Pipe, PipeError, PipeResult};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// A named field plus the rule it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub field: String,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
            rejected_value: None,
        }
    }

    pub fn rejected(mut self, value: impl ToString) -> Self {
        self.rejected_value = Some(value.to_string());
        self
    }
}

/// Ordered list of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violated field names, first occurrence order, without duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.0 {
            if !fields.contains(&violation.field.as_str()) {
                fields.push(&violation.field);
            }
        }
        fields
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Implemented by types whose fields carry constraints.
pub trait Validate {
    fn validate(&self, violations: &mut Violations);
}

/// Text must be present and contain a non-whitespace character.
pub fn not_blank(violations: &mut Violations, field: &str, value: Option<&str>) {
    if value.is_none_or(|text| text.trim().is_empty()) {
        let mut violation = Violation::new(field, "NotBlank", "must not be blank");
        if let Some(text) = value {
            violation = violation.rejected(text);
        }
        violations.push(violation);
    }
}

/// Value must be present.
pub fn not_null<T>(violations: &mut Violations, field: &str, value: &Option<T>) {
    if value.is_none() {
        violations.push(Violation::new(field, "NotNull", "must not be null"));
    }
}

/// Value, when present, must lie in `min..=max`.
pub fn range(violations: &mut Violations, field: &str, value: Option<i64>, min: i64, max: i64) {
    if let Some(value) = value {
        if value < min || value > max {
            violations.push(
                Violation::new(field, "Range", format!("must be between {min} and {max}"))
                    .rejected(value),
            );
        }
    }
}

/// Value, when present, must not exceed `max`.
pub fn max(violations: &mut Violations, field: &str, value: Option<i64>, max: i64) {
    if let Some(value) = value {
        if value > max {
            violations.push(
                Violation::new(field, "Max", format!("must be less than or equal to {max}"))
                    .rejected(value),
            );
        }
    }
}

/// Runs [`Validate`] on a bound value.
///
/// Binding failures are reported first. A field that failed to bind is not
/// checked again, so each violated field is reported for its actual cause.
pub struct ValidationPipe<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> ValidationPipe<T> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for ValidationPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Pipe for ValidationPipe<T>
where
    T: Validate + Send + 'static,
{
    type Input = BindingResult<T>;
    type Output = T;

    async fn transform(&self, input: BindingResult<T>) -> PipeResult<T> {
        let BindingResult { target, errors } = input;

        let mut constraint_errors = Violations::new();
        target.validate(&mut constraint_errors);

        let mut violations = errors;
        for violation in constraint_errors.0 {
            let binding_failed = violations
                .iter()
                .any(|v| v.field == violation.field && v.rule == TYPE_MISMATCH);
            if !binding_failed {
                violations.push(violation);
            }
        }

        if violations.is_empty() {
            Ok(target)
        } else {
            Err(PipeError::Validation(violations))
        }
    }
}
