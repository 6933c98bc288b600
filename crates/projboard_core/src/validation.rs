//! Field validation rules for user input.
//!
//! # Responsibility
//! - Check one raw value against presence and positivity constraints.
//!
//! # Invariants
//! - Evaluation is pure and never fails; it only answers yes or no.
//! - `positive` means strictly greater than zero.

/// Raw value as captured from a form field or computed by a caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Numeric view of the value; text counts as numeric when its trimmed
    /// form parses as a finite number.
    fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };
        number.filter(|value| value.is_finite())
    }

    /// Numbers always render to non-blank text, `NaN` included.
    fn has_content(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::Number(_) => true,
        }
    }
}

/// One value plus the constraints it must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validatable<'a> {
    pub value: FieldValue<'a>,
    pub required: bool,
    pub positive: bool,
}

impl<'a> Validatable<'a> {
    pub fn text(value: &'a str) -> Self {
        Self {
            value: FieldValue::Text(value),
            required: false,
            positive: false,
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            value: FieldValue::Number(value),
            required: false,
            positive: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }
}

/// Returns whether `input` satisfies all of its enabled constraints.
pub fn validate_field(input: &Validatable<'_>) -> bool {
    if input.required && !input.value.has_content() {
        return false;
    }
    if input.positive && !input.value.as_number().is_some_and(|value| value > 0.0) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{validate_field, Validatable};

    #[test]
    fn unconstrained_values_always_pass() {
        assert!(validate_field(&Validatable::text("")));
        assert!(validate_field(&Validatable::number(-4.0)));
    }

    #[test]
    fn required_rejects_blank_text() {
        assert!(!validate_field(&Validatable::text("").required()));
        assert!(!validate_field(&Validatable::text(" \t\n").required()));
        assert!(validate_field(&Validatable::text(" x ").required()));
    }

    #[test]
    fn required_accepts_any_number() {
        assert!(validate_field(&Validatable::number(0.0).required()));
        assert!(validate_field(&Validatable::number(f64::NAN).required()));
        assert!(!validate_field(&Validatable::number(f64::NAN).required().positive()));
    }

    #[test]
    fn positive_is_strict() {
        assert!(validate_field(&Validatable::text("3").positive()));
        assert!(validate_field(&Validatable::number(0.5).positive()));
        assert!(!validate_field(&Validatable::text("0").positive()));
        assert!(!validate_field(&Validatable::text("-1").positive()));
        assert!(!validate_field(&Validatable::number(0.0).positive()));
    }

    #[test]
    fn positive_rejects_non_numeric_text() {
        assert!(!validate_field(&Validatable::text("three").required().positive()));
        assert!(!validate_field(&Validatable::text("inf").positive()));
        assert!(!validate_field(&Validatable::number(f64::NAN).positive()));
    }

    #[test]
    fn people_rule_combines_both_constraints() {
        let rule = |raw| validate_field(&Validatable::text(raw).required().positive());
        assert!(rule(" 7 "));
        assert!(!rule(""));
        assert!(!rule("-1"));
    }
}
