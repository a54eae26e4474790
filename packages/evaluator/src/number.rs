use crate::error::EvalResult;
use crate::operation::Operator;

/// Numeric literal with an optional CSS unit (`4px`, `50%`, `2`).
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: f64,
    pub unit: String,
}

impl Number {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn unitless(value: f64) -> Self {
        Self::new(value, "")
    }

    pub fn is_percentage(&self) -> bool {
        self.unit == "%"
    }

    /// Same unit, new value.
    pub fn with_value(&self, value: f64) -> Self {
        Self::new(value, self.unit.clone())
    }

    /// The result keeps the left unit, falling back to the right one
    /// (`2 * 4px` is `8px`, `10px / 2px` is `5px`).
    pub fn operate(&self, op: Operator, other: &Number) -> EvalResult<Number> {
        let value = op.apply(self.value, other.value)?;
        let unit = if self.unit.is_empty() {
            other.unit.clone()
        } else {
            self.unit.clone()
        };
        Ok(Number { value, unit })
    }

    pub fn to_css(&self) -> String {
        format!("{}{}", format_number(self.value), self.unit)
    }
}

/// Formats a float the way stylesheets expect: no trailing zeros, at most
/// eight decimals, never `-0`.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = (value * 1e8).round() / 1e8;
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
