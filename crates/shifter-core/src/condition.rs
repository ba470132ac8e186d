//! Typed conditions for conditional metadata replacement.
//!
//! A condition reads as `candidate <operator> operand`, where the candidate
//! is the product's current metadata value and the operand comes from
//! configuration. `lt 0` therefore holds for a stored value of `-1`.
//!
//! Conditions never fail. A numeric condition whose operand or candidate
//! does not parse compares against `NaN` and is unsatisfied, and an
//! unrecognised operator is unsatisfied as well.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Relational operator of a condition.
///
/// Names outside the known set are kept verbatim in [`Operator::Unknown`] so
/// that configuration prints back as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Lt,
    Lte,
    Eq,
    Gt,
    Gte,
    /// Any other operator name. Never satisfied.
    Unknown(String),
}

impl Operator {
    /// Whether `ordering` (of candidate relative to operand) satisfies the
    /// operator. `None` means the values are unordered (`NaN`).
    fn accepts(&self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Unknown(_) => false,
        }
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "eq" => Operator::Eq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            _ => Operator::Unknown(name),
        }
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Lt => "lt".to_string(),
            Operator::Lte => "lte".to_string(),
            Operator::Eq => "eq".to_string(),
            Operator::Gt => "gt".to_string(),
            Operator::Gte => "gte".to_string(),
            Operator::Unknown(name) => name,
        }
    }
}

/// How operand and candidate are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Number,
    /// Plain string ordering. Also used for unrecognised variant names.
    #[default]
    #[serde(other)]
    String,
}

/// Condition as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub operator: Operator,
    pub value: String,
    #[serde(default)]
    pub variant: Variant,
}

/// A compiled condition. The comparison variant is fixed when the condition
/// is built, so numeric operands are parsed once. `raw` keeps the operand as
/// configured for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConditionSpec", into = "ConditionSpec")]
pub enum Condition {
    Numeric {
        operator: Operator,
        operand: f64,
        raw: String,
    },
    Text { operator: Operator, operand: String },
}

impl Condition {
    /// Evaluates the condition against a stored metadata value.
    #[must_use]
    pub fn holds(&self, candidate: &str) -> bool {
        match self {
            Condition::Numeric {
                operator, operand, ..
            } => {
                operator.accepts(parse_number(candidate).partial_cmp(operand))
            }
            Condition::Text { operator, operand } => {
                operator.accepts(Some(candidate.cmp(operand.as_str())))
            }
        }
    }
}

impl From<ConditionSpec> for Condition {
    fn from(spec: ConditionSpec) -> Self {
        match spec.variant {
            Variant::Number => Condition::Numeric {
                operator: spec.operator,
                operand: parse_number(&spec.value),
                raw: spec.value,
            },
            Variant::String => Condition::Text {
                operator: spec.operator,
                operand: spec.value,
            },
        }
    }
}

impl From<Condition> for ConditionSpec {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Numeric { operator, raw, .. } => ConditionSpec {
                operator,
                value: raw,
                variant: Variant::Number,
            },
            Condition::Text { operator, operand } => ConditionSpec {
                operator,
                value: operand,
                variant: Variant::String,
            },
        }
    }
}

/// Evaluates `candidate <operator> operand` under the given variant.
///
/// Returns `false` for unknown operators and for numeric comparisons where
/// either side is not a number.
#[must_use]
pub fn evaluate(operator: Operator, operand: &str, candidate: &str, variant: Variant) -> bool {
    Condition::from(ConditionSpec {
        operator,
        value: operand.to_owned(),
        variant,
    })
    .holds(candidate)
}

/// Loosely parses a metadata value as a number.
///
/// Surrounding whitespace is ignored and an empty string reads as `0`.
/// Accepts decimal and exponent forms, `Infinity` with an optional sign, and
/// `0x`/`0o`/`0b` integer literals. Anything else is `NaN`.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        // from_str_radix takes a leading sign; a prefixed literal has none.
        if digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        #[allow(clippy::cast_precision_loss)]
        return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }

    // Rust also accepts "inf" and "nan" spellings; those are not numbers here.
    if s.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}
