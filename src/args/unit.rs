// ABOUTME: Resource size validation: a positive integer with optional b/k/m/g suffix.
// ABOUTME: The text is kept as typed; bytes are computed only when a request is built.

use super::{InputAction, UsageError};
use std::fmt;
use std::str::FromStr;

const SUFFIXES: [(char, u64); 4] = [('b', 1), ('k', 1 << 10), ('m', 1 << 20), ('g', 1 << 30)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitValue(String);

impl UnitValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Size in bytes, or `None` if it does not fit in an `i64`.
    pub fn bytes(&self) -> Option<i64> {
        let (digits, multiplier) = match self.0.char_indices().last() {
            Some((i, c)) if c.is_ascii_alphabetic() => {
                let multiplier = SUFFIXES.iter().find(|(s, _)| *s == c)?.1;
                (&self.0[..i], multiplier)
            }
            _ => (self.0.as_str(), 1),
        };
        digits
            .parse::<u64>()
            .ok()?
            .checked_mul(multiplier)
            .and_then(|n| i64::try_from(n).ok())
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UnitValue {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitAction::validate(s)
    }
}

pub struct UnitAction;

impl InputAction for UnitAction {
    type Value = UnitValue;
    const METAVAR: &'static str = "UNIT";
    const HELP: &'static str = "(format: <number>[<unit>], where unit = b, k, m or g)";

    fn validate(raw: &str) -> Result<UnitValue, UsageError> {
        if let Ok(n) = raw.parse::<i64>() {
            return if n > 0 {
                Ok(UnitValue(raw.to_string()))
            } else {
                Err(UsageError::NotPositive(raw.to_string()))
            };
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UsageError::UnitTooLarge(raw.to_string()));
        }

        let Some((split, suffix)) = raw.char_indices().last() else {
            return Err(UsageError::UnitFormat(raw.to_string()));
        };
        let digits = &raw[..split];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UsageError::UnitFormat(raw.to_string()));
        }
        if !SUFFIXES.iter().any(|(s, _)| *s == suffix) {
            return Err(UsageError::UnitSuffix(raw.to_string()));
        }
        if digits.bytes().all(|b| b == b'0') {
            return Err(UsageError::NotPositive(raw.to_string()));
        }
        let value = UnitValue(raw.to_string());
        if value.bytes().is_none() {
            return Err(UsageError::UnitTooLarge(raw.to_string()));
        }
        Ok(value)
    }
}
