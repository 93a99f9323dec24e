// ABOUTME: Positive integer validation for counts and timeouts.
// ABOUTME: Used by --tail, --timeout, --cpu-shares and friends.

use super::{InputAction, UsageError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PositiveInt(u64);

impl PositiveInt {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PositiveInt {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PositiveIntAction::validate(s)
    }
}

pub struct PositiveIntAction;

impl InputAction for PositiveIntAction {
    type Value = PositiveInt;
    const METAVAR: &'static str = ">0";
    const HELP: &'static str = "Must be a positive integer.";

    fn validate(raw: &str) -> Result<PositiveInt, UsageError> {
        match raw.parse::<i64>() {
            Ok(n) if n > 0 => Ok(PositiveInt(n as u64)),
            _ => Err(UsageError::NotPositive(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive() {
        assert_eq!(PositiveIntAction::validate("10").unwrap().get(), 10);
    }

    #[test]
    fn rejects_zero_negative_and_text() {
        for raw in ["0", "-1", "ten", "1.5", ""] {
            assert!(PositiveIntAction::validate(raw).is_err(), "{raw:?} accepted");
        }
    }
}
