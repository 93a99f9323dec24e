// ABOUTME: Detach key validation for attach, start and run.
// ABOUTME: Maps ctrl-<x> labels, DEL and single characters to one key byte.

use super::{InputAction, UsageError};
use std::fmt;
use std::str::FromStr;

/// Control-key labels; a label's position is the byte it produces.
pub const KEY_LABELS: [&str; 32] = [
    "ctrl-@", "ctrl-a", "ctrl-b", "ctrl-c", "ctrl-d", "ctrl-e", "ctrl-f", "ctrl-g", "ctrl-h",
    "ctrl-i", "ctrl-j", "ctrl-k", "ctrl-l", "ctrl-m", "ctrl-n", "ctrl-o", "ctrl-p", "ctrl-q",
    "ctrl-r", "ctrl-s", "ctrl-t", "ctrl-u", "ctrl-v", "ctrl-w", "ctrl-x", "ctrl-y", "ctrl-z",
    "ctrl-[", "ctrl-\\", "ctrl-]", "ctrl-^", "ctrl-_",
];

const DEL: u8 = 127;

/// The byte that ends an attached session without stopping the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachKey(u8);

impl DetachKey {
    /// ctrl-d
    pub const DEFAULT: DetachKey = DetachKey(4);

    pub fn byte(self) -> u8 {
        self.0
    }
}

impl Default for DetachKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for DetachKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b if (b as usize) < KEY_LABELS.len() => f.write_str(KEY_LABELS[b as usize]),
            DEL => f.write_str("DEL"),
            b => write!(f, "{}", b as char),
        }
    }
}

impl FromStr for DetachKey {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetachKeyAction::validate(s)
    }
}

impl<'de> serde::Deserialize<'de> for DetachKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub struct DetachKeyAction;

impl InputAction for DetachKeyAction {
    type Value = DetachKey;
    const METAVAR: &'static str = "KEY";
    const HELP: &'static str = "Override the key sequence for detaching a container. \
        (format: a single character [a-Z], the string DEL, or ctrl-<value> \
        where <value> is from [@a-z[\\]^_]) (default: ctrl-d)";

    fn validate(raw: &str) -> Result<DetachKey, UsageError> {
        if let Some(index) = KEY_LABELS.iter().position(|label| *label == raw) {
            return Ok(DetachKey(index as u8));
        }
        if raw == "DEL" {
            return Ok(DetachKey(DEL));
        }
        match raw.as_bytes() {
            [b] if b.is_ascii() => Ok(DetachKey(*b)),
            _ => Err(UsageError::DetachKey(raw.to_string())),
        }
    }
}
