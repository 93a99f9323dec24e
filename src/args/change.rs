// ABOUTME: Image change directive validation for commit.
// ABOUTME: Accepts KEY=VALUE where KEY is one of the Dockerfile instructions below.

use super::{InputAction, UsageError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKey {
    Cmd,
    Entrypoint,
    Env,
    Expose,
    Label,
    Onbuild,
    Stopsignal,
    User,
    Volume,
    Workdir,
}

impl ChangeKey {
    pub const ALL: [ChangeKey; 10] = [
        ChangeKey::Cmd,
        ChangeKey::Entrypoint,
        ChangeKey::Env,
        ChangeKey::Expose,
        ChangeKey::Label,
        ChangeKey::Onbuild,
        ChangeKey::Stopsignal,
        ChangeKey::User,
        ChangeKey::Volume,
        ChangeKey::Workdir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKey::Cmd => "CMD",
            ChangeKey::Entrypoint => "ENTRYPOINT",
            ChangeKey::Env => "ENV",
            ChangeKey::Expose => "EXPOSE",
            ChangeKey::Label => "LABEL",
            ChangeKey::Onbuild => "ONBUILD",
            ChangeKey::Stopsignal => "STOPSIGNAL",
            ChangeKey::User => "USER",
            ChangeKey::Volume => "VOLUME",
            ChangeKey::Workdir => "WORKDIR",
        }
    }

    fn lookup(key: &str) -> Option<ChangeKey> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// One `--change` occurrence. Repeated flags accumulate in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDirective {
    pub key: ChangeKey,
    pub value: String,
}

impl ChangeDirective {
    /// Dockerfile instruction form sent to the engine, e.g. `ENV A=b`.
    pub fn instruction(&self) -> String {
        format!("{} {}", self.key.as_str(), self.value)
    }
}

impl fmt::Display for ChangeDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key.as_str(), self.value)
    }
}

impl FromStr for ChangeDirective {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeAction::validate(s)
    }
}

pub struct ChangeAction;

impl InputAction for ChangeAction {
    type Value = ChangeDirective;
    const METAVAR: &'static str = "OPT=VALUE";
    const HELP: &'static str = "Apply change(s) to the new image. May be given multiple times.";

    fn validate(raw: &str) -> Result<ChangeDirective, UsageError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| UsageError::MalformedChange(raw.to_string()))?;

        let key = ChangeKey::lookup(key).ok_or_else(|| UsageError::UnsupportedChange {
            key: key.to_string(),
            valid: ChangeKey::ALL.map(ChangeKey::as_str).join(", "),
        })?;

        Ok(ChangeDirective {
            key,
            value: value.to_string(),
        })
    }
}
