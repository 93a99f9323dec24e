// ABOUTME: Validating input actions applied while command-line flags are parsed.
// ABOUTME: Every value reaching a command has already passed one of these checks.

mod change;
mod detach_key;
mod path;
mod positive;
mod signal;
mod unit;

pub use change::{ChangeAction, ChangeDirective, ChangeKey};
pub use detach_key::{DetachKey, DetachKeyAction};
pub use path::{PathAction, expand_path};
pub use positive::{PositiveInt, PositiveIntAction};
pub use signal::{Signal, SignalAction, nsig, signal_number};
pub use unit::{UnitAction, UnitValue};

use thiserror::Error;

/// A flag value or flag combination that cannot be used.
///
/// Raised before any connection to the engine is made; the binary maps it
/// to the usage exit status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("\"{0}\" is not a valid signal, see your platform documentation")]
    UnknownSignal(String),

    #[error("\"{value}\" is not a valid signal. 1-{max}")]
    SignalOutOfRange { value: String, max: i32 },

    #[error(
        "\"{0}\" must be a single character [a-Z], the string ctrl-<value>, \
         value from [@a-z[\\]^_] or the string DEL"
    )]
    DetachKey(String),

    #[error("option \"{key}\" is not supported, valid options are: {valid}")]
    UnsupportedChange { key: String, valid: String },

    #[error("\"{0}\" must be given as OPT=VALUE")]
    MalformedChange(String),

    #[error("\"{0}\" must be a positive integer, with optional suffix")]
    UnitFormat(String),

    #[error("\"{0}\" only supports suffices of: b, k, m, g")]
    UnitSuffix(String),

    #[error("\"{0}\" is too large")]
    UnitTooLarge(String),

    #[error("\"{0}\" must be a positive integer")]
    NotPositive(String),

    #[error("\"{0}\" must be given as [[ip:]host_port:]container_port[/protocol]")]
    Port(String),

    #[error("\"{0}\" must be given as source:target[:ro]")]
    Volume(String),

    #[error("\"{0}\" must be given as KEY=VALUE")]
    KeyValue(String),

    #[error("{0}")]
    Conflict(String),
}

impl UsageError {
    /// Explicit targets and `--all` were both given.
    pub fn targets_and_all(noun: &str) -> Self {
        Self::Conflict(format!("You may give {noun}(s) or use --all, but not both"))
    }

    /// Neither explicit targets nor `--all` were given.
    pub fn no_targets(noun: &str) -> Self {
        Self::Conflict(format!("You must give {noun}(s) or use --all"))
    }

    pub fn incompatible(first: &str, second: &str) -> Self {
        Self::Conflict(format!("Incompatible options: {first} and {second}"))
    }
}

/// One validating action: turns the raw text of a flag into a checked value.
///
/// Implementations are pure; the same input always yields the same result.
pub trait InputAction {
    type Value;

    /// Placeholder shown in usage text.
    const METAVAR: &'static str;

    /// Help text appended to the flag description.
    const HELP: &'static str;

    fn validate(raw: &str) -> Result<Self::Value, UsageError>;
}

/// Flag help: a lead sentence followed by the action's own note.
pub fn help_for<A: InputAction>(lead: &str) -> String {
    format!("{lead} {}", A::HELP)
}
