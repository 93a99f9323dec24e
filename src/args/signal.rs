// ABOUTME: Signal flag validation by number or platform signal name.
// ABOUTME: Names are resolved against the libc constants of the build target.

use super::{InputAction, UsageError};
use std::fmt;
use std::str::FromStr;

/// One past the highest signal number on this platform.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn nsig() -> i32 {
    libc::SIGRTMAX() + 1
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub fn nsig() -> i32 {
    32
}

/// Look up `SIG<NAME>` for this platform.
pub fn signal_number(name: &str) -> Option<i32> {
    let number = match name {
        "HUP" => libc::SIGHUP,
        "INT" => libc::SIGINT,
        "QUIT" => libc::SIGQUIT,
        "ILL" => libc::SIGILL,
        "TRAP" => libc::SIGTRAP,
        "ABRT" => libc::SIGABRT,
        "BUS" => libc::SIGBUS,
        "FPE" => libc::SIGFPE,
        "KILL" => libc::SIGKILL,
        "USR1" => libc::SIGUSR1,
        "SEGV" => libc::SIGSEGV,
        "USR2" => libc::SIGUSR2,
        "PIPE" => libc::SIGPIPE,
        "ALRM" => libc::SIGALRM,
        "TERM" => libc::SIGTERM,
        "CHLD" => libc::SIGCHLD,
        "CONT" => libc::SIGCONT,
        "STOP" => libc::SIGSTOP,
        "TSTP" => libc::SIGTSTP,
        "TTIN" => libc::SIGTTIN,
        "TTOU" => libc::SIGTTOU,
        "URG" => libc::SIGURG,
        "XCPU" => libc::SIGXCPU,
        "XFSZ" => libc::SIGXFSZ,
        "VTALRM" => libc::SIGVTALRM,
        "PROF" => libc::SIGPROF,
        "WINCH" => libc::SIGWINCH,
        "IO" => libc::SIGIO,
        "SYS" => libc::SIGSYS,
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "CLD" => libc::SIGCHLD,
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "IOT" => libc::SIGIOT,
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "STKFLT" => libc::SIGSTKFLT,
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "POLL" => libc::SIGPOLL,
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "PWR" => libc::SIGPWR,
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "RTMIN" => libc::SIGRTMIN(),
        #[cfg(any(target_os = "linux", target_os = "android"))]
        "RTMAX" => libc::SIGRTMAX(),
        #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
        "EMT" => libc::SIGEMT,
        #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
        "INFO" => libc::SIGINFO,
        _ => return None,
    };
    Some(number)
}

/// A signal number in `[1, NSIG)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal(i32);

impl Signal {
    pub const KILL: Signal = Signal(libc::SIGKILL);
    pub const TERM: Signal = Signal(libc::SIGTERM);
    pub const INT: Signal = Signal(libc::SIGINT);

    pub fn number(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Signal {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalAction::validate(s)
    }
}

/// Accepts `9` or an exact platform name such as `KILL`.
pub struct SignalAction;

impl InputAction for SignalAction {
    type Value = Signal;
    const METAVAR: &'static str = "SIGNAL";
    const HELP: &'static str = "It may be given as a name or a number.";

    fn validate(raw: &str) -> Result<Signal, UsageError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            let max = nsig();
            return match raw.parse::<i32>() {
                Ok(n) if (1..max).contains(&n) => Ok(Signal(n)),
                _ => Err(UsageError::SignalOutOfRange {
                    value: raw.to_string(),
                    max,
                }),
            };
        }

        signal_number(raw)
            .map(Signal)
            .ok_or_else(|| UsageError::UnknownSignal(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_in_range() {
        assert_eq!(SignalAction::validate("1").unwrap().number(), 1);
        assert_eq!(SignalAction::validate("15").unwrap(), Signal::TERM);
        let last = (nsig() - 1).to_string();
        assert_eq!(SignalAction::validate(&last).unwrap().number(), nsig() - 1);
    }

    #[test]
    fn rejects_numbers_out_of_range() {
        assert!(matches!(
            SignalAction::validate("0"),
            Err(UsageError::SignalOutOfRange { .. })
        ));
        let too_big = nsig().to_string();
        assert!(SignalAction::validate(&too_big).is_err());
        assert!(SignalAction::validate("99999999999").is_err());
    }

    #[test]
    fn resolves_names() {
        assert_eq!(SignalAction::validate("KILL").unwrap(), Signal::KILL);
        assert_eq!(SignalAction::validate("TERM").unwrap(), Signal::TERM);
        assert_eq!(SignalAction::validate("HUP").unwrap().number(), libc::SIGHUP);
    }

    #[test]
    fn names_must_match_exactly() {
        for raw in ["kill", "Kill", "SIGKILL", "sigterm", "hup"] {
            assert_eq!(
                SignalAction::validate(raw),
                Err(UsageError::UnknownSignal(raw.to_string())),
                "{raw:?} accepted"
            );
        }
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn cld_aliases_chld() {
        assert_eq!(SignalAction::validate("CLD").unwrap().number(), libc::SIGCHLD);
        assert_eq!(SignalAction::validate("CLD"), SignalAction::validate("CHLD"));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            SignalAction::validate("BOGUS"),
            Err(UsageError::UnknownSignal("BOGUS".to_string()))
        );
        assert!(SignalAction::validate("-9").is_err());
        assert!(SignalAction::validate("").is_err());
    }
}
