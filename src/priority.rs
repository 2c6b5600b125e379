// Copyright (C) 2025 Michael Herstine <sp1ff@pobox.com>
//
// This file is part of tracing-journalhook.
//
// tracing-journalhook is free software: you can redistribute it and/or modify it under the terms of
// the GNU General Public License as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// tracing-journalhook is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with tracing-journalhook.
// If not, see <http://www.gnu.org/licenses/>.
//! Severity & priority definitions.
//!
//! [`Severity`] is the logging-side notion of "how bad is it"; [`Priority`] is the journal's.
//! [`SEVERITY_MAP`] relates the two.

type StdResult<T, E> = std::result::Result<T, E>;

/// The journal accepts the eight syslog priorities in its `PRIORITY` field. The enumeration values
/// duplicate the constants documented as per the `syslog()` manual [page] & defined in
/// `<syslog.h>`.
///
/// [page]: https://man7.org/linux/man-pages/man3/syslog.3.html
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Priority {
    /// system is unusable
    #[default]
    LOG_EMERG,
    /// action must be taken immediately
    LOG_ALERT,
    /// critical conditions
    LOG_CRIT,
    /// error conditions
    LOG_ERR,
    /// warning conditions
    LOG_WARNING,
    /// normal, but significant condition
    LOG_NOTICE,
    /// informational message
    LOG_INFO,
    /// debug-level message
    LOG_DEBUG,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Priority::LOG_EMERG => "LOG_EMERG",
                Priority::LOG_ALERT => "LOG_ALERT",
                Priority::LOG_CRIT => "LOG_CRIT",
                Priority::LOG_ERR => "LOG_ERR",
                Priority::LOG_WARNING => "LOG_WARNING",
                Priority::LOG_NOTICE => "LOG_NOTICE",
                Priority::LOG_INFO => "LOG_INFO",
                Priority::LOG_DEBUG => "LOG_DEBUG",
            }
        )
    }
}

/// Logging severities, most to least severe.
///
/// These follow the levels most structured loggers offer, which is two more than [`tracing`]
/// does at the top (`Panic` & `Fatal`). Events can reach those by carrying a `severity` field; see
/// [`Layer`](crate::layer::Layer).
///
/// [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    Panic,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Severity::Panic => "panic",
                Severity::Fatal => "fatal",
                Severity::Error => "error",
                Severity::Warn => "warning",
                Severity::Info => "info",
                Severity::Debug => "debug",
                Severity::Trace => "trace",
            }
        )
    }
}

/// Returned when a string names no [`Severity`]
#[derive(Clone, Debug, PartialEq)]
pub struct ParseSeverityError(String);

impl std::fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(f, "not a valid severity: {:?}", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl std::str::FromStr for Severity {
    type Err = ParseSeverityError;
    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panic" => Ok(Severity::Panic),
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            _ => Err(ParseSeverityError(s.to_owned())),
        }
    }
}

impl std::convert::From<&tracing::Level> for Severity {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Severity::Error,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::TRACE => Severity::Trace,
        }
    }
}

/// Every [`Severity`] the journal has a [`Priority`] for; `Trace` has no entry.
pub const SEVERITY_MAP: [(Severity, Priority); 6] = [
    (Severity::Debug, Priority::LOG_DEBUG),
    (Severity::Info, Priority::LOG_INFO),
    (Severity::Warn, Priority::LOG_WARNING),
    (Severity::Error, Priority::LOG_ERR),
    (Severity::Fatal, Priority::LOG_CRIT),
    (Severity::Panic, Priority::LOG_EMERG),
];

/// Look `severity` up in [`SEVERITY_MAP`].
///
/// A severity with no entry gets [`Priority::default()`], which is `LOG_EMERG`. That's the most
/// urgent priority the journal has, so a hook subscribed to unmapped severities will page people.
/// [`JournalHook`](crate::hook::JournalHook) never subscribes to them.
pub fn priority_for(severity: Severity) -> Priority {
    SEVERITY_MAP
        .iter()
        .find(|(s, _)| *s == severity)
        .map(|(_, p)| *p)
        .unwrap_or_default()
}

#[cfg(test)]
mod severity_priority_tests {
    use super::*;

    #[test]
    fn test_priority_values() {
        assert_eq!(0, Priority::LOG_EMERG as u8);
        assert_eq!(3, Priority::LOG_ERR as u8);
        assert_eq!(7, Priority::LOG_DEBUG as u8);
        assert_eq!(Priority::LOG_EMERG, Priority::default());
        assert_eq!(format!("{}", Priority::LOG_CRIT), "LOG_CRIT".to_string());
        assert_eq!(format!("{:?}", Priority::LOG_CRIT), "LOG_CRIT".to_string());
    }

    #[test]
    fn test_severity_map() {
        assert_eq!(priority_for(Severity::Debug), Priority::LOG_DEBUG);
        assert_eq!(priority_for(Severity::Info), Priority::LOG_INFO);
        assert_eq!(priority_for(Severity::Warn), Priority::LOG_WARNING);
        assert_eq!(priority_for(Severity::Error), Priority::LOG_ERR);
        assert_eq!(priority_for(Severity::Fatal), Priority::LOG_CRIT);
        assert_eq!(priority_for(Severity::Panic), Priority::LOG_EMERG);
    }

    /// Unmapped severities land on the zero value, i.e. emergency. Surprising, but it's what we
    /// promise.
    #[test]
    fn test_unmapped_severity() {
        assert!(SEVERITY_MAP.iter().all(|(s, _)| *s != Severity::Trace));
        assert_eq!(priority_for(Severity::Trace), Priority::LOG_EMERG);
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!("FATAL".parse::<Severity>(), Ok(Severity::Fatal));
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warn));
        assert!("critical".parse::<Severity>().is_err());
        for s in [
            Severity::Panic,
            Severity::Fatal,
            Severity::Error,
            Severity::Warn,
            Severity::Info,
            Severity::Debug,
            Severity::Trace,
        ] {
            assert_eq!(s.to_string().parse::<Severity>(), Ok(s));
        }
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(Severity::from(&tracing::Level::ERROR), Severity::Error);
        assert_eq!(Severity::from(&tracing::Level::TRACE), Severity::Trace);
        assert!(Severity::Panic < Severity::Fatal && Severity::Debug < Severity::Trace);
    }
}
