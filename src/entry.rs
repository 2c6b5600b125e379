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

//! Log entries, independent of any particular logging framework.
//!
//! An [`Entry`] is what a [`Hook`](crate::hook::Hook) is handed: a message, a [`Severity`], a bag
//! of arbitrarily-typed metadata & (optionally) the location of the call site. The
//! [`Layer`](crate::layer::Layer) builds these from [`tracing`] [`Event`]s via
//! [`Entry::from_event`].
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//! [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html

use crate::priority::Severity;

use std::collections::HashMap;

type StdResult<T, E> = std::result::Result<T, E>;

/// A metadata value.
///
/// The journal only deals in strings, but loggers take anything, so we keep the value typed until
/// the last moment & then use its [`Display`](std::fmt::Display) implementation.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    /// Anything else, pre-rendered through its [`Debug`](std::fmt::Debug) implementation
    Debug(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        match self {
            FieldValue::Str(s) | FieldValue::Debug(s) => write!(f, "{}", s),
            FieldValue::I64(i) => write!(f, "{}", i),
            FieldValue::U64(u) => write!(f, "{}", u),
            FieldValue::F64(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl std::convert::From<&str> for FieldValue {
    fn from(x: &str) -> Self {
        FieldValue::Str(x.to_owned())
    }
}

impl std::convert::From<String> for FieldValue {
    fn from(x: String) -> Self {
        FieldValue::Str(x)
    }
}

impl std::convert::From<i64> for FieldValue {
    fn from(x: i64) -> Self {
        FieldValue::I64(x)
    }
}

impl std::convert::From<i32> for FieldValue {
    fn from(x: i32) -> Self {
        FieldValue::I64(x as i64)
    }
}

impl std::convert::From<u64> for FieldValue {
    fn from(x: u64) -> Self {
        FieldValue::U64(x)
    }
}

impl std::convert::From<u32> for FieldValue {
    fn from(x: u32) -> Self {
        FieldValue::U64(x as u64)
    }
}

impl std::convert::From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::F64(x)
    }
}

impl std::convert::From<bool> for FieldValue {
    fn from(x: bool) -> Self {
        FieldValue::Bool(x)
    }
}

/// Where a log call was made.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Caller {
    /// Name of the calling function; [`tracing`] doesn't record one, so we use the module path.
    ///
    /// [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Caller {
    /// Extract call site information from [`tracing`] metadata, if it has any.
    ///
    /// [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
    pub fn from_metadata(meta: &tracing_core::Metadata<'_>) -> Option<Caller> {
        if meta.file().is_none() && meta.module_path().is_none() {
            return None;
        }
        Some(Caller {
            function: meta.module_path().unwrap_or_default().to_owned(),
            file: meta.file().unwrap_or_default().to_owned(),
            line: meta.line().unwrap_or(0),
        })
    }
}

/// A single log event.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub message: String,
    pub level: Severity,
    pub data: HashMap<String, FieldValue>,
    pub caller: Option<Caller>,
}

impl Entry {
    pub fn new<S: Into<String>>(level: Severity, message: S) -> Entry {
        Entry {
            message: message.into(),
            level,
            data: HashMap::new(),
            caller: None,
        }
    }
    pub fn with_field<K: Into<String>, V: Into<FieldValue>>(mut self, key: K, value: V) -> Entry {
        self.data.insert(key.into(), value.into());
        self
    }
    pub fn with_caller(mut self, caller: Caller) -> Entry {
        self.caller = Some(caller);
        self
    }
    /// Build an [`Entry`] from a [`tracing`] [`Event`].
    ///
    /// `meta` is passed separately so that the caller can substitute normalized metadata for events
    /// that were bridged from the `log` crate. The "message" field becomes the message; a
    /// "severity" field naming a [`Severity`] overrides the level implied by `meta` (and is not
    /// carried as metadata). Caller information is attached only if `report_caller` is set.
    ///
    /// [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
    /// [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
    pub fn from_event(
        event: &tracing::Event<'_>,
        meta: &tracing_core::Metadata<'_>,
        report_caller: bool,
    ) -> Entry {
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);
        Entry {
            message: visitor.message.unwrap_or_default(),
            level: visitor
                .severity
                .unwrap_or_else(|| Severity::from(meta.level())),
            data: visitor.data,
            caller: if report_caller {
                Caller::from_metadata(meta)
            } else {
                None
            },
        }
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: Option<String>,
    severity: Option<Severity>,
    data: HashMap<String, FieldValue>,
}

impl EntryVisitor {
    fn record(&mut self, field: &tracing::field::Field, value: FieldValue) {
        // These are tracing-log's bookkeeping for bridged `log` records; the normalized metadata
        // already carries them.
        if cfg!(feature = "tracing-log") && field.name().starts_with("log.") {
            return;
        }
        self.data.insert(field.name().to_owned(), value);
    }
}

impl tracing::field::Visit for EntryVisitor {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.record(field, FieldValue::F64(value))
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.record(field, FieldValue::I64(value))
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.record(field, FieldValue::U64(value))
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.record(field, FieldValue::Bool(value))
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_owned()),
            "severity" => match value.parse::<Severity>() {
                Ok(severity) => self.severity = Some(severity),
                Err(_) => self.record(field, FieldValue::Str(value.to_owned())),
            },
            _ => self.record(field, FieldValue::Str(value.to_owned())),
        }
    }
    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.record(field, FieldValue::Str(value.to_string()))
    }
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // The tracing macros "pre-format" the `message` field so that `value` refers to a
        // `std::fmt::Arguments` instance, which prints to a debug format without enclosing
        // double-quotes.
        let text = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(text),
            _ => self.record(field, FieldValue::Debug(text)),
        }
    }
}
