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

//! Hooks: per-entry handlers.
//!
//! A [`Hook`] is handed every [`Entry`] at the severities it subscribes to. [`JournalHook`] is the
//! one that matters here: it turns an [`Entry`] into something the journal will accept & sends it.

use crate::entry::{Entry, FieldValue};
use crate::error::Result;
use crate::journal::{Journal, JournalSocket};
use crate::priority::{priority_for, Severity};

use std::collections::HashMap;

/// Operations all hooks must support.
pub trait Hook: Send + Sync {
    /// The severities this hook wants to see
    fn levels(&self) -> &[Severity];
    /// Handle one entry; the hook may modify it
    fn fire(&self, entry: &mut Entry) -> Result<()>;
}

/// Map one character of a metadata key to one the journal will accept in a field name.
fn stringify_char(c: char) -> char {
    match c {
        'A'..='Z' | '0'..='9' | '_' => c,
        'a'..='z' => c.to_ascii_uppercase(),
        _ => '_',
    }
}

/// Rewrite an arbitrary metadata key into a journal field name.
///
/// Letters are upper-cased, digits & underscores kept, and everything else (including any
/// non-ASCII character) becomes an underscore. One leading underscore, if present, is then
/// stripped; only one, so "__x" becomes "_X" (which the journal will still refuse).
pub fn stringify_key(key: &str) -> String {
    let key: String = key.chars().map(stringify_char).collect();
    match key.strip_prefix('_') {
        Some(rest) => rest.to_owned(),
        None => key,
    }
}

/// Turn typed metadata into the journal's string-to-string form.
///
/// Distinct keys can collapse to the same field name ("user-id" & "user_id" both become
/// "USER_ID"); when they do, whichever the map yields last wins.
pub fn stringify_entries(data: &HashMap<String, FieldValue>) -> HashMap<String, String> {
    data.iter()
        .map(|(k, v)| (stringify_key(k), v.to_string()))
        .collect()
}

/// Every severity the journal has a priority for, most severe first.
const JOURNAL_LEVELS: [Severity; 6] = [
    Severity::Panic,
    Severity::Fatal,
    Severity::Error,
    Severity::Warn,
    Severity::Info,
    Severity::Debug,
];

/// A [`Hook`] forwarding [`Entry`]s to a [`Journal`].
///
/// Stateless apart from its [`Journal`] client; it subscribes to every mapped severity & leaves
/// filtering to whatever is upstream of it.
pub struct JournalHook<J: Journal> {
    journal: J,
}

impl<J: Journal> JournalHook<J> {
    pub fn new(journal: J) -> JournalHook<J> {
        JournalHook { journal }
    }
    pub fn journal(&self) -> &J {
        &self.journal
    }
}

impl JournalHook<JournalSocket> {
    /// Attempt to construct a [`JournalHook`] that will send to the system journal
    pub fn try_default() -> Result<Self> {
        Ok(JournalHook::new(JournalSocket::try_default()?))
    }
}

/// Add "func" & "file" metadata describing the call site, if we know it.
fn set_caller(entry: &mut Entry) {
    if let Some(caller) = &entry.caller {
        if !caller.function.is_empty() {
            entry
                .data
                .insert("func".to_owned(), FieldValue::Str(caller.function.clone()));
        }
        if !caller.file.is_empty() {
            entry.data.insert(
                "file".to_owned(),
                FieldValue::Str(format!("{}:{}", caller.file, caller.line)),
            );
        }
    }
}

impl<J: Journal> Hook for JournalHook<J> {
    fn levels(&self) -> &[Severity] {
        &JOURNAL_LEVELS
    }
    fn fire(&self, entry: &mut Entry) -> Result<()> {
        set_caller(entry);
        self.journal.send(
            &entry.message,
            priority_for(entry.level),
            &stringify_entries(&entry.data),
        )
    }
}

#[cfg(test)]
pub(crate) mod test {

    use super::*;

    use crate::entry::Caller;
    use crate::error::Error;
    use crate::priority::Priority;

    use proptest::prelude::*;

    use std::sync::{Arc, Mutex};

    pub(crate) type Sent = Arc<Mutex<Vec<(String, Priority, HashMap<String, String>)>>>;

    /// An in-memory [`Journal`] that records what it's sent.
    #[derive(Clone, Default)]
    pub(crate) struct MockJournal {
        pub(crate) available: bool,
        pub(crate) fail: bool,
        pub(crate) sent: Sent,
    }

    impl MockJournal {
        pub(crate) fn available() -> MockJournal {
            MockJournal {
                available: true,
                ..Default::default()
            }
        }
    }

    impl Journal for MockJournal {
        fn enabled(&self) -> bool {
            self.available
        }
        fn send(
            &self,
            message: &str,
            priority: Priority,
            fields: &HashMap<String, String>,
        ) -> Result<()> {
            if self.fail {
                return Err(Error::transport(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "journald is on vacation",
                )));
            }
            self.sent
                .lock()
                .unwrap()
                .push((message.to_owned(), priority, fields.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_stringify_key() {
        assert_eq!(stringify_key("foo-bar"), "FOO_BAR");
        assert_eq!(stringify_key("_internal"), "INTERNAL");
        assert_eq!(stringify_key("__internal"), "_INTERNAL");
        assert_eq!(stringify_key("user_id9"), "USER_ID9");
        assert_eq!(stringify_key("ALREADY_OK"), "ALREADY_OK");
        assert_eq!(stringify_key("naïve key"), "NA_VE_KEY");
        assert_eq!(stringify_key("日本"), "_");
        assert_eq!(stringify_key("_"), "");
        assert_eq!(stringify_key(""), "");
    }

    proptest! {
        #[test]
        fn stringified_ascii_keys_are_journal_names(key in "[ -~]{0,40}") {
            let out = stringify_key(&key);
            prop_assert!(out
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_'));
            // Exactly one character goes missing, & only when the first one became an underscore
            let stripped = key.chars().next().map_or(false, |c| stringify_char(c) == '_');
            prop_assert_eq!(out.len() + usize::from(stripped), key.len());
            if out.starts_with('_') {
                // Only possible when the first two characters both mapped to underscores
                prop_assert!(key.chars().take(2).all(|c| stringify_char(c) == '_'));
            }
        }
    }

    #[test]
    fn test_stringify_entries_collision() {
        let mut data = HashMap::new();
        data.insert("user-id".to_owned(), FieldValue::from(1));
        data.insert("user_id".to_owned(), FieldValue::from(2));
        let out = stringify_entries(&data);
        assert_eq!(out.len(), 1);
        assert!(out["USER_ID"] == "1" || out["USER_ID"] == "2");
    }

    #[test]
    fn test_levels() {
        let hook = JournalHook::new(MockJournal::available());
        assert_eq!(
            hook.levels(),
            &[
                Severity::Panic,
                Severity::Fatal,
                Severity::Error,
                Severity::Warn,
                Severity::Info,
                Severity::Debug
            ]
        );
    }

    #[test]
    fn test_fire() {
        let journal = MockJournal::available();
        let hook = JournalHook::new(journal.clone());

        let mut entry = Entry::new(Severity::Error, "boom").with_field("user-id", 42);
        hook.fire(&mut entry).unwrap();

        let sent = journal.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (message, priority, fields) = &sent[0];
        assert_eq!(message, "boom");
        assert_eq!(*priority, Priority::LOG_ERR);
        assert_eq!(
            fields,
            &HashMap::from([("USER_ID".to_owned(), "42".to_owned())])
        );
    }

    #[test]
    fn test_fire_priorities() {
        let journal = MockJournal::available();
        let hook = JournalHook::new(journal.clone());
        for (severity, priority) in [
            (Severity::Panic, Priority::LOG_EMERG),
            (Severity::Fatal, Priority::LOG_CRIT),
            (Severity::Error, Priority::LOG_ERR),
            (Severity::Warn, Priority::LOG_WARNING),
            (Severity::Info, Priority::LOG_INFO),
            (Severity::Debug, Priority::LOG_DEBUG),
            // Unmapped; falls through to the zero value. Misconfiguration risk!
            (Severity::Trace, Priority::LOG_EMERG),
        ] {
            hook.fire(&mut Entry::new(severity, "x")).unwrap();
            assert_eq!(journal.sent.lock().unwrap().last().unwrap().1, priority);
        }
    }

    #[test]
    fn test_fire_caller() {
        let journal = MockJournal::available();
        let hook = JournalHook::new(journal.clone());

        let mut entry = Entry::new(Severity::Info, "hi")
            .with_field("k", "v")
            .with_caller(Caller {
                function: "app::handler".to_owned(),
                file: "src/handler.rs".to_owned(),
                line: 99,
            });
        hook.fire(&mut entry).unwrap();

        // The entry itself was enriched...
        assert_eq!(entry.data.len(), 3);
        assert_eq!(entry.data["func"], FieldValue::from("app::handler"));
        // and so was what the journal saw.
        let sent = journal.sent.lock().unwrap();
        let fields = &sent[0].2;
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["FUNC"], "app::handler");
        assert_eq!(fields["FILE"], "src/handler.rs:99");
        assert_eq!(fields["K"], "v");
    }

    #[test]
    fn test_fire_partial_caller() {
        let journal = MockJournal::available();
        let hook = JournalHook::new(journal.clone());

        let mut entry = Entry::new(Severity::Info, "hi").with_caller(Caller {
            function: String::new(),
            file: "src/lib.rs".to_owned(),
            line: 1,
        });
        hook.fire(&mut entry).unwrap();
        let mut entry = Entry::new(Severity::Info, "hi").with_caller(Caller {
            function: "f".to_owned(),
            file: String::new(),
            line: 1,
        });
        hook.fire(&mut entry).unwrap();

        let sent = journal.sent.lock().unwrap();
        assert_eq!(
            sent[0].2,
            HashMap::from([("FILE".to_owned(), "src/lib.rs:1".to_owned())])
        );
        assert_eq!(
            sent[1].2,
            HashMap::from([("FUNC".to_owned(), "f".to_owned())])
        );
    }

    #[test]
    fn test_fire_error() {
        let journal = MockJournal {
            available: true,
            fail: true,
            ..Default::default()
        };
        let hook = JournalHook::new(journal);
        let err = hook
            .fire(&mut Entry::new(Severity::Warn, "lost"))
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(format!("{}", err).contains("journald is on vacation"));
    }
}
