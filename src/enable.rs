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

//! Switching a program's logging over to the journal.
//!
//! [`enable`] builds a [`Dispatch`] that sends everything to the journal if there is one, and
//! otherwise keeps writing wherever the program was writing before. Nothing global is touched;
//! install the result with [`tracing::dispatcher::set_global_default`] (or just call [`init`]).
//!
//! [`Dispatch`]: https://docs.rs/tracing/latest/tracing/struct.Dispatch.html

use crate::{
    error::{Error, Result},
    hook::JournalHook,
    journal::{Journal, JournalSocket},
    layer::Layer,
};

use backtrace::Backtrace;
use tracing::{level_filters::LevelFilter, warn, Dispatch};
use tracing_subscriber::{
    fmt::{writer::BoxMakeWriter, MakeWriter},
    layer::SubscriberExt, // Needed to get `with()`
    registry::Registry,
};

/// Everything [`enable`] needs to know.
pub struct Setup<J: Journal, W> {
    journal: J,
    writer: W,
    max_level: LevelFilter,
}

impl<J, W> Setup<J, W>
where
    J: Journal + 'static,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    /// `writer` is where log lines go today; the level threshold defaults to `INFO`.
    pub fn new(journal: J, writer: W) -> Self {
        Setup {
            journal,
            writer,
            max_level: LevelFilter::INFO,
        }
    }
    /// Only events at `max_level` or more severe will be logged at all
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }
}

/// Build a [`Dispatch`] that logs to the journal, if one is available.
///
/// If `setup`'s journal is enabled, the returned [`Dispatch`] fires a [`JournalHook`] for each
/// event, and its formatted output is discarded so nothing is logged twice. If not, it formats to
/// `setup`'s writer just as before, and says (there) that it's ignoring the journal.
///
/// [`Dispatch`]: https://docs.rs/tracing/latest/tracing/struct.Dispatch.html
pub fn enable<J, W>(setup: Setup<J, W>) -> Dispatch
where
    J: Journal + 'static,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let Setup {
        journal,
        writer,
        max_level,
    } = setup;

    let available = journal.enabled();
    let (writer, layer) = if available {
        (
            BoxMakeWriter::new(std::io::sink),
            Some(Layer::new(JournalHook::new(journal))),
        )
    } else {
        (BoxMakeWriter::new(writer), None)
    };

    let dispatch = Dispatch::new(
        Registry::default()
            .with(max_level)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .with(layer),
    );

    if !available {
        tracing::dispatcher::with_default(&dispatch, || {
            warn!("Journal not available but user requests we log to it. Ignoring");
        });
    }

    dispatch
}

/// Send this process' logging to the system journal (or to stderr, failing that).
///
/// Call this once, early; there's no undoing it.
pub fn init() -> Result<()> {
    let dispatch = enable(Setup::new(JournalSocket::try_default()?, std::io::stderr));
    tracing::dispatcher::set_global_default(dispatch).map_err(|err| Error::GlobalDefault {
        source: err,
        back: Backtrace::new(),
    })
}
