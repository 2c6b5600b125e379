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

//! [tracing-journalhook](crate) [`Layer`] implementation.
//!
//! [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
//!
//! [`Layer`] is parameterized by the [`Hook`] it fires; in practice that's a [`JournalHook`], but
//! consumers of this crate are free to implement [`Hook`] for themselves.

use crate::{
    entry::Entry,
    error::Result,
    hook::{Hook, JournalHook},
    journal::JournalSocket,
};

use tracing::Event;
use tracing_subscriber::layer::Context;

// When the tracing-log feature is enabled, use NormalizeEvent to extract file/line metadata
// from events that originated from the `log` crate. This follows the same pattern used by
// tracing-subscriber's fmt layer.
// See: https://github.com/tokio-rs/tracing/blob/master/tracing-subscriber/src/fmt/fmt_layer.rs
#[cfg(feature = "tracing-log")]
use tracing_log::NormalizeEvent;

/// A [`tracing-subscriber`]-compliant [`Layer`] implementation that will hand [`Event`]s to a
/// [`Hook`].
///
/// [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
/// [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
/// [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
pub struct Layer<H: Hook> {
    hook: H,
    report_caller: bool,
}

impl<H: Hook> Layer<H> {
    /// Construct a [`Layer`] firing `hook`; call site information will be reported
    pub fn new(hook: H) -> Self {
        Layer {
            hook,
            report_caller: true,
        }
    }
    /// Whether to attach the call site (module path, file & line) to each [`Entry`]
    pub fn report_caller(mut self, report_caller: bool) -> Self {
        self.report_caller = report_caller;
        self
    }
    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl Layer<JournalHook<JournalSocket>> {
    /// Attempt to construct a [`Layer`] that will send to the system journal
    pub fn try_default() -> Result<Self> {
        Ok(Layer::new(JournalHook::try_default()?))
    }
}

/// The [`Layer`] implementation proper.
///
/// [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
impl<S, H> tracing_subscriber::layer::Layer<S> for Layer<H>
where
    S: tracing::Subscriber,
    H: Hook + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // For native tracing events, normalized_metadata() returns None and we use the event's own
        // metadata.
        #[cfg(feature = "tracing-log")]
        let normalized_meta = event.normalized_metadata();
        #[cfg(feature = "tracing-log")]
        let meta = normalized_meta.as_ref().unwrap_or_else(|| event.metadata());
        #[cfg(not(feature = "tracing-log"))]
        let meta = event.metadata();

        let mut entry = Entry::from_event(event, meta, self.report_caller);
        if !self.hook.levels().contains(&entry.level) {
            return;
        }
        // Reporting through `tracing` would land us right back here.
        if let Err(err) = self.hook.fire(&mut entry) {
            eprintln!("Failed to fire hook: {}", err);
        }
    }
}
