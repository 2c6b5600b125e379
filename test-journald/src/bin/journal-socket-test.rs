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

//! Test writing to the journal on the local host; check the results with
//! `journalctl -o verbose --since -1m`.

use tracing::{debug, error, info, trace, warn};
use tracing_journalhook::layer::Layer;
use tracing_subscriber::{
    layer::SubscriberExt, // Needed to get `with()`
    registry::Registry,
};

pub fn main() {
    let subscriber = Registry::default().with(Layer::try_default().unwrap());
    let _guard = tracing::subscriber::set_default(subscriber);

    trace!("你好, journal."); // not forwarded
    debug!(attempt = 1, "你好, journal.");
    info!(user.id = 42, "你好, journal.");
    warn!(multi = "line one\nline two", "你好, journal.");
    error!("你好, journal.");
    error!(severity = "fatal", "你好, journal.");
}
