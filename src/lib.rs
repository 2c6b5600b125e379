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
//! A [`tracing-subscriber`] [`Layer`] implementation for sending [`tracing`] [`Event`]s to the
//! [systemd journal]
//!
//! [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
//! [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
//! [`tracing`]: https://docs.rs/tracing/0.1.35/tracing/index.html
//! [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
//! [systemd journal]: https://www.freedesktop.org/software/systemd/man/systemd-journald.service.html
//!
//! # Introduction
//!
//! The journal is a structured log: each entry is a set of `NAME=value` fields, of which `MESSAGE`
//! & `PRIORITY` are just two. That's a good match for [`tracing`], whose events carry arbitrary
//! key/value pairs, but the two don't quite agree on the details. The journal insists that field
//! names be upper-case ASCII letters, digits & underscores (and not begin with an underscore), that
//! values be strings, and that priorities be syslog priorities. This crate bridges the gap.
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//!
//! The translation from [`Event`]s to journal entries happens in three steps:
//!
//! 1. the [`Layer`](layer::Layer) turns the [`Event`] into an [`Entry`](entry::Entry): message,
//!    [`Severity`](priority::Severity), typed metadata & call site
//! 2. a [`Hook`](hook::Hook) is fired with the [`Entry`](entry::Entry); the
//!    [`JournalHook`](hook::JournalHook) adds `FUNC` & `FILE` fields describing the call site,
//!    rewrites metadata keys into journal field names, stringifies their values & looks up the
//!    [`Priority`](priority::Priority)
//! 3. a [`Journal`](journal::Journal) client ships the result to journald in a single datagram
//!
//! [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
//!
//! # Usage
//!
//! The simplest thing to do is to call [`init`](enable::init) at startup:
//!
//! ```no_run
//! use tracing::info;
//!
//! tracing_journalhook::enable::init().unwrap();
//!
//! info!(user.id = 42, "Hello, journal!");
//! ```
//!
//! which will produce an entry along the lines of:
//!
//! ```text
//! MESSAGE=Hello, journal!
//! PRIORITY=6
//! USER_ID=42
//! FUNC=my_app
//! FILE=src/main.rs:5
//! ```
//!
//! If there's no journal (in a container, say), [`init`](enable::init) logs a warning & carries
//! on logging to stderr.
//!
//! The [`Layer`](layer::Layer) can of course be stacked with others in a subscriber of your own:
//!
//! ```rust
//! use tracing::info;
//! use tracing_journalhook::layer::Layer;
//! use tracing_subscriber::registry::Registry;
//! use tracing_subscriber::layer::SubscriberExt; // Needed to get `with()`
//!
//! let subscriber = Registry::default().with(Layer::try_default().unwrap());
//! let _guard = tracing::subscriber::set_default(subscriber);
//!
//! info!("Hello, world!");
//! ```
//!
//! # Severities
//!
//! Many logging frameworks have two levels above "error": "fatal" & "panic". [`tracing`] doesn't,
//! so an event can ask for one by carrying a `severity` field:
//!
//! ```rust
//! use tracing::error;
//!
//! error!(severity = "fatal", "Out of disk; exiting");
//! ```
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html

pub mod enable;
pub mod entry;
pub mod error;
pub mod hook;
pub mod journal;
pub mod layer;
pub mod priority;
