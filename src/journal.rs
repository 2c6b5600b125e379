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

//! The journal client.
//!
//! This module defines the [`Journal`] trait that [`JournalHook`](crate::hook::JournalHook) sends
//! through, as well as [`JournalSocket`], an implementation speaking the journal's [native
//! protocol] over its Unix datagram socket.
//!
//! [native protocol]: https://systemd.io/JOURNAL_NATIVE_PROTOCOL/
//!
//! # Examples
//!
//! To talk to the system journal:
//!
//! ```rust
//! use tracing_journalhook::journal::{Journal, JournalSocket};
//! let journal = JournalSocket::try_default().unwrap();
//! if !journal.enabled() {
//!     eprintln!("no journal here");
//! }
//! ```
//!
//! At a non-standard path:
//!
//! ```rust
//! use tracing_journalhook::journal::{Journal, JournalSocket};
//! let journal = JournalSocket::new("/i/am/not/there.s").unwrap();
//! assert!(!journal.enabled()); // no such socket, after all
//! ```

use crate::error::{Error, Result};
use crate::priority::Priority;

use backtrace::Backtrace;
use bytes::{BufMut, BytesMut};

use std::{
    collections::HashMap,
    os::unix::net::UnixDatagram,
    path::{Path, PathBuf},
};

/// Where systemd-journald listens for native protocol datagrams
pub const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                         trait Journal                                          //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Operations all journal clients must support.
pub trait Journal: Send + Sync {
    /// Is there a journal to talk to?
    fn enabled(&self) -> bool;
    /// Submit one entry.
    ///
    /// `fields` are expected to already satisfy the journal's naming rules (see
    /// [`stringify_key`](crate::hook::stringify_key)).
    fn send(&self, message: &str, priority: Priority, fields: &HashMap<String, String>)
        -> Result<()>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                        native protocol                                         //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// The journal accepts field names of upper-case ASCII letters, digits & underscores, not
/// beginning with an underscore (those are reserved for "trusted" fields set by journald itself).
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

fn put_field(buf: &mut BytesMut, name: &str, value: &[u8]) {
    buf.put_slice(name.as_bytes());
    if value.contains(&b'\n') {
        // Values that may contain newlines are written as the name, a newline, the value's length
        // as a little-endian u64 & then the value itself.
        buf.put_u8(b'\n');
        buf.put_u64_le(value.len() as u64);
    } else {
        buf.put_u8(b'=');
    }
    buf.put_slice(value);
    buf.put_u8(b'\n');
}

/// Serialize an entry into a single native protocol datagram.
///
/// `MESSAGE` & `PRIORITY` come first; fields with names journald would reject are dropped.
pub fn encode(message: &str, priority: Priority, fields: &HashMap<String, String>) -> BytesMut {
    let mut buf = BytesMut::with_capacity(
        64 + message.len()
            + fields
                .iter()
                .map(|(k, v)| k.len() + v.len() + 10)
                .sum::<usize>(),
    );
    put_field(&mut buf, "MESSAGE", message.as_bytes());
    put_field(&mut buf, "PRIORITY", (priority as u8).to_string().as_bytes());
    for (name, value) in fields {
        if is_valid_field_name(name) {
            put_field(&mut buf, name, value.as_bytes());
        } else {
            eprintln!(
                "journal field name {:?} contains invalid characters; ignoring it",
                name
            );
        }
    }
    buf
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      struct JournalSocket                                      //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Sending journal entries via the journald native socket.
pub struct JournalSocket {
    socket: UnixDatagram,
    path: PathBuf,
}

impl JournalSocket {
    /// Construct a [`Journal`] implementation that sends to the socket at `path`.
    ///
    /// The socket is left unconnected: whether anyone is listening is the business of
    /// [`Journal::enabled`], and each [`Journal::send`] addresses `path` directly.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<JournalSocket> {
        let socket = UnixDatagram::unbound().map_err(|err| Error::Socket {
            source: err,
            back: Backtrace::new(),
        })?;
        Ok(JournalSocket {
            socket,
            path: path.as_ref().to_path_buf(),
        })
    }
    /// Construct a [`Journal`] implementation for the system journal at [`JOURNAL_SOCKET`]
    pub fn try_default() -> Result<JournalSocket> {
        JournalSocket::new(JOURNAL_SOCKET)
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for JournalSocket {
    fn enabled(&self) -> bool {
        UnixDatagram::unbound()
            .and_then(|sock| sock.connect(&self.path))
            .is_ok()
    }
    fn send(
        &self,
        message: &str,
        priority: Priority,
        fields: &HashMap<String, String>,
    ) -> Result<()> {
        let buf = encode(message, priority, fields);
        self.socket
            .send_to(&buf, &self.path)
            .map_err(Error::transport)?;
        Ok(())
    }
}
