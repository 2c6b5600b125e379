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
//! [tracing-journalhook](crate) errors

use backtrace::Backtrace;

/// [tracing-journalhook](crate) error type
///
/// Like its sibling [tracing-rfc-5424], this crate eschews libraries like [thiserror] & [anyhow]
/// in favor of a straightforward enumeration with a few match arms chosen on the basis of what the
/// caller will need to respond.
///
/// [tracing-rfc-5424]: https://docs.rs/tracing-rfc-5424
/// [thiserror]: https://docs.rs/thiserror
/// [anyhow]: https://docs.rs/anyhow
#[non_exhaustive]
pub enum Error {
    /// A subscriber was already installed as the global default
    GlobalDefault {
        source: tracing::dispatcher::SetGlobalDefaultError,
        back: Backtrace,
    },
    /// Failed to create the client-side socket
    Socket {
        source: std::io::Error,
        back: Backtrace,
    },
    /// The journal daemon didn't accept the entry
    Transport {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
}

impl Error {
    /// Wrap an arbitrary error encountered while sending an entry to the journal.
    pub fn transport<E>(err: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        }
    }
}

impl std::fmt::Display for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::GlobalDefault { source, .. } => {
                write!(f, "Couldn't install the journal subscriber: {}", source)
            }
            Error::Socket { source, .. } => {
                write!(f, "Couldn't create a socket for the journal: {}", source)
            }
            Error::Transport { source, .. } => {
                write!(f, "While sending an entry to the journal, got {}", source)
            }
            _ => write!(f, "Other tracing-journalhook error"),
        }
    }
}

impl std::fmt::Debug for Error {
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::GlobalDefault { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Socket { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Transport { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            _ => write!(f, "{}", self),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::GlobalDefault { source, .. } => Some(source),
            Error::Socket { source, .. } => Some(source),
            Error::Transport { source, .. } => Some(source.as_ref()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
