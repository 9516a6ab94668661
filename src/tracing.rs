// relcfg - A declarative release configuration record.
// Copyright (C) 2026 The ERGS developers <ergsonomic@googlegroups.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Utilities to help with tracing.

use std::{env, io};

use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::ParseError};

use crate::helpers::uncapitalise;

/// The environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "RELCFG_LOG";

/// The log filter used when [`LOG_ENV_VAR`] is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// An error that can occur when installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    /// The log filter is invalid.
    #[error("Invalid log filter in {LOG_ENV_VAR}")]
    InvalidFilter(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error("Failed to install the tracing subscriber: {0}")]
    Install(String),
}

/// An extension trait for [`Result`] to insert logging.
pub trait LogResult {
    /// Logs the error.
    ///
    /// If the [`Result`] is an [`Err`], logs the error. Otherwise this function
    /// does nothing.
    fn log_err(self) -> Self;
}

impl<T, E> LogResult for Result<T, E>
where
    E: std::fmt::Display + std::fmt::Debug,
{
    fn log_err(self) -> Self {
        if let Err(error) = &self {
            tracing::error!(?error, "{}", uncapitalise(&error.to_string()));
        }

        self
    }
}

/// Installs the global tracing subscriber.
///
/// Logs are written to stderr, filtered by the directives in [`LOG_ENV_VAR`].
pub fn init() -> Result<(), InitError> {
    let directives = env::var(LOG_ENV_VAR)
        .unwrap_or_else(|_| String::from(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directives)?)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| InitError::Install(error.to_string()))
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use super::*;

    #[test]
    fn log_err_returns_the_result_unchanged() {
        let ok: Result<u8, String> = Ok(1);
        let err: Result<u8, String> = Err(String::from("Broken"));

        assert_eq!(ok.log_err(), Ok(1));
        assert_eq!(err.log_err(), Err(String::from("Broken")));
    }
}
