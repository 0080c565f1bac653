// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Failures building a client.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// A configuration variable could not be parsed.
    #[error("invalid value for {name}: {message}")]
    InvalidSetting {
        /// The variable name.
        name: &'static str,
        /// Why it was rejected.
        message: String,
    },
    /// The HTTP client could not be built.
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
