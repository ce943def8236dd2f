#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the contributor wall crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type returned by the classifier, renderers and CLI.
///
/// Each variant captures sufficient context for diagnostics while avoiding
/// accidental exposure of credentials. Instances are typically constructed
/// through the helper constructors or by converting from external error types
/// via the provided `From` implementations.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Returned when the run configuration violates invariants before any
    /// fetch happens.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Transport errors raised while fetching actor lists or profiles.
    #[error("fetch failed: {message}")]
    Fetch {
        /// Human readable message including the upstream error.
        message: String
    },
    /// Avatar encoding failures; these abort the affected bucket render.
    #[error("failed to encode avatar for {login}: {message}")]
    Encode {
        /// Login of the actor whose avatar could not be embedded.
        login:   String,
        /// Human readable message describing the encoding failure.
        message: String
    },
    /// Wraps I/O errors that occur while persisting the SVG artifact.
    #[error("failed to write artifact at {path:?}: {source}")]
    Io {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Infrastructure errors such as failed worker tasks.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a fetch error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the transport failure.
    pub fn fetch<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Fetch {
            message: message.into()
        }
    }

    /// Constructs an encoding error for the given actor login.
    ///
    /// # Parameters
    ///
    /// * `login` - Login of the actor whose avatar failed to encode.
    /// * `message` - Human-readable description of the encoding failure.
    pub fn encode<L, M>(login: L, message: M) -> Self
    where
        L: Into<String>,
        M: Into<String>
    {
        Self::Encode {
            login:   login.into(),
            message: message.into()
        }
    }

    /// Constructs a service error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the service error.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Returns `true` when retrying the failed operation could succeed.
    ///
    /// Transport and infrastructure failures are considered transient;
    /// configuration, encoding and persistence failures are not and must
    /// surface immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Service { .. })
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<masterror::AppError> for Error {
    fn from(error: masterror::AppError) -> Self {
        Self::Service {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the artifact that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
