// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2015-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error;
use std::fmt;
use std::io;

/// Potential categories an error from this library falls into.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ErrorKind {
    /// The caller supplied a value outside the contract of the method: an
    /// empty metric name, a negative absolute gauge, an unresolvable address.
    InvalidInput,

    /// The transport failed to resolve, open, write, or close.
    IoError,
}

/// Error generated by this library for invalid input or transport failures.
///
/// Errors are always returned to the caller, never retried, and never fatal.
/// The underlying `io::Error` of an `ErrorKind::IoError` is available via
/// `std::error::Error::source`.
#[derive(Debug)]
pub struct MetricError {
    repr: ErrorRepr,
}

#[derive(Debug)]
enum ErrorRepr {
    WithDescription(ErrorKind, &'static str),
    IoError(io::Error),
}

impl MetricError {
    /// Return the kind of the error
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::IoError(_) => ErrorKind::IoError,
            ErrorRepr::WithDescription(kind, _) => kind,
        }
    }
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            ErrorRepr::IoError(ref err) => fmt::Display::fmt(err, f),
            ErrorRepr::WithDescription(_, desc) => f.write_str(desc),
        }
    }
}

impl error::Error for MetricError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.repr {
            ErrorRepr::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MetricError {
    fn from(err: io::Error) -> MetricError {
        MetricError {
            repr: ErrorRepr::IoError(err),
        }
    }
}

impl From<(ErrorKind, &'static str)> for MetricError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> MetricError {
        MetricError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

pub type MetricResult<T> = Result<T, MetricError>;

#[cfg(test)]
mod tests {
    use super::{ErrorKind, MetricError};
    use std::error::Error;
    use std::io;

    #[test]
    fn test_metric_error_kind_invalid_input() {
        let err = MetricError::from((ErrorKind::InvalidInput, "name required"));
        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn test_metric_error_kind_io_error() {
        let err = MetricError::from(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(ErrorKind::IoError, err.kind());
    }

    #[test]
    fn test_metric_error_display_description() {
        let err = MetricError::from((ErrorKind::InvalidInput, "gauge value must be >= 0"));
        assert_eq!("gauge value must be >= 0", err.to_string());
    }

    #[test]
    fn test_metric_error_source_io_error() {
        let err = MetricError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        let source = err.source().unwrap();
        assert_eq!("boom", source.to_string());
    }

    #[test]
    fn test_metric_error_source_invalid_input() {
        let err = MetricError::from((ErrorKind::InvalidInput, "name required"));
        assert!(err.source().is_none());
    }
}
