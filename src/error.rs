//! Error kinds reported by UUID construction.

use crate::ParseError;

/// Errors that can occur while generating or parsing a UUID.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A name-based UUID was requested without a namespace or a name, or an unknown kind name was
    /// given.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The text does not match the 8-4-4-4-12 hexadecimal grammar.
    #[error("malformed UUID: {0}")]
    MalformedUuid(#[from] ParseError),

    /// The entropy source could not supply bytes.
    #[error("random source unavailable")]
    RandomSourceUnavailable(#[source] rand::Error),
}

/// Result type returned by fallible operations of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    /// Wraps parse errors as malformed UUID errors
    #[test]
    fn wraps_parse_errors_as_malformed_uuid_errors() {
        let err: Error = "not-a-uuid".parse::<crate::Uuid>().unwrap_err().into();
        assert!(matches!(err, Error::MalformedUuid(_)));
        assert_eq!(
            err.to_string(),
            "malformed UUID: invalid string representation"
        );
    }

    /// Exposes the entropy failure as the error source
    #[test]
    fn exposes_the_entropy_failure_as_the_error_source() {
        use std::error::Error as _;
        let cause = rand::Error::new(std::io::Error::other("no entropy"));
        let err = Error::RandomSourceUnavailable(cause);
        assert_eq!(err.to_string(), "random source unavailable");
        assert!(err.source().is_some());
    }
}
