//! Error taxonomy for the encode/generate/render/compose pipeline.
//!
//! Every error here is local, synchronous, and pure: the pipeline is a
//! deterministic function of its inputs, so nothing is retryable; the
//! caller must change the input. Errors serialize to JSON so the editing
//! UI can surface them next to the offending form field.

use serde::Serialize;
use thiserror::Error;

use crate::design::{EyeStyle, FrameKind};

/// Errors produced by the QR pipeline.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "error", content = "details")]
pub enum Error {
    /// A field required by the content variant's grammar is absent or blank.
    ///
    /// User-correctable; the field name matches the content record's field.
    #[error("required field is missing or blank: {0}")]
    MissingField(&'static str),

    /// A field is present but malformed (bad URL scheme, email shape,
    /// out-of-range coordinate, unparseable amount, undecodable logo).
    #[error("invalid {field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: String,
    },

    /// The payload exceeds the maximum encodable capacity at the resolved
    /// error correction level, even at version 40. The content must be
    /// shortened; not retryable.
    #[error("payload of {len} bytes exceeds the {max} byte capacity at the resolved error correction level")]
    PayloadTooLarge { len: usize, max: usize },

    /// Reserved: a logo plus payload combination that is provably
    /// unscannable. Currently never returned: logo presence forces the
    /// High correction level instead.
    #[error("logo is incompatible with this payload")]
    LogoIncompatible,

    /// The caller's capability set does not permit the requested eye style.
    #[error("eye style {0:?} is not permitted for this caller")]
    EyeStyleNotPermitted(EyeStyle),

    /// The caller's capability set does not permit the requested frame.
    #[error("frame {0:?} is not permitted for this caller")]
    FrameNotPermitted(FrameKind),
}

impl Error {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidFormat { field, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_field() {
        let err = Error::MissingField("ssid");
        assert_eq!(err.to_string(), "required field is missing or blank: ssid");
    }

    #[test]
    fn test_serializes_with_tag() {
        let err = Error::MissingField("name");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "MissingField");
        assert_eq!(json["details"], "name");
    }
}
