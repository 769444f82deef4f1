//! Error types for the recoverable failures of the cake.
//!
//! None of these are fatal once the page is running: a bad share token loads
//! as an empty cake, a missing microphone leaves the page in click-only mode,
//! and a failed clipboard write falls back to the legacy copy command.

use std::fmt;

/// A `candles` token that could not be turned back into candle records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token was empty or whitespace only.
    Empty,
    /// The token is not valid base64, or the payload is not UTF-8.
    Encoding(String),
    /// The payload is not a JSON array of candle objects.
    Structure(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "empty candle token"),
            DecodeError::Encoding(e) => write!(f, "token encoding error: {}", e),
            DecodeError::Structure(e) => write!(f, "token structure error: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Microphone acquisition failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The browser has no `mediaDevices.getUserMedia`.
    Unsupported,
    /// The user (or the page's permissions policy) refused access.
    PermissionDenied(String),
    /// No usable input device, or the audio graph could not be built.
    DeviceUnavailable(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unsupported => write!(f, "getUserMedia not supported on this browser"),
            AudioError::PermissionDenied(e) => write!(f, "microphone permission denied: {}", e),
            AudioError::DeviceUnavailable(e) => write!(f, "microphone unavailable: {}", e),
        }
    }
}

impl std::error::Error for AudioError {}

impl AudioError {
    /// Classify a rejected `getUserMedia` call by its `DOMException` name.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        let detail = if message.is_empty() {
            name.to_string()
        } else {
            format!("{}: {}", name, message)
        };
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                AudioError::PermissionDenied(detail)
            }
            _ => AudioError::DeviceUnavailable(detail),
        }
    }
}

/// Clipboard write failure, either of the async API or the legacy command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// `navigator.clipboard` does not exist (insecure context, old browser).
    Unavailable,
    /// The write was attempted and rejected.
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable => write!(f, "clipboard API unavailable"),
            ClipboardError::Rejected(e) => write!(f, "clipboard write rejected: {}", e),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Invalid runtime configuration passed to `start_with_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Invalid(e) => write!(f, "invalid config value: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err = DecodeError::Encoding("Invalid byte 33, offset 0.".to_string());
        assert!(err.to_string().contains("offset 0"));
        let err = AudioError::PermissionDenied("NotAllowedError".to_string());
        assert!(err.to_string().contains("NotAllowedError"));
    }

    #[test]
    fn dom_exception_classification() {
        assert!(matches!(
            AudioError::from_dom_exception("NotAllowedError", "Permission denied"),
            AudioError::PermissionDenied(_)
        ));
        assert!(matches!(
            AudioError::from_dom_exception("SecurityError", ""),
            AudioError::PermissionDenied(_)
        ));
        assert_eq!(
            AudioError::from_dom_exception("NotFoundError", ""),
            AudioError::DeviceUnavailable("NotFoundError".to_string())
        );
    }

    #[test]
    fn empty_token_message() {
        assert_eq!(DecodeError::Empty.to_string(), "empty candle token");
    }
}
