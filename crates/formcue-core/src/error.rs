#![forbid(unsafe_code)]

//! Error taxonomy shared by the renderers.
//!
//! | Error | When | Handling |
//! |-------|------|----------|
//! | [`ConfigurationError`] | unknown strategy or icon library name | fatal at configuration time |
//! | [`RenderTargetUnavailable`] | no attachment point for the error list | skip one render pass, keep prior DOM |

use core::fmt;

/// Invalid configuration, surfaced when the configuration is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A decoration strategy was requested by a name with no built-in.
    UnknownDecorationStrategy(String),
    /// An icon library was requested by a name with no registered classes.
    UnknownIconLibrary(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDecorationStrategy(name) => {
                write!(f, "unknown built-in decoration strategy requested: {name}")
            }
            Self::UnknownIconLibrary(name) => write!(f, "unknown icon library requested: {name}"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// The error list has nowhere to attach for this notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTargetUnavailable {
    pub reason: &'static str,
}

impl RenderTargetUnavailable {
    #[must_use]
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

impl fmt::Display for RenderTargetUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error list render target unavailable: {}", self.reason)
    }
}

impl std::error::Error for RenderTargetUnavailable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = ConfigurationError::UnknownIconLibrary("octicons".into());
        assert_eq!(err.to_string(), "unknown icon library requested: octicons");

        let err = RenderTargetUnavailable::new("element has no parent");
        assert!(err.to_string().ends_with("element has no parent"));
    }
}
