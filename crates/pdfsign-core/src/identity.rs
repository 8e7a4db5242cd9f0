//! Annotation identity tokens
//!
//! The identity is the only link between a page-space stamp and its
//! screen-space overlay. Neither side holds a reference to the other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token pairing one overlay control with one document annotation.
///
/// Generated once when a stamp is placed and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationIdentity(String);

impl AnnotationIdentity {
    /// Generate a fresh identity (UUID v4 text form).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnnotationIdentity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AnnotationIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AnnotationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
