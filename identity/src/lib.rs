//! # Identity
//!
//! Instance identity for embedded editors.
//!
//! ## Philosophy
//!
//! - **Stable**: An instance is named once, at construction, and never renamed
//! - **Host first**: A non-empty id supplied by the host always wins
//! - **Collision resistant**: Generated ids carry a random UUID
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A registry of live instances
//! - A uniqueness check against the document (the host owns its own ids)

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace tag prefixed to generated instance ids
pub const INSTANCE_ID_PREFIX: &str = "tiny-react";

/// Builds a prefixed unique identifier
///
/// The result has the shape `<prefix>_<uuid>`, with the UUID in its
/// hyphen-free simple form so it is usable as a DOM id.
pub fn unique_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Where an instance id came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdOrigin {
    /// Supplied by the host
    Supplied,
    /// Generated at construction
    Generated,
}

/// Opaque identifier naming one embedded editor within a document
///
/// Created exactly once per component and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId {
    value: String,
    origin: IdOrigin,
}

impl InstanceId {
    /// Resolves the identity for a new instance
    ///
    /// Returns the host-supplied id when it is present and non-empty,
    /// otherwise generates a fresh prefixed id.
    pub fn resolve(supplied: Option<&str>) -> Self {
        match supplied {
            Some(id) if !id.is_empty() => Self {
                value: id.to_string(),
                origin: IdOrigin::Supplied,
            },
            _ => Self::generate(),
        }
    }

    /// Generates a fresh id under [`INSTANCE_ID_PREFIX`]
    pub fn generate() -> Self {
        Self {
            value: unique_id(INSTANCE_ID_PREFIX),
            origin: IdOrigin::Generated,
        }
    }

    pub fn origin(&self) -> IdOrigin {
        self.origin
    }

    /// Returns true if this id was generated rather than supplied
    pub fn is_generated(&self) -> bool {
        self.origin == IdOrigin::Generated
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for InstanceId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_id_wins() {
        let id = InstanceId::resolve(Some("my-editor"));
        assert_eq!(id.as_str(), "my-editor");
        assert!(!id.is_generated());
    }

    #[test]
    fn test_supplied_id_with_generated_shape() {
        let id = InstanceId::resolve(Some("tiny-react_host"));
        assert_eq!(id.origin(), IdOrigin::Supplied);
        assert!(!id.is_generated());
    }

    #[test]
    fn test_empty_id_is_generated() {
        let id = InstanceId::resolve(Some(""));
        assert!(id.as_str().starts_with("tiny-react_"));
        assert!(id.is_generated());
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = InstanceId::resolve(None);
        assert!(id.as_str().starts_with("tiny-react_"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = InstanceId::generate();
        let b = InstanceId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unique_id_shape() {
        let id = unique_id("tiny-script");
        let rest = id.strip_prefix("tiny-script_").unwrap();
        assert_eq!(rest.len(), 32);
        assert!(rest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_display() {
        let id = InstanceId::resolve(Some("abc"));
        assert_eq!(id.to_string(), "abc");
    }
}
