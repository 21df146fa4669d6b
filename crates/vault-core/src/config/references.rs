//! Reference validation policies.
//!
//! Client-supplied parent/folder references are validated before insert
//! according to a per-entity policy. Folder parents are permissive and
//! image folders are strict by default, matching the observed behavior of
//! the system this replaces; the asymmetry is configurable rather than
//! hard-coded.

use serde::{Deserialize, Serialize};

/// How a client-supplied entity reference is validated before persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// The referenced entity must exist and be owned by the acting user.
    Strict,
    /// The reference is stored as-is without an existence check.
    Permissive,
}

impl ReferencePolicy {
    /// Whether this policy requires an existence + ownership check.
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Per-entity reference validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencesConfig {
    /// Policy for `Folder.parent_id`.
    #[serde(default = "default_folder_parent")]
    pub folder_parent: ReferencePolicy,
    /// Policy for `Image.folder_id`.
    #[serde(default = "default_image_folder")]
    pub image_folder: ReferencePolicy,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            folder_parent: default_folder_parent(),
            image_folder: default_image_folder(),
        }
    }
}

fn default_folder_parent() -> ReferencePolicy {
    ReferencePolicy::Permissive
}

fn default_image_folder() -> ReferencePolicy {
    ReferencePolicy::Strict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_the_observed_asymmetry() {
        let config = ReferencesConfig::default();
        assert_eq!(config.folder_parent, ReferencePolicy::Permissive);
        assert_eq!(config.image_folder, ReferencePolicy::Strict);
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let policy: ReferencePolicy = serde_json::from_str("\"strict\"").unwrap();
        assert!(policy.is_strict());
        let policy: ReferencePolicy = serde_json::from_str("\"permissive\"").unwrap();
        assert!(!policy.is_strict());
    }
}
