//! Public app identifiers.
//!
//! An app id names a flow in URLs and in the native SDK configuration:
//! a slug of the flow name plus a random base36 suffix, for example
//! `my-onboarding-flow-y7opwx03`.

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Characters allowed in an app id.
pub const APP_ID_PATTERN: &str = r"^[a-z0-9-]+$";

/// Single-segment paths that look like someone typed an app id.
pub const APP_ID_PATH_PATTERN: &str = r"^/[a-z0-9-]+$";

/// Example shown on the 404 page.
pub const EXAMPLE_APP_ID: &str = "my-onboarding-flow-y7opwx03";

const SUFFIX_LENGTH: usize = 8;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Slug used when a flow name has no usable characters.
const FALLBACK_SLUG: &str = "flow";

static APP_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(APP_ID_PATTERN).expect("valid regex"));

static APP_ID_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(APP_ID_PATH_PATTERN).expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Mint a fresh id for a flow called `name`.
    pub fn generate(name: &str) -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LENGTH)
            .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
            .collect();
        Self(format!("{}-{suffix}", slugify(name)))
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if APP_ID_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::Validation(format!(
                "Invalid app id '{raw}': use lowercase letters, digits and dashes"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase `name`, collapsing every run of other characters to one dash.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Whether `path` is a single lowercase segment that could be an app id.
pub fn looks_like_app_id_path(path: &str) -> bool {
    APP_ID_PATH_RE.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("My Onboarding Flow"), "my-onboarding-flow");
        assert_eq!(slugify("  Fitness -- App! "), "fitness-app");
        assert_eq!(slugify("!!!"), "flow");
    }

    #[test]
    fn generated_ids_are_valid_and_suffixed() {
        let id = AppId::generate("My Onboarding Flow");
        let (slug, suffix) = id.as_str().rsplit_once('-').unwrap();
        assert_eq!(slug, "my-onboarding-flow");
        assert_eq!(suffix.len(), 8);
        assert!(AppId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn parse_rejects_bad_characters() {
        assert!(AppId::parse(EXAMPLE_APP_ID).is_ok());
        assert!(AppId::parse("My_App").is_err());
        assert!(AppId::parse("").is_err());
    }

    #[test]
    fn app_id_path_detection() {
        assert!(looks_like_app_id_path("/my-onboarding-flow-y7opwx03"));
        assert!(!looks_like_app_id_path("/nested/path"));
        assert!(!looks_like_app_id_path("/Upper"));
        assert!(!looks_like_app_id_path("/"));
    }
}
