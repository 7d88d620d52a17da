//! Keyword-driven product thumbnail selection

use crate::error::RulesError;
use crate::normalize::fold_keyword;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Image shown when no rule matches
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://cdn.shopify.com/s/files/1/0729/8203/6780/files/bonbon3.png?v=1684836531";

/// Caption shown when no rule matches
pub const DEFAULT_THUMBNAIL_LABEL: &str = "Madaq Bonbon";

/// Product image and its caption
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumbnail {
    pub image_url: String,
    pub label: String,
}

impl Default for Thumbnail {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_THUMBNAIL_URL.to_string(),
            label: DEFAULT_THUMBNAIL_LABEL.to_string(),
        }
    }
}

/// Maps keywords found in free text to a thumbnail
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThumbnailRule {
    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub label: String,

    /// Higher wins; rules without one sit at 0
    #[serde(default)]
    pub priority: i64,
}

impl ThumbnailRule {
    /// Thumbnail for this rule, filling blank parts from the default
    #[must_use]
    pub fn thumbnail(&self) -> Thumbnail {
        let fallback = Thumbnail::default();
        Thumbnail {
            image_url: if self.image_url.trim().is_empty() {
                fallback.image_url
            } else {
                self.image_url.clone()
            },
            label: if self.label.trim().is_empty() {
                fallback.label
            } else {
                self.label.clone()
            },
        }
    }

    /// A blank keyword folds to `""` and matches any text, so a low-priority
    /// rule can act as a catch-all
    fn matches(&self, folded_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| folded_text.contains(&fold_keyword(kw)))
    }
}

/// An explicit, immutable set of thumbnail rules.
///
/// An empty set is valid and always yields the default thumbnail.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ThumbnailRules {
    rules: Vec<ThumbnailRule>,
}

impl ThumbnailRules {
    #[must_use]
    pub const fn new(rules: Vec<ThumbnailRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON list of rules
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Vec<ThumbnailRule> = serde_json::from_str(json)?;
        Ok(Self::new(rules))
    }

    /// Read and parse a JSON rule file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Load a rule file, falling back to an empty set if it is missing or
    /// malformed
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("No thumbnail rules at {}, using default thumbnail", path.display());
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(rules) => {
                debug!("Loaded {} thumbnail rule(s) from {}", rules.len(), path.display());
                rules
            }
            Err(e) => {
                warn!("Ignoring thumbnail rules: {e}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[ThumbnailRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Highest-priority rule with a keyword contained in `text`.
    ///
    /// Matching is case- and accent-insensitive; equal priorities keep
    /// their original order.
    #[must_use]
    pub fn matching_rule(&self, text: &str) -> Option<&ThumbnailRule> {
        let folded = fold_keyword(text);
        let mut ordered: Vec<&ThumbnailRule> = self.rules.iter().collect();
        ordered.sort_by_key(|rule| Reverse(rule.priority));

        ordered.into_iter().find(|rule| rule.matches(&folded))
    }

    /// Thumbnail for `text`, or the default one
    #[must_use]
    pub fn pick(&self, text: &str) -> Thumbnail {
        self.matching_rule(text)
            .map_or_else(Thumbnail::default, ThumbnailRule::thumbnail)
    }
}

impl From<Vec<ThumbnailRule>> for ThumbnailRules {
    fn from(rules: Vec<ThumbnailRule>) -> Self {
        Self::new(rules)
    }
}
