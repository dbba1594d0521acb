//! Listing configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration applied when listing a directory.
///
/// Owned by the navigation state and consulted on every re-listing, so
/// toggling a flag here takes effect the next time a directory is listed.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ListingConfig {
    /// Include hidden entries (names starting with `hidden_prefix`).
    #[builder(default = "false")]
    #[serde(default)]
    pub show_hidden: bool,

    /// Name prefix that marks an entry as hidden.
    #[builder(default = "default_hidden_prefix()")]
    #[serde(default = "default_hidden_prefix")]
    pub hidden_prefix: String,
}

fn default_hidden_prefix() -> String {
    ".".to_string()
}

impl ListingConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref prefix) = self.hidden_prefix {
            if prefix.is_empty() {
                return Err("Hidden prefix cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl ListingConfig {
    /// Create a new listing config builder.
    pub fn builder() -> ListingConfigBuilder {
        ListingConfigBuilder::default()
    }

    /// Create a config with the given hidden-entry visibility.
    pub fn new(show_hidden: bool) -> Self {
        Self {
            show_hidden,
            hidden_prefix: default_hidden_prefix(),
        }
    }

    /// Check if an entry with this name should be left out of a listing.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.show_hidden && self.is_hidden(name)
    }

    /// Check if a name is considered hidden, regardless of visibility.
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with(self.hidden_prefix.as_str())
    }

    /// Flip hidden-entry visibility and return the new value.
    pub fn toggle_hidden(&mut self) -> bool {
        self.show_hidden = !self.show_hidden;
        self.show_hidden
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self::new(false)
    }
}
