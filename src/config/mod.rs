use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub description: String,
    /// Language tag used for preferred-label lookup.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Extras whose values hold concept URIs to be replaced by labels.
    #[serde(default = "default_concept_fields")]
    pub concept_fields: Vec<String>,
    /// When set, derived groups whose scheme URI does not start with
    /// this prefix are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_scheme_prefix: Option<String>,
    #[serde(default = "default_true")]
    pub derive_groups: bool,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_concept_fields() -> Vec<String> {
    vec!["theme".to_string(), "publisher_type".to_string()]
}

fn default_true() -> bool {
    true
}

impl Configuration {
    /// Load configuration from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.concept_fields.is_empty() {
            anyhow::bail!("No concept fields defined");
        }

        for field in &self.concept_fields {
            if field.is_empty() {
                anyhow::bail!("Empty concept field key");
            }
        }

        let lang_tag = Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").unwrap();
        if !lang_tag.is_match(&self.locale) {
            anyhow::bail!("Invalid locale language tag: {}", self.locale);
        }

        if let Some(prefix) = &self.group_scheme_prefix {
            Url::parse(prefix)
                .with_context(|| format!("Invalid group scheme prefix: {}", prefix))?;
        }

        Ok(())
    }

    /// Create an example configuration
    pub fn example() -> Self {
        Configuration {
            name: "DCAT-AP Normalization Config".to_string(),
            description: "Replace SKOS concept URIs with labels and derive theme-scheme groups"
                .to_string(),
            locale: default_locale(),
            concept_fields: default_concept_fields(),
            group_scheme_prefix: None,
            derive_groups: true,
        }
    }
}
