//! Declarative JSON configuration for building a registry without code.
//!
//! # Format
//!
//! ```json
//! {
//!   "pass_through": false,
//!   "default_source": "fallback",
//!   "copy": ["UID", "name"],
//!   "exclude": ["when"],
//!   "rules": { "SUMMARY": "name", "DROPPED": null },
//!   "constants": { "VERSION": "2.0" }
//! }
//! ```
//!
//! Every field is optional. Sections are applied in the order shown, so
//! `exclude` overrides `copy` and `rules` override both.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::options::RemodelOptions;
use crate::registry::TransformRegistry;
use crate::rule::Rule;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemodelConfig {
    /// Return every source record unchanged.
    pub pass_through: bool,
    /// Source key copied into any output key registered with no rule.
    pub default_source: Option<String>,
    /// Keys copied as-is.
    pub copy: Vec<String>,
    /// Keys registered with no rule.
    pub exclude: Vec<String>,
    /// Output key to source key; `null` registers no rule.
    pub rules: BTreeMap<String, Option<String>>,
    /// Output keys filled with a fixed value.
    pub constants: BTreeMap<String, Value>,
}

impl RemodelConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn options(&self) -> RemodelOptions {
        let options = RemodelOptions::default().with_pass_through(self.pass_through);
        match &self.default_source {
            Some(source_key) => options.with_default_transformation(Rule::copy(source_key.as_str())),
            None => options,
        }
    }

    /// Build a registry from this configuration.
    pub fn build(&self) -> TransformRegistry {
        let mut registry = TransformRegistry::new(self.options());
        registry
            .copy_keys(self.copy.as_slice())
            .exclude_keys(self.exclude.as_slice())
            .add_key_xform_map(self.rules.iter().map(|(k, v)| (k.as_str(), v.as_deref())));
        for (output_key, value) in &self.constants {
            registry.add_transformation(output_key.as_str(), Rule::constant(value.clone()));
        }
        debug!(rules = registry.len(), "built registry from config");
        registry
    }
}
