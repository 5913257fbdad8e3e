//! The transformation registry and its apply step.
//!
//! A registry maps output keys to optional rules. Builders populate the
//! rule set; [`TransformRegistry::apply`] walks it once per source record and
//! writes only the keys that were registered, so the registry acts as an
//! allow-list over the destination schema.

use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::error::{RemodelError, Result};
use crate::options::RemodelOptions;
use crate::rule::{KeyList, Record, Rule, Transformation, XformItem};

/// Registry of per-key transformation rules.
///
/// Rules keep the position at which their output key was first registered;
/// registering the same key again replaces the rule in place.
///
/// Lookups and registration scan the rule list, so each is linear in the
/// number of registered keys.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    options: RemodelOptions,
    rules: Vec<(String, Option<Rule>)>,
}

impl TransformRegistry {
    /// Create an empty registry.
    pub fn new(options: RemodelOptions) -> Self {
        debug!(
            pass_through = options.pass_through,
            has_default = options.default_transformation.is_some(),
            "creating transform registry"
        );
        Self {
            options,
            rules: Vec::new(),
        }
    }

    /// Create a registry seeded from an initial rule map.
    ///
    /// Same as [`Self::new`] followed by [`Self::add_key_xform_map`].
    pub fn with_rules<I, K, T>(options: RemodelOptions, initial_rules: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Transformation>,
    {
        let mut registry = Self::new(options);
        registry.add_key_xform_map(initial_rules);
        registry
    }

    pub fn options(&self) -> &RemodelOptions {
        &self.options
    }

    /// Number of registered output keys, including those with no rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains_key(&self, output_key: &str) -> bool {
        self.rules.iter().any(|(key, _)| key == output_key)
    }

    /// Look up the rule registered for an output key.
    ///
    /// Returns `None` if the key was never registered and `Some(None)` if it
    /// was registered with "no rule".
    pub fn rule(&self, output_key: &str) -> Option<Option<&Rule>> {
        self.rules
            .iter()
            .find(|(key, _)| key == output_key)
            .map(|(_, rule)| rule.as_ref())
    }

    /// Registered output keys in rule order.
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(key, _)| key.as_str())
    }

    fn set_rule(&mut self, output_key: String, rule: Option<Rule>) {
        trace!(output_key = %output_key, rule = ?rule, "registering rule");
        match self.rules.iter_mut().find(|(key, _)| *key == output_key) {
            Some((_, existing)) => *existing = rule,
            None => self.rules.push((output_key, rule)),
        }
    }

    /// Copy each named key as-is.
    pub fn copy_keys(&mut self, keys: impl Into<KeyList>) -> &mut Self {
        for key in keys.into() {
            let rule = Rule::copy(key.clone());
            self.set_rule(key, Some(rule));
        }
        self
    }

    /// Register "no rule" for each named key, replacing any earlier rule.
    ///
    /// Excluded keys are left out of the result unless a default
    /// transformation is configured.
    pub fn exclude_keys(&mut self, keys: impl Into<KeyList>) -> &mut Self {
        for key in keys.into() {
            self.set_rule(key, None);
        }
        self
    }

    /// Register a single transformation for `output_key`.
    pub fn add_transformation(
        &mut self,
        output_key: impl Into<String>,
        transformation: impl Into<Transformation>,
    ) -> &mut Self {
        let output_key = output_key.into();
        let rule = transformation.into().into_rule(&output_key);
        self.set_rule(output_key, rule);
        self
    }

    /// Register transformations from a flat `[key, xform, key, xform, ...]` sequence.
    ///
    /// # Errors
    ///
    /// Returns [`RemodelError::InvalidConfiguration`] if the sequence has an
    /// odd length or an item sits in the wrong position. Nothing is
    /// registered in that case.
    pub fn add_key_xform_array(&mut self, items: Vec<XformItem>) -> Result<&mut Self> {
        if items.len() % 2 != 0 {
            return Err(RemodelError::InvalidConfiguration(format!(
                "key/transformation sequence must have an even number of elements, got {}",
                items.len()
            )));
        }

        let mut pairs = Vec::with_capacity(items.len() / 2);
        let mut iter = items.into_iter().enumerate();
        while let Some((index, item)) = iter.next() {
            let XformItem::Key(output_key) = item else {
                return Err(RemodelError::InvalidConfiguration(format!(
                    "expected an output key at position {index}, found a transformation"
                )));
            };
            let Some((_, XformItem::Xform(transformation))) = iter.next() else {
                return Err(RemodelError::InvalidConfiguration(format!(
                    "expected a transformation for '{output_key}' at position {}, found a key",
                    index + 1
                )));
            };
            pairs.push((output_key, transformation));
        }

        Ok(self.add_key_xform_pairs(pairs))
    }

    /// Register every `(output_key, transformation)` entry of a map, in its iteration order.
    pub fn add_key_xform_map<I, K, T>(&mut self, rule_map: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Transformation>,
    {
        for (output_key, transformation) in rule_map {
            self.add_transformation(output_key, transformation);
        }
        self
    }

    /// Register an ordered sequence of `(output_key, transformation)` pairs.
    pub fn add_key_xform_pairs<I, K, T>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Transformation>,
    {
        self.add_key_xform_map(pairs)
    }

    /// Remodel `source` into a new record.
    ///
    /// In pass-through mode the source itself is returned, borrowed.
    ///
    /// # Errors
    ///
    /// Returns [`RemodelError::Transformation`] if a compute function fails.
    pub fn apply<'a>(&self, source: &'a Record) -> Result<Cow<'a, Record>> {
        if self.options.pass_through {
            debug!("pass-through enabled, returning source unchanged");
            return Ok(Cow::Borrowed(source));
        }
        let mut destination = Record::new();
        self.remodel_into(source, &mut destination)?;
        Ok(Cow::Owned(destination))
    }

    /// Remodel `source` into an existing `destination` and return it.
    ///
    /// Keys of `destination` not written by a rule are kept. In pass-through
    /// mode `destination` is left alone and `source` is returned. If a
    /// compute function fails, keys written before the failure remain.
    ///
    /// The returned reference borrows both `source` and `destination`, even
    /// when it points at `destination`, so `source` must outlive the result.
    /// Bind a temporary source to a variable first.
    ///
    /// ```
    /// use remodel_core::{Record, TransformRegistry};
    /// use serde_json::json;
    ///
    /// let mut registry = TransformRegistry::default();
    /// registry.copy_keys("a");
    ///
    /// let source = json!({"a": 1, "b": 2});
    /// let mut destination = Record::new();
    /// destination.insert("kept".into(), json!(true));
    /// let out = registry
    ///     .apply_into(source.as_object().unwrap(), &mut destination)
    ///     .unwrap();
    /// assert_eq!(out.len(), 2);
    /// assert_eq!(out["a"], json!(1));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RemodelError::Transformation`] if a compute function fails.
    pub fn apply_into<'a>(
        &self,
        source: &'a Record,
        destination: &'a mut Record,
    ) -> Result<&'a Record> {
        if self.options.pass_through {
            debug!("pass-through enabled, returning source unchanged");
            return Ok(source);
        }
        self.remodel_into(source, destination)?;
        Ok(&*destination)
    }

    fn remodel_into(&self, source: &Record, destination: &mut Record) -> Result<()> {
        debug!(
            rules = self.rules.len(),
            source_keys = source.len(),
            "remodeling record"
        );

        for (output_key, rule) in &self.rules {
            let Some(rule) = rule.as_ref().or(self.options.default_transformation.as_ref())
            else {
                trace!(output_key = %output_key, "no rule, skipping");
                continue;
            };

            let value = rule.evaluate(source, output_key).map_err(|err| {
                warn!(output_key = %output_key, error = %err, "transformation failed");
                RemodelError::Transformation {
                    output_key: output_key.clone(),
                    source: err,
                }
            })?;
            trace!(output_key = %output_key, "wrote value");
            destination.insert(output_key.clone(), value);
        }

        Ok(())
    }
}
