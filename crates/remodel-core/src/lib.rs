//! Declarative record reshaping.
//!
//! A [`TransformRegistry`] holds one rule per output key and builds a new
//! record from a source record by copying, renaming or computing each
//! registered key. Keys that were never registered are never written.
//!
//! # Example
//!
//! ```
//! use remodel_core::{RemodelOptions, Transformation, TransformRegistry};
//! use serde_json::json;
//!
//! let mut registry = TransformRegistry::new(RemodelOptions::default());
//! registry
//!     .copy_keys(["name", "location", "when"])
//!     .exclude_keys("when")
//!     .add_transformation("city", "location")
//!     .add_transformation(
//!         "DESCRIPTION",
//!         Transformation::compute(|src, _| {
//!             let name = src["name"].as_str().unwrap_or_default();
//!             let location = src["location"].as_str().unwrap_or_default();
//!             Ok(json!(format!("{name}@{location}")))
//!         }),
//!     );
//!
//! let source = json!({"name": "Meetup", "location": "Palo Alto", "when": "today"});
//! let out = registry.apply(source.as_object().unwrap()).unwrap();
//! assert_eq!(out["DESCRIPTION"], json!("Meetup@Palo Alto"));
//! assert!(!out.contains_key("when"));
//! ```

mod config;
mod error;
mod options;
mod registry;
mod rule;

pub use config::RemodelConfig;
pub use error::{BoxError, RemodelError, Result};
pub use options::RemodelOptions;
pub use registry::TransformRegistry;
pub use rule::{ComputeFn, KeyList, Record, Rule, Transformation, XformItem};
