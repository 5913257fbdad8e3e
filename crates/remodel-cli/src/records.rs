//! Applying a registry to JSON documents holding one or many records.

use anyhow::{Result, bail};
use remodel_core::TransformRegistry;
use serde_json::Value;
use tracing::debug;

/// Remodel a document that is either a single object or an array of objects.
pub fn remodel_document(registry: &TransformRegistry, document: Value) -> Result<Value> {
    match document {
        Value::Object(record) => {
            let output = registry.apply(&record)?;
            Ok(Value::Object(output.into_owned()))
        }
        Value::Array(records) => {
            let total = records.len();
            let mut outputs = Vec::with_capacity(total);
            for (index, record) in records.into_iter().enumerate() {
                let Value::Object(record) = record else {
                    bail!("record {index} is not a JSON object");
                };
                let output = registry.apply(&record)?;
                outputs.push(Value::Object(output.into_owned()));
            }
            debug!(records = total, "remodeled records");
            Ok(Value::Array(outputs))
        }
        other => bail!("expected a JSON object or array of objects, found {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
