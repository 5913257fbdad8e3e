//! Calendar event example: reshape a meetup record into iCalendar-style fields.

use chrono::{DateTime, SecondsFormat, Utc};
use remodel_core::{KeyList, Record, RemodelOptions, Transformation, TransformRegistry};
use serde_json::{Value, json};

/// Sample meetup record with `when` stored as an RFC 3339 timestamp.
pub fn meetup_record(when: DateTime<Utc>) -> Record {
    let mut record = Record::new();
    record.insert("UID".to_string(), json!("12345@example.com"));
    record.insert("name".to_string(), json!("Supercool Meetup"));
    record.insert("location".to_string(), json!("Palo Alto CA"));
    record.insert(
        "when".to_string(),
        json!(when.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    record
}

/// Copy every key of `input` except `when`, then derive `DTSTART` and `DESCRIPTION`.
pub fn calendar_registry(input: &Record) -> TransformRegistry {
    let mut registry = TransformRegistry::new(RemodelOptions::default());
    registry
        .copy_keys(input.keys().cloned().collect::<KeyList>())
        .exclude_keys("when")
        .add_key_xform_pairs([
            ("DTSTART", Transformation::compute(|src, _| {
                let when = src
                    .get("when")
                    .and_then(Value::as_str)
                    .ok_or("event has no 'when' timestamp")?;
                let when = DateTime::parse_from_rfc3339(when)?.with_timezone(&Utc);
                Ok(json!(format!(
                    "DTSTART;VALUE=DATE_TIME:{}",
                    when.to_rfc3339_opts(SecondsFormat::Millis, true)
                )))
            })),
            ("DESCRIPTION", Transformation::compute(|src, _| {
                let field = |key: &str| src.get(key).and_then(Value::as_str).unwrap_or_default();
                Ok(json!(format!("{}@{}", field("name"), field("location"))))
            })),
        ]);
    registry
}

/// Run the example for an event starting at `when`.
pub fn run(when: DateTime<Utc>) -> remodel_core::Result<Value> {
    let input = meetup_record(when);
    let registry = calendar_registry(&input);
    let output = registry.apply(&input)?;
    Ok(Value::Object(output.into_owned()))
}
