//! Settings as shareable query-string pairs.
//!
//! Only fields that differ from the defaults are emitted. Scalar fields are
//! written as their plain text form; `colors` and `format` are written as
//! compact JSON. Percent-encoding and URL assembly are left to the host.
//!
//! ```
//! use mc_gradient::Settings;
//! use mc_gradient::preset::{apply_query_pairs, to_query_pairs};
//!
//! let settings = Settings { text: "Hi".into(), bold: true, ..Settings::default() };
//! let pairs = to_query_pairs(&settings).unwrap();
//! assert_eq!(pairs, vec![
//!     ("bold".to_string(), "true".to_string()),
//!     ("text".to_string(), "Hi".to_string()),
//! ]);
//!
//! let mut restored = Settings::default();
//! apply_query_pairs(&pairs, &mut restored).unwrap();
//! assert_eq!(restored, settings);
//! ```

use serde_json::{Map, Value};

use super::{Preset, PresetError, Settings};

/// How a query value is decoded back into JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Flag,
    Number,
    Json,
}

/// Every field that may appear in a query string.
const FIELDS: &[(&str, FieldKind)] = &[
    ("version", FieldKind::Number),
    ("name", FieldKind::Text),
    ("colors", FieldKind::Json),
    ("text", FieldKind::Text),
    ("format", FieldKind::Json),
    ("customFormat", FieldKind::Flag),
    ("prefixsuffix", FieldKind::Text),
    ("trimspaces", FieldKind::Flag),
    ("bold", FieldKind::Flag),
    ("italic", FieldKind::Flag),
    ("underline", FieldKind::Flag),
    ("strikethrough", FieldKind::Flag),
    ("speed", FieldKind::Number),
    ("length", FieldKind::Number),
    ("outputFormat", FieldKind::Text),
    ("type", FieldKind::Number),
    ("colorlength", FieldKind::Number),
];

fn field_kind(key: &str) -> Option<FieldKind> {
    FIELDS.iter().find(|(name, _)| *name == key).map(|(_, kind)| *kind)
}

/// Encodes the non-default fields of `settings` as key/value pairs.
///
/// Pairs come out sorted by key. The schema version is left out; a current
/// version is assumed on decode.
pub fn to_query_pairs(settings: &Settings) -> Result<Vec<(String, String)>, PresetError> {
    let preset = Preset::export(settings);
    let Value::Object(map) = serde_json::to_value(&preset).map_err(PresetError::Encode)? else {
        return Ok(Vec::new());
    };

    Ok(map
        .into_iter()
        .filter(|(key, _)| key != "version")
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

/// Applies query pairs on top of `settings`.
///
/// Unknown keys are skipped. Any malformed value rejects the whole set and
/// leaves `settings` untouched.
pub fn apply_query_pairs<K, V>(pairs: &[(K, V)], settings: &mut Settings) -> Result<(), PresetError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut map = Map::new();
    for (key, raw) in pairs {
        let (key, raw) = (key.as_ref(), raw.as_ref());
        let Some(kind) = field_kind(key) else {
            tracing::debug!(key, "ignoring unknown query parameter");
            continue;
        };
        let value = decode_value(key, raw, kind).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected query parameter");
        })?;
        map.insert(key.to_string(), value);
    }
    if map.is_empty() {
        return Ok(());
    }

    let preset = Preset::from_value(Value::Object(map))?;
    *settings = preset.apply_to(settings.clone());
    Ok(())
}

fn decode_value(key: &str, raw: &str, kind: FieldKind) -> Result<Value, PresetError> {
    let invalid = |reason: String| PresetError::InvalidQueryValue {
        key: key.to_string(),
        reason,
    };
    match kind {
        FieldKind::Text => Ok(Value::String(raw.to_string())),
        FieldKind::Flag => match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(invalid(format!("expected true or false, got {other:?}"))),
        },
        FieldKind::Number => raw
            .parse::<u64>()
            .map(Value::from)
            .map_err(|e| invalid(e.to_string())),
        FieldKind::Json => serde_json::from_str(raw).map_err(|e| invalid(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::OutputType;
    use crate::format::FormatConfig;

    #[test]
    fn defaults_produce_no_pairs() {
        assert!(to_query_pairs(&Settings::default()).unwrap().is_empty());
    }

    #[test]
    fn structured_fields_are_json() {
        let settings = Settings {
            format: FormatConfig::builtin()[4].clone(),
            output_type: OutputType::PingPong,
            ..Settings::default()
        };
        let pairs = to_query_pairs(&settings).unwrap();
        let format = pairs.iter().find(|(k, _)| k == "format").unwrap();
        assert!(format.1.starts_with('{'));
        assert!(pairs.contains(&("type".to_string(), "3".to_string())));

        let mut restored = Settings::default();
        apply_query_pairs(&pairs, &mut restored).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut settings = Settings::default();
        apply_query_pairs(&[("utm_source", "x"), ("speed", "200")], &mut settings).unwrap();
        assert_eq!(settings.speed, 200);
    }

    #[test]
    fn malformed_values_leave_settings_untouched() {
        let mut settings = Settings::default();
        let err = apply_query_pairs(&[("text", "new"), ("bold", "maybe")], &mut settings).unwrap_err();
        assert!(matches!(err, PresetError::InvalidQueryValue { ref key, .. } if key == "bold"));
        assert_eq!(settings, Settings::default());

        assert!(apply_query_pairs(&[("colors", "[oops")], &mut settings).is_err());
        assert!(apply_query_pairs(&[("speed", "-5")], &mut settings).is_err());
        assert!(apply_query_pairs(&[("type", "7")], &mut settings).is_err());
    }

    #[test]
    fn text_values_are_literal() {
        let mut settings = Settings::default();
        apply_query_pairs(&[("text", "true"), ("prefixsuffix", "/nick $t")], &mut settings).unwrap();
        assert_eq!(settings.text, "true");
        assert_eq!(settings.prefix_suffix, "/nick $t");
    }
}
