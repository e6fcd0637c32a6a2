//! Field values read from the form for a single validation pass

use std::collections::HashMap;

/// Current values of the form fields, keyed by field identifier
///
/// Missing fields read as the empty string, so a field the host never
/// reported fails a required check instead of breaking validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Value of a field, or `""` when it was never supplied
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build from loosely typed values (a JS object or JSON document).
    ///
    /// Anything that is not a string (null, numbers, booleans, arrays,
    /// objects) is coerced to the empty string.
    pub fn from_loose<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(field, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    _ => String::new(),
                };
                (field.into(), value)
            })
            .collect();

        Self { values }
    }

    /// Build from a JSON object; a non-object document yields no values.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::from_loose(map),
            _ => Self::default(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_reads_empty() {
        let values = FieldValues::new().with("fname", "Jo");
        assert_eq!(values.get("fname"), "Jo");
        assert_eq!(values.get("email"), "");
    }

    #[test]
    fn test_loose_values_coerced() {
        let values = FieldValues::from_json(json!({
            "fname": "Jo",
            "phonenum": 1234567890,
            "email": null,
            "extra": { "nested": true },
        }));

        assert_eq!(values.get("fname"), "Jo");
        assert_eq!(values.get("phonenum"), "");
        assert_eq!(values.get("email"), "");
        assert_eq!(values.get("extra"), "");
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_non_object_json_is_empty() {
        assert!(FieldValues::from_json(json!("fname")).is_empty());
        assert!(FieldValues::from_json(json!(null)).is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let values: FieldValues = [("fname", "Ann"), ("email", "a@b.co")]
            .into_iter()
            .collect();
        assert_eq!(values.get("email"), "a@b.co");
    }
}
