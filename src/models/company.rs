use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Company id → logo URL, as read from the CSV. `None` marks an id whose
/// URL cell was empty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogoMap {
    entries: HashMap<i64, Option<String>>,
}

impl LogoMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts for the same id replace earlier ones.
    pub fn insert(&mut self, company_id: i64, logo_url: Option<String>) {
        self.entries.insert(company_id, logo_url);
    }

    /// `None` if the id is not in the map, `Some(None)` if it is but has no URL.
    pub fn get(&self, company_id: i64) -> Option<Option<&str>> {
        self.entries.get(&company_id).map(|url| url.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.entries.values().filter(|url| url.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.len() - self.valid_count()
    }
}

/// A single company object from a dataset file. Wraps the raw JSON object so
/// that every field and the key order survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyRecord(Map<String, Value>);

impl CompanyRecord {
    /// Integer id of the record. Whole-valued floats count as integers; any
    /// other type yields `None`.
    pub fn company_id(&self) -> Option<i64> {
        match self.0.get("company_id")? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        }
    }

    /// Current logo URL, if the record has a string one.
    pub fn logo_url(&self) -> Option<&str> {
        self.0.get("logo_url").and_then(Value::as_str)
    }

    pub fn set_logo_url(&mut self, logo_url: &str) {
        self.0.insert("logo_url".to_string(), Value::String(logo_url.to_string()));
    }

    #[allow(dead_code)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CompanyRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_logo_map_counts() {
        let mut map = LogoMap::new();
        map.insert(1, Some("https://a/logo.png".to_string()));
        map.insert(2, None);
        map.insert(3, Some("https://c/logo.png".to_string()));
        // last row wins
        map.insert(3, None);

        assert_eq!(map.len(), 3);
        assert_eq!(map.valid_count(), 1);
        assert_eq!(map.empty_count(), 2);
        assert_eq!(map.get(1), Some(Some("https://a/logo.png")));
        assert_eq!(map.get(2), Some(None));
        assert_eq!(map.get(99), None);
    }

    #[test]
    fn test_company_id_variants() {
        assert_eq!(record(json!({"company_id": 42})).company_id(), Some(42));
        assert_eq!(record(json!({"company_id": 42.0})).company_id(), Some(42));
        assert_eq!(record(json!({"company_id": 42.5})).company_id(), None);
        assert_eq!(record(json!({"company_id": "42"})).company_id(), None);
        assert_eq!(record(json!({"name": "Acme"})).company_id(), None);
    }

    #[test]
    fn test_set_logo_url_keeps_key_order() {
        let mut company = record(json!({
            "company_id": 7,
            "logo_url": "old.png",
            "name": "Acme"
        }));
        company.set_logo_url("new.png");

        let keys: Vec<&str> = company.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["company_id", "logo_url", "name"]);
        assert_eq!(company.logo_url(), Some("new.png"));
    }

    #[test]
    fn test_non_string_logo_url_reads_as_none() {
        assert_eq!(record(json!({"company_id": 1, "logo_url": null})).logo_url(), None);
        assert_eq!(record(json!({"company_id": 1})).logo_url(), None);
    }
}
