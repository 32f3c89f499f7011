use std::collections::HashMap;

use serde_json::Value;
use url::{Url, form_urlencoded};

/// The two reconciliation sources of the listing page, made explicit: the URL
/// query string and the in-memory payload attached to the route transition.
/// Query pairs keep their encounter order, duplicates included, because the
/// location merge scans them in order.
#[derive(Debug, Clone, Default)]
pub struct NavigationContext {
    query_params: Vec<(String, String)>,
    state: HashMap<String, Value>,
}

impl NavigationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, with or without the leading `?`.
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let query_params = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self {
            query_params,
            state: HashMap::new(),
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query_string(url.query().unwrap_or(""))
    }

    pub fn with_state(mut self, key: impl Into<String>, value: Value) -> Self {
        self.state.insert(key.into(), value);
        self
    }

    /// First query value for `key`, `.get()` semantics.
    pub fn query_first(&self, key: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All query pairs in encounter order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Navigation-state value for `key`, stringified. Upstream pages attach
    /// strings and numbers; anything else is treated as absent.
    pub fn state_string(&self, key: &str) -> Option<String> {
        match self.state.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_pairs_preserve_encounter_order_and_duplicates() {
        let ctx = NavigationContext::from_query_string("?city=Hue&location=&city=Hoi%20An");
        let pairs = ctx.query_pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("city".to_string(), "Hue".to_string()));
        assert_eq!(pairs[2], ("city".to_string(), "Hoi An".to_string()));
        assert_eq!(ctx.query_first("city"), Some("Hue"));
    }

    #[test]
    fn state_values_stringify_strings_and_numbers_only() {
        let ctx = NavigationContext::new()
            .with_state("locationId", json!(12))
            .with_state("location", json!("Vung Tau"))
            .with_state("filters", json!({"beds": 2}));

        assert_eq!(ctx.state_string("locationId").as_deref(), Some("12"));
        assert_eq!(ctx.state_string("location").as_deref(), Some("Vung Tau"));
        assert_eq!(ctx.state_string("filters"), None);
        assert_eq!(ctx.state_string("missing"), None);
    }
}
