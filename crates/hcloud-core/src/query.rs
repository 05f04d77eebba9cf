//! Query parameter helpers.
//!
//! [`QueryParams`] assembles fixed, typed query keys from optional values.
//! [`ListParams`] carries caller-chosen keys in any casing for list endpoints and
//! rewrites them to the API's `snake_case` convention when the request is built.

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Free-form options for list endpoints.
///
/// Keys are stored exactly as given. [`ListParams::to_query`] produces the
/// wire form with every key converted by [`to_snake_case`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(String, String)>,
}

impl ListParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Set an option, replacing an earlier value stored under the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder form of [`ListParams::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    /// Request a specific page (1-based).
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.with("page", page)
    }

    /// Set the page size.
    #[must_use]
    pub fn per_page(self, per_page: u32) -> Self {
        self.with("per_page", per_page)
    }

    /// Filter by status.
    #[must_use]
    pub fn status(self, status: impl Display) -> Self {
        self.with("status", status)
    }

    /// Sort by a field, optionally suffixed with `:asc` or `:desc`.
    #[must_use]
    pub fn sort(self, sort: impl Into<String>) -> Self {
        self.with("sort", sort.into())
    }

    /// Value stored under the exact key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the options as given by the caller.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns true if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Query pairs with `snake_case` keys.
    ///
    /// Keys that collapse onto the same `snake_case` form keep the position of the
    /// first and the value of the last occurrence.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = Vec::with_capacity(self.pairs.len());
        for (key, value) in &self.pairs {
            let key = to_snake_case(key);
            match query.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1.clone_from(value),
                None => query.push((key, value.clone())),
            }
        }
        query
    }
}

/// Convert an identifier of any casing to lower `snake_case`.
///
/// Words split at a lowercase letter or digit followed by an uppercase letter, at
/// the last capital of an acronym followed by a lowercase letter, and at every run
/// of characters that are not ASCII letters or digits.
///
/// ```
/// use hcloud_core::query::to_snake_case;
///
/// assert_eq!(to_snake_case("perPage"), "per_page");
/// assert_eq!(to_snake_case("per_page"), "per_page");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("label-selector"), "label_selector");
/// ```
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[index - 1];
            let next = chars.get(index + 1).copied();
            let after_lower = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let acronym_end =
                prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("name", Option::<String>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn push_and_push_opt_keep_order() {
        let mut params = QueryParams::new();
        params.push("type", "cpu");
        params.push_opt("step", Some(60_u32));
        params.push_opt("end", Option::<String>::None);
        assert_eq!(
            params.into_pairs(),
            vec![
                ("type".to_string(), "cpu".to_string()),
                ("step".to_string(), "60".to_string()),
            ]
        );
    }

    #[test]
    fn snake_case_conversions() {
        assert_eq!(to_snake_case("perPage"), "per_page");
        assert_eq!(to_snake_case("PerPage"), "per_page");
        assert_eq!(to_snake_case("per_page"), "per_page");
        assert_eq!(to_snake_case("status"), "status");
        assert_eq!(to_snake_case("labelSelector"), "label_selector");
        assert_eq!(to_snake_case("sort-by"), "sort_by");
        assert_eq!(to_snake_case("sort by"), "sort_by");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("serverID"), "server_id");
        assert_eq!(to_snake_case("version2Id"), "version2_id");
        assert_eq!(to_snake_case("__page__"), "page");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn list_params_set_replaces_same_key() {
        let mut params = ListParams::new();
        params.set("page", 1);
        params.set("page", 2);
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.iter().count(), 1);
    }

    #[test]
    fn list_params_query_keys_are_snake_case() {
        let params = ListParams::new()
            .with("perPage", 25)
            .with("sortBy", "id:desc")
            .with("status", "running");

        assert_eq!(
            params.to_query(),
            vec![
                ("per_page".to_string(), "25".to_string()),
                ("sort_by".to_string(), "id:desc".to_string()),
                ("status".to_string(), "running".to_string()),
            ]
        );
        // caller keys are kept as given
        assert_eq!(params.get("perPage"), Some("25"));
    }

    #[test]
    fn list_params_colliding_keys_keep_last_value() {
        let params = ListParams::new()
            .with("perPage", 10)
            .with("page", 3)
            .with("per_page", 50);

        assert_eq!(
            params.to_query(),
            vec![
                ("per_page".to_string(), "50".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn list_params_typed_helpers() {
        let params = ListParams::new()
            .page(2)
            .per_page(10)
            .status("success")
            .sort("started:desc");

        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("per_page"), Some("10"));
        assert_eq!(params.get("status"), Some("success"));
        assert_eq!(params.get("sort"), Some("started:desc"));
        assert!(!params.is_empty());
    }
}
