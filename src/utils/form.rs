//! `application/x-www-form-urlencoded` bodies and query strings.

use std::borrow::Cow;

/// Decoded `name=value` pairs in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    /// Parse an urlencoded body. `+` decodes to a space; malformed escapes
    /// are kept verbatim.
    pub fn parse(body: &str) -> Self {
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(name), decode_component(value))
            })
            .collect();
        Self { fields }
    }

    /// First value for `name`, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map_or("", |(_, v)| v.as_str())
    }

    /// First value for `name`, `None` when absent or blank.
    pub fn get_opt(&self, name: &str) -> Option<&str> {
        Some(self.get(name)).filter(|v| !v.trim().is_empty())
    }
}

/// Split a request URL into its decoded path and parsed query.
pub fn split_url(url: &str) -> (String, Form) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    (decode(path), Form::parse(query))
}

/// Percent-decode a form field, where `+` stands for a space.
fn decode_component(raw: &str) -> String {
    decode(&raw.replace('+', " "))
}

/// Percent-decode only; `+` is literal in paths.
fn decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}
