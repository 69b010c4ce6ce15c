//! HTTP endpoint descriptions.

use reqwest::Method;
use std::borrow::Cow;
use std::fmt;

/// Static description of one HTTP operation: a verb and a path template
/// relative to the client's base URL.
///
/// Placeholders are written `{name}` and are filled from path parameters
/// when the call is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    path: Cow<'static, str>,
}

impl Endpoint {
    /// Endpoint for `method` at `path`, relative to the base URL
    pub fn new(method: Method, path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// `GET` endpoint
    pub fn get(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` endpoint
    pub fn post(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` endpoint
    pub fn put(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` endpoint
    pub fn patch(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` endpoint
    pub fn delete(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// HTTP verb
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path template, with `{name}` placeholders
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Names of the `{placeholder}` segments in the path template, in order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.path.as_ref();
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            names.push(&rest[open + 1..open + close]);
            rest = &rest[open + close + 1..];
        }
        names
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_method() {
        assert_eq!(Endpoint::get("a").method(), &Method::GET);
        assert_eq!(Endpoint::post("a").method(), &Method::POST);
        assert_eq!(Endpoint::put("a").method(), &Method::PUT);
        assert_eq!(Endpoint::patch("a").method(), &Method::PATCH);
        assert_eq!(Endpoint::delete("a").method(), &Method::DELETE);
    }

    #[test]
    fn test_placeholders() {
        let endpoint = Endpoint::get("users/{user_id}/orders/{order_id}");
        assert_eq!(endpoint.placeholders(), vec!["user_id", "order_id"]);

        assert!(Endpoint::get("health").placeholders().is_empty());
    }

    #[test]
    fn test_unterminated_placeholder_is_ignored() {
        let endpoint = Endpoint::get("users/{id");
        assert!(endpoint.placeholders().is_empty());
    }

    #[test]
    fn test_display() {
        let endpoint = Endpoint::delete(String::from("items/{id}"));
        assert_eq!(endpoint.to_string(), "DELETE items/{id}");
    }
}
