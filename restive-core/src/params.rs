//! Route parameter bindings.

use crate::{error::DispatchError, version::ApiVersion};
use std::{collections::BTreeMap, fmt};

/// Well-known parameter keys.
pub mod keys {
    /// The controller a route dispatches to.
    pub const CONTROLLER: &str = "controller";
    /// The action (method name) invoked on the controller.
    pub const ACTION: &str = "action";
    /// The HTTP method constraint of a route.
    pub const METHOD: &str = "http:method";
    /// The requested API version.
    pub const VERSION: &str = "version";
    /// The requested response format, e.g. `json`.
    pub const TYPE: &str = "type";
}

/// An ordered string-to-string parameter map.
///
/// Used both for the static bindings of a route and for the in-flight
/// parameters of a matched request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Set a parameter, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(key.into(), value.into())
    }

    /// Whether a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// The bound controller name.
    pub fn controller(&self) -> Option<&str> {
        self.get(keys::CONTROLLER)
    }

    /// The bound action name.
    pub fn action(&self) -> Option<&str> {
        self.get(keys::ACTION)
    }

    /// Replace the action name.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.insert(keys::ACTION, action);
    }

    /// The requested format, if any.
    pub fn format(&self) -> Option<&str> {
        self.get(keys::TYPE)
    }

    /// The requested version.
    ///
    /// Returns `Ok(None)` when the request carries no version and
    /// [`DispatchError::InvalidVersion`] when it is not numeric.
    pub fn version(&self) -> Result<Option<ApiVersion>, DispatchError> {
        match self.get(keys::VERSION) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| DispatchError::InvalidVersion(raw.to_owned())),
        }
    }

    /// Store a version.
    pub fn set_version(&mut self, version: ApiVersion) {
        self.insert(keys::VERSION, version.to_string());
    }

    /// Iterate over all parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_optional_but_numeric() {
        let mut params = Params::new();
        assert!(matches!(params.version(), Ok(None)));

        params.insert(keys::VERSION, "1.2");
        assert_eq!(params.version().unwrap(), Some(ApiVersion::new(1, 2)));

        params.insert(keys::VERSION, "latest");
        assert!(matches!(
            params.version(),
            Err(DispatchError::InvalidVersion(v)) if v == "latest"
        ));
    }

    #[test]
    fn displays_in_key_order() {
        let params: Params = [("controller", "posts"), ("action", "index")]
            .into_iter()
            .collect();
        assert_eq!(params.to_string(), "{action: index, controller: posts}");
    }
}
