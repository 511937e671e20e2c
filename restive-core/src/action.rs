//! # Controllers and their versioned actions
//!
//! A [`Controller`] is the terminal point of dispatch: it owns an
//! [`ActionTable`] describing every callable method, and invokes one by name.
//!
//! The table is built once, when the controller is registered. Method names
//! are read against the versioned naming convention at that point, so version
//! negotiation never introspects the controller at request time.
//!
//! ```rust,ignore
//! let table = ActionTable::from_methods(["show", "show_1_0", "show_2_3"])?;
//! assert_eq!(table.latest("show").unwrap().method, "show_2_3");
//! ```

use crate::{
    error::{ConfigurationError, DispatchError},
    params::Params,
    version::{ApiVersion, VersionedMethodName},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    future::Future,
    sync::Arc,
};

/// One implementation of an action: its version and the method to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionHandle<'a> {
    /// The version this method implements.
    pub version: ApiVersion,
    /// The concrete method name.
    pub method: &'a str,
}

/// Index of a controller's methods by base action and version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTable {
    actions: BTreeMap<String, BTreeMap<ApiVersion, String>>,
    methods: BTreeSet<String>,
    malformed: Vec<String>,
}

impl ActionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from method names.
    pub fn from_methods<I, S>(methods: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for method in methods {
            table.register(method)?;
        }
        Ok(table)
    }

    /// Register a method, deriving its action and version from its name.
    ///
    /// Names ending in a bare separator stay callable but never take part in
    /// version negotiation; see [`ActionTable::malformed`].
    pub fn register(&mut self, method: impl Into<String>) -> Result<(), ConfigurationError> {
        let method = method.into();
        match VersionedMethodName::parse(&method).action() {
            Some((base, version)) => {
                let base = base.to_owned();
                self.insert(base, version, method)
            }
            None => {
                self.methods.insert(method.clone());
                self.malformed.push(method);
                Ok(())
            }
        }
    }

    /// Register `method` as the implementation of `action` at `version`.
    pub fn insert(
        &mut self,
        action: impl Into<String>,
        version: ApiVersion,
        method: impl Into<String>,
    ) -> Result<(), ConfigurationError> {
        let action = action.into();
        let method = method.into();
        let versions = self.actions.entry(action.clone()).or_default();

        if let Some(existing) = versions.get(&version) {
            return Err(ConfigurationError::DuplicateVersion {
                action,
                version,
                existing: existing.clone(),
                duplicate: method,
            });
        }

        versions.insert(version, method.clone());
        self.methods.insert(method);
        Ok(())
    }

    /// Implementations of `action`, lowest version first.
    pub fn versions<'a>(
        &'a self,
        action: &str,
    ) -> impl Iterator<Item = ActionHandle<'a>> + use<'a> {
        self.actions
            .get(action)
            .into_iter()
            .flat_map(|versions| versions.iter())
            .map(|(version, method)| ActionHandle {
                version: *version,
                method,
            })
    }

    /// The highest-versioned implementation of `action`.
    pub fn latest(&self, action: &str) -> Option<ActionHandle<'_>> {
        self.versions(action).last()
    }

    /// The implementation of `action` at exactly `version`.
    pub fn find(&self, action: &str, version: ApiVersion) -> Option<ActionHandle<'_>> {
        let versions = self.actions.get(action)?;
        versions.get(&version).map(|method| ActionHandle { version, method })
    }

    /// Whether a method with this exact name is registered.
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// Registered names that end in a bare separator.
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }

    /// Every registered method name.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }
}

/// The terminal endpoint of dispatch.
///
/// Implement directly, or derive from an inherent `impl` block with the
/// `#[controller]` macro.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Controller`",
    label = "missing `Controller` implementation",
    note = "Controllers expose an `ActionTable` and invoke methods by name."
)]
pub trait Controller: Send + Sync + 'static {
    /// What every action returns.
    type Output: Send + 'static;

    /// The controller's callable methods.
    fn actions(&self) -> &ActionTable;

    /// Invoke the method named `method`.
    ///
    /// Unknown names yield [`DispatchError::ActionNotFound`].
    fn invoke(
        &self,
        method: &str,
        params: &Params,
    ) -> impl Future<Output = Result<Self::Output, DispatchError>> + Send;
}

impl<C: Controller> Controller for Arc<C> {
    type Output = C::Output;

    fn actions(&self) -> &ActionTable {
        (**self).actions()
    }

    fn invoke(
        &self,
        method: &str,
        params: &Params,
    ) -> impl Future<Output = Result<Self::Output, DispatchError>> + Send {
        (**self).invoke(method, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_versions() {
        let table = ActionTable::from_methods(["show", "show_1_0", "show_2_3", "index"]).unwrap();

        let versions: Vec<_> = table.versions("show").map(|h| h.method).collect();
        assert_eq!(versions, ["show", "show_1_0", "show_2_3"]);
        assert_eq!(
            table.latest("show"),
            Some(ActionHandle {
                version: ApiVersion::new(2, 3),
                method: "show_2_3"
            })
        );
        assert_eq!(
            table.find("show", ApiVersion::new(1, 0)).map(|h| h.method),
            Some("show_1_0")
        );
        assert!(table.find("show", ApiVersion::new(9, 9)).is_none());
        assert_eq!(table.latest("index").map(|h| h.version), Some(ApiVersion::ZERO));
        assert!(table.latest("edit").is_none());
    }

    #[test]
    fn malformed_names_stay_out_of_negotiation() {
        let table = ActionTable::from_methods(["show", "show_"]).unwrap();
        assert_eq!(table.versions("show").count(), 1);
        assert_eq!(table.malformed(), ["show_"]);
        assert!(table.contains("show_"));
    }

    #[test]
    fn rejects_version_collisions() {
        let err = ActionTable::from_methods(["show_2", "show_2_0"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DuplicateVersion { ref existing, ref duplicate, .. }
                if existing == "show_2" && duplicate == "show_2_0"
        ));
    }

    #[test]
    fn unrelated_suffixes_are_separate_actions() {
        let table = ActionTable::from_methods(["show", "show_all"]).unwrap();
        assert_eq!(table.versions("show").count(), 1);
        assert_eq!(table.latest("show_all").map(|h| h.method), Some("show_all"));
    }
}
