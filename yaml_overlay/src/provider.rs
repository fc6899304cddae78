//! Figment provider backed by a patched YAML document.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};

use crate::patch::Patcher;
use crate::result_ext::IntoFigmentError;

/// Figment provider that reads a base document merged with its `.patch`.
///
/// # Examples
///
/// ```rust,no_run
/// use figment::Figment;
/// use serde::Deserialize;
/// use yaml_overlay::PatchedYaml;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     port: u16,
/// }
///
/// # fn main() -> Result<(), figment::Error> {
/// let settings: Settings = Figment::from(PatchedYaml::file("settings.yaml")).extract()?;
/// assert!(settings.port > 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PatchedYaml {
    patcher: Patcher,
    profile: Option<Profile>,
}

impl PatchedYaml {
    /// Construct a provider that reads `path` and `path.patch` when queried.
    #[must_use]
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        Self::from_patcher(Patcher::new(path))
    }

    /// Construct a provider from a configured [`Patcher`].
    #[must_use]
    pub const fn from_patcher(patcher: Patcher) -> Self {
        Self {
            patcher,
            profile: None,
        }
    }

    /// Override the profile this provider emits values into.
    #[must_use]
    pub fn profile<P: Into<Profile>>(mut self, profile: P) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

impl Provider for PatchedYaml {
    fn metadata(&self) -> Metadata {
        Metadata::from("Patched YAML", self.patcher.base_path().as_std_path())
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        let document = self
            .patcher
            .patched_document()
            .map_err(IntoFigmentError::into_figment)?;
        let dict = if document.is_null() {
            Dict::new()
        } else {
            let value = FigmentValue::serialize(&document)?;
            let actual = value.to_actual();
            value
                .into_dict()
                .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?
        };
        let profile = self.profile.clone().unwrap_or(Profile::Default);
        Ok(profile.collect(dict))
    }
}
