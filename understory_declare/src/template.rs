// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named property templates and where they come from.
//!
//! A type's templates are a mapping from template names to
//! [`PropertyBundle`]s. The template named [`COMMON`] is the base every other
//! template is layered on. Templates are read through a [`TemplateLoader`]
//! once per type and kept in a [`TemplateCache`].
//!
//! The resource format is a JSON object of objects:
//!
//! ```json
//! {
//!     "common": { "linewidth": 2, "linecolor": "#000000" },
//!     "data":   { "markerstyle": 20, "linecolor": null }
//! }
//! ```
//!
//! Inner values map to [`Value`]: `null` to [`Value::None`], arrays to
//! positional lists. Nested objects are rejected.

use core::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use hashbrown::HashMap;

use crate::bundle::PropertyBundle;
use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;

/// Name of the base template.
pub const COMMON: &str = "common";

/// The templates of one type, in resource order.
///
/// # Example
///
/// ```rust
/// use understory_declare::{TemplateStore, Value};
///
/// let store = TemplateStore::from_json(
///     "Line",
///     r#"{ "common": { "width": 1, "style": 1 }, "thick": { "width": 4 } }"#,
/// )
/// .unwrap();
///
/// let thick = store.resolve("thick").unwrap();
/// assert_eq!(thick.get("width"), Some(&Value::Int(4)));
/// assert_eq!(thick.get("style"), Some(&Value::Int(1)));
/// assert!(store.resolve("thin").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateStore {
    templates: Vec<(String, PropertyBundle)>,
}

static EMPTY: TemplateStore = TemplateStore {
    templates: Vec::new(),
};

impl TemplateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared empty store.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// Parses a template resource for `type_name`.
    pub fn from_json(type_name: &str, source: &str) -> ConfigResult<Self> {
        let json: serde_json::Value = serde_json::from_str(source)?;
        Self::from_json_value(type_name, &json)
    }

    /// Builds a store from an already parsed JSON document.
    pub fn from_json_value(type_name: &str, json: &serde_json::Value) -> ConfigResult<Self> {
        let format_error = |message: String| ConfigError::TemplateFormat {
            type_name: type_name.to_owned(),
            message,
        };
        let serde_json::Value::Object(root) = json else {
            return Err(format_error("expected an object of templates".into()));
        };
        let mut store = Self::new();
        for (name, body) in root {
            let serde_json::Value::Object(entries) = body else {
                return Err(format_error(format!("template '{name}' is not an object")));
            };
            let mut bundle = PropertyBundle::new();
            for (property, value) in entries {
                let value = Value::from_json(value).ok_or_else(|| {
                    format_error(format!(
                        "property '{property}' of template '{name}' has a nested object"
                    ))
                })?;
                bundle.set(property, value);
            }
            store = store.with(name, bundle);
        }
        Ok(store)
    }

    /// Adds or replaces a template, returning the store.
    #[must_use]
    pub fn with(mut self, name: &str, bundle: PropertyBundle) -> Self {
        match self.templates.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = bundle,
            None => self.templates.push((name.to_owned(), bundle)),
        }
        self
    }

    /// Returns the template registered under `name`, without the base.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyBundle> {
        self.templates
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    /// Template names in resource order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.iter().map(|(n, _)| n.as_str())
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if the store has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns the [`COMMON`] template overlaid with the template `name`.
    ///
    /// Base keys keep their position and new keys follow in the template's
    /// own order. [`COMMON`] itself always resolves, to an empty bundle if
    /// the store has none. Other unknown names resolve to `None`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<PropertyBundle> {
        let mut resolved = self.get(COMMON).cloned().unwrap_or_default();
        if name != COMMON {
            resolved.overlay(self.get(name)?);
        }
        Some(resolved)
    }
}

/// A source of template resources.
pub trait TemplateLoader: Send + Sync {
    /// Loads the templates of `type_name`.
    ///
    /// Returns `Ok(None)` if the type has no resource.
    fn load(&self, type_name: &str) -> ConfigResult<Option<TemplateStore>>;
}

/// Loads `<dir>/<TypeName>_templates.json`.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    dir: PathBuf,
}

impl DirectoryLoader {
    /// Creates a loader reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory templates are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the resource for `type_name`.
    #[must_use]
    pub fn path_for(&self, type_name: &str) -> PathBuf {
        self.dir.join(format!("{type_name}_templates.json"))
    }
}

impl TemplateLoader for DirectoryLoader {
    fn load(&self, type_name: &str) -> ConfigResult<Option<TemplateStore>> {
        let path = self.path_for(type_name);
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(type_name, path = %path.display(), "no template resource");
                return Ok(None);
            }
            Err(source) => return Err(ConfigError::TemplateIo { path, source }),
        };
        TemplateStore::from_json(type_name, &source).map(Some)
    }
}

/// Serves template resources held in memory, keyed by type name.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
}

impl MemoryLoader {
    /// Creates a loader with no resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the JSON resource of `type_name`.
    #[must_use]
    pub fn with(mut self, type_name: &str, json: impl Into<String>) -> Self {
        self.sources.insert(type_name.to_owned(), json.into());
        self
    }
}

impl TemplateLoader for MemoryLoader {
    fn load(&self, type_name: &str) -> ConfigResult<Option<TemplateStore>> {
        self.sources
            .get(type_name)
            .map(|source| TemplateStore::from_json(type_name, source))
            .transpose()
    }
}

/// A loader for types without templates.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTemplates;

impl TemplateLoader for NoTemplates {
    fn load(&self, _type_name: &str) -> ConfigResult<Option<TemplateStore>> {
        Ok(None)
    }
}

/// The loaded templates of one type.
///
/// Intended to live in a `static` inside [`Configurable::templates`](crate::Configurable::templates).
/// A successful load is kept for the life of the process; a failed load is
/// reported and attempted again on the next call.
pub struct TemplateCache {
    cell: OnceLock<TemplateStore>,
}

impl TemplateCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the cached store, loading it through `loader` on first use.
    pub fn get_or_load(
        &self,
        type_name: &str,
        loader: &dyn TemplateLoader,
    ) -> ConfigResult<&TemplateStore> {
        if let Some(store) = self.cell.get() {
            return Ok(store);
        }
        let store = loader.load(type_name)?.unwrap_or_default();
        tracing::debug!(type_name, templates = store.len(), "loaded templates");
        Ok(self.cell.get_or_init(|| store))
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCache")
            .field("store", &self.cell.get())
            .finish()
    }
}
