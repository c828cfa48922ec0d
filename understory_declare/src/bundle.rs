// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered property bundles and helpers to combine and split them.

use core::fmt;

use smallvec::SmallVec;

use crate::error::{ConfigError, ConfigResult};
use crate::registry::PropertyListing;
use crate::value::Value;

/// Reserved bundle key naming a template to expand.
pub const TEMPLATE_KEY: &str = "template";

/// Inline capacity for bundle entries.
const INLINE_CAPACITY: usize = 8;

/// An ordered mapping from property names to values.
///
/// Keys are stored lower-cased, so lookups are case-insensitive. Insertion
/// order is preserved and [`set`](Self::set) on an existing key replaces the
/// value in place.
///
/// # Example
///
/// ```rust
/// use understory_declare::{PropertyBundle, Value};
///
/// let mut bundle = PropertyBundle::new()
///     .with("LineColor", "#ff0000")
///     .with("linewidth", 2);
/// bundle.set("LINECOLOR", "#0000ff");
///
/// let keys: Vec<_> = bundle.keys().collect();
/// assert_eq!(keys, ["linecolor", "linewidth"]);
/// assert_eq!(bundle.get("LineColor"), Some(&Value::from("#0000ff")));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct PropertyBundle {
    entries: SmallVec<[(String, Value); INLINE_CAPACITY]>,
}

impl PropertyBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry, returning the bundle.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Adds an entry, or replaces the value of an existing one in place.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let key = name.to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let key = name.to_ascii_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the bundle has an entry for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes the entry for `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let key = name.to_ascii_lowercase();
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bundle has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Overlays `other` onto this bundle; entries of `other` win.
    pub fn overlay(&mut self, other: &Self) {
        for (k, v) in other.iter() {
            self.set(k, v.clone());
        }
    }

    /// Merges bundles left to right; later bundles win on shared keys.
    ///
    /// A key keeps the position of its first occurrence.
    #[must_use]
    pub fn merged<'a>(bundles: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut out = Self::new();
        for bundle in bundles {
            out.overlay(bundle);
        }
        out
    }
}

impl fmt::Debug for PropertyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for PropertyBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.set(k.as_ref(), v);
        }
        out
    }
}

impl<K: AsRef<str>, V: Into<Value>> Extend<(K, V)> for PropertyBundle {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k.as_ref(), v);
        }
    }
}

impl<const N: usize> From<[(&str, Value); N]> for PropertyBundle {
    fn from(entries: [(&str, Value); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Splits `bundle` across several types.
///
/// Each type, in order, receives the entries it lists that no earlier type
/// claimed. The `template` entry goes to the first type. An entry that no
/// type lists is an [`UnknownProperty`](ConfigError::UnknownProperty) error
/// naming the last type.
///
/// # Example
///
/// ```rust
/// use understory_declare::{dissect, PropertyBundle, PropertyTableBuilder};
///
/// struct Line;
/// struct Text;
/// let line = PropertyTableBuilder::<Line>::new("Line")
///     .set("SetWidth", |_: &mut Line, _w: f64| {})
///     .build();
/// let text = PropertyTableBuilder::<Text>::new("Text")
///     .set("SetFont", |_: &mut Text, _f: String| {})
///     .build();
///
/// let bundle = PropertyBundle::new().with("font", "Sans").with("width", 2.0);
/// let parts = dissect(&bundle, &[&line, &text]).unwrap();
/// assert!(parts[0].contains("width"));
/// assert!(parts[1].contains("font"));
/// ```
pub fn dissect(
    bundle: &PropertyBundle,
    listings: &[&dyn PropertyListing],
) -> ConfigResult<Vec<PropertyBundle>> {
    let mut remaining = bundle.clone();
    let mut parts = Vec::with_capacity(listings.len());
    for (i, listing) in listings.iter().enumerate() {
        let mut part = PropertyBundle::new();
        if i == 0
            && let Some(template) = remaining.remove(TEMPLATE_KEY)
        {
            part.set(TEMPLATE_KEY, template);
        }
        let claimed: Vec<String> = remaining
            .keys()
            .filter(|k| listing.lists(k))
            .map(str::to_owned)
            .collect();
        for key in claimed {
            if let Some(value) = remaining.remove(&key) {
                part.set(&key, value);
            }
        }
        parts.push(part);
    }
    if let Some((key, _)) = remaining.iter().next() {
        return Err(ConfigError::UnknownProperty {
            type_name: listings.last().map_or("", |l| l.type_name()),
            property: key.to_owned(),
        });
    }
    Ok(parts)
}
