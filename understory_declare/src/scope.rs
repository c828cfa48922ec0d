// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Temporary property overrides.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::bundle::PropertyBundle;
use crate::error::{ConfigResult, Policy};
use crate::object::{Configurable, ConfigurableExt};
use crate::value::Value;

/// Snapshots taken by [`ConfigurableExt::begin_override`], most recent last.
///
/// Each configurable object owns one; nested overrides restore in LIFO order.
#[derive(Clone, Debug, Default)]
pub struct OverrideStack {
    snapshots: Vec<(PropertyBundle, Policy)>,
}

impl OverrideStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Number of active overrides.
    #[must_use]
    #[inline]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if no override is active.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn top(&self) -> Option<&PropertyBundle> {
        self.snapshots.last().map(|(s, _)| s)
    }

    /// The value `name` had when the most recent override began.
    pub(crate) fn saved(&self, name: &str) -> Option<(Value, Policy)> {
        let (snapshot, policy) = self.snapshots.last()?;
        snapshot.get(name).map(|value| (value.clone(), *policy))
    }

    pub(crate) fn push(&mut self, snapshot: PropertyBundle, policy: Policy) {
        self.snapshots.push((snapshot, policy));
    }

    pub(crate) fn pop(&mut self) -> Option<(PropertyBundle, Policy)> {
        self.snapshots.pop()
    }
}

/// Mutable access to an object with an active override.
///
/// Dropping the guard restores the snapshot; a failed restore is logged.
/// Use [`finish`](Self::finish) to observe restore errors instead.
///
/// # Example
///
/// ```rust
/// use understory_declare::{
///     Configurable, ConfigurableExt, OverrideStack, PropertyBundle, PropertyCache, PropertyTable,
///     Value,
/// };
///
/// #[derive(Default)]
/// struct Pen {
///     width: f64,
///     overrides: OverrideStack,
/// }
///
/// impl Configurable for Pen {
///     const TYPE_NAME: &'static str = "Pen";
///
///     fn property_table() -> &'static PropertyTable<Self> {
///         static TABLE: PropertyCache<Pen> = PropertyCache::new();
///         TABLE.get_or_discover(|b| {
///             b.set("SetWidth", |p: &mut Pen, w: f64| p.width = w)
///                 .get("GetWidth", |p: &Pen| p.width)
///         })
///     }
///
///     fn override_stack(&mut self) -> &mut OverrideStack {
///         &mut self.overrides
///     }
/// }
///
/// let mut pen = Pen { width: 1.0, ..Pen::default() };
/// {
///     let pen = pen.scoped(&PropertyBundle::new().with("width", 3.0)).unwrap();
///     assert_eq!(pen.width, 3.0);
/// }
/// assert_eq!(pen.width, 1.0);
/// ```
pub struct OverrideGuard<'a, T: Configurable> {
    target: &'a mut T,
    finished: bool,
}

impl<'a, T: Configurable> OverrideGuard<'a, T> {
    pub(crate) fn new(target: &'a mut T) -> Self {
        Self {
            target,
            finished: false,
        }
    }

    /// Restores the snapshot now, returning any restore error.
    pub fn finish(mut self) -> ConfigResult<()> {
        self.finished = true;
        self.target.end_override().map(|_| ())
    }
}

impl<T: Configurable> Deref for OverrideGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: Configurable> DerefMut for OverrideGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Configurable> Drop for OverrideGuard<'_, T> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.target.end_override() {
            tracing::error!(
                type_name = T::TYPE_NAME,
                error = %err,
                "failed to restore properties"
            );
        }
    }
}

impl<T: Configurable> fmt::Debug for OverrideGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideGuard")
            .field("type_name", &T::TYPE_NAME)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
