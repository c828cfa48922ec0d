// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefix routes from an owner to nested configurable objects.

use core::fmt;

use crate::object::{Configurable, Delegate};

/// Type-erased access from an owner `T` to one nested object.
trait Route<T>: Send + Sync {
    fn target<'a>(&self, owner: &'a T) -> Option<&'a dyn Delegate>;
    fn target_mut<'a>(&self, owner: &'a mut T) -> Option<&'a mut dyn Delegate>;
    fn names(&self) -> &'static [String];
}

struct Slot<T, D> {
    get: fn(&T) -> Option<&D>,
    get_mut: fn(&mut T) -> Option<&mut D>,
}

impl<T: 'static, D: Configurable> Route<T> for Slot<T, D> {
    fn target<'a>(&self, owner: &'a T) -> Option<&'a dyn Delegate> {
        (self.get)(owner).map(|d| d as &dyn Delegate)
    }

    fn target_mut<'a>(&self, owner: &'a mut T) -> Option<&'a mut dyn Delegate> {
        (self.get_mut)(owner).map(|d| d as &mut dyn Delegate)
    }

    fn names(&self) -> &'static [String] {
        D::property_table().names()
    }
}

/// A registered delegate: every property name starting with `prefix` is
/// forwarded, minus the prefix, to the nested object.
pub(crate) struct DelegateRoute<T> {
    prefix: String,
    route: Box<dyn Route<T>>,
}

impl<T: 'static> DelegateRoute<T> {
    pub(crate) fn new<D: Configurable>(
        prefix: String,
        get: fn(&T) -> Option<&D>,
        get_mut: fn(&mut T) -> Option<&mut D>,
    ) -> Self {
        Self {
            prefix,
            route: Box::new(Slot { get, get_mut }),
        }
    }
}

impl<T> DelegateRoute<T> {
    /// Lower-cased prefix.
    pub(crate) fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Property names of the delegate type.
    pub(crate) fn names(&self) -> &'static [String] {
        self.route.names()
    }

    /// Strips the prefix from a lower-cased property name.
    pub(crate) fn strip<'n>(&self, name: &'n str) -> Option<&'n str> {
        name.strip_prefix(self.prefix.as_str())
    }

    pub(crate) fn target<'a>(&self, owner: &'a T) -> Option<&'a dyn Delegate> {
        self.route.target(owner)
    }

    pub(crate) fn target_mut<'a>(&self, owner: &'a mut T) -> Option<&'a mut dyn Delegate> {
        self.route.target_mut(owner)
    }
}

impl<T> fmt::Debug for DelegateRoute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateRoute")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
