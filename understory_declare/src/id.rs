// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property identification.
//!
//! A [`PropertyId`] is the position of a canonical property name in a
//! [`PropertyTable`](crate::PropertyTable). Positions define the order in
//! which explicitly supplied properties are applied by bulk declaration.

use core::fmt;

/// The position of a canonical property name within its type's table.
///
/// Ids are only meaningful for the table that produced them. Ordering of ids
/// follows table order: sorted local names first, then delegate extensions.
///
/// # Example
///
/// ```rust
/// use understory_declare::PropertyId;
///
/// let id = PropertyId::new(3);
/// assert_eq!(id.index(), 3);
/// assert!(PropertyId::new(1) < id);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Creates a property id from a table position.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the table position of this id.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}
