// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits for configurable objects.
//!
//! A type becomes configurable by implementing [`Configurable`]: it names
//! itself, describes its accessors once through a [`PropertyCache`], and
//! optionally provides templates. All declaration, read and override
//! methods then come from the blanket [`ConfigurableExt`] implementation.
//!
//! [`PropertyCache`]: crate::PropertyCache

use crate::bundle::PropertyBundle;
use crate::dispatch;
use crate::error::{ConfigResult, Policy};
use crate::registry::PropertyTable;
use crate::scope::{OverrideGuard, OverrideStack};
use crate::template::TemplateStore;
use crate::value::Value;

/// A type whose properties can be declared by name.
pub trait Configurable: Sized + 'static {
    /// Name used in errors, logs and template resource lookup.
    const TYPE_NAME: &'static str;

    /// Returns the property table, discovering it on first use.
    fn property_table() -> &'static PropertyTable<Self>;

    /// Returns the templates of this type.
    ///
    /// The default has none; [`COMMON`](crate::COMMON) still resolves, to an
    /// empty bundle.
    fn templates() -> ConfigResult<&'static TemplateStore> {
        Ok(TemplateStore::empty())
    }

    /// Returns the snapshots taken by [`ConfigurableExt::begin_override`].
    fn override_stack(&mut self) -> &mut OverrideStack;
}

/// Declaration, read and override methods for every [`Configurable`] type.
pub trait ConfigurableExt: Configurable {
    /// Declares one property under [`Policy::Strict`].
    ///
    /// Declaring [`Value::None`] does nothing. The name `template` expands
    /// the named template as a bulk declaration.
    fn declare_property(&mut self, name: &str, value: impl Into<Value>) -> ConfigResult<()> {
        self.declare_property_with(name, value, Policy::Strict)
    }

    /// Declares one property under [`Policy::Lenient`].
    fn declare_property_lenient(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> ConfigResult<()> {
        self.declare_property_with(name, value, Policy::Lenient)
    }

    /// Declares one property under `policy`.
    fn declare_property_with(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        policy: Policy,
    ) -> ConfigResult<()> {
        dispatch::declare_property(self, name, &value.into(), policy)
    }

    /// Declares a bundle under [`Policy::Strict`].
    ///
    /// Every explicit name is checked before any setter runs. Template
    /// entries are applied first, in template order, then the remaining
    /// explicit entries in table order.
    fn declare_properties(&mut self, bundle: &PropertyBundle) -> ConfigResult<()> {
        self.declare_properties_with(bundle, Policy::Strict)
    }

    /// Declares a bundle under [`Policy::Lenient`].
    fn declare_properties_lenient(&mut self, bundle: &PropertyBundle) -> ConfigResult<()> {
        self.declare_properties_with(bundle, Policy::Lenient)
    }

    /// Declares a bundle under `policy`.
    fn declare_properties_with(
        &mut self,
        bundle: &PropertyBundle,
        policy: Policy,
    ) -> ConfigResult<()> {
        dispatch::declare_properties(self, bundle, policy)
    }

    /// Reads one property.
    ///
    /// Returns `Ok(None)` for properties without a getter, and for delegate
    /// properties whose delegate does not exist.
    fn get_property(&self, name: &str) -> ConfigResult<Option<Value>> {
        dispatch::get_property(self, name)
    }

    /// Reads every property that has a getter, delegates included.
    ///
    /// Keys are `prefix` followed by the property name; empty values are
    /// left out.
    fn get_properties(&self, prefix: &str) -> PropertyBundle {
        dispatch::get_properties(self, prefix)
    }

    /// Returns the canonical property names in table order.
    fn property_names(&self) -> &'static [String] {
        Self::property_table().names()
    }

    /// Returns the template `name`, layered over [`COMMON`](crate::COMMON).
    fn template(name: &str) -> ConfigResult<PropertyBundle> {
        dispatch::template::<Self>(name)
    }

    /// Snapshots the current state, then declares `bundle`.
    ///
    /// The snapshot keeps empty values, so a property that was unset before
    /// the override is unset again after it. If the declaration fails the
    /// snapshot is restored and dropped before the error is returned.
    fn begin_override(&mut self, bundle: &PropertyBundle, policy: Policy) -> ConfigResult<()> {
        let snapshot = dispatch::snapshot(self, "");
        self.override_stack().push(snapshot, policy);
        if let Err(err) = self.declare_properties_with(bundle, policy) {
            if let Err(restore) = self.end_override() {
                tracing::error!(
                    type_name = Self::TYPE_NAME,
                    error = %restore,
                    "failed to restore snapshot after rejected override"
                );
            }
            return Err(err);
        }
        Ok(())
    }

    /// Restores and drops the most recent snapshot.
    ///
    /// Returns `Ok(false)` if there was none.
    fn end_override(&mut self) -> ConfigResult<bool> {
        let Some((snapshot, policy)) = self.override_stack().pop() else {
            return Ok(false);
        };
        dispatch::restore_properties(self, &snapshot, policy)?;
        Ok(true)
    }

    /// Puts `name` back to its value in the most recent snapshot.
    ///
    /// The override stays active. Returns `Ok(false)` if no override is
    /// active or the snapshot has no value for `name`.
    fn reset_property(&mut self, name: &str) -> ConfigResult<bool> {
        let Some((value, policy)) = self.override_stack().saved(name) else {
            return Ok(false);
        };
        dispatch::restore_property(self, name, &value, policy)?;
        Ok(true)
    }

    /// Applies `bundle` until the returned guard is finished or dropped.
    fn scoped(&mut self, bundle: &PropertyBundle) -> ConfigResult<OverrideGuard<'_, Self>> {
        self.begin_override(bundle, Policy::Strict)?;
        Ok(OverrideGuard::new(self))
    }

    /// Runs `f` with `bundle` applied, restoring the previous state after.
    ///
    /// The state is also restored if `f` panics.
    fn with_properties<R>(
        &mut self,
        bundle: &PropertyBundle,
        f: impl FnOnce(&mut Self) -> R,
    ) -> ConfigResult<R> {
        let mut guard = self.scoped(bundle)?;
        let out = f(&mut *guard);
        guard.finish()?;
        Ok(out)
    }
}

impl<T: Configurable> ConfigurableExt for T {}

/// The interface an owner forwards prefixed properties through.
///
/// Implemented for every [`Configurable`] type.
pub trait Delegate {
    /// Name of the nested type.
    fn delegate_type_name(&self) -> &'static str;

    /// Declares a property named without the owner's prefix.
    fn delegate_declare(&mut self, name: &str, value: &Value, policy: Policy) -> ConfigResult<()>;

    /// Reads a property named without the owner's prefix.
    fn delegate_get(&self, name: &str) -> ConfigResult<Option<Value>>;

    /// Collects readable, non-empty properties under `prefix`.
    fn delegate_properties(&self, prefix: &str) -> PropertyBundle;

    /// Collects readable properties under `prefix`, empty ones included.
    fn delegate_snapshot(&self, prefix: &str) -> PropertyBundle;

    /// Puts back a snapshot entry named without the owner's prefix.
    fn delegate_restore(&mut self, name: &str, value: &Value, policy: Policy) -> ConfigResult<()>;
}

impl<T: Configurable> Delegate for T {
    fn delegate_type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn delegate_declare(&mut self, name: &str, value: &Value, policy: Policy) -> ConfigResult<()> {
        dispatch::declare_property(self, name, value, policy)
    }

    fn delegate_get(&self, name: &str) -> ConfigResult<Option<Value>> {
        dispatch::get_property(self, name)
    }

    fn delegate_properties(&self, prefix: &str) -> PropertyBundle {
        dispatch::get_properties(self, prefix)
    }

    fn delegate_snapshot(&self, prefix: &str) -> PropertyBundle {
        dispatch::snapshot(self, prefix)
    }

    fn delegate_restore(&mut self, name: &str, value: &Value, policy: Policy) -> ConfigResult<()> {
        dispatch::restore_property(self, name, value, policy)
    }
}
