// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name resolution and setter invocation.

use crate::bundle::{PropertyBundle, TEMPLATE_KEY};
use crate::color::normalize_args;
use crate::error::{ConfigError, ConfigResult, Policy};
use crate::object::Configurable;
use crate::value::Value;

fn unknown<T: Configurable>(name: &str) -> ConfigError {
    ConfigError::UnknownProperty {
        type_name: T::TYPE_NAME,
        property: name.to_owned(),
    }
}

/// Reads the template name out of a `template` value.
fn template_name<T: Configurable>(value: &Value) -> ConfigResult<&str> {
    value.as_str().ok_or(ConfigError::TemplateNotString {
        type_name: T::TYPE_NAME,
        found: value.kind(),
    })
}

/// Resolves the template `name` of `T`.
pub(crate) fn template<T: Configurable>(name: &str) -> ConfigResult<PropertyBundle> {
    T::templates()?
        .resolve(name)
        .ok_or_else(|| ConfigError::UnknownTemplate {
            type_name: T::TYPE_NAME,
            template: name.to_owned(),
        })
}

pub(crate) fn declare_property<T: Configurable>(
    obj: &mut T,
    name: &str,
    value: &Value,
    policy: Policy,
) -> ConfigResult<()> {
    if value.is_none() {
        return Ok(());
    }
    let lower = name.to_ascii_lowercase();
    if lower == TEMPLATE_KEY {
        let bundle = template::<T>(template_name::<T>(value)?)?;
        return declare_properties(obj, &bundle, policy);
    }

    let table = T::property_table();
    if let Some((route, rest)) = table.route_for(&lower) {
        // Templates expand on the owner only.
        if rest == TEMPLATE_KEY {
            return Err(unknown::<T>(name));
        }
        let target = route
            .target_mut(obj)
            .ok_or_else(|| ConfigError::DelegateUnavailable {
                type_name: T::TYPE_NAME,
                prefix: route.prefix().to_owned(),
            })?;
        return target.delegate_declare(rest, value, policy);
    }

    let setter = table.resolve_setter(name)?;
    let value = normalize_args(&lower, value)?;
    tracing::trace!(type_name = T::TYPE_NAME, setter = setter.name(), %value, "declare");
    policy.filter(setter.invoke(obj, value.args()))
}

/// Declares a bundle.
///
/// Explicit names are validated before anything is applied. Entries of the
/// named template come first, in template order, each overridden by an
/// explicit non-empty value for the same key. The remaining explicit entries
/// follow in table order.
pub(crate) fn declare_properties<T: Configurable>(
    obj: &mut T,
    bundle: &PropertyBundle,
    policy: Policy,
) -> ConfigResult<()> {
    let table = T::property_table();

    let mut explicit = Vec::with_capacity(bundle.len());
    for (name, value) in bundle.iter() {
        if name == TEMPLATE_KEY {
            continue;
        }
        let id = table.id_of(name).ok_or_else(|| unknown::<T>(name))?;
        explicit.push((id, name, value));
    }
    explicit.sort_by_key(|(id, ..)| *id);

    let mut templated = PropertyBundle::new();
    if let Some(value) = bundle.get(TEMPLATE_KEY)
        && !value.is_none()
    {
        for (name, base) in template::<T>(template_name::<T>(value)?)?.iter() {
            let value = match bundle.get(name) {
                Some(over) if !over.is_none() => over,
                _ => base,
            };
            templated.set(name, value.clone());
        }
    }

    for (name, value) in templated.iter() {
        declare_property(obj, name, value, policy)?;
    }
    for (_, name, value) in explicit {
        if !templated.contains(name) {
            declare_property(obj, name, value, policy)?;
        }
    }
    Ok(())
}

pub(crate) fn get_property<T: Configurable>(obj: &T, name: &str) -> ConfigResult<Option<Value>> {
    let lower = name.to_ascii_lowercase();
    let table = T::property_table();
    if let Some((route, rest)) = table.route_for(&lower) {
        return match route.target(obj) {
            Some(target) => target.delegate_get(rest),
            None => Ok(None),
        };
    }
    if !table.contains(&lower) {
        return Err(unknown::<T>(name));
    }
    Ok(table.read(obj, &lower))
}

/// Collects every readable property, delegates included.
///
/// Empty values are left out unless `keep_empty` is set, which snapshots
/// need so that an absent value is put back as absent.
fn collect<T: Configurable>(obj: &T, prefix: &str, keep_empty: bool) -> PropertyBundle {
    let table = T::property_table();
    let mut out = PropertyBundle::new();
    for name in table.gettable_names() {
        if let Some(value) = table.read(obj, name)
            && (keep_empty || !value.is_none())
        {
            out.set(&format!("{prefix}{name}"), value);
        }
    }
    for route in table.delegates() {
        if let Some(target) = route.target(obj) {
            let prefix = format!("{prefix}{}", route.prefix());
            let nested = if keep_empty {
                target.delegate_snapshot(&prefix)
            } else {
                target.delegate_properties(&prefix)
            };
            out.overlay(&nested);
        }
    }
    out
}

/// Collects every readable, non-empty property, delegates included.
pub(crate) fn get_properties<T: Configurable>(obj: &T, prefix: &str) -> PropertyBundle {
    collect(obj, prefix, false)
}

/// Collects every readable property, empty ones included.
pub(crate) fn snapshot<T: Configurable>(obj: &T, prefix: &str) -> PropertyBundle {
    collect(obj, prefix, true)
}

/// Puts back one snapshot entry.
///
/// Unlike declaration, an empty value reaches the setter. A setter that
/// cannot take an empty value keeps its current state.
pub(crate) fn restore_property<T: Configurable>(
    obj: &mut T,
    name: &str,
    value: &Value,
    policy: Policy,
) -> ConfigResult<()> {
    let lower = name.to_ascii_lowercase();
    let table = T::property_table();
    if let Some((route, rest)) = table.route_for(&lower) {
        let target = route
            .target_mut(obj)
            .ok_or_else(|| ConfigError::DelegateUnavailable {
                type_name: T::TYPE_NAME,
                prefix: route.prefix().to_owned(),
            })?;
        return target.delegate_restore(rest, value, policy);
    }

    let setter = table.resolve_setter(name)?;
    let value = normalize_args(&lower, value)?;
    tracing::trace!(type_name = T::TYPE_NAME, setter = setter.name(), %value, "restore");
    match setter.invoke(obj, value.args()) {
        Err(err) if value.is_none() && err.is_invocation_error() => {
            tracing::debug!(
                type_name = T::TYPE_NAME,
                setter = setter.name(),
                "setter takes no empty value; left unchanged"
            );
            Ok(())
        }
        result => policy.filter(result),
    }
}

/// Puts back a snapshot in table order.
pub(crate) fn restore_properties<T: Configurable>(
    obj: &mut T,
    snapshot: &PropertyBundle,
    policy: Policy,
) -> ConfigResult<()> {
    let table = T::property_table();
    let mut entries = Vec::with_capacity(snapshot.len());
    for (name, value) in snapshot.iter() {
        let id = table.id_of(name).ok_or_else(|| unknown::<T>(name))?;
        entries.push((id, name, value));
    }
    entries.sort_by_key(|(id, ..)| *id);
    for (_, name, value) in entries {
        restore_property(obj, name, value, policy)?;
    }
    Ok(())
}
