// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type property tables.
//!
//! This module provides [`PropertyTableBuilder`], where a type declares its
//! accessors, [`PropertyTable`], the result of pairing those accessors into
//! canonical properties, and [`PropertyCache`], which builds a type's table
//! exactly once.

use core::any::TypeId;
use core::cell::RefCell;
use core::fmt;
use std::sync::OnceLock;

use hashbrown::{HashMap, HashSet};

use crate::delegate::DelegateRoute;
use crate::error::{ConfigError, ConfigResult};
use crate::id::PropertyId;
use crate::object::Configurable;
use crate::value::{FromValue, Value};

const SETTER_PREFIX: &str = "Set";
const GETTER_PREFIX: &str = "Get";

type SetterFn<T> = Box<dyn Fn(&mut T, &str, &[Value]) -> ConfigResult<()> + Send + Sync>;
type GetterFn<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;

/// A setter that survived discovery.
pub(crate) struct Setter<T> {
    name: String,
    key: String,
    arity: usize,
    call: SetterFn<T>,
}

impl<T> Setter<T> {
    /// Full setter name, e.g. `SetLineColor`.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the setter with positional arguments.
    pub(crate) fn invoke(&self, obj: &mut T, args: &[Value]) -> ConfigResult<()> {
        if args.len() != self.arity {
            return Err(ConfigError::ArityMismatch {
                setter: self.name.clone(),
                expected: self.arity,
                found: args.len(),
            });
        }
        (self.call)(obj, &self.name, args)
    }
}

enum Accessor<T> {
    Setter { arity: usize, call: SetterFn<T> },
    Getter(GetterFn<T>),
}

/// Converts the positional argument at `position` for `setter`.
///
/// The caller has already checked the arity.
fn arg<A: FromValue>(setter: &str, args: &[Value], position: usize) -> ConfigResult<A> {
    let value = &args[position];
    A::from_value(value).ok_or_else(|| ConfigError::InvalidArgument {
        setter: setter.to_owned(),
        position,
        expected: A::KIND,
        found: value.kind(),
    })
}

/// Collects the accessors of a type and discovers its properties.
///
/// Accessors follow the `Set<Name>` / `Get<Name>` convention. [`build`](Self::build)
/// pairs them into canonical properties: every setter not on the ignore list
/// becomes a property named by its lower-cased suffix, and a getter is kept
/// only when a setter with the same suffix exists.
///
/// # Example
///
/// ```rust
/// use understory_declare::PropertyTableBuilder;
///
/// #[derive(Default)]
/// struct Label {
///     text: String,
///     size: i64,
/// }
///
/// let table = PropertyTableBuilder::<Label>::new("Label")
///     .set("SetText", |l: &mut Label, text: String| l.text = text)
///     .get("GetText", |l: &Label| l.text.clone())
///     .set("SetSize", |l: &mut Label, size: i64| l.size = size)
///     .build();
///
/// assert_eq!(table.names(), ["size", "text"]);
/// assert!(table.is_gettable("text"));
/// assert!(!table.is_gettable("size"));
/// ```
pub struct PropertyTableBuilder<T> {
    type_name: &'static str,
    methods: Vec<(String, Accessor<T>)>,
    ignore: Vec<String>,
    delegates: Vec<DelegateRoute<T>>,
}

impl<T> fmt::Debug for PropertyTableBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTableBuilder")
            .field("type_name", &self.type_name)
            .field(
                "methods",
                &self.methods.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .field("ignore", &self.ignore)
            .field("delegates", &self.delegates)
            .finish()
    }
}

impl<T: 'static> PropertyTableBuilder<T> {
    /// Creates an empty builder for the type called `type_name`.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            methods: Vec::new(),
            ignore: Vec::new(),
            delegates: Vec::new(),
        }
    }

    fn setter(mut self, name: &str, arity: usize, call: SetterFn<T>) -> Self {
        self.methods.push((name.to_owned(), Accessor::Setter { arity, call }));
        self
    }

    /// Declares a one-argument setter.
    #[must_use]
    pub fn set<A, F>(self, name: &str, f: F) -> Self
    where
        A: FromValue,
        F: Fn(&mut T, A) + Send + Sync + 'static,
    {
        self.setter(
            name,
            1,
            Box::new(move |obj: &mut T, setter: &str, args: &[Value]| -> ConfigResult<()> {
                f(obj, arg(setter, args, 0)?);
                Ok(())
            }),
        )
    }

    /// Declares a two-argument setter.
    #[must_use]
    pub fn set2<A, B, F>(self, name: &str, f: F) -> Self
    where
        A: FromValue,
        B: FromValue,
        F: Fn(&mut T, A, B) + Send + Sync + 'static,
    {
        self.setter(
            name,
            2,
            Box::new(move |obj: &mut T, setter: &str, args: &[Value]| -> ConfigResult<()> {
                f(obj, arg(setter, args, 0)?, arg(setter, args, 1)?);
                Ok(())
            }),
        )
    }

    /// Declares a three-argument setter.
    #[must_use]
    pub fn set3<A, B, C, F>(self, name: &str, f: F) -> Self
    where
        A: FromValue,
        B: FromValue,
        C: FromValue,
        F: Fn(&mut T, A, B, C) + Send + Sync + 'static,
    {
        self.setter(
            name,
            3,
            Box::new(move |obj: &mut T, setter: &str, args: &[Value]| -> ConfigResult<()> {
                f(
                    obj,
                    arg(setter, args, 0)?,
                    arg(setter, args, 1)?,
                    arg(setter, args, 2)?,
                );
                Ok(())
            }),
        )
    }

    /// Declares a getter.
    ///
    /// Getters take no arguments; accessors that need arguments to read a
    /// value are not properties and are not declared here.
    #[must_use]
    pub fn get<R, F>(mut self, name: &str, f: F) -> Self
    where
        R: Into<Value>,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        self.methods.push((
            name.to_owned(),
            Accessor::Getter(Box::new(move |obj: &T| -> Value { f(obj).into() })),
        ));
        self
    }

    /// Hides properties from discovery.
    ///
    /// Both the setter and the getter of an ignored property are dropped.
    /// Names are compared case-insensitively.
    #[must_use]
    pub fn ignore(mut self, names: &[&str]) -> Self {
        self.ignore.extend(names.iter().map(|n| n.to_ascii_lowercase()));
        self
    }

    /// Routes properties starting with `prefix` to a nested object of type `D`.
    ///
    /// The table is extended with `prefix` followed by every property name of
    /// `D`, so forwarded names are listed and validated like local ones.
    /// `get` and `get_mut` return `None` while the nested object does not
    /// exist.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` is empty, or if it equals, starts with, or is the
    /// start of an already registered prefix.
    #[must_use]
    pub fn delegate<D: Configurable>(
        mut self,
        prefix: &str,
        get: fn(&T) -> Option<&D>,
        get_mut: fn(&mut T) -> Option<&mut D>,
    ) -> Self {
        let prefix = prefix.to_ascii_lowercase();
        assert!(!prefix.is_empty(), "Delegate prefix must not be empty");
        if let Some(existing) = self
            .delegates
            .iter()
            .find(|d| d.prefix().starts_with(&prefix) || prefix.starts_with(d.prefix()))
        {
            panic!(
                "Delegate prefix '{prefix}' of '{}' collides with '{}'",
                self.type_name,
                existing.prefix()
            );
        }
        self.delegates.push(DelegateRoute::new(prefix, get, get_mut));
        self
    }

    /// Pairs the declared accessors and produces the table.
    #[must_use]
    pub fn build(self) -> PropertyTable<T> {
        let Self {
            type_name,
            methods,
            ignore,
            delegates,
        } = self;
        let ignored = |canonical: &str| ignore.iter().any(|i| i == canonical);

        let setter_names: HashSet<String> = methods
            .iter()
            .filter(|(name, accessor)| {
                matches!(accessor, Accessor::Setter { .. }) && name.starts_with(SETTER_PREFIX)
            })
            .map(|(name, _)| name.clone())
            .collect();

        let mut setters = Vec::new();
        let mut getters = HashMap::new();
        for (name, accessor) in methods {
            match accessor {
                Accessor::Setter { arity, call } => {
                    let Some(suffix) = name.strip_prefix(SETTER_PREFIX) else {
                        continue;
                    };
                    if suffix.is_empty() || ignored(&suffix.to_ascii_lowercase()) {
                        continue;
                    }
                    setters.push(Setter {
                        key: name.to_ascii_lowercase(),
                        name,
                        arity,
                        call,
                    });
                }
                Accessor::Getter(call) => {
                    let Some(suffix) = name.strip_prefix(GETTER_PREFIX) else {
                        continue;
                    };
                    let canonical = suffix.to_ascii_lowercase();
                    if canonical.is_empty()
                        || ignored(&canonical)
                        || !setter_names.contains(&format!("{SETTER_PREFIX}{suffix}"))
                    {
                        continue;
                    }
                    getters.insert(canonical, call);
                }
            }
        }

        let mut names: Vec<String> = setters
            .iter()
            .map(|s| s.key[SETTER_PREFIX.len()..].to_owned())
            .collect();
        names.sort();
        names.dedup();

        for route in &delegates {
            for name in route.names() {
                let extended = format!("{}{name}", route.prefix());
                if !names.contains(&extended) {
                    names.push(extended);
                }
            }
        }

        assert!(
            names.len() <= usize::from(u16::MAX),
            "Too many properties for '{type_name}' (max {})",
            u16::MAX
        );
        let ids = names
            .iter()
            .zip(0_u16..)
            .map(|(name, i)| (name.clone(), PropertyId::new(i)))
            .collect();

        PropertyTable {
            type_name,
            names,
            ids,
            setters,
            getters,
            delegates,
        }
    }
}

/// The discovered properties of one type.
///
/// Names are canonical: the lower-cased accessor suffix. Local properties come
/// first in lexicographic order, followed by delegate-forwarded names in
/// delegate registration order. This order is fixed once the table is built
/// and defines the order of bulk declaration.
pub struct PropertyTable<T> {
    type_name: &'static str,
    names: Vec<String>,
    ids: HashMap<String, PropertyId>,
    setters: Vec<Setter<T>>,
    getters: HashMap<String, GetterFn<T>>,
    delegates: Vec<DelegateRoute<T>>,
}

impl<T> PropertyTable<T> {
    /// Returns the name of the type this table describes.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the canonical property names in table order.
    #[must_use]
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the type has no properties.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the position of `name` (case-insensitive) in table order.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<PropertyId> {
        self.ids.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Returns the canonical name at `id`.
    #[must_use]
    pub fn name(&self, id: PropertyId) -> Option<&str> {
        self.names.get(usize::from(id.index())).map(String::as_str)
    }

    /// Returns `true` if `name` is a property of this type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.id_of(name).is_some()
    }

    /// Returns `true` if `name` has a local setter.
    #[must_use]
    pub fn is_settable(&self, name: &str) -> bool {
        let key = format!("set{}", name.to_ascii_lowercase());
        self.setters.iter().any(|s| s.key == key)
    }

    /// Returns `true` if `name` has a local getter paired with its setter.
    ///
    /// Only such properties take part in snapshots.
    #[must_use]
    pub fn is_gettable(&self, name: &str) -> bool {
        self.getters.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Returns a [`Display`](fmt::Display) listing of the properties.
    ///
    /// ```rust
    /// use understory_declare::PropertyTableBuilder;
    ///
    /// struct Dot;
    /// let table = PropertyTableBuilder::<Dot>::new("Dot")
    ///     .set("SetRadius", |_: &mut Dot, _r: f64| {})
    ///     .build();
    /// let text = table.listing().to_string();
    /// assert!(text.starts_with("Dot has the following properties:\n    radius"));
    /// ```
    #[must_use]
    pub fn listing(&self) -> Listing<'_> {
        Listing {
            type_name: self.type_name,
            names: &self.names,
        }
    }

    /// Returns every setter whose full name equals `Set<name>`, ignoring case.
    pub(crate) fn matching_setters(&self, name: &str) -> Vec<&Setter<T>> {
        let key = format!("set{}", name.to_ascii_lowercase());
        self.setters.iter().filter(|s| s.key == key).collect()
    }

    /// Resolves `name` to exactly one setter.
    pub(crate) fn resolve_setter(&self, name: &str) -> ConfigResult<&Setter<T>> {
        let mut matches = self.matching_setters(name);
        match matches.len() {
            0 => Err(ConfigError::UnknownProperty {
                type_name: self.type_name,
                property: name.to_owned(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(ConfigError::AmbiguousProperty {
                property: name.to_owned(),
                candidates: matches.iter().map(|s| s.name.clone()).collect(),
            }),
        }
    }

    /// Reads a local property through its paired getter.
    pub(crate) fn read(&self, obj: &T, canonical: &str) -> Option<Value> {
        self.getters.get(canonical).map(|g| g(obj))
    }

    /// Local property names that have a paired getter, in table order.
    pub(crate) fn gettable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|n| self.getters.contains_key(*n))
    }

    /// Returns the delegate route whose prefix starts `name`, with the
    /// remainder of the name.
    pub(crate) fn route_for<'n>(&self, name: &'n str) -> Option<(&DelegateRoute<T>, &'n str)> {
        self.delegates
            .iter()
            .find_map(|route| route.strip(name).map(|rest| (route, rest)))
    }

    pub(crate) fn delegates(&self) -> &[DelegateRoute<T>] {
        &self.delegates
    }
}

impl<T> fmt::Debug for PropertyTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTable")
            .field("type_name", &self.type_name)
            .field("names", &self.names)
            .field(
                "setters",
                &self.setters.iter().map(Setter::name).collect::<Vec<_>>(),
            )
            .field("delegates", &self.delegates)
            .finish_non_exhaustive()
    }
}

/// Read access to a type's property names, independent of the type.
///
/// Used to split a bundle across several types, see [`dissect`](crate::dissect).
pub trait PropertyListing {
    /// Name of the described type.
    fn type_name(&self) -> &'static str;

    /// Canonical property names in table order.
    fn property_names(&self) -> &[String];

    /// Returns `true` if `name` (case-insensitive) is listed.
    fn lists(&self, name: &str) -> bool;
}

impl<T> PropertyListing for PropertyTable<T> {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn property_names(&self) -> &[String] {
        &self.names
    }

    fn lists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Human-readable property listing returned by [`PropertyTable::listing`].
///
/// Names are printed five per row, each padded to 20 columns.
#[derive(Clone, Copy, Debug)]
pub struct Listing<'a> {
    type_name: &'static str,
    names: &'a [String],
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} has the following properties:", self.type_name)?;
        for row in self.names.chunks(5) {
            f.write_str("    ")?;
            for name in row {
                write!(f, "{name:<20}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

thread_local! {
    static DISCOVERING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Marks a type as being discovered on this thread until dropped.
struct DiscoveryMark(TypeId);

impl DiscoveryMark {
    fn enter(type_id: TypeId, type_name: &str) -> Self {
        DISCOVERING.with(|stack| {
            let mut stack = stack.borrow_mut();
            assert!(
                !stack.contains(&type_id),
                "Cyclic delegate registration: '{type_name}' delegates to itself"
            );
            stack.push(type_id);
        });
        Self(type_id)
    }
}

impl Drop for DiscoveryMark {
    fn drop(&mut self) {
        DISCOVERING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|t| *t == self.0) {
                stack.remove(pos);
            }
        });
    }
}

/// Lazily built, shared property table of one type.
///
/// Intended to live in a `static` inside the type's
/// [`Configurable::property_table`] implementation. Discovery runs on first
/// access only; later calls return the same table.
///
/// # Example
///
/// ```rust
/// use understory_declare::{Configurable, OverrideStack, PropertyCache, PropertyTable};
///
/// #[derive(Default)]
/// struct Marker {
///     size: f64,
///     overrides: OverrideStack,
/// }
///
/// impl Configurable for Marker {
///     const TYPE_NAME: &'static str = "Marker";
///
///     fn property_table() -> &'static PropertyTable<Self> {
///         static TABLE: PropertyCache<Marker> = PropertyCache::new();
///         TABLE.get_or_discover(|b| {
///             b.set("SetSize", |m: &mut Marker, s: f64| m.size = s)
///                 .get("GetSize", |m: &Marker| m.size)
///         })
///     }
///
///     fn override_stack(&mut self) -> &mut OverrideStack {
///         &mut self.overrides
///     }
/// }
///
/// assert!(core::ptr::eq(Marker::property_table(), Marker::property_table()));
/// ```
pub struct PropertyCache<T> {
    cell: OnceLock<PropertyTable<T>>,
}

impl<T> PropertyCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the table if discovery has already run.
    #[must_use]
    pub fn get(&self) -> Option<&PropertyTable<T>> {
        self.cell.get()
    }
}

impl<T: Configurable> PropertyCache<T> {
    /// Returns the table, running `describe` and discovery on first use.
    ///
    /// # Panics
    ///
    /// Panics if building the table requires the table itself, which happens
    /// when a type is reachable from its own delegates.
    pub fn get_or_discover<F>(&self, describe: F) -> &PropertyTable<T>
    where
        F: FnOnce(PropertyTableBuilder<T>) -> PropertyTableBuilder<T>,
    {
        if let Some(table) = self.cell.get() {
            return table;
        }
        let _mark = DiscoveryMark::enter(TypeId::of::<T>(), T::TYPE_NAME);
        self.cell.get_or_init(|| {
            let table = describe(PropertyTableBuilder::new(T::TYPE_NAME)).build();
            tracing::debug!(
                type_name = T::TYPE_NAME,
                properties = table.len(),
                "discovered properties"
            );
            table
        })
    }
}

impl<T> Default for PropertyCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PropertyCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyCache")
            .field("table", &self.cell.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Axis {
        title: String,
        subtitle: String,
        ticks: i64,
        range: (f64, f64),
        name: String,
    }

    fn describe(b: PropertyTableBuilder<Axis>) -> PropertyTableBuilder<Axis> {
        b.set("SetTitle", |a: &mut Axis, t: String| a.title = t)
            .get("GetTitle", |a: &Axis| a.title.clone())
            .set("SetSubtitle", |a: &mut Axis, t: String| a.subtitle = t)
            .get("GetSubtitle", |a: &Axis| a.subtitle.clone())
            .set("SetTicks", |a: &mut Axis, n: i64| a.ticks = n)
            .set2("SetRange", |a: &mut Axis, lo: f64, hi: f64| a.range = (lo, hi))
            .get("GetRangeLow", |a: &Axis| a.range.0)
            .set("SetName", |a: &mut Axis, n: String| a.name = n)
            .get("GetName", |a: &Axis| a.name.clone())
            .set("Set", |_: &mut Axis, _: i64| {})
            .get("Get", |_: &Axis| 0_i64)
            .set("Draw", |_: &mut Axis, _: String| {})
            .ignore(&["Name"])
    }

    fn table() -> PropertyTable<Axis> {
        describe(PropertyTableBuilder::new("Axis")).build()
    }

    #[test]
    fn discovery_sorts_and_lowercases() {
        let table = table();
        assert_eq!(table.names(), ["range", "subtitle", "ticks", "title"]);
        assert_eq!(table.type_name(), "Axis");
    }

    #[test]
    fn discovery_is_idempotent() {
        let a = table();
        let b = table();
        assert_eq!(a.names(), b.names());
        for name in a.names() {
            assert_eq!(a.id_of(name), b.id_of(name));
            assert_eq!(a.is_gettable(name), b.is_gettable(name));
        }
    }

    #[test]
    fn getters_pair_only_with_setters() {
        let table = table();
        assert!(table.is_gettable("title"));
        assert!(table.is_gettable("subtitle"));
        // Setter-only properties stay settable.
        assert!(!table.is_gettable("ticks"));
        assert!(table.is_settable("ticks"));
        // `GetRangeLow` has no `SetRangeLow`.
        assert!(!table.contains("rangelow"));
        assert!(!table.is_gettable("range"));
    }

    #[test]
    fn bare_accessor_prefixes_are_not_properties() {
        let table = table();
        assert!(!table.contains(""));
        assert!(!table.is_settable(""));
        assert!(!table.is_gettable(""));
        assert!(matches!(
            table.resolve_setter(""),
            Err(ConfigError::UnknownProperty { type_name: "Axis", .. })
        ));
    }

    #[test]
    fn ignored_properties_are_hidden() {
        let table = table();
        assert!(!table.contains("name"));
        assert!(!table.is_settable("name"));
        assert!(!table.is_gettable("name"));
    }

    #[test]
    fn ids_follow_table_order() {
        let table = table();
        assert_eq!(table.id_of("range"), Some(PropertyId::new(0)));
        assert_eq!(table.id_of("TITLE"), Some(PropertyId::new(3)));
        assert_eq!(table.name(PropertyId::new(1)), Some("subtitle"));
        assert_eq!(table.id_of("missing"), None);
    }

    #[test]
    fn setter_matching_is_exact() {
        let table = table();
        let found = table.matching_setters("title");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "SetTitle");
        assert!(table.matching_setters("itle").is_empty());
        assert!(table.matching_setters("tit").is_empty());
    }

    #[test]
    fn ambiguous_setters_are_reported() {
        let table = PropertyTableBuilder::<Axis>::new("Axis")
            .set("SetTicks", |a: &mut Axis, n: i64| a.ticks = n)
            .set("Setticks", |a: &mut Axis, n: i64| a.ticks = n * 2)
            .build();
        assert_eq!(table.names(), ["ticks"]);
        let Err(ConfigError::AmbiguousProperty { candidates, .. }) = table.resolve_setter("ticks")
        else {
            panic!("expected an ambiguity");
        };
        assert_eq!(candidates, ["SetTicks", "Setticks"]);
    }

    #[test]
    fn invoke_checks_arity_and_kinds() {
        let table = table();
        let mut axis = Axis::default();

        let range = table.resolve_setter("range").unwrap();
        assert!(matches!(
            range.invoke(&mut axis, &[Value::Float(1.0)]),
            Err(ConfigError::ArityMismatch { expected: 2, found: 1, .. })
        ));
        range
            .invoke(&mut axis, &[Value::Int(1), Value::Float(2.5)])
            .unwrap();
        assert_eq!(axis.range, (1.0, 2.5));

        let ticks = table.resolve_setter("ticks").unwrap();
        assert!(matches!(
            ticks.invoke(&mut axis, &[Value::from("many")]),
            Err(ConfigError::InvalidArgument { position: 0, expected: "int", found: "string", .. })
        ));
    }

    #[test]
    fn listing_wraps_every_five_names() {
        let mut b = PropertyTableBuilder::<Axis>::new("Axis");
        for name in ["A", "B", "C", "D", "E", "F"] {
            b = b.set(&format!("Set{name}"), |_: &mut Axis, _: i64| {});
        }
        let text = b.build().listing().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Axis has the following properties:");
        assert_eq!(lines[1].len(), 4 + 5 * 20);
        assert!(lines[1].starts_with("    a                   b"));
        assert_eq!(lines[2].trim(), "f");
    }

    #[test]
    fn debug_lists_setters() {
        let debug = format!("{:?}", table());
        assert!(debug.contains("PropertyTable"));
        assert!(debug.contains("SetSubtitle"));
    }
}
