// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Declare: declarative, template-driven property configuration.
//!
//! This crate lets drawable objects be configured by property name, from
//! bundles of values and from named templates loaded from JSON, without each
//! type writing its own dispatch code.
//!
//! ## Core Concepts
//!
//! ### Discovery
//!
//! A type describes its `Set<Name>` / `Get<Name>` accessors once with a
//! [`PropertyTableBuilder`]. Discovery pairs them into a [`PropertyTable`] of
//! canonical, lower-cased property names. Only properties with both a setter
//! and a getter can be read back. The table is built lazily and shared
//! through a [`PropertyCache`].
//!
//! ### Declaration
//!
//! [`ConfigurableExt`] is implemented for every [`Configurable`] type:
//!
//! - `declare_property(name, value)` - resolve `Set<name>` exactly and call it
//! - `declare_properties(bundle)` - template entries first, then the rest in table order
//! - `get_property(name)` / `get_properties(prefix)` - read through getters
//!
//! Values are [`Value`]s; lists are unpacked into positional arguments and
//! color-valued properties accept color strings, see [`normalize_color`].
//! Whether setter invocation errors surface is decided by a [`Policy`].
//!
//! ### Templates
//!
//! A [`TemplateStore`] maps template names to bundles; every template is
//! layered over [`COMMON`]. Stores come from a [`TemplateLoader`] and are
//! cached per type in a [`TemplateCache`].
//!
//! ### Overrides
//!
//! [`ConfigurableExt::begin_override`] snapshots every readable property
//! before applying a bundle, and [`ConfigurableExt::end_override`] restores
//! it, unset properties included. Snapshots stack, so overrides nest. [`ConfigurableExt::scoped`] and
//! [`ConfigurableExt::with_properties`] restore automatically.
//!
//! ### Delegates
//!
//! An owner can forward every property starting with a prefix to a nested
//! configurable object, see [`PropertyTableBuilder::delegate`].
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_declare::{
//!     ColorRef, ConfigResult, Configurable, ConfigurableExt, MemoryLoader, OverrideStack,
//!     PropertyBundle, PropertyCache, PropertyTable, TemplateCache, TemplateStore, Value,
//! };
//!
//! #[derive(Default)]
//! struct Widget {
//!     color: Option<ColorRef>,
//!     size: i64,
//!     title: String,
//!     overrides: OverrideStack,
//! }
//!
//! impl Configurable for Widget {
//!     const TYPE_NAME: &'static str = "Widget";
//!
//!     fn property_table() -> &'static PropertyTable<Self> {
//!         static TABLE: PropertyCache<Widget> = PropertyCache::new();
//!         TABLE.get_or_discover(|b| {
//!             b.set("SetColor", |w: &mut Self, c: Option<ColorRef>| w.color = c)
//!                 .get("GetColor", |w: &Self| w.color)
//!                 .set("SetSize", |w: &mut Self, s: i64| w.size = s)
//!                 .get("GetSize", |w: &Self| w.size)
//!                 .set("SetTitle", |w: &mut Self, t: String| w.title = t)
//!         })
//!     }
//!
//!     fn templates() -> ConfigResult<&'static TemplateStore> {
//!         static TEMPLATES: TemplateCache = TemplateCache::new();
//!         let loader = MemoryLoader::new()
//!             .with("Widget", r#"{ "common": { "size": 10 }, "big": { "size": 50 } }"#);
//!         TEMPLATES.get_or_load(Self::TYPE_NAME, &loader)
//!     }
//!
//!     fn override_stack(&mut self) -> &mut OverrideStack {
//!         &mut self.overrides
//!     }
//! }
//!
//! let mut widget = Widget::default();
//! widget
//!     .declare_properties(
//!         &PropertyBundle::new()
//!             .with("template", "big")
//!             .with("color", "#ff0000")
//!             .with("title", "Signal"),
//!     )
//!     .unwrap();
//! assert_eq!(widget.size, 50);
//! assert_eq!(widget.title, "Signal");
//!
//! // Temporarily shrink and recolor the widget.
//! let mut plain = Widget::default();
//! plain
//!     .with_properties(
//!         &PropertyBundle::new().with("size", 1).with("color", 2),
//!         |w| assert_eq!(w.size, 1),
//!     )
//!     .unwrap();
//! assert_eq!(plain.get_property("size").unwrap(), Some(Value::Int(0)));
//! assert_eq!(plain.color, None);
//! ```
//!
//! ## Logging
//!
//! Discovery and template loading are reported at `debug` level through
//! `tracing`, each setter call at `trace`. Errors swallowed by
//! [`Policy::Lenient`] are logged at `debug`; a failed restore while dropping
//! an [`OverrideGuard`] is logged at `error`.

mod bundle;
mod color;
mod delegate;
mod dispatch;
mod error;
mod id;
mod object;
mod registry;
mod scope;
mod template;
mod value;

pub use bundle::{PropertyBundle, TEMPLATE_KEY, dissect};
pub use color::{is_color_property, normalize_color, resolve_color};
pub use error::{ConfigError, ConfigResult, Policy};
pub use id::PropertyId;
pub use object::{Configurable, ConfigurableExt, Delegate};
pub use registry::{Listing, PropertyCache, PropertyListing, PropertyTable, PropertyTableBuilder};
pub use scope::{OverrideGuard, OverrideStack};
pub use template::{
    COMMON, DirectoryLoader, MemoryLoader, NoTemplates, TemplateCache, TemplateLoader,
    TemplateStore,
};
pub use value::{ColorRef, FromValue, Value};
