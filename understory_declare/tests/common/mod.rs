// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configurable types shared by the integration tests.

#![allow(dead_code, reason = "not every test binary uses every type")]

use understory_declare::{
    ColorRef, ConfigResult, Configurable, DirectoryLoader, OverrideStack, PropertyCache,
    PropertyTable, TemplateCache, TemplateStore,
};

/// Directory holding the `*_templates.json` fixtures.
pub(crate) const TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/templates");

#[derive(Debug, Default)]
pub(crate) struct Widget {
    pub(crate) color: Option<ColorRef>,
    pub(crate) size: i64,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) range: (f64, f64),
    pub(crate) overrides: OverrideStack,
}

impl Configurable for Widget {
    const TYPE_NAME: &'static str = "Widget";

    fn property_table() -> &'static PropertyTable<Self> {
        static TABLE: PropertyCache<Widget> = PropertyCache::new();
        TABLE.get_or_discover(|b| {
            b.set("SetColor", |w: &mut Self, c: Option<ColorRef>| w.color = c)
                .get("GetColor", |w: &Self| w.color)
                .set("SetSize", |w: &mut Self, s: i64| w.size = s)
                .get("GetSize", |w: &Self| w.size)
                .set("SetTitle", |w: &mut Self, t: String| w.title = t)
                .get("GetTitle", |w: &Self| w.title.clone())
                .set("SetSubtitle", |w: &mut Self, t: String| w.subtitle = t)
                .get("GetSubtitle", |w: &Self| w.subtitle.clone())
                .set2("SetRange", |w: &mut Self, lo: f64, hi: f64| {
                    w.range = (lo, hi);
                })
        })
    }

    fn templates() -> ConfigResult<&'static TemplateStore> {
        static TEMPLATES: TemplateCache = TemplateCache::new();
        TEMPLATES.get_or_load(Self::TYPE_NAME, &DirectoryLoader::new(TEMPLATE_DIR))
    }

    fn override_stack(&mut self) -> &mut OverrideStack {
        &mut self.overrides
    }
}

/// Nested band drawn around a histogram.
#[derive(Debug, Default)]
pub(crate) struct ErrorBand {
    pub(crate) fill_color: Option<ColorRef>,
    pub(crate) marker_color: Option<ColorRef>,
    pub(crate) style: i64,
    pub(crate) overrides: OverrideStack,
}

impl Configurable for ErrorBand {
    const TYPE_NAME: &'static str = "ErrorBand";

    fn property_table() -> &'static PropertyTable<Self> {
        static TABLE: PropertyCache<ErrorBand> = PropertyCache::new();
        TABLE.get_or_discover(|b| {
            b.set("SetFillColor", |e: &mut Self, c: ColorRef| {
                e.fill_color = Some(c);
            })
            .get("GetFillColor", |e: &Self| e.fill_color)
            .set("SetMarkerColor", |e: &mut Self, c: ColorRef| {
                e.marker_color = Some(c);
            })
            .get("GetMarkerColor", |e: &Self| e.marker_color)
            .set("SetStyle", |e: &mut Self, s: i64| e.style = s)
            .get("GetStyle", |e: &Self| e.style)
        })
    }

    fn override_stack(&mut self) -> &mut OverrideStack {
        &mut self.overrides
    }
}

/// Owns an always-present error band under the `errorband` prefix.
#[derive(Debug, Default)]
pub(crate) struct Histogram {
    pub(crate) line_color: Option<ColorRef>,
    pub(crate) style: i64,
    pub(crate) errorband: ErrorBand,
    pub(crate) overrides: OverrideStack,
}

impl Configurable for Histogram {
    const TYPE_NAME: &'static str = "Histogram";

    fn property_table() -> &'static PropertyTable<Self> {
        static TABLE: PropertyCache<Histogram> = PropertyCache::new();
        TABLE.get_or_discover(|b| {
            b.set("SetLineColor", |h: &mut Self, c: ColorRef| {
                // The band follows the line unless configured otherwise.
                h.line_color = Some(c);
                h.errorband.fill_color = Some(c);
                h.errorband.marker_color = Some(c);
            })
            .get("GetLineColor", |h: &Self| h.line_color)
            .set("SetStyle", |h: &mut Self, s: i64| h.style = s)
            .get("GetStyle", |h: &Self| h.style)
            .delegate::<ErrorBand>(
                "errorband",
                |h| Some(&h.errorband),
                |h| Some(&mut h.errorband),
            )
        })
    }

    fn override_stack(&mut self) -> &mut OverrideStack {
        &mut self.overrides
    }
}

/// Owns an optional histogram under the `stacksum` prefix.
#[derive(Debug, Default)]
pub(crate) struct Stack {
    pub(crate) title: String,
    pub(crate) stacksum: Option<Histogram>,
    pub(crate) overrides: OverrideStack,
}

impl Configurable for Stack {
    const TYPE_NAME: &'static str = "Stack";

    fn property_table() -> &'static PropertyTable<Self> {
        static TABLE: PropertyCache<Stack> = PropertyCache::new();
        TABLE.get_or_discover(|b| {
            b.set("SetTitle", |s: &mut Self, t: String| s.title = t)
                .get("GetTitle", |s: &Self| s.title.clone())
                .delegate::<Histogram>("stacksum", |s| s.stacksum.as_ref(), |s| s.stacksum.as_mut())
        })
    }

    fn override_stack(&mut self) -> &mut OverrideStack {
        &mut self.overrides
    }
}
