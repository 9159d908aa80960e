//! Built-in utility-class catalog.
//!
//! An immutable name → declarations lookup consulted by the mixin resolver
//! before any user-defined mixin. Names are class selectors including the
//! leading dot (`.p-4`, `.text-red-500`); each entry holds one declaration per
//! statement, ready to be spliced in place of a call.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::ast::builder::split_statements;

pub mod scales;

use scales::*;

static BUILTIN: Lazy<UtilityCatalog> = Lazy::new(UtilityCatalog::standard);

#[derive(Debug, Clone, Default)]
pub struct UtilityCatalog {
    entries: HashMap<String, Vec<String>>,
}

impl UtilityCatalog {
    /// The process-wide shared catalog.
    pub fn builtin() -> &'static UtilityCatalog {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the full standard catalog.
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        register_spacing(&mut catalog);
        register_sizing(&mut catalog);
        register_typography(&mut catalog);
        register_borders(&mut catalog);
        register_layout(&mut catalog);
        register_effects(&mut catalog);
        register_transforms(&mut catalog);
        register_fixed(&mut catalog);
        tracing::debug!(entries = catalog.len(), "built utility catalog");
        catalog
    }

    /// Adds (or replaces) an entry from a declaration body such as
    /// `"padding-left: 1rem; padding-right: 1rem;"`.
    pub fn insert(&mut self, name: impl Into<String>, body: &str) {
        let (mut declarations, rest) = split_statements(body);
        if !rest.is_empty() {
            declarations.push(format!("{rest};"));
        }
        self.entries.insert(name.into(), declarations);
    }

    pub fn lookup(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn family<'c>(&'c mut self, prefix: &'c str, template: &'c str) -> Family<'c> {
        Family {
            catalog: self,
            prefix,
            template,
        }
    }
}

/// A run of entries sharing a name prefix and a declaration template.
struct Family<'c> {
    catalog: &'c mut UtilityCatalog,
    prefix: &'c str,
    template: &'c str,
}

impl Family<'_> {
    fn name(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!(".{}", self.prefix)
        } else {
            format!(".{}-{}", self.prefix, suffix)
        }
    }

    fn set(&mut self, suffix: &str, value: &str) -> &mut Self {
        let name = self.name(suffix);
        self.catalog.insert(name, &self.template.replace("$1", value));
        self
    }

    fn set_pair(&mut self, suffix: &str, first: &str, second: &str) -> &mut Self {
        let name = self.name(suffix);
        let body = self.template.replace("$1", first).replace("$2", second);
        self.catalog.insert(name, &body);
        self
    }

    fn scale(&mut self, scale: Scale) -> &mut Self {
        for (suffix, value) in scale {
            self.set(suffix, value);
        }
        self
    }

    fn colors(&mut self) -> &mut Self {
        self.scale(COLOR_KEYWORDS);
        for (family, hexes) in PALETTE {
            for (shade, hex) in SHADES.iter().zip(hexes) {
                self.set(&format!("{family}-{shade}"), hex);
            }
        }
        self
    }
}

fn register_spacing(c: &mut UtilityCatalog) {
    let families = [
        ("p", "padding: $1;"),
        ("px", "padding-left: $1; padding-right: $1;"),
        ("py", "padding-top: $1; padding-bottom: $1;"),
        ("pl", "padding-left: $1;"),
        ("pt", "padding-top: $1;"),
        ("pr", "padding-right: $1;"),
        ("pb", "padding-bottom: $1;"),
        ("m", "margin: $1;"),
        ("mx", "margin-left: $1; margin-right: $1;"),
        ("my", "margin-top: $1; margin-bottom: $1;"),
        ("ml", "margin-left: $1;"),
        ("mt", "margin-top: $1;"),
        ("mr", "margin-right: $1;"),
        ("mb", "margin-bottom: $1;"),
        ("inset", "inset: $1;"),
        ("inset-x", "left: $1; right: $1;"),
        ("inset-y", "top: $1; bottom: $1;"),
        ("top", "top: $1;"),
        ("right", "right: $1;"),
        ("bottom", "bottom: $1;"),
        ("left", "left: $1;"),
        ("gap", "gap: $1;"),
        ("gap-x", "column-gap: $1;"),
        ("gap-y", "row-gap: $1;"),
        ("basis", "flex-basis: $1;"),
    ];
    for (prefix, template) in families {
        c.family(prefix, template).scale(SPACING);
    }
    c.insert(".mx-auto", "margin-left: auto; margin-right: auto;");
}

fn register_sizing(c: &mut UtilityCatalog) {
    for (prefix, template) in [("w", "width: $1;"), ("h", "height: $1;")] {
        c.family(prefix, template)
            .scale(SPACING)
            .scale(FRACTIONS)
            .scale(BOX_SIZES);
    }
    c.family("w", "width: $1;").scale(WIDTHS);
    c.insert(".h-screen", "height: 100vh;");

    c.family("min-w", "min-width: $1;")
        .scale(SPACING)
        .scale(CONTENT_SIZES);
    c.family("max-w", "max-width: $1;").scale(MAX_WIDTHS);
    c.family("min-h", "min-height: $1;")
        .scale(SPACING)
        .scale(CONTENT_SIZES)
        .set("screen", "100vh");
    c.family("max-h", "max-height: $1;")
        .scale(SPACING)
        .scale(CONTENT_SIZES)
        .scale(SCREEN_HEIGHT);
}

fn register_typography(c: &mut UtilityCatalog) {
    let mut sizes = c.family("text", "font-size: $1; line-height: $2;");
    for (suffix, size, height) in FONT_SIZES {
        sizes.set_pair(suffix, size, height);
    }
    c.family("leading", "line-height: $1;").scale(LEADING);
    c.family("tracking", "letter-spacing: $1;").scale(TRACKING);
    c.family("font", "font-weight: $1;").scale(FONT_WEIGHTS);
    c.family("text", "color: $1;").colors();
    c.family("text", "text-align: $1;").scale(TEXT_ALIGN);
    c.family("decoration", "text-decoration-color: $1;").colors();

    c.insert(".underline", "text-decoration: underline;");
    c.insert(".overline", "text-decoration: overline;");
    c.insert(".line-through", "text-decoration: line-through;");
    c.insert(".no-underline", "text-decoration: none;");
    c.insert(".truncate", "overflow: hidden; text-overflow: ellipsis; white-space: nowrap;");
    c.insert(".text-ellipsis", "text-overflow: ellipsis;");
    c.insert(".text-clip", "text-overflow: clip;");
    c.insert(".text-wrap", "text-wrap: wrap;");
    c.insert(".text-nowrap", "text-wrap: nowrap;");
    c.insert(".text-balance", "text-wrap: balance;");
    c.insert(".text-pretty", "text-wrap: pretty;");
}

fn register_borders(c: &mut UtilityCatalog) {
    let corners = [
        ("rounded", "border-radius: $1;"),
        ("rounded-t", "border-top-left-radius: $1; border-top-right-radius: $1;"),
        ("rounded-r", "border-top-right-radius: $1; border-bottom-right-radius: $1;"),
        ("rounded-b", "border-bottom-left-radius: $1; border-bottom-right-radius: $1;"),
        ("rounded-l", "border-top-left-radius: $1; border-bottom-left-radius: $1;"),
    ];
    for (prefix, template) in corners {
        c.family(prefix, template).scale(RADII);
    }

    let sides = [
        ("border", "border-width: $1;"),
        ("border-l", "border-left-width: $1;"),
        ("border-t", "border-top-width: $1;"),
        ("border-r", "border-right-width: $1;"),
        ("border-b", "border-bottom-width: $1;"),
    ];
    for (prefix, template) in sides {
        c.family(prefix, template).scale(BORDER_WIDTHS);
    }
    c.family("border", "border-color: $1;").colors();
    c.family("border", "border-style: $1;").scale(BORDER_STYLES);

    c.family("outline", "outline-width: $1;").scale(OUTLINE_WIDTHS);
    c.family("outline", "outline-color: $1;").colors();
    c.family("outline", "outline-style: $1;").scale(OUTLINE_STYLES);
    c.family("outline-offset", "outline-offset: $1;").scale(OUTLINE_WIDTHS);
    c.insert(".outline-none", "outline: 2px solid transparent; outline-offset: 2px;");
}

fn register_layout(c: &mut UtilityCatalog) {
    c.family("overflow", "overflow: $1;").scale(OVERFLOW);
    c.family("overflow-x", "overflow-x: $1;").scale(OVERFLOW);
    c.family("overflow-y", "overflow-y: $1;").scale(OVERFLOW);
    c.family("object", "object-fit: $1;").scale(OBJECT_FIT);
    c.family("object", "object-position: $1;").scale(OBJECT_POSITION);

    c.family("justify", "justify-content: $1;").scale(JUSTIFY_CONTENT);
    c.family("justify-items", "justify-items: $1;").scale(JUSTIFY_ITEMS);
    c.family("justify-self", "justify-self: $1;").scale(SELF_ALIGNMENT);
    c.family("content", "align-content: $1;").scale(ALIGN_CONTENT);
    c.family("items", "align-items: $1;").scale(ALIGN_ITEMS);
    c.family("self", "align-self: $1;").scale(SELF_ALIGNMENT);
    c.family("z", "z-index: $1;").scale(Z_INDEX);

    c.family("bg", "background-color: $1;").colors();
    c.family("cursor", "cursor: $1;").scale(CURSORS);
    c.family("pointer-events", "pointer-events: $1;").scale(POINTER_EVENTS);
}

fn register_effects(c: &mut UtilityCatalog) {
    c.family("opacity", "opacity: $1;").scale(OPACITY);
    c.family("shadow", "box-shadow: $1;").scale(SHADOWS);

    const TIMING: &str =
        "transition-timing-function: cubic-bezier(0.4, 0, 0.2, 1); transition-duration: 150ms;";
    let transitions = [
        ("", "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform, filter, backdrop-filter"),
        ("-all", "all"),
        ("-colors", "color, background-color, border-color, text-decoration-color, fill, stroke"),
        ("-opacity", "opacity"),
        ("-shadow", "box-shadow"),
        ("-transform", "transform"),
    ];
    for (suffix, property) in transitions {
        c.insert(
            format!(".transition{suffix}"),
            &format!("transition-property: {property}; {TIMING}"),
        );
    }
    c.insert(".transition-none", "transition-property: none;");

    c.family("duration", "transition-duration: $1;").scale(DURATIONS);
    c.family("delay", "transition-delay: $1;").scale(DURATIONS);
    c.family("ease", "transition-timing-function: $1;").scale(EASING);
}

fn register_transforms(c: &mut UtilityCatalog) {
    c.family("scale", "transform: scale($1);").scale(SCALES);
    c.family("scale-x", "transform: scaleX($1);").scale(SCALES);
    c.family("scale-y", "transform: scaleY($1);").scale(SCALES);
    c.family("rotate", "transform: rotate($1);").scale(ROTATIONS);
    c.family("translate-x", "transform: translateX($1);")
        .scale(SPACING)
        .scale(FRACTIONS);
    c.family("translate-y", "transform: translateY($1);")
        .scale(SPACING)
        .scale(FRACTIONS);
    c.family("-translate-x", "transform: translateX(-$1);")
        .scale(SPACING)
        .scale(FRACTIONS);
    c.family("-translate-y", "transform: translateY(-$1);")
        .scale(SPACING)
        .scale(FRACTIONS);
    c.family("skew-x", "transform: skewX($1);").scale(SKEWS);
    c.family("skew-y", "transform: skewY($1);").scale(SKEWS);
    c.family("origin", "transform-origin: $1;").scale(ORIGINS);
}

/// Keyword utilities with no scale.
fn register_fixed(c: &mut UtilityCatalog) {
    const FIXED: &[(&str, &str)] = &[
        (".block", "display: block;"),
        (".inline-block", "display: inline-block;"),
        (".inline", "display: inline;"),
        (".flex", "display: flex;"),
        (".inline-flex", "display: inline-flex;"),
        (".grid", "display: grid;"),
        (".inline-grid", "display: inline-grid;"),
        (".contents", "display: contents;"),
        (".list-item", "display: list-item;"),
        (".hidden", "display: none;"),
        (".static", "position: static;"),
        (".fixed", "position: fixed;"),
        (".absolute", "position: absolute;"),
        (".relative", "position: relative;"),
        (".sticky", "position: sticky;"),
        (".float-left", "float: left;"),
        (".float-right", "float: right;"),
        (".float-none", "float: none;"),
        (".flex-row", "flex-direction: row;"),
        (".flex-row-reverse", "flex-direction: row-reverse;"),
        (".flex-col", "flex-direction: column;"),
        (".flex-col-reverse", "flex-direction: column-reverse;"),
        (".flex-wrap", "flex-wrap: wrap;"),
        (".flex-wrap-reverse", "flex-wrap: wrap-reverse;"),
        (".flex-nowrap", "flex-wrap: nowrap;"),
        (".flex-1", "flex: 1 1 0%;"),
        (".flex-auto", "flex: 1 1 auto;"),
        (".flex-initial", "flex: 0 1 auto;"),
        (".flex-none", "flex: none;"),
        (".grow", "flex-grow: 1;"),
        (".grow-0", "flex-grow: 0;"),
        (".shrink", "flex-shrink: 1;"),
        (".shrink-0", "flex-shrink: 0;"),
        (".flex-grow", "flex-grow: 1;"),
        (".flex-grow-0", "flex-grow: 0;"),
        (".flex-shrink", "flex-shrink: 1;"),
        (".flex-shrink-0", "flex-shrink: 0;"),
    ];
    for (name, body) in FIXED {
        c.insert(*name, body);
    }
}
