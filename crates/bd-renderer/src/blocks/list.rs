//! List blocks: recursive rendering of nested ordered, unordered, and
//! checklist items.
//!
//! The outermost wrapper is composed by the generic block routine from the
//! `list` template; this module renders the item sequence handed to it,
//! including nested sublists, which get their own wrapper per level.

use std::fmt::Write;

use bd_types::Block;
use bd_types::payload::{CounterType, ListData, ListItem, ListStyle};

use crate::blocks::{Extraction, payload};
use crate::compose::{Compositor, Content, ExtraData};
use crate::context::RenderContext;
use crate::error::BlockRenderError;
use crate::registry::TemplateRegistry;

/// Counter styles cycled as ordered lists nest deeper.
const COUNTER_CYCLE: [CounterType; 3] = [
    CounterType::Decimal,
    CounterType::LowerAlpha,
    CounterType::LowerRoman,
];

pub(super) fn extract(
    block: &Block,
    ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    let data: ListData = payload(block)?;

    let html = render_items(&data.items, data.style, 1, ctx);
    let mut extraction = Extraction::new(Content::html(html));
    extraction.variant = Some(data.style.as_str().to_owned());
    extraction
        .extra
        .set("counter", counter_for(1, data.meta.counter_type).as_css());
    extraction.is_empty = data.items.is_empty();
    Ok(extraction)
}

/// Effective counter style at a nesting level.
///
/// An explicit counter applies to the list that declares it only; without
/// one the level cycles decimal, lower-alpha, lower-roman.
fn counter_for(level: usize, explicit: Option<CounterType>) -> CounterType {
    explicit.unwrap_or(COUNTER_CYCLE[(level.max(1) - 1) % COUNTER_CYCLE.len()])
}

/// Render a sequence of items at a nesting level into `<li>` markup.
fn render_items(
    items: &[ListItem],
    style: ListStyle,
    level: usize,
    ctx: &mut RenderContext<'_>,
) -> String {
    let config = ctx.config();
    let registry = TemplateRegistry::new(config);
    let compositor = Compositor::new(&config.theme);

    let mut out = String::new();
    for item in items {
        let mut inner = ctx.inline.process(&item.content, &mut ctx.footnotes);

        if !item.items.is_empty() {
            if level >= config.limits.max_list_depth {
                ctx.warn(format!("nested list truncated at depth {level}"));
            } else {
                // Sublist style defaults to the parent's unless overridden.
                let child_style = item.meta.style.unwrap_or(style);
                let child_level = level + 1;
                let children = render_items(&item.items, child_style, child_level, ctx);

                let mut extra = ExtraData::new();
                extra.set(
                    "counter",
                    counter_for(child_level, item.meta.counter_type).as_css(),
                );
                match registry.get("list", Some(child_style.as_str())) {
                    Some(layer) => {
                        inner.push_str(&compositor.compose(
                            layer,
                            Some(&Content::html(children)),
                            &extra,
                        ));
                    }
                    None => {
                        let tag = wrapper_tag(child_style);
                        let _ = write!(inner, "<{tag}>{children}</{tag}>");
                    }
                }
            }
        }

        let mut extra = ExtraData::new();
        if style == ListStyle::Checklist {
            extra.set("symbol", check_symbol(ctx, item.is_checked()));
        }
        match registry.get("listItem", Some(style.as_str())) {
            Some(layer) => {
                out.push_str(&compositor.compose(layer, Some(&Content::html(inner)), &extra));
            }
            None => {
                let _ = write!(out, "<li>{inner}</li>");
            }
        }
    }
    out
}

fn wrapper_tag(style: ListStyle) -> &'static str {
    match style {
        ListStyle::Ordered => "ol",
        ListStyle::Unordered | ListStyle::Checklist => "ul",
    }
}

/// Check-state marker, themable under `list.checkedIcon`/`list.uncheckedIcon`.
fn check_symbol(ctx: &RenderContext<'_>, checked: bool) -> String {
    let theme = &ctx.config().theme;
    let (path, fallback) = if checked {
        ("list.checkedIcon", "\u{2611}")
    } else {
        ("list.uncheckedIcon", "\u{2610}")
    };
    theme.lookup(path).unwrap_or(fallback).to_owned()
}
