//! Layer compositor: nested template trees to HTML.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use bd_config::{InlineStyleHandling, MergeStrategy, StylePriority, TemplateLayer, Theme};

use crate::escape::escape_attr;

/// Placeholder syntax: `{{theme.a.b}}`, `{{field}}`, `{{?field}}`.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\?)?\s*([A-Za-z0-9_.]+)\s*\}\}").unwrap());

/// Tags rendered without a closing tag.
const SELF_CLOSING: &[&str] = &["img", "hr", "br", "input"];

/// Block-specific placeholder values for one composition.
#[derive(Clone, Debug, Default)]
pub struct ExtraData(BTreeMap<String, String>);

impl ExtraData {
    /// Create an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Rendered block content handed to a content layer.
#[derive(Clone, Debug, Default)]
pub struct Content {
    /// Already-processed HTML (inline markup applied, or escaped, per the
    /// block type's rules).
    pub html: String,
    /// Block-local inline style (e.g. an alignment tune), merged with the
    /// template style per the content layer's handling rules.
    pub style: Option<String>,
}

impl Content {
    /// Content with no inline style.
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            style: None,
        }
    }

    /// Content carrying a block-local inline style.
    #[must_use]
    pub fn styled(html: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            style: Some(style.into()),
        }
    }
}

/// Recursive template-layer compositor.
///
/// Builds nested HTML depth-first from a [`TemplateLayer`] tree,
/// substituting theme tokens and block-specific extra data, and resolving
/// inline-vs-template style conflicts on content layers.
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'a> {
    theme: &'a Theme,
}

impl<'a> Compositor<'a> {
    /// Create a compositor over a theme.
    #[must_use]
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Substitute placeholders in a templated string.
    ///
    /// Returns `None` when a conditional placeholder (`{{?field}}`)
    /// resolved falsy — the caller drops the owning attribute or layer.
    /// Unresolved non-conditional placeholders stay literal.
    #[must_use]
    pub fn substitute(&self, template: &str, extra: &ExtraData) -> Option<String> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(template) {
            let whole = caps.get(0).expect("match group 0 always present");
            out.push_str(&template[last..whole.start()]);
            last = whole.end();

            let conditional = caps.get(1).is_some();
            let name = &caps[2];
            let value = match name.strip_prefix("theme.") {
                Some(path) => self.theme.lookup(path),
                None => extra.get(name),
            };
            match value {
                Some(v) if !conditional || !v.trim().is_empty() => out.push_str(v),
                Some(_) | None if conditional => return None,
                _ => out.push_str(whole.as_str()),
            }
        }
        out.push_str(&template[last..]);
        Some(out)
    }

    /// Compose a layer tree into HTML.
    ///
    /// `content` is delivered to designated content layers only; other
    /// layers wrap their children. Non-content leaves in the self-closing
    /// set render as void elements.
    #[must_use]
    pub fn compose(
        &self,
        layer: &TemplateLayer,
        content: Option<&Content>,
        extra: &ExtraData,
    ) -> String {
        // A falsy conditional in the text template removes the whole layer.
        let text = match &layer.text {
            Some(template) => match self.substitute(template, extra) {
                Some(text) => Some(text),
                None => return String::new(),
            },
            None => None,
        };

        let mut style = self.substitute(&layer.style, extra).unwrap_or_default();
        let mut inner = text.unwrap_or_default();

        if layer.is_content_layer {
            if let Some(content) = content {
                let inline = content.style.as_deref().filter(|s| !s.trim().is_empty());
                match inline {
                    Some(inline) => {
                        let handling = layer.inline_style_handling.unwrap_or_default();
                        if handling.need_wrapper {
                            let _ = write!(
                                inner,
                                r#"<span style="{}">{}</span>"#,
                                escape_attr(inline),
                                content.html
                            );
                        } else {
                            style = merge_styles(&style, inline, handling);
                            inner.push_str(&content.html);
                        }
                    }
                    None => inner.push_str(&content.html),
                }
            }
        }

        // Children of a content layer must not receive the content again.
        let child_content = if layer.is_content_layer { None } else { content };
        for child in &layer.children {
            inner.push_str(&self.compose(child, child_content, extra));
        }

        let tag = if layer.tag.is_empty() { "div" } else { &layer.tag };
        let mut open = String::with_capacity(inner.len() + 64);
        let _ = write!(open, "<{tag}");
        if !style.trim().is_empty() {
            let _ = write!(open, r#" style="{}""#, escape_attr(style.trim()));
        }
        for (name, template) in &layer.attrs {
            // Falsy conditional: attribute omitted.
            if let Some(value) = self.substitute(template, extra) {
                let _ = write!(open, r#" {name}="{}""#, escape_attr(&value));
            }
        }

        let void = !layer.is_content_layer
            && layer.children.is_empty()
            && inner.is_empty()
            && SELF_CLOSING.contains(&tag);
        if void {
            let _ = write!(open, ">");
            open
        } else {
            let _ = write!(open, ">{inner}</{tag}>");
            open
        }
    }
}

/// Combine a template style with a block-local inline style.
fn merge_styles(template: &str, inline: &str, handling: InlineStyleHandling) -> String {
    match handling.strategy {
        MergeStrategy::Replace => match handling.priority {
            StylePriority::Inline => inline.to_owned(),
            StylePriority::Template => template.to_owned(),
        },
        MergeStrategy::Merge => {
            if template.contains(inline.trim()) {
                return template.to_owned();
            }
            // Inline CSS: the later declaration wins, so the prioritized
            // side goes last.
            let (first, second) = match handling.priority {
                StylePriority::Inline => (template, inline),
                StylePriority::Template => (inline, template),
            };
            format!("{} {}", first.trim(), second.trim())
                .trim()
                .to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn theme() -> Theme {
        serde_json::from_value(json!({
            "color": {"text": "#333", "muted": "#999"},
            "font": {"base": "font-family: Arial;"}
        }))
        .unwrap()
    }

    fn layer(value: serde_json::Value) -> TemplateLayer {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_theme_placeholder_substitution() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let out = compositor
            .substitute("color: {{theme.color.text}};", &ExtraData::new())
            .unwrap();
        assert_eq!(out, "color: #333;");
    }

    #[test]
    fn test_unresolved_placeholder_stays_literal() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let out = compositor
            .substitute("color: {{theme.color.nope}}; x: {{missing}};", &ExtraData::new())
            .unwrap();
        assert_eq!(out, "color: {{theme.color.nope}}; x: {{missing}};");
    }

    #[test]
    fn test_conditional_truthy_substitutes() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let mut extra = ExtraData::new();
        extra.set("caption", "hello");
        assert_eq!(
            compositor.substitute("{{?caption}}", &extra).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_conditional_falsy_removes_string() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        assert_eq!(compositor.substitute("{{?caption}}", &ExtraData::new()), None);

        let mut blank = ExtraData::new();
        blank.set("caption", "   ");
        assert_eq!(compositor.substitute("{{?caption}}", &blank), None);
    }

    #[test]
    fn test_content_layer_receives_content() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "div",
            "children": [{"tag": "p", "style": "{{theme.font.base}}", "isContentLayer": true}]
        }));
        let html = compositor.compose(&tpl, Some(&Content::html("Hi")), &ExtraData::new());
        assert_eq!(html, r#"<div><p style="font-family: Arial;">Hi</p></div>"#);
    }

    #[test]
    fn test_content_not_duplicated_into_content_layer_children() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "p",
            "isContentLayer": true,
            "children": [{"tag": "span", "isContentLayer": true}]
        }));
        let html = compositor.compose(&tpl, Some(&Content::html("X")), &ExtraData::new());
        assert_eq!(html, "<p>X<span></span></p>");
    }

    #[test]
    fn test_self_closing_leaf() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({"tag": "hr", "style": "border: none;"}));
        assert_eq!(
            compositor.compose(&tpl, None, &ExtraData::new()),
            r#"<hr style="border: none;">"#
        );
    }

    #[test]
    fn test_non_void_empty_leaf_gets_closing_tag() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({"tag": "td"}));
        assert_eq!(compositor.compose(&tpl, None, &ExtraData::new()), "<td></td>");
    }

    #[test]
    fn test_attr_substitution_and_conditional_attr() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "img",
            "attrs": {"src": "{{url}}", "alt": "{{?caption}}"}
        }));

        let mut extra = ExtraData::new();
        extra.set("url", "https://x/a.png");
        assert_eq!(
            compositor.compose(&tpl, None, &extra),
            r#"<img src="https://x/a.png">"#
        );

        extra.set("caption", "A cat");
        assert_eq!(
            compositor.compose(&tpl, None, &extra),
            r#"<img alt="A cat" src="https://x/a.png">"#
        );
    }

    #[test]
    fn test_conditional_text_removes_layer() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "div",
            "children": [
                {"tag": "p", "isContentLayer": true},
                {"tag": "cite", "style": "color: {{theme.color.muted}};", "text": "{{?caption}}"}
            ]
        }));

        let without = compositor.compose(&tpl, Some(&Content::html("Q")), &ExtraData::new());
        assert_eq!(without, "<div><p>Q</p></div>");

        let mut extra = ExtraData::new();
        extra.set("caption", "Author");
        let with = compositor.compose(&tpl, Some(&Content::html("Q")), &extra);
        assert_eq!(
            with,
            r#"<div><p>Q</p><cite style="color: #999;">Author</cite></div>"#
        );
    }

    #[test]
    fn test_empty_style_attribute_is_omitted() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({"tag": "p", "style": "  ", "isContentLayer": true}));
        assert_eq!(
            compositor.compose(&tpl, Some(&Content::html("x")), &ExtraData::new()),
            "<p>x</p>"
        );
    }

    #[test]
    fn test_inline_style_merge_priority_inline() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "p",
            "style": "color: #333;",
            "isContentLayer": true
        }));
        let content = Content::styled("x", "text-align: center;");
        assert_eq!(
            compositor.compose(&tpl, Some(&content), &ExtraData::new()),
            r#"<p style="color: #333; text-align: center;">x</p>"#
        );
    }

    #[test]
    fn test_inline_style_replace_priority_template() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "p",
            "style": "color: #333;",
            "isContentLayer": true,
            "inlineStyleHandling": {"strategy": "replace", "priority": "template"}
        }));
        let content = Content::styled("x", "color: red;");
        assert_eq!(
            compositor.compose(&tpl, Some(&content), &ExtraData::new()),
            r#"<p style="color: #333;">x</p>"#
        );
    }

    #[test]
    fn test_inline_style_wrapper() {
        let theme = theme();
        let compositor = Compositor::new(&theme);
        let tpl = layer(json!({
            "tag": "p",
            "style": "color: #333;",
            "isContentLayer": true,
            "inlineStyleHandling": {"strategy": "merge", "needWrapper": true}
        }));
        let content = Content::styled("x", "text-align: center;");
        assert_eq!(
            compositor.compose(&tpl, Some(&content), &ExtraData::new()),
            r#"<p style="color: #333;"><span style="text-align: center;">x</span></p>"#
        );
    }

    #[test]
    fn test_merge_skips_already_present_style() {
        let merged = merge_styles(
            "color: #333; text-align: center;",
            "text-align: center;",
            InlineStyleHandling::default(),
        );
        assert_eq!(merged, "color: #333; text-align: center;");
    }
}
