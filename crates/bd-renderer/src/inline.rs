//! Inline markup processing: style injection, link extraction,
//! sanitization.
//!
//! Matching is single-level regex by design, not an HTML parser. Deeply
//! nested same-tag markup is out of scope; templates downstream depend on
//! this limit, so it must not be "upgraded" to real parsing.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use bd_config::RenderConfig;

use crate::compose::{Compositor, ExtraData};
use crate::escape::escape_attr;
use crate::footnotes::FootnoteRegistry;

/// Opening tags of the documented inline subset.
///
/// Longer names come first so `strong`/`span`/`sup` win over `s`. `<a>`
/// is excluded here: links get their own pass.
static STYLED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(strong|span|sup|mark|code|del|em|b|i|u|s)(\s[^>]*)?>").unwrap()
});

/// Anchor elements, single level, non-greedy body.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").unwrap());

/// `href` attribute inside an anchor's attribute list.
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href\s*=\s*"([^"]*)""#).unwrap());

/// `style` attribute inside an attribute list.
static STYLE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)style\s*=\s*"([^"]*)""#).unwrap());

/// Tags always stripped from output, applied after styling so injected
/// styles can never reintroduce one.
const DENY_TAGS: &[&str] = &["script", "iframe", "object", "embed", "form"];

/// Paired deny-list elements including their content.
static DENY_PAIRED_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DENY_TAGS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap())
        .collect()
});

/// Stray (unpaired) deny-list tags.
static DENY_STRAY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DENY_TAGS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)</?{tag}\b[^>]*/?>")).unwrap())
        .collect()
});

/// Strip deny-listed elements from an HTML fragment.
///
/// Complete elements disappear with their content; stray opening or
/// closing tags disappear alone.
#[must_use]
pub fn sanitize(html: &str) -> String {
    let mut out = html.to_owned();
    for re in DENY_PAIRED_RES.iter() {
        out = re.replace_all(&out, "").into_owned();
    }
    for re in DENY_STRAY_RES.iter() {
        out = re.replace_all(&out, "").into_owned();
    }
    out
}

/// Inline markup processor.
///
/// Transforms the documented inline tag subset in a fixed order:
/// theme-style injection, then link handling (keep-as-is hosts styled in
/// place, everything else handed to the link callback), then deny-list
/// sanitization. Re-running the processor on its own output is a no-op.
#[derive(Clone, Debug)]
pub struct InlineProcessor<'a> {
    /// Tag name → style string with theme tokens already resolved.
    styles: BTreeMap<String, String>,
    keep_hosts: &'a [String],
}

impl<'a> InlineProcessor<'a> {
    /// Build a processor from configuration, resolving theme placeholders
    /// in the inline style map once.
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        let compositor = Compositor::new(&config.theme);
        let empty = ExtraData::new();
        let styles = config
            .inline_styles
            .iter()
            .map(|(tag, style)| {
                let resolved = compositor
                    .substitute(style, &empty)
                    .unwrap_or_else(|| style.clone());
                (tag.clone(), resolved)
            })
            .collect();
        Self {
            styles,
            keep_hosts: &config.keep_link_hosts,
        }
    }

    /// Process inline markup, extracting non-exempt links as footnotes.
    #[must_use]
    pub fn process(&self, text: &str, footnotes: &mut FootnoteRegistry) -> String {
        self.process_with(text, |href, inner| {
            let index = footnotes.add(href);
            Some(self.footnote_replacement(inner, index))
        })
    }

    /// Process inline markup with a custom link callback.
    ///
    /// The callback receives `(href, inner_html)` for every non-exempt
    /// link and returns the replacement HTML, or `None` to keep the
    /// anchor untouched.
    #[must_use]
    pub fn process_with<F>(&self, text: &str, link: F) -> String
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        let styled = self.inject_styles(text);
        let linked = self.process_links(&styled, link);
        sanitize(&linked)
    }

    /// Attach themed styles to recognized inline tags (idempotent).
    fn inject_styles(&self, text: &str) -> String {
        STYLED_TAG_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let tag = caps[1].to_lowercase();
                let attrs = caps.get(2).map_or("", |m| m.as_str());
                match self.styles.get(&tag) {
                    Some(style) => open_tag_with_style(&caps[1], attrs, style),
                    None => caps[0].to_owned(),
                }
            })
            .into_owned()
    }

    /// Rewrite anchors: exempt hosts styled in place, the rest replaced
    /// through the callback.
    fn process_links<F>(&self, text: &str, mut link: F) -> String
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        LINK_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                let inner = caps.get(2).map_or("", |m| m.as_str());
                let href = HREF_RE
                    .captures(attrs)
                    .and_then(|c| c.get(1))
                    .map_or("", |m| m.as_str());

                if self.is_kept(href) {
                    let styled = match self.styles.get("a") {
                        Some(style) => open_tag_with_style("a", attrs, style),
                        None => format!("<a{attrs}>"),
                    };
                    return format!("{styled}{inner}</a>");
                }
                link(href, inner).unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned()
    }

    /// Replacement for an extracted link: styled span plus `[n]` marker.
    fn footnote_replacement(&self, inner: &str, index: usize) -> String {
        let mut out = String::with_capacity(inner.len() + 48);
        match self.styles.get("span") {
            Some(style) => {
                let _ = write!(out, r#"<span style="{}">"#, escape_attr(style));
            }
            None => out.push_str("<span>"),
        }
        out.push_str(inner);
        out.push_str("</span>");
        match self.styles.get("sup") {
            Some(style) => {
                let _ = write!(out, r#"<sup style="{}">[{index}]</sup>"#, escape_attr(style));
            }
            None => {
                let _ = write!(out, "<sup>[{index}]</sup>");
            }
        }
        out
    }

    /// Whether the link target's host is on the keep-as-is list.
    ///
    /// A target without a recognizable scheme never matches, so malformed
    /// hrefs flow to the callback and end up as literal footnote text.
    fn is_kept(&self, href: &str) -> bool {
        let Some(host) = host_of(href) else {
            return false;
        };
        self.keep_hosts
            .iter()
            .any(|kept| host == kept.as_str() || host.ends_with(&format!(".{kept}")))
    }
}

/// Extract the host from an absolute http(s) URL.
fn host_of(href: &str) -> Option<&str> {
    let rest = href
        .strip_prefix("https://")
        .or_else(|| href.strip_prefix("http://"))?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.split('@').next_back().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    if host.is_empty() { None } else { Some(host) }
}

/// Rebuild an opening tag with a style merged into its attributes.
///
/// Idempotent: an existing style that already contains the injected
/// declarations is left untouched; an existing different style is merged
/// with the author's declarations last so they win.
fn open_tag_with_style(tag: &str, attrs: &str, style: &str) -> String {
    if let Some(caps) = STYLE_ATTR_RE.captures(attrs) {
        let whole = caps.get(0).expect("match group 0 always present");
        let existing = &caps[1];
        if existing.contains(style.trim()) {
            return format!("<{tag}{attrs}>");
        }
        let merged = format!("{} {}", style.trim(), existing.trim());
        let mut rebuilt = String::with_capacity(attrs.len() + merged.len());
        rebuilt.push_str(&attrs[..whole.start()]);
        let _ = write!(rebuilt, r#"style="{}""#, escape_attr(merged.trim()));
        rebuilt.push_str(&attrs[whole.end()..]);
        format!("<{tag}{rebuilt}>")
    } else {
        format!(r#"<{tag}{attrs} style="{}">"#, escape_attr(style.trim()))
    }
}
