//! Inline tag expansion for rendered HTML.
//!
//! Doc comments may embed `{@link target}`, `{@linkcode target}`,
//! `{@linkplain target}` and `{@tutorial name}` tags anywhere in their
//! text. After a page body has been rendered, [`resolve_links`] rewrites
//! every such tag into an `<a>` element using the URLs recorded in a
//! [`LinkMap`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::registry::{LinkMap, LinkOptions, MissingTutorialStyle};
use crate::{has_url_prefix, html_safe};

static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\[([^\]]+)\])?\{@(link|linkcode|linkplain|tutorial)\s+([^}]+)\}")
        .unwrap()
});

static AUTHOR_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s?(.+?)\b\s+<(\S+@\S+)>\s?$").unwrap());

/// How `{@link}` tags pick between plain and monospace rendering.
///
/// `monospace_links` forces code font for every `{@link}`; `clever_links`
/// uses code font only for symbol targets, leaving URL targets plain.
/// `{@linkcode}` and `{@linkplain}` always override both settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineLinkStyle {
    pub monospace_links: bool,
    pub clever_links: bool,
}

/// Replaces every inline `{@link ...}` and `{@tutorial ...}` tag in `html`
/// with an anchor element. `{@link}` targets with no registered URL fall
/// back to their text so prose never ends up with a dead tag in it; an
/// unknown tutorial renders as a disabled placeholder.
pub fn resolve_links(links: &LinkMap, html: &str, style: InlineLinkStyle) -> String {
    INLINE_TAG
        .replace_all(html, |caps: &Captures<'_>| {
            let leading_text = caps.get(1).map(|m| m.as_str());
            let tag = caps[2].to_ascii_lowercase();
            let body = &caps[3];

            if tag == "tutorial" {
                // tutorial names may contain spaces, so the whole body is
                // the name and only leading bracket text supplies a label
                return links.tutorial_link(body, leading_text, &MissingTutorialStyle::disabled());
            }

            let (target, label) = split_target(body);
            // Labels may span lines inside a comment block.
            let label = leading_text
                .or(label)
                .map(|text| collapse_whitespace(text));

            let monospace = if has_url_prefix(target) || tag == "linkplain" {
                false
            } else if tag == "linkcode" {
                true
            } else {
                style.monospace_links || style.clever_links
            };

            links.link_to_opts(
                target,
                label.as_deref().unwrap_or(""),
                &LinkOptions {
                    monospace,
                    ..LinkOptions::default()
                },
            )
        })
        .into_owned()
}

/// Rewrites `Author Name <email@example.com>` into a `mailto:` anchor.
/// Strings that do not carry a trailing email address are escaped as-is.
pub fn resolve_author_links(author: &str) -> String {
    match AUTHOR_EMAIL.captures(author) {
        Some(caps) => format!(
            r#"<a href="mailto:{}">{}</a>"#,
            &caps[2],
            html_safe(&caps[1])
        ),
        None => html_safe(author),
    }
}

/// Splits a tag body into target and optional label. A `|` separator wins
/// over whitespace, so labels containing spaces stay intact.
fn split_target(body: &str) -> (&str, Option<&str>) {
    if let Some(pipe) = body.find('|') {
        let (target, label) = body.split_at(pipe);
        return (target.trim(), non_empty(label[1..].trim()));
    }
    match body.find(char::is_whitespace) {
        Some(space) => {
            let (target, label) = body.split_at(space);
            (target.trim(), non_empty(label.trim()))
        }
        None => (body.trim(), None),
    }
}

fn non_empty(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_model::{Doclet, DocletKind, Tutorial};

    fn map_with_widget() -> LinkMap {
        let mut links = LinkMap::new();
        let widget = Doclet::new(DocletKind::Class, "Widget");
        links.create_link(&widget);
        links
    }

    #[test]
    fn test_link_tag_uses_registered_url() {
        let links = map_with_widget();
        let html = resolve_links(&links, "See {@link Widget} for details.", InlineLinkStyle::default());
        assert_eq!(html, r#"See <a href="Widget.html">Widget</a> for details."#);
    }

    #[test]
    fn test_link_tag_with_pipe_label() {
        let links = map_with_widget();
        let html = resolve_links(&links, "{@link Widget|the widget class}", InlineLinkStyle::default());
        assert_eq!(html, r#"<a href="Widget.html">the widget class</a>"#);
    }

    #[test]
    fn test_link_tag_with_space_label() {
        let links = map_with_widget();
        let html = resolve_links(&links, "{@link Widget a friendly name}", InlineLinkStyle::default());
        assert_eq!(html, r#"<a href="Widget.html">a friendly name</a>"#);
    }

    #[test]
    fn test_leading_bracket_text_overrides_label() {
        let links = map_with_widget();
        let html = resolve_links(&links, "[widgets]{@link Widget|ignored}", InlineLinkStyle::default());
        assert_eq!(html, r#"<a href="Widget.html">widgets</a>"#);
    }

    #[test]
    fn test_linkcode_forces_monospace() {
        let links = map_with_widget();
        let html = resolve_links(&links, "{@linkcode Widget}", InlineLinkStyle::default());
        assert_eq!(html, r#"<a href="Widget.html"><code>Widget</code></a>"#);
    }

    #[test]
    fn test_linkplain_overrides_monospace_setting() {
        let links = map_with_widget();
        let style = InlineLinkStyle {
            monospace_links: true,
            clever_links: false,
        };
        let html = resolve_links(&links, "{@linkplain Widget}", style);
        assert_eq!(html, r#"<a href="Widget.html">Widget</a>"#);
    }

    #[test]
    fn test_clever_links_spare_urls() {
        let links = map_with_widget();
        let style = InlineLinkStyle {
            monospace_links: false,
            clever_links: true,
        };
        let html = resolve_links(
            &links,
            "{@link Widget} and {@link https://example.com}",
            style,
        );
        assert_eq!(
            html,
            r#"<a href="Widget.html"><code>Widget</code></a> and <a href="https://example.com">https://example.com</a>"#
        );
    }

    #[test]
    fn test_unknown_target_falls_back_to_text() {
        let links = LinkMap::new();
        let html = resolve_links(&links, "{@link Missing}", InlineLinkStyle::default());
        assert_eq!(html, "Missing");
    }

    #[test]
    fn test_multiline_label_collapses() {
        let links = map_with_widget();
        let html = resolve_links(
            &links,
            "{@link Widget|a label\n    wrapped in the comment}",
            InlineLinkStyle::default(),
        );
        assert_eq!(html, r#"<a href="Widget.html">a label wrapped in the comment</a>"#);
    }

    #[test]
    fn test_tutorial_tag_resolves() {
        let mut links = map_with_widget();
        let mut root = Tutorial::root();
        root.children.push(Tutorial::new("setup", "Getting Set Up", ""));
        links.register_tutorials(&root);

        let html = resolve_links(&links, "Read {@tutorial setup} first.", InlineLinkStyle::default());
        assert_eq!(
            html,
            r#"Read <a href="tutorial-setup.html">Getting Set Up</a> first."#
        );
    }

    #[test]
    fn test_tutorial_tag_missing_renders_disabled_placeholder() {
        let links = LinkMap::new();
        let html = resolve_links(&links, "{@tutorial nowhere}", InlineLinkStyle::default());
        assert_eq!(html, "<em class=\"disabled\">Tutorial: nowhere</em>");
    }

    #[test]
    fn test_author_with_email_becomes_mailto() {
        let html = resolve_author_links("Jane Doe <jane@example.com>");
        assert_eq!(html, r#"<a href="mailto:jane@example.com">Jane Doe</a>"#);
    }

    #[test]
    fn test_author_without_email_is_escaped() {
        assert_eq!(resolve_author_links("Jane <3 Doe"), "Jane &lt;3 Doe");
    }

    #[test]
    fn test_tags_are_case_insensitive() {
        let links = map_with_widget();
        let html = resolve_links(&links, "{@LINK Widget}", InlineLinkStyle::default());
        assert_eq!(html, r#"<a href="Widget.html">Widget</a>"#);
    }
}
