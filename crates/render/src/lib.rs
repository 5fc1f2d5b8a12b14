//! Rendering helpers for the publish pipeline.
//!
//! Everything here turns doclet data into display strings: call signatures
//! and attribute spans, the navigation sidebar, markdown bodies, and the
//! small per-doclet fixups (example captions, `@see` hash references,
//! ancestor breadcrumbs) the pipeline applies before handing pages to the
//! template layer.

pub mod markdown;
pub mod nav;
pub mod signature;

pub use markdown::render_markdown;
pub use nav::{build_nav, NavOptions};
pub use signature::{
    add_attribs, add_signature_params, add_signature_returns, add_signature_types, attribs_for,
    build_attribs_string, needs_signature, update_item_name,
};

use docsmith_links::LinkMap;
use docsmith_model::{Doclet, Example};
use docsmith_store::{DocletStore, Query};
use once_cell::sync::Lazy;
use regex::Regex;

static CAPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*<caption>(.+?)</caption>(\s*[\n\r])(.+)$").unwrap());

/// Splits a leading `<caption>` block off an example's code. Examples
/// without one are left alone.
pub fn split_example_caption(example: &mut Example) {
    let split = CAPTION
        .captures(&example.code)
        .map(|caps| (caps[1].to_string(), caps[3].to_string()));
    if let Some((caption, code)) = split {
        example.caption = caption;
        example.code = code;
    }
}

/// Turns a `@see #member` reference into a link to that fragment on the
/// doclet's own page. Anything that does not start with `#` passes through
/// untouched.
pub fn hash_to_link(links: &mut LinkMap, doclet: &Doclet, hash: &str) -> String {
    if !hash.starts_with('#') || hash.len() < 2 {
        return hash.to_string();
    }

    let url = links.create_link(doclet);
    let base = match url.find('#') {
        Some(split) => &url[..split],
        None => url.as_str(),
    };
    format!("<a href=\"{}{}\">{}</a>", base, hash, hash)
}

/// Breadcrumb links for a doclet's enclosing scopes, outermost first. Each
/// link is prefixed with the ancestor's own scope punctuation, and the last
/// one carries the doclet's punctuation so the breadcrumb reads as a path.
pub fn ancestor_links(store: &DocletStore, links: &LinkMap, doclet: &Doclet) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut memberof = doclet.memberof.clone();

    while let Some(longname) = memberof {
        let ancestor = match store.find_first(&Query::new().longname(longname)) {
            Some(ancestor) => ancestor,
            None => break,
        };
        let punctuation = ancestor.scope.map(|s| s.punctuation()).unwrap_or("");
        ancestors.insert(
            0,
            links.link_to(
                &ancestor.longname,
                &format!("{}{}", punctuation, ancestor.name),
            ),
        );
        memberof = ancestor.memberof.clone();
    }

    if let Some(last) = ancestors.last_mut() {
        last.push_str(doclet.scope.map(|s| s.punctuation()).unwrap_or(""));
    }
    ancestors
}
