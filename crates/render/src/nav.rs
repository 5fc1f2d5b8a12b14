//! Navigation sidebar builder.
//!
//! Every generated page carries the same sidebar: a Home link followed by
//! one section per member group, in a fixed order. A longname that already
//! appeared in an earlier section is not listed again, except that modules
//! keep their own section regardless of name reuse.

use docsmith_links::{LinkMap, MissingTutorialStyle, GLOBAL_NAME};
use docsmith_model::{Doclet, DocletKind, Tutorial};
use docsmith_store::Members;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static KIND_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(module|event):").unwrap());

/// Display settings for [`build_nav`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NavOptions {
    /// List symbols under their longnames instead of their short names.
    pub use_longname: bool,
}

/// Builds the sidebar HTML for a site with the given members and tutorials.
pub fn build_nav(
    members: &Members,
    tutorials: &[Tutorial],
    links: &LinkMap,
    opts: NavOptions,
) -> String {
    let mut nav = String::from("<h2><a href=\"index.html\">Home</a></h2>");
    let mut seen = HashSet::new();

    // modules dedupe only against themselves; a class that shadows a module
    // longname still gets its own entry
    let mut seen_modules = HashSet::new();
    push_member_section(&mut nav, "Modules", &members.modules, &mut seen_modules, links, opts, false);
    push_member_section(&mut nav, "Externals", &members.externals, &mut seen, links, opts, true);
    push_member_section(&mut nav, "Classes", &members.classes, &mut seen, links, opts, false);
    push_member_section(&mut nav, "Events", &members.events, &mut seen, links, opts, false);
    push_member_section(&mut nav, "Namespaces", &members.namespaces, &mut seen, links, opts, false);
    push_member_section(&mut nav, "Mixins", &members.mixins, &mut seen, links, opts, false);
    push_tutorial_section(&mut nav, tutorials, links);
    push_member_section(&mut nav, "Interfaces", &members.interfaces, &mut seen, links, opts, false);
    push_globals_section(&mut nav, members, &mut seen, links);

    nav
}

fn push_member_section(
    nav: &mut String,
    heading: &str,
    items: &[Doclet],
    seen: &mut HashSet<String>,
    links: &LinkMap,
    opts: NavOptions,
    strip_quotes: bool,
) {
    let mut list = String::new();
    for item in items {
        if seen.contains(&item.longname) {
            continue;
        }
        let mut display = if opts.use_longname {
            item.longname.clone()
        } else {
            item.name.clone()
        };
        display = KIND_PREFIX.replace_all(&display, "").into_owned();
        if strip_quotes {
            if let Some(trimmed) = display.strip_prefix('"') {
                display = trimmed.to_string();
            }
            if let Some(trimmed) = display.strip_suffix('"') {
                display = trimmed.to_string();
            }
        }
        list.push_str(&format!(
            "<li>{}</li>",
            links.link_to(&item.longname, &display)
        ));
        seen.insert(item.longname.clone());
    }
    if !list.is_empty() {
        nav.push_str(&format!("<h3>{}</h3><ul>{}</ul>", heading, list));
    }
}

fn push_tutorial_section(nav: &mut String, tutorials: &[Tutorial], links: &LinkMap) {
    let mut list = String::new();
    for tutorial in tutorials {
        list.push_str(&format!(
            "<li>{}</li>",
            links.tutorial_link(&tutorial.name, None, &MissingTutorialStyle::disabled())
        ));
    }
    if !list.is_empty() {
        nav.push_str(&format!("<h3>Tutorials</h3><ul>{}</ul>", list));
    }
}

fn push_globals_section(
    nav: &mut String,
    members: &Members,
    seen: &mut HashSet<String>,
    links: &LinkMap,
) {
    if members.globals.is_empty() {
        return;
    }
    let mut list = String::new();
    for global in &members.globals {
        // typedefs live only on the globals page itself
        if global.kind != DocletKind::Typedef && !seen.contains(&global.longname) {
            list.push_str(&format!(
                "<li>{}</li>",
                links.link_to(&global.longname, &global.name)
            ));
        }
        seen.insert(global.longname.clone());
    }
    if list.is_empty() {
        // keep the globals page reachable even when every entry was filtered
        nav.push_str(&format!("<h3>{}</h3>", links.link_to(GLOBAL_NAME, "Global")));
    } else {
        nav.push_str(&format!("<h3>Global</h3><ul>{}</ul>", list));
    }
}
