//! The longname-to-URL registry and output filename allocation.

use crate::{has_url_prefix, FILE_EXTENSION, GLOBAL_NAME};
use docsmith_model::{Doclet, Tutorial};
use std::collections::{HashMap, HashSet};

/// Rendering options for [`LinkMap::link_to_opts`].
#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    pub css_class: Option<String>,
    pub fragment_id: Option<String>,
    /// Wrap the link text in `<code>`.
    pub monospace: bool,
}

/// How to render a reference to a tutorial that does not exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingTutorialStyle {
    pub tag: Option<&'static str>,
    pub class: Option<&'static str>,
    pub prefix: Option<&'static str>,
}

impl MissingTutorialStyle {
    /// The style the navigation uses: `<em class="disabled">Tutorial: x</em>`.
    pub fn disabled() -> Self {
        MissingTutorialStyle {
            tag: Some("em"),
            class: Some("disabled"),
            prefix: Some("Tutorial: "),
        }
    }
}

#[derive(Debug, Clone)]
struct TutorialEntry {
    url: String,
    title: String,
}

/// Registry of every URL the generated site hands out.
///
/// Registration order is preserved so the page-generation loop and filename
/// collision suffixes are deterministic across runs.
#[derive(Debug, Default)]
pub struct LinkMap {
    longname_to_url: HashMap<String, String>,
    registration_order: Vec<String>,
    used_filenames: HashSet<String>,
    tutorials: HashMap<String, TutorialEntry>,
}

impl LinkMap {
    pub fn new() -> Self {
        LinkMap::default()
    }

    /// Maps a longname to a URL. The first registration wins a slot in the
    /// iteration order; re-registering only updates the URL.
    pub fn register(&mut self, longname: impl Into<String>, url: impl Into<String>) {
        let longname = longname.into();
        if !self.longname_to_url.contains_key(&longname) {
            self.registration_order.push(longname.clone());
        }
        self.longname_to_url.insert(longname, url.into());
    }

    pub fn url_for(&self, longname: &str) -> Option<&str> {
        self.longname_to_url.get(longname).map(String::as_str)
    }

    /// Longnames in first-registration order.
    pub fn registered_longnames(&self) -> &[String] {
        &self.registration_order
    }

    /// Turns a longname into a filename that is safe on common filesystems
    /// and unique within this run.
    ///
    /// Namespace prefixes keep their word (`module:x` becomes `module-x`),
    /// problem characters become underscores, `~` marks become dashes, `#`
    /// marks become underscores, and a trailing parenthesized variation is
    /// dropped. Collisions (case-insensitive) grow trailing underscores.
    pub fn get_unique_filename(&mut self, longname: &str) -> String {
        let mut basename = sanitize_basename(longname);
        if basename.is_empty() {
            basename.push('_');
        }
        while self.used_filenames.contains(&basename.to_lowercase()) {
            basename.push('_');
        }
        self.used_filenames.insert(basename.to_lowercase());
        format!("{}{}", basename, FILE_EXTENSION)
    }

    /// The output file for a longname, allocating and registering one the
    /// first time it is asked for.
    pub fn filename_for(&mut self, longname: &str) -> String {
        if let Some(url) = self.longname_to_url.get(longname) {
            return url.clone();
        }
        let filename = self.get_unique_filename(longname);
        self.register(longname, filename.clone());
        filename
    }

    /// The URL a doclet will be published at: containers get their own file,
    /// members get a fragment on their parent's file.
    pub fn create_link(&mut self, doclet: &Doclet) -> String {
        if doclet.is_container() {
            return self.filename_for(&doclet.longname);
        }
        let parent = doclet.memberof.as_deref().unwrap_or(GLOBAL_NAME);
        let filename = self.filename_for(parent);
        let fragment = name_fragment(doclet);
        if fragment.is_empty() {
            filename
        } else {
            format!("{}#{}", filename, fragment)
        }
    }

    /// Renders a link to a longname, falling back to the bare text when the
    /// longname was never registered. URL targets link directly.
    pub fn link_to(&self, longname: &str, text: &str) -> String {
        self.link_to_opts(longname, text, &LinkOptions::default())
    }

    pub fn link_to_opts(&self, longname: &str, text: &str, opts: &LinkOptions) -> String {
        let stripped = longname.trim_start_matches('<').trim_end_matches('>');
        let (url, fallback_text) = if has_url_prefix(stripped) {
            (Some(stripped.to_string()), stripped)
        } else {
            (self.url_for(longname).map(str::to_string), longname)
        };

        let mut text = if text.is_empty() {
            fallback_text.to_string()
        } else {
            text.to_string()
        };
        if opts.monospace {
            text = format!("<code>{}</code>", text);
        }

        match url {
            None => text,
            Some(url) => {
                let class_attr = opts
                    .css_class
                    .as_deref()
                    .map(|c| format!(" class=\"{}\"", c))
                    .unwrap_or_default();
                let fragment = opts
                    .fragment_id
                    .as_deref()
                    .map(|f| format!("#{}", f))
                    .unwrap_or_default();
                format!("<a href=\"{}{}\"{}>{}</a>", url, fragment, class_attr, text)
            }
        }
    }

    /// Walks the tutorial tree and allocates a `tutorial-*.html` URL for
    /// every node, in tree order.
    pub fn register_tutorials(&mut self, root: &Tutorial) {
        for child in &root.children {
            let filename = self.get_unique_filename(&child.name);
            self.tutorials.insert(
                child.name.clone(),
                TutorialEntry {
                    url: format!("tutorial-{}", filename),
                    title: child.title.clone(),
                },
            );
            self.register_tutorials(child);
        }
    }

    pub fn tutorial_url(&self, name: &str) -> Option<&str> {
        self.tutorials.get(name).map(|t| t.url.as_str())
    }

    /// A link to a tutorial by name; `content` overrides the link text.
    /// Unknown names render through `missing` and log an error.
    pub fn tutorial_link(
        &self,
        name: &str,
        content: Option<&str>,
        missing: &MissingTutorialStyle,
    ) -> String {
        match self.tutorials.get(name) {
            Some(entry) => {
                let text = content.unwrap_or(&entry.title);
                format!("<a href=\"{}\">{}</a>", entry.url, text)
            }
            None => {
                log::error!("no tutorial named {} is registered", name);
                let mut link = match missing.prefix {
                    Some(prefix) => format!("{}{}", prefix, name),
                    None => name.to_string(),
                };
                if let Some(tag) = missing.tag {
                    link = match missing.class {
                        Some(class) => {
                            format!("<{} class=\"{}\">{}</{}>", tag, class, link, tag)
                        }
                        None => format!("<{}>{}</{}>", tag, link, tag),
                    };
                }
                link
            }
        }
    }
}

/// The fragment identifier a non-container doclet is anchored at on its
/// parent's page: scope punctuation, the kind's namespace prefix and the
/// name, e.g. `event:resize` or `.fromJson`. The instance mark `#` is left
/// off because the URL's own `#` separator already stands for it.
pub fn name_fragment(doclet: &Doclet) -> String {
    let namespace = doclet.kind.namespace();
    let mut name = if namespace.is_empty() || doclet.name.starts_with(namespace) {
        doclet.name.clone()
    } else {
        format!("{}{}", namespace, doclet.name)
    };
    name.push_str(doclet.variation.as_deref().unwrap_or(""));
    let punctuation = match doclet.scope.map(|s| s.punctuation()) {
        Some("#") | None => "",
        Some(p) => p,
    };
    if !punctuation.is_empty() && !name.starts_with(punctuation) {
        name = format!("{}{}", punctuation, name);
    }
    name
}

fn sanitize_basename(longname: &str) -> String {
    let mut rest = longname;
    let mut out = String::with_capacity(longname.len());

    // namespace prefixes swap their colon for a dash
    for namespace in ["module", "external", "event"] {
        if let Some(tail) = rest
            .strip_prefix(namespace)
            .and_then(|t| t.strip_prefix(':'))
        {
            out.push_str(namespace);
            out.push('-');
            rest = tail;
            break;
        }
    }

    // a trailing parenthesized variation is not part of the filename
    let rest = match (rest.find('('), rest.ends_with(')')) {
        (Some(open), true) => &rest[..open],
        _ => rest,
    };

    for c in rest.chars() {
        match c {
            '\\' | '/' | '?' | '*' | ':' | '|' | '\'' | '"' | '<' | '>' | '#' => out.push('_'),
            '~' => out.push('-'),
            other => out.push(other),
        }
    }

    // no hidden files, no names that look like command-line flags
    if out.starts_with('.') || out.starts_with('-') {
        out.remove(0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_model::{DocletKind, Scope};

    fn member(kind: DocletKind, name: &str, longname: &str, parent: &str, scope: Scope) -> Doclet {
        let mut d = Doclet::new(kind, longname);
        d.name = name.to_string();
        d.memberof = Some(parent.to_string());
        d.scope = Some(scope);
        d
    }

    #[test]
    fn test_unique_filename_sanitizes_namespaces() {
        let mut links = LinkMap::new();
        assert_eq!(links.get_unique_filename("module:foo/bar"), "module-foo_bar.html");
        assert_eq!(links.get_unique_filename("external:\"jquery.fn\""), "external-_jquery.fn_.html");
        assert_eq!(links.get_unique_filename("ns~inner"), "ns-inner.html");
    }

    #[test]
    fn test_unique_filename_strips_variation() {
        let mut links = LinkMap::new();
        assert_eq!(links.get_unique_filename("Widget(2)"), "Widget.html");
    }

    #[test]
    fn test_unique_filename_resolves_collisions() {
        let mut links = LinkMap::new();
        assert_eq!(links.get_unique_filename("Widget"), "Widget.html");
        assert_eq!(links.get_unique_filename("widget"), "widget_.html");
        assert_eq!(links.get_unique_filename("Widget"), "Widget__.html");
    }

    #[test]
    fn test_unique_filename_never_hidden_or_flag_like() {
        let mut links = LinkMap::new();
        assert_eq!(links.get_unique_filename(".hidden"), "hidden.html");
        assert_eq!(links.get_unique_filename("-flag"), "flag.html");
        // a lone hash sanitizes to a plain underscore
        assert_eq!(links.get_unique_filename("#"), "_.html");
    }

    #[test]
    fn test_create_link_for_container() {
        let mut links = LinkMap::new();
        let class = Doclet::new(DocletKind::Class, "Widget");
        assert_eq!(links.create_link(&class), "Widget.html");
        assert_eq!(links.url_for("Widget"), Some("Widget.html"));
    }

    #[test]
    fn test_create_link_for_instance_member() {
        let mut links = LinkMap::new();
        let class = Doclet::new(DocletKind::Class, "Widget");
        links.create_link(&class);
        let method = member(
            DocletKind::Function,
            "render",
            "Widget#render",
            "Widget",
            Scope::Instance,
        );
        assert_eq!(links.create_link(&method), "Widget.html#render");
    }

    #[test]
    fn test_create_link_for_static_member_keeps_scope_punctuation() {
        let mut links = LinkMap::new();
        let method = member(
            DocletKind::Function,
            "fromJson",
            "Widget.fromJson",
            "Widget",
            Scope::Static,
        );
        assert_eq!(links.create_link(&method), "Widget.html#.fromJson");
    }

    #[test]
    fn test_create_link_for_event_keeps_namespace() {
        let mut links = LinkMap::new();
        let event = member(
            DocletKind::Event,
            "resize",
            "Widget#event:resize",
            "Widget",
            Scope::Instance,
        );
        assert_eq!(links.create_link(&event), "Widget.html#event:resize");
    }

    #[test]
    fn test_create_link_for_event_with_prefixed_name() {
        // some producers keep the namespace in the name itself
        let mut links = LinkMap::new();
        let event = member(
            DocletKind::Event,
            "event:resize",
            "Widget#event:resize",
            "Widget",
            Scope::Instance,
        );
        assert_eq!(links.create_link(&event), "Widget.html#event:resize");
    }

    #[test]
    fn test_create_link_for_global_function() {
        let mut links = LinkMap::new();
        links.register(GLOBAL_NAME, "global.html");
        let mut f = Doclet::new(DocletKind::Function, "helper");
        f.name = "helper".to_string();
        assert_eq!(links.create_link(&f), "global.html#helper");
    }

    #[test]
    fn test_link_to_registered_and_unknown() {
        let mut links = LinkMap::new();
        links.register("Widget", "Widget.html");
        assert_eq!(
            links.link_to("Widget", "Widget"),
            "<a href=\"Widget.html\">Widget</a>"
        );
        assert_eq!(links.link_to("Nowhere", "Nowhere"), "Nowhere");
    }

    #[test]
    fn test_link_to_url_target() {
        let links = LinkMap::new();
        assert_eq!(
            links.link_to("https://example.org", ""),
            "<a href=\"https://example.org\">https://example.org</a>"
        );
    }

    #[test]
    fn test_link_to_opts_css_class_and_fragment() {
        let mut links = LinkMap::new();
        links.register("src/widget.js", "widget.js.html");
        let opts = LinkOptions {
            css_class: None,
            fragment_id: Some("line12".to_string()),
            monospace: false,
        };
        assert_eq!(
            links.link_to_opts("src/widget.js", "line 12", &opts),
            "<a href=\"widget.js.html#line12\">line 12</a>"
        );
    }

    #[test]
    fn test_link_to_monospace() {
        let mut links = LinkMap::new();
        links.register("Widget", "Widget.html");
        let opts = LinkOptions {
            monospace: true,
            ..LinkOptions::default()
        };
        assert_eq!(
            links.link_to_opts("Widget", "", &opts),
            "<a href=\"Widget.html\"><code>Widget</code></a>"
        );
    }

    #[test]
    fn test_tutorial_registration_and_links() {
        let mut root = Tutorial::root();
        root.children
            .push(Tutorial::new("setup", "Getting Set Up", ""));
        let mut links = LinkMap::new();
        links.register_tutorials(&root);

        assert_eq!(links.tutorial_url("setup"), Some("tutorial-setup.html"));
        assert_eq!(
            links.tutorial_link("setup", None, &MissingTutorialStyle::default()),
            "<a href=\"tutorial-setup.html\">Getting Set Up</a>"
        );
    }

    #[test]
    fn test_missing_tutorial_fallback() {
        let links = LinkMap::new();
        assert_eq!(
            links.tutorial_link("ghost", None, &MissingTutorialStyle::disabled()),
            "<em class=\"disabled\">Tutorial: ghost</em>"
        );
        assert_eq!(
            links.tutorial_link("ghost", None, &MissingTutorialStyle::default()),
            "ghost"
        );
    }

    #[test]
    fn test_registration_order_is_stable() {
        let mut links = LinkMap::new();
        links.register("b", "b.html");
        links.register("a", "a.html");
        links.register("b", "b2.html");
        assert_eq!(links.registered_longnames(), &["b".to_string(), "a".to_string()]);
        assert_eq!(links.url_for("b"), Some("b2.html"));
    }
}
