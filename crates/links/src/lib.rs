//! Link resolution for generated pages.
//!
//! Every documented symbol ends up at a stable URL: containers (classes,
//! modules, namespaces, mixins, externals, interfaces) get a file of their
//! own, everything else an anchor on its parent's file. [`LinkMap`] owns the
//! longname-to-URL registry, the set of filenames already handed out, and the
//! tutorial URL table; [`resolve_links`] expands the inline `{@link}` family
//! of tags in rendered HTML against it.

pub mod inline;
pub mod registry;

pub use inline::{resolve_author_links, resolve_links, InlineLinkStyle};
pub use registry::{LinkMap, LinkOptions, MissingTutorialStyle};

/// The pseudo-longname members with no parent hang off.
pub const GLOBAL_NAME: &str = "global";

/// The extension every generated page uses.
pub const FILE_EXTENSION: &str = ".html";

/// Escapes text for embedding in HTML the way the host's helper did: only
/// `&` and `<` are rewritten.
pub fn html_safe(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

/// True for link targets that are URLs rather than longnames.
pub fn has_url_prefix(text: &str) -> bool {
    ["http://", "https://", "ftp://", "ftps://"]
        .iter()
        .any(|prefix| text.starts_with(prefix))
}
