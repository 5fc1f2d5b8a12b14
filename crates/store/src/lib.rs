//! Queryable doclet collection.
//!
//! The host hands the generator a flat list of doclets; this crate wraps it
//! in the small query surface the publish pipeline needs:
//!
//! - [`Query`]: conjunctive filters over kind, longname and membership
//! - [`DocletStore::prune`] / [`DocletStore::sort`]: the standard cleanup the
//!   pipeline runs before any page is generated
//! - [`Members`]: doclets grouped by the page sections they belong to
//!
//! Collections are small (tens to low hundreds of records), so queries are
//! plain scans and grouped members are owned copies.

pub mod members;

pub use members::Members;

use docsmith_model::{Doclet, DocletKind};

/// A conjunctive doclet filter. Every constraint that is set must hold.
#[derive(Debug, Clone, Default)]
pub struct Query {
    kinds: Option<Vec<DocletKind>>,
    longname: Option<String>,
    longname_prefix: Option<String>,
    memberof: Option<MemberofFilter>,
}

#[derive(Debug, Clone)]
enum MemberofFilter {
    Is(String),
    Missing,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn kind(mut self, kind: DocletKind) -> Self {
        self.kinds = Some(vec![kind]);
        self
    }

    /// Matches any of the given kinds.
    pub fn kinds(mut self, kinds: &[DocletKind]) -> Self {
        self.kinds = Some(kinds.to_vec());
        self
    }

    pub fn longname(mut self, longname: impl Into<String>) -> Self {
        self.longname = Some(longname.into());
        self
    }

    pub fn longname_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.longname_prefix = Some(prefix.into());
        self
    }

    pub fn memberof(mut self, memberof: impl Into<String>) -> Self {
        self.memberof = Some(MemberofFilter::Is(memberof.into()));
        self
    }

    /// Matches doclets with no parent at all.
    pub fn memberof_missing(mut self) -> Self {
        self.memberof = Some(MemberofFilter::Missing);
        self
    }

    pub fn matches(&self, doclet: &Doclet) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&doclet.kind) {
                return false;
            }
        }
        if let Some(longname) = &self.longname {
            if &doclet.longname != longname {
                return false;
            }
        }
        if let Some(prefix) = &self.longname_prefix {
            if !doclet.longname.starts_with(prefix.as_str()) {
                return false;
            }
        }
        match &self.memberof {
            Some(MemberofFilter::Is(parent)) => {
                if doclet.memberof.as_deref() != Some(parent.as_str()) {
                    return false;
                }
            }
            Some(MemberofFilter::Missing) => {
                if doclet.memberof.is_some() {
                    return false;
                }
            }
            None => {}
        }
        true
    }
}

/// The doclet collection, owned for the duration of one publish run.
#[derive(Debug, Default)]
pub struct DocletStore {
    doclets: Vec<Doclet>,
}

impl DocletStore {
    pub fn new(doclets: Vec<Doclet>) -> Self {
        DocletStore { doclets }
    }

    pub fn len(&self) -> usize {
        self.doclets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doclets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Doclet> {
        self.doclets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Doclet> {
        self.doclets.iter_mut()
    }

    pub fn find(&self, query: &Query) -> Vec<&Doclet> {
        self.doclets.iter().filter(|d| query.matches(d)).collect()
    }

    pub fn find_first(&self, query: &Query) -> Option<&Doclet> {
        self.doclets.iter().find(|d| query.matches(d))
    }

    /// Removes the doclets no page should show: undocumented ones, ignored
    /// ones, members of anonymous scopes, and private symbols unless the run
    /// asked for them.
    pub fn prune(&mut self, include_private: bool) {
        self.doclets.retain(|d| {
            if d.undocumented == Some(true) || d.ignore == Some(true) {
                return false;
            }
            if d.memberof.as_deref() == Some("<anonymous>") {
                return false;
            }
            if !include_private && d.access.as_deref() == Some("private") {
                return false;
            }
            true
        });
    }

    /// Sorts by (longname, version, since), the order pages list members in.
    pub fn sort(&mut self) {
        self.doclets.sort_by(|a, b| {
            a.longname
                .cmp(&b.longname)
                .then_with(|| a.version.cmp(&b.version))
                .then_with(|| a.since.cmp(&b.since))
        });
    }

    /// Records, on every event doclet, the longnames of the symbols that
    /// declare they listen to it.
    pub fn attach_event_listeners(&mut self) {
        let mut listeners: Vec<(String, String)> = Vec::new();
        for doclet in &self.doclets {
            for event in &doclet.listens {
                listeners.push((event.clone(), doclet.longname.clone()));
            }
        }
        for doclet in &mut self.doclets {
            if doclet.kind != DocletKind::Event {
                continue;
            }
            for (event, listener) in &listeners {
                if *event == doclet.longname && !doclet.listeners.contains(listener) {
                    doclet.listeners.push(listener.clone());
                }
            }
        }
    }

    /// Groups doclets into the sections pages and the navigation use.
    pub fn members(&self) -> Members {
        Members::group(self)
    }

    pub fn into_inner(self) -> Vec<Doclet> {
        self.doclets
    }
}

/// Attaches a module's exported symbols to the module doclets in `modules`,
/// rewriting exported class/function names into the `(require("id"))` display
/// form used on module pages. Symbols without a description are dropped,
/// except classes, which keep their constructor entry regardless.
pub fn attach_module_symbols(store: &DocletStore, modules: &mut [Doclet]) {
    let exported = store.find(&Query::new().longname_prefix("module:"));
    for module in modules {
        let mut symbols: Vec<Doclet> = Vec::new();
        for symbol in &exported {
            if symbol.longname != module.longname || symbol.kind == DocletKind::Module {
                continue;
            }
            if symbol.description.is_none() && symbol.kind != DocletKind::Class {
                continue;
            }
            let mut symbol = (*symbol).clone();
            if matches!(symbol.kind, DocletKind::Class | DocletKind::Function) {
                symbol.name = format!(
                    "(require(\"{}\"))",
                    symbol.name.trim_start_matches("module:")
                );
            }
            symbols.push(symbol);
        }
        module.modules = symbols;
    }
}
