//! Doclets grouped by page section.

use crate::{DocletStore, Query};
use docsmith_model::{Doclet, DocletKind};

/// The grouped views the navigation and the page loop are generated from.
/// Groups hold owned copies so later passes can decorate them (for example
/// attaching exported symbols to modules) without touching the store.
#[derive(Debug, Default)]
pub struct Members {
    pub classes: Vec<Doclet>,
    pub externals: Vec<Doclet>,
    pub events: Vec<Doclet>,
    pub globals: Vec<Doclet>,
    pub mixins: Vec<Doclet>,
    pub modules: Vec<Doclet>,
    pub namespaces: Vec<Doclet>,
    pub interfaces: Vec<Doclet>,
}

impl Members {
    pub fn group(store: &DocletStore) -> Members {
        let collect = |kind: DocletKind| -> Vec<Doclet> {
            store
                .find(&Query::new().kind(kind))
                .into_iter()
                .cloned()
                .collect()
        };

        let mut externals = collect(DocletKind::External);
        // quoted external names (`@external "jquery.fn"`) lose their quotes
        // for display
        for external in &mut externals {
            external.name = external
                .name
                .trim_start_matches('"')
                .trim_end_matches('"')
                .to_string();
        }

        let globals = store
            .find(
                &Query::new()
                    .kinds(&[
                        DocletKind::Member,
                        DocletKind::Function,
                        DocletKind::Constant,
                        DocletKind::Typedef,
                    ])
                    .memberof_missing(),
            )
            .into_iter()
            .filter(|d| !is_module_exports(d))
            .cloned()
            .collect();

        Members {
            classes: collect(DocletKind::Class),
            externals,
            events: collect(DocletKind::Event),
            globals,
            mixins: collect(DocletKind::Mixin),
            modules: collect(DocletKind::Module),
            namespaces: collect(DocletKind::Namespace),
            interfaces: collect(DocletKind::Interface),
        }
    }
}

/// A `module.exports = function ...` value doclet shares name and longname
/// with its module; those belong on the module page, not in the globals list.
fn is_module_exports(doclet: &Doclet) -> bool {
    doclet.longname == doclet.name && doclet.longname.starts_with("module:")
}
