// src/viewmodel.rs
//! Prepares decorated doclets for the templates.
//!
//! The handlebars templates are logic-light, so everything that needs
//! querying, linking or escaping is assembled here into the view structs of
//! `docsmith-templates`. Child symbols are looked up in the store at
//! page-build time; signatures, attribute strings, ids and ancestor links
//! were already written onto the doclets by the earlier pipeline passes.

use crate::config::TemplateConfig;
use docsmith_links::{html_safe, LinkMap, LinkOptions, MissingTutorialStyle, resolve_author_links};
use docsmith_model::{Doclet, DocletKind, Example, Param, ReturnDoc, TypeExpr};
use docsmith_store::{DocletStore, Query};
use docsmith_templates::{
    examples_label, ChildLink, DetailsView, DocView, ExampleView, ParamRow, SymbolView, TableView,
};
use itertools::Itertools;

/// Turns doclets into the view structs one page at a time.
pub struct ViewModelBuilder<'a> {
    store: &'a DocletStore,
    links: &'a LinkMap,
    config: &'a TemplateConfig,
}

impl<'a> ViewModelBuilder<'a> {
    pub fn new(store: &'a DocletStore, links: &'a LinkMap, config: &'a TemplateConfig) -> Self {
        ViewModelBuilder {
            store,
            links,
            config,
        }
    }

    /// Prepares one doclet for the `container` template.
    ///
    /// The same view drives symbol pages, the home page docs and the globals
    /// page; the globals page is recognized by its synthesized kind and pulls
    /// its symbol lists from the doclets that have no parent.
    pub fn container_doc(&self, doclet: &Doclet) -> DocView {
        let is_global_page = doclet.kind == DocletKind::GlobalObj;

        let mut doc = DocView {
            kind: doclet.kind.to_string(),
            is_mainpage: matches!(doclet.kind, DocletKind::MainPage | DocletKind::Package),
            is_package: doclet.kind == DocletKind::Package,
            is_source: doclet.kind == DocletKind::Source,
            show_name_header: doclet.kind != DocletKind::Module,
            name: doclet.name.clone(),
            variation: doclet.variation.clone(),
            package_version: doclet.version.clone(),
            attribs: doclet.attribs.clone(),
            ancestors_html: doclet.ancestors.concat(),
            classdesc_html: doclet.classdesc.clone(),
            description_html: doclet.description.clone(),
            examples: example_views(&doclet.examples),
            examples_label: examples_label(doclet.examples.len()),
            augments_html: self.safe_link_list(&doclet.augments),
            requires_html: self.link_list(&doclet.requires),
            mixes_html: self.safe_link_list(&doclet.mixes),
            readme_html: doclet.readme.clone(),
            code: doclet.code.clone(),
            ..DocView::default()
        };

        if doc.is_mainpage || doc.is_source {
            return doc;
        }

        if doclet.kind == DocletKind::Module {
            doc.module_classdescs = doclet
                .modules
                .iter()
                .filter_map(|m| m.classdesc.clone())
                .collect();
            doc.exports = doclet.modules.iter().map(|m| self.symbol(m)).collect();
        }

        if doclet.kind == DocletKind::Class
            || (doclet.kind == DocletKind::Namespace && doclet.signature.is_some())
        {
            let mut overview = self.symbol(doclet);
            overview.constructor_label =
                doclet.kind == DocletKind::Class && doclet.classdesc.is_some();
            doc.overview = Some(overview);
        } else if doc.exports.is_empty() {
            let details = self.details(doclet);
            if !details.is_empty() {
                doc.details = Some(details);
            }
        }

        if !is_global_page {
            doc.classes = self.child_links(DocletKind::Class, &doclet.longname);
            doc.interfaces = self.child_links(DocletKind::Interface, &doclet.longname);
            doc.namespaces = self.child_links(DocletKind::Namespace, &doclet.longname);
        }

        let parent = if is_global_page {
            None
        } else {
            Some(doclet.longname.as_str())
        };
        doc.members = self.symbols_for(DocletKind::Member, parent);
        doc.methods = self.symbols_for(DocletKind::Function, parent);
        doc.typedefs = self.symbols_for(DocletKind::Typedef, parent);
        doc.events = self.symbols_for(DocletKind::Event, parent);

        doc
    }

    /// The view for one pretty-printed source listing.
    pub fn source_doc(escaped_code: String) -> DocView {
        DocView {
            kind: DocletKind::Source.to_string(),
            is_source: true,
            code: Some(escaped_code),
            ..DocView::default()
        }
    }

    fn symbols_for(&self, kind: DocletKind, parent: Option<&str>) -> Vec<SymbolView> {
        let query = match parent {
            Some(longname) => Query::new().kind(kind).memberof(longname),
            None => Query::new().kind(kind).memberof_missing(),
        };
        self.store
            .find(&query)
            .into_iter()
            .map(|d| self.symbol(d))
            .collect()
    }

    fn child_links(&self, kind: DocletKind, memberof: &str) -> Vec<ChildLink> {
        self.store
            .find(&Query::new().kind(kind).memberof(memberof))
            .into_iter()
            .map(|child| ChildLink {
                link: self.links.link_to(&child.longname, &child.name),
                summary_html: child.summary.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// One symbol block. Members (and typedefs without a call signature)
    /// show their type list; everything else shows its signature in the
    /// heading instead.
    fn symbol(&self, doclet: &Doclet) -> SymbolView {
        let show_type_list = doclet.kind == DocletKind::Member
            || (doclet.kind == DocletKind::Typedef && doclet.signature.is_none());

        let mut heading = String::new();
        heading.push_str(&doclet.attribs);
        if doclet.kind == DocletKind::Class {
            heading.push_str("new ");
        }
        heading.push_str(&doclet.name);
        if let Some(signature) = &doclet.signature {
            heading.push_str(signature);
        }

        SymbolView {
            id: doclet.id.clone().unwrap_or_default(),
            kind: doclet.kind.to_string(),
            constructor_label: false,
            heading_html: heading,
            summary_html: doclet.summary.clone(),
            description_html: doclet.description.clone(),
            type_names_html: if show_type_list {
                self.type_names(doclet.doc_type.as_ref())
            } else {
                None
            },
            details: self.details(doclet),
            examples: example_views(&doclet.examples),
            examples_label: examples_label(doclet.examples.len()),
            params: self.param_table(&doclet.params),
            requires_html: self.link_list(&doclet.requires),
            fires_html: self.link_list(&doclet.fires),
            listens_html: self.link_list(&doclet.listens),
            listeners_html: self.link_list(&doclet.listeners),
            throws_html: doclet
                .exceptions
                .iter()
                .map(|e| self.condition_block(e))
                .collect(),
            throws_many: doclet.exceptions.len() > 1,
            returns_html: doclet
                .returns
                .iter()
                .map(|r| self.condition_block(r))
                .collect(),
            returns_many: doclet.returns.len() > 1,
        }
    }

    fn details(&self, doclet: &Doclet) -> DetailsView {
        let inherited_from = if doclet.inherited == Some(true) && doclet.overrides.is_none() {
            doclet
                .inherits
                .as_deref()
                .map(|i| self.links.link_to(i, &html_safe(i)))
        } else {
            None
        };

        let source_html = if self.config.output_source_files {
            match (&doclet.meta, doclet.shortpath.as_deref()) {
                (Some(meta), Some(shortpath)) => {
                    let lineno = meta.lineno.unwrap_or(1);
                    let line_opts = LinkOptions {
                        fragment_id: Some(format!("line{}", lineno)),
                        ..LinkOptions::default()
                    };
                    Some(format!(
                        "{}, {}",
                        self.links.link_to(shortpath, ""),
                        self.links
                            .link_to_opts(shortpath, &format!("line {}", lineno), &line_opts)
                    ))
                }
                _ => None,
            }
        } else {
            None
        };

        DetailsView {
            properties: self.param_table(&doclet.properties),
            version: doclet.version.clone(),
            since: doclet.since.clone(),
            inherited_from_html: inherited_from,
            overrides_html: doclet
                .overrides
                .as_deref()
                .map(|o| self.links.link_to(o, &html_safe(o))),
            implementations_html: self.safe_link_list(&doclet.implementations),
            implements_html: self.safe_link_list(&doclet.implements),
            mixes_html: self.safe_link_list(&doclet.mixes),
            deprecated_html: doclet.deprecated.as_ref().and_then(|d| {
                d.is_active()
                    .then(|| d.reason().unwrap_or("Yes").to_string())
            }),
            authors_html: doclet
                .author
                .iter()
                .map(|a| resolve_author_links(a))
                .collect(),
            copyright_html: doclet.copyright.clone(),
            license: doclet.license.clone(),
            default_value: doclet.defaultvalue.as_ref().map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            source_html,
            tutorials_html: doclet
                .tutorials
                .iter()
                .map(|t| {
                    self.links
                        .tutorial_link(t, None, &MissingTutorialStyle::disabled())
                })
                .collect(),
            see_html: self.link_list(&doclet.see),
            todo_html: doclet.todo.clone(),
        }
    }

    fn param_table(&self, params: &[Param]) -> Option<TableView> {
        if params.is_empty() {
            return None;
        }
        let has_name = params
            .iter()
            .any(|p| p.name.as_deref().is_some_and(|n| !n.is_empty()));
        let has_attributes = params.iter().any(|p| {
            p.optional == Some(true) || p.nullable == Some(true) || p.variable == Some(true)
        });
        let has_default = params.iter().any(|p| p.defaultvalue.is_some());

        let rows = params
            .iter()
            .map(|p| {
                let mut attributes = String::new();
                if p.optional == Some(true) {
                    attributes.push_str("&lt;optional&gt;<br>");
                }
                if p.nullable == Some(true) {
                    attributes.push_str("&lt;nullable&gt;<br>");
                }
                if p.variable == Some(true) {
                    attributes.push_str("&lt;repeatable&gt;<br>");
                }
                ParamRow {
                    name: p.name.clone().unwrap_or_default(),
                    types_html: self.type_names(p.doc_type.as_ref()).unwrap_or_default(),
                    attributes_html: attributes,
                    default_html: p.default_display().map(|d| html_safe(&d)).unwrap_or_default(),
                    description_html: p.description.clone().unwrap_or_default(),
                }
            })
            .collect();

        Some(TableView {
            has_name,
            has_attributes,
            has_default,
            rows,
        })
    }

    /// The shared body of a Returns or Throws entry: an optional description
    /// and an optional linked type list.
    fn condition_block(&self, item: &ReturnDoc) -> String {
        let mut block = String::new();
        if let Some(description) = &item.description {
            block.push_str(&format!("<div class=\"param-desc\">{}</div>", description));
        }
        if let Some(types) = self.type_names(item.doc_type.as_ref()) {
            block.push_str(&format!("<dl><dt>Type</dt><dd>{}</dd></dl>", types));
        }
        block
    }

    fn type_names(&self, doc_type: Option<&TypeExpr>) -> Option<String> {
        let doc_type = doc_type?;
        if doc_type.names.is_empty() {
            return None;
        }
        Some(
            doc_type
                .names
                .iter()
                .map(|name| {
                    format!(
                        "<span class=\"param-type\">{}</span>",
                        self.links.link_to(name, &html_safe(name))
                    )
                })
                .join("|"),
        )
    }

    fn link_list(&self, longnames: &[String]) -> Vec<String> {
        longnames.iter().map(|l| self.links.link_to(l, "")).collect()
    }

    fn safe_link_list(&self, longnames: &[String]) -> Vec<String> {
        longnames
            .iter()
            .map(|l| self.links.link_to(l, &html_safe(l)))
            .collect()
    }
}

fn example_views(examples: &[Example]) -> Vec<ExampleView> {
    examples
        .iter()
        .map(|e| ExampleView {
            caption: e.caption.clone(),
            code: html_safe(&e.code),
        })
        .collect()
}
