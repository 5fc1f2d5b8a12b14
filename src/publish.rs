// src/publish.rs
//! The publish pass: one synchronous batch turning a doclet collection into
//! a static site.
//!
//! The pass runs in a fixed order. The store is pruned and sorted, three
//! annotation walks decorate every doclet in place (examples and `@see`
//! fixups, then URLs and ids, then signatures, attributes and ancestors),
//! the navigation is built once, and finally one page is written per source
//! file, per container doclet and per tutorial, plus the home and globals
//! pages. Inline `{@link}`/`{@tutorial}` tags are resolved in every page
//! except raw source listings.

use crate::assets;
use crate::config::{PublishOptions, TemplateConfig};
use crate::error::PublishError;
use crate::tutorials::load_tutorials;
use crate::viewmodel::ViewModelBuilder;
use chrono::Local;
use docsmith_links::{html_safe, resolve_links, InlineLinkStyle, LinkMap, GLOBAL_NAME};
use docsmith_model::{Doclet, DocletKind, Tutorial};
use docsmith_render::{
    add_attribs, add_signature_params, add_signature_returns, add_signature_types, ancestor_links,
    build_nav, hash_to_link, needs_signature, split_example_caption, NavOptions,
};
use docsmith_store::{attach_module_symbols, DocletStore, Query};
use docsmith_templates::{ContainerData, DocView, PageChrome, TutorialData, View, LAYOUT_TEMPLATE};
use log::{debug, error, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// What one publish run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Symbol pages, including the home and globals pages.
    pub pages: usize,
    /// Pretty-printed source listings.
    pub source_files: usize,
    /// Tutorial pages.
    pub tutorials: usize,
    /// Static assets copied into the destination.
    pub static_files: usize,
}

/// Renders the whole site for `doclets` into `options.destination`.
///
/// `tutorials` is the root of the tutorial tree; pass [`Tutorial::root`]
/// when there are none. An empty tree falls back to scanning
/// `options.tutorials` when that directory is set, so callers that only
/// know the directory do not have to run the loader themselves.
pub fn publish(
    doclets: Vec<Doclet>,
    options: &PublishOptions,
    tutorials: Tutorial,
) -> Result<PublishReport, PublishError> {
    options.validate()?;
    let config = TemplateConfig::from_settings(&options.settings)?;

    let mut view = match &options.template {
        Some(dir) => View::from_dir(dir)?,
        None => View::builtin()?,
    };
    if let Some(layout) = &config.layout_file {
        view.register_template_file(LAYOUT_TEMPLATE, layout)?;
    }

    let tutorials = match (&options.tutorials, tutorials.count()) {
        (Some(dir), 0) => load_tutorials(dir)?,
        _ => tutorials,
    };

    let mut links = LinkMap::new();
    let index_url = links.filename_for("index");
    let global_url = links.filename_for(GLOBAL_NAME);

    let mut store = DocletStore::new(doclets);
    store.prune(options.include_private);
    store.sort();
    store.attach_event_listeners();
    info!("Publishing {} doclets to {}", store.len(), options.destination.display());

    // First walk: reset annotations, split example captions, rewrite `@see
    // #fragment` references, and collect every documented source file.
    let mut source_paths: Vec<String> = Vec::new();
    for doclet in store.iter_mut() {
        doclet.attribs = String::new();
        for example in &mut doclet.examples {
            split_example_caption(example);
        }
        let see = std::mem::take(&mut doclet.see);
        let rewritten: Vec<String> = see
            .iter()
            .map(|item| hash_to_link(&mut links, doclet, item))
            .collect();
        doclet.see = rewritten;

        if doclet.kind != DocletKind::Package {
            if let Some(path) = doclet.source_path() {
                if !source_paths.contains(&path) {
                    source_paths.push(path);
                }
            }
        }
    }

    fs::create_dir_all(&options.destination)?;
    let mut static_files = assets::write_builtin_statics(&options.destination)?;
    if let Some(template) = &options.template {
        static_files += assets::copy_template_statics(template, &options.destination)?;
    }
    static_files += assets::copy_user_statics(&config.static_files, &options.destination)?;

    // Shorten source paths by their common prefix and register a listing
    // page for each, so detail boxes can link to file and line.
    let prefix = common_path_prefix(&source_paths);
    let source_files: Vec<(String, String)> = source_paths
        .iter()
        .map(|full| {
            let short = full.strip_prefix(&prefix).unwrap_or(full).to_string();
            (full.clone(), short)
        })
        .collect();
    for (_, short) in &source_files {
        let filename = links.get_unique_filename(short);
        links.register(short.clone(), filename);
    }
    for doclet in store.iter_mut() {
        if let Some(path) = doclet.source_path() {
            doclet.shortpath = Some(path.strip_prefix(&prefix).unwrap_or(&path).to_string());
        }
    }

    // Second walk: allocate every doclet's URL and derive its fragment id.
    for doclet in store.iter_mut() {
        let url = links.create_link(doclet);
        doclet.id = Some(match url.split_once('#') {
            Some((_, fragment)) => fragment.to_string(),
            None => doclet.name.clone(),
        });
    }

    // Third walk: signatures and attribute spans, then ancestor
    // breadcrumbs, then member type annotations. Constants display as
    // members once their type is rendered.
    for doclet in store.iter_mut() {
        if needs_signature(doclet) {
            doclet.signature = None;
            add_signature_params(doclet);
            add_signature_returns(&links, doclet);
            add_attribs(doclet);
        }
    }
    let ancestors: Vec<Vec<String>> = store
        .iter()
        .map(|doclet| ancestor_links(&store, &links, doclet))
        .collect();
    for (doclet, ancestors) in store.iter_mut().zip(ancestors) {
        doclet.ancestors = ancestors;
    }
    for doclet in store.iter_mut() {
        if matches!(doclet.kind, DocletKind::Member | DocletKind::Constant) {
            add_attribs(doclet);
            add_signature_types(&links, doclet);
        }
        if doclet.kind == DocletKind::Constant {
            doclet.kind = DocletKind::Member;
        }
    }

    let mut members = store.members();
    links.register_tutorials(&tutorials);
    let nav = build_nav(
        &members,
        &tutorials.children,
        &links,
        NavOptions {
            use_longname: config.use_longname_in_nav,
        },
    );
    attach_module_symbols(&store, &mut members.modules);

    let writer = PageWriter {
        view: &view,
        links: &links,
        nav: &nav,
        style: InlineLinkStyle {
            monospace_links: config.monospace_links,
            clever_links: config.clever_links,
        },
        destination: &options.destination,
        generated_on: config
            .include_date
            .then(|| Local::now().format("%a %b %e %Y %H:%M:%S").to_string()),
    };

    let mut report = PublishReport {
        static_files,
        ..PublishReport::default()
    };

    // Source listings. A file that cannot be read is logged and skipped;
    // everything else keeps publishing.
    if config.output_source_files {
        for (full, short) in &source_files {
            let text = match fs::read_to_string(full) {
                Ok(text) => text,
                Err(err) => {
                    error!("Unable to read the source file {}: {}", full, err);
                    continue;
                }
            };
            let Some(filename) = links.url_for(short).map(str::to_string) else {
                continue;
            };
            let doc = ViewModelBuilder::source_doc(html_safe(&text));
            writer.write_page(&format!("Source: {}", short), vec![doc], &filename, false)?;
            report.source_files += 1;
        }
    }

    let builder = ViewModelBuilder::new(&store, &links, &config);

    if !members.globals.is_empty() {
        let mut globalobj = Doclet::new(DocletKind::GlobalObj, GLOBAL_NAME);
        globalobj.name = String::new();
        writer.write_page("Global", vec![builder.container_doc(&globalobj)], &global_url, true)?;
        report.pages += 1;
    }

    // The home page: package doclets, the synthesized main-page doclet with
    // the readme, and one block per file doclet.
    let mut home: Vec<Doclet> = store
        .find(&Query::new().kind(DocletKind::Package))
        .into_iter()
        .cloned()
        .collect();
    if let Some(path) = &options.package {
        home.push(load_package_doclet(path)?);
    }
    let mut mainpage = Doclet::new(
        DocletKind::MainPage,
        options.main_page_title.as_deref().unwrap_or("Main Page"),
    );
    mainpage.readme = options.readme.clone();
    home.push(mainpage);
    home.extend(store.find(&Query::new().kind(DocletKind::File)).into_iter().cloned());
    let home_docs: Vec<DocView> = home.iter().map(|d| builder.container_doc(d)).collect();
    writer.write_page("Home", home_docs, &index_url, true)?;
    report.pages += 1;

    // One page per container, keyed by registered longname so a longname
    // shared across kinds lands in one file.
    for longname in links.registered_longnames() {
        let sections: [(&[Doclet], &str); 6] = [
            (&members.modules, "Module"),
            (&members.classes, "Class"),
            (&members.namespaces, "Namespace"),
            (&members.mixins, "Mixin"),
            (&members.externals, "External"),
            (&members.interfaces, "Interface"),
        ];
        for (group, label) in sections {
            let Some(doclet) = group.iter().find(|d| &d.longname == longname) else {
                continue;
            };
            let Some(filename) = links.url_for(longname).map(str::to_string) else {
                continue;
            };
            debug!("Generating {} page for {}", label, longname);
            let title = format!("{}: {}", label, doclet.name);
            writer.write_page(&title, vec![builder.container_doc(doclet)], &filename, true)?;
            report.pages += 1;
        }
    }

    for tutorial in &tutorials.children {
        report.tutorials += writer.write_tutorial(tutorial)?;
    }

    info!(
        "Wrote {} pages, {} source listings, {} tutorials and {} static files",
        report.pages, report.source_files, report.tutorials, report.static_files
    );
    Ok(report)
}

struct PageWriter<'a> {
    view: &'a View,
    links: &'a LinkMap,
    nav: &'a str,
    style: InlineLinkStyle,
    destination: &'a Path,
    generated_on: Option<String>,
}

impl PageWriter<'_> {
    fn chrome(&self, title: &str) -> PageChrome {
        PageChrome {
            title: title.to_string(),
            nav: self.nav.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_on: self.generated_on.clone(),
        }
    }

    /// Renders a container page and writes it under the destination.
    /// `resolve` is off for source listings, whose text must stay verbatim.
    fn write_page(
        &self,
        title: &str,
        docs: Vec<DocView>,
        filename: &str,
        resolve: bool,
    ) -> Result<(), PublishError> {
        let mut html = self
            .view
            .render_page("container", &ContainerData { docs }, &self.chrome(title))?;
        if resolve {
            html = resolve_links(self.links, &html, self.style);
        }
        fs::write(self.destination.join(filename), html)?;
        Ok(())
    }

    /// Writes one tutorial page and recurses into its children. Returns the
    /// number of pages written.
    fn write_tutorial(&self, tutorial: &Tutorial) -> Result<usize, PublishError> {
        use docsmith_model::TutorialFormat;

        let content_html = match tutorial.format {
            TutorialFormat::Markdown => docsmith_render::render_markdown(&tutorial.content),
            TutorialFormat::Html => tutorial.content.clone(),
        };
        let children_links = tutorial
            .children
            .iter()
            .map(|child| {
                self.links.tutorial_link(
                    &child.name,
                    None,
                    &docsmith_links::MissingTutorialStyle::disabled(),
                )
            })
            .collect();
        let data = TutorialData {
            header: tutorial.title.clone(),
            content_html,
            children_links,
        };

        let title = format!("Tutorial: {}", tutorial.title);
        let mut html = self.view.render_page("tutorial", &data, &self.chrome(&title))?;
        html = resolve_links(self.links, &html, self.style);

        let Some(url) = self.links.tutorial_url(&tutorial.name) else {
            return Err(PublishError::Tutorial(format!(
                "tutorial '{}' was never registered",
                tutorial.name
            )));
        };
        fs::write(self.destination.join(url), html)?;

        let mut written = 1;
        for child in &tutorial.children {
            written += self.write_tutorial(child)?;
        }
        Ok(written)
    }
}

/// The longest common directory prefix of a set of `/`-separated paths,
/// including its trailing separator. A single path's prefix is its parent
/// directory, so the lone file still shortens to its basename.
fn common_path_prefix(paths: &[String]) -> String {
    let Some(first) = paths.first() else {
        return String::new();
    };

    let mut components: Vec<&str> = first.split('/').collect();
    components.pop();
    for path in &paths[1..] {
        let other: Vec<&str> = path.split('/').collect();
        let shared = components
            .iter()
            .zip(other.iter().take(other.len().saturating_sub(1)))
            .take_while(|(a, b)| a == b)
            .count();
        components.truncate(shared);
    }

    if components.is_empty() {
        String::new()
    } else {
        let mut prefix = components.join("/");
        prefix.push('/');
        prefix
    }
}

#[derive(Debug, Default, Deserialize)]
struct PackageMeta {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
}

/// Reads a `package.json`-style metadata file into a package doclet for the
/// home page header.
fn load_package_doclet(path: &Path) -> Result<Doclet, PublishError> {
    let meta: PackageMeta = serde_json::from_str(&fs::read_to_string(path)?)?;
    let mut doclet = Doclet::new(DocletKind::Package, meta.name.as_deref().unwrap_or("package"));
    doclet.version = meta.version;
    doclet.description = meta.description;
    Ok(doclet)
}
