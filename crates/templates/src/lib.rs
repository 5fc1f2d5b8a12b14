//! The view layer: named Handlebars templates plus the static assets the
//! built-in template ships.
//!
//! Pages are rendered in two steps. The page body renders through one of
//! the content templates (`container`, `tutorial`), then [`View::render_page`]
//! wraps it in the `layout` template together with the navigation and the
//! footer fields. Content templates pull in the `mainpage`, `source`,
//! `symbol`, `details`, `params` and `examples` partials, which are plain
//! registered templates.

pub mod page;

pub use page::{
    examples_label, ChildLink, ContainerData, DetailsView, DocView, ExampleView, PageChrome,
    ParamRow, SymbolView, TableView, TutorialData,
};

use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template parse error: {0}")]
    Parse(#[from] handlebars::TemplateError),

    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Template IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The name the page body template is wrapped by.
pub const LAYOUT_TEMPLATE: &str = "layout";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("container", include_str!("../templates/container.hbs")),
    ("mainpage", include_str!("../templates/mainpage.hbs")),
    ("source", include_str!("../templates/source.hbs")),
    ("symbol", include_str!("../templates/symbol.hbs")),
    ("details", include_str!("../templates/details.hbs")),
    ("params", include_str!("../templates/params.hbs")),
    ("examples", include_str!("../templates/examples.hbs")),
    ("tutorial", include_str!("../templates/tutorial.hbs")),
];

/// A static file the built-in template ships alongside the pages.
pub struct StaticAsset {
    /// Destination path relative to the output directory.
    pub path: &'static str,
    pub contents: &'static [u8],
}

pub const BUILTIN_STATICS: &[StaticAsset] = &[
    StaticAsset {
        path: "styles/default.css",
        contents: include_bytes!("../static/styles/default.css"),
    },
    StaticAsset {
        path: "scripts/linenumber.js",
        contents: include_bytes!("../static/scripts/linenumber.js"),
    },
];

/// The registered template set used for one publish run.
pub struct View {
    registry: Handlebars<'static>,
}

impl View {
    /// A view holding only the built-in templates.
    ///
    /// Missing templates are render errors; missing fields are not, so a
    /// user-supplied template referencing a field the view model does not
    /// carry renders it blank instead of aborting the run.
    pub fn builtin() -> Result<View, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in BUILTIN_TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(View { registry })
    }

    /// A view for a template directory: every `*.hbs` file under `dir` is
    /// registered under its file stem, shadowing the built-in template of
    /// the same name. A directory therefore only has to carry the
    /// templates it wants to change.
    pub fn from_dir(dir: &Path) -> Result<View, TemplateError> {
        let mut view = View::builtin()?;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("hbs")
            {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                let name = name.to_string();
                view.register_template_file(&name, path)?;
            }
        }
        Ok(view)
    }

    /// Registers (or replaces) one template from a file.
    pub fn register_template_file(&mut self, name: &str, path: &Path) -> Result<(), TemplateError> {
        let source = std::fs::read_to_string(path)?;
        self.registry.register_template_string(name, source)?;
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.get_template(name).is_some()
    }

    /// Renders a content template on its own, without the layout.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        Ok(self.registry.render(name, data)?)
    }

    /// Renders a content template and wraps it in the layout.
    pub fn render_page<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        chrome: &PageChrome,
    ) -> Result<String, TemplateError> {
        #[derive(Serialize)]
        struct LayoutContext<'a> {
            title: &'a str,
            nav: &'a str,
            version: &'a str,
            generated_on: Option<&'a str>,
            content: &'a str,
        }

        let content = self.render(name, data)?;
        self.render(
            LAYOUT_TEMPLATE,
            &LayoutContext {
                title: &chrome.title,
                nav: &chrome.nav,
                version: &chrome.version,
                generated_on: chrome.generated_on.as_deref(),
                content: &content,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_view_registers_all_templates() {
        let view = View::builtin().unwrap();
        for name in [
            "layout", "container", "mainpage", "source", "symbol", "details", "params",
            "examples", "tutorial",
        ] {
            assert!(view.has_template(name), "missing template {}", name);
        }
    }

    #[test]
    fn test_render_page_wraps_content_in_layout() {
        let view = View::builtin().unwrap();
        let data = TutorialData {
            header: "Getting Started".to_string(),
            content_html: "<p>hello</p>".to_string(),
            children_links: Vec::new(),
        };
        let chrome = PageChrome {
            title: "Tutorial: Getting Started".to_string(),
            nav: "<h2><a href=\"index.html\">Home</a></h2>".to_string(),
            version: "0.1.0".to_string(),
            generated_on: Some("Tue Aug 25 2026".to_string()),
        };

        let html = view.render_page("tutorial", &data, &chrome).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>docsmith: Tutorial: Getting Started</title>"));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains("<h2>Getting Started</h2>"));
        assert!(html.contains("on Tue Aug 25 2026"));
    }

    #[test]
    fn test_layout_omits_date_when_disabled() {
        let view = View::builtin().unwrap();
        let chrome = PageChrome {
            title: "Home".to_string(),
            nav: String::new(),
            version: "0.1.0".to_string(),
            generated_on: None,
        };

        let html = view
            .render_page("container", &ContainerData::default(), &chrome)
            .unwrap();
        assert!(!html.contains(" on </a>"));
        assert!(!html.contains("on \n"));
        assert!(html.contains("docsmith 0.1.0"));
    }

    #[test]
    fn test_container_renders_symbol_sections() {
        let view = View::builtin().unwrap();
        let doc = DocView {
            kind: "class".to_string(),
            show_name_header: true,
            name: "Widget".to_string(),
            attribs: "<span class=\"type-signature\"></span>".to_string(),
            classdesc_html: Some("<p>A widget.</p>".to_string()),
            overview: Some(SymbolView {
                id: "Widget".to_string(),
                kind: "class".to_string(),
                heading_html: "new Widget()".to_string(),
                ..SymbolView::default()
            }),
            methods: vec![SymbolView {
                id: "render".to_string(),
                kind: "function".to_string(),
                heading_html: "render()".to_string(),
                description_html: Some("<p>Draws.</p>".to_string()),
                ..SymbolView::default()
            }],
            ..DocView::default()
        };

        let html = view
            .render("container", &ContainerData { docs: vec![doc] })
            .unwrap();
        assert!(html.contains("<h2>"), "class heading missing: {}", html);
        assert!(html.contains("class-description"));
        assert!(html.contains("new Widget()"));
        assert!(html.contains("<h3 class=\"subsection-title\">Methods</h3>"));
        assert!(html.contains("id=\"render\""));
    }

    #[test]
    fn test_source_doc_renders_pre_block() {
        let view = View::builtin().unwrap();
        let doc = DocView {
            kind: "source".to_string(),
            is_source: true,
            code: Some("let x = 1 &lt; 2;".to_string()),
            ..DocView::default()
        };

        let html = view
            .render("container", &ContainerData { docs: vec![doc] })
            .unwrap();
        assert!(html.contains("<pre class=\"prettyprint source linenums\"><code>let x = 1 &lt; 2;</code></pre>"));
    }

    #[test]
    fn test_params_table_hides_empty_columns() {
        let view = View::builtin().unwrap();
        let table = TableView {
            has_name: true,
            has_attributes: false,
            has_default: false,
            rows: vec![ParamRow {
                name: "input".to_string(),
                types_html: "<span class=\"param-type\">string</span>".to_string(),
                description_html: "<p>the input</p>".to_string(),
                ..ParamRow::default()
            }],
        };

        let html = view.render("params", &table).unwrap();
        assert!(html.contains("<th>Name</th>"));
        assert!(!html.contains("<th>Attributes</th>"));
        assert!(!html.contains("<th>Default</th>"));
        assert!(html.contains("<code>input</code>"));
    }

    #[test]
    fn test_render_is_lenient_about_missing_fields() {
        let dir = std::env::temp_dir().join("docsmith-templates-lenient-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("layout.hbs"), "before {{no_such_field}} after").unwrap();

        let view = View::from_dir(&dir).unwrap();
        let html = view
            .render_page("container", &ContainerData::default(), &PageChrome::default())
            .unwrap();
        assert_eq!(html, "before  after");
        // unknown templates still fail loudly
        assert!(view.render("no_such_template", &ContainerData::default()).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_template_dir_overrides_builtin() {
        let dir = std::env::temp_dir().join("docsmith-templates-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("layout.hbs"), "CUSTOM {{{content}}}").unwrap();

        let view = View::from_dir(&dir).unwrap();
        let chrome = PageChrome::default();
        let html = view
            .render_page("container", &ContainerData::default(), &chrome)
            .unwrap();
        assert!(html.starts_with("CUSTOM"));
        // untouched templates still come from the built-in set
        assert!(view.has_template("symbol"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
