//! Shared fixtures for the integration tests: a small documented project's
//! doclet set, builders for one-off records, and a tempdir publish helper.

use docsmith::{publish, Doclet, DocletKind, PublishError, PublishOptions, PublishReport, Tutorial};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A finished publish run: the output directory plus the report.
pub struct PublishedSite {
    pub dir: TempDir,
    pub report: PublishReport,
}

impl PublishedSite {
    pub fn page(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("missing output page {}: {}", path.display(), err))
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.dir.path().join(name).is_file()
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Publishes `doclets` with default options into a tempdir.
pub fn publish_site(doclets: Vec<Doclet>) -> Result<PublishedSite, PublishError> {
    publish_site_with(doclets, serde_json::Value::Null, Tutorial::root(), |_| {})
}

/// Publishes with a settings blob, a tutorial tree and an options tweak.
pub fn publish_site_with(
    doclets: Vec<Doclet>,
    settings: serde_json::Value,
    tutorials: Tutorial,
    configure: impl FnOnce(&mut PublishOptions),
) -> Result<PublishedSite, PublishError> {
    init_logging();
    let dir = tempfile::tempdir().map_err(PublishError::Io)?;
    let mut options = PublishOptions {
        destination: dir.path().to_path_buf(),
        settings,
        ..PublishOptions::default()
    };
    configure(&mut options);
    let report = publish(doclets, &options, tutorials)?;
    Ok(PublishedSite { dir, report })
}

/// Parses the host-format JSON for one doclet.
pub fn doclet(value: serde_json::Value) -> Doclet {
    serde_json::from_value(value).expect("fixture doclet must deserialize")
}

/// A class with one instance method and one member, documented in
/// `source_path`, plus a global helper function.
pub fn widget_project(source_path: &str) -> Vec<Doclet> {
    vec![
        doclet(json!({
            "kind": "class",
            "name": "Widget",
            "longname": "Widget",
            "classdesc": "<p>A rectangular thing on the screen.</p>",
            "params": [
                { "type": { "names": ["string"] }, "name": "id" }
            ],
            "meta": { "filename": file_name(source_path), "path": dir_name(source_path), "lineno": 3 }
        })),
        doclet(json!({
            "kind": "function",
            "name": "render",
            "longname": "Widget#render",
            "memberof": "Widget",
            "scope": "instance",
            "description": "<p>Draws the widget. See {@link Widget#size}.</p>",
            "params": [
                { "type": { "names": ["Element"] }, "name": "target", "optional": true }
            ],
            "returns": [ { "type": { "names": ["boolean"] } } ],
            "meta": { "filename": file_name(source_path), "path": dir_name(source_path), "lineno": 11 }
        })),
        doclet(json!({
            "kind": "member",
            "name": "size",
            "longname": "Widget#size",
            "memberof": "Widget",
            "scope": "instance",
            "type": { "names": ["number"] },
            "meta": { "filename": file_name(source_path), "path": dir_name(source_path), "lineno": 7 }
        })),
        doclet(json!({
            "kind": "function",
            "name": "createWidget",
            "longname": "createWidget",
            "scope": "global",
            "description": "<p>Factory for {@link Widget} instances.</p>",
            "meta": { "filename": file_name(source_path), "path": dir_name(source_path), "lineno": 20 }
        })),
    ]
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn dir_name(path: &str) -> String {
    match path.rfind('/') {
        Some(split) => path[..split].to_string(),
        None => String::new(),
    }
}

/// Writes a small source file and returns doclets documenting it.
pub fn project_with_source(dir: &Path) -> std::io::Result<(String, Vec<Doclet>)> {
    let source = dir.join("widget.js");
    fs::write(
        &source,
        "class Widget {\n  render(target) { return target < 2; }\n}\n",
    )?;
    let path = source.to_string_lossy().replace('\\', "/");
    Ok((path.clone(), widget_project(&path)))
}

/// One doclet of the given kind with nothing else set; handy for nav tests.
pub fn bare(kind: DocletKind, name: &str, longname: &str) -> Doclet {
    let mut doclet = Doclet::new(kind, longname);
    doclet.name = name.to_string();
    doclet
}
