// src/config.rs
//! Options for a publish run and the template section of the host configuration.

use crate::error::PublishError;
use serde::Deserialize;
use std::path::PathBuf;

/// Options controlling a single publish run. These correspond to the host's
/// command-line surface rather than its configuration file.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Directory the generated site is written into.
    pub destination: PathBuf,
    /// Directory with `*.hbs` files overriding the built-in templates.
    pub template: Option<PathBuf>,
    /// Encoding used when reading source files. Only UTF-8 is supported.
    pub encoding: String,
    /// Pre-rendered readme HTML shown on the home page.
    pub readme: Option<String>,
    /// Longname given to the synthesized home-page doclet.
    pub main_page_title: Option<String>,
    /// Keep doclets with private access.
    pub include_private: bool,
    /// Directory scanned for tutorial sources.
    pub tutorials: Option<PathBuf>,
    /// `package.json`-style metadata file turned into a package doclet.
    pub package: Option<PathBuf>,
    /// The host configuration blob; the `templates` section is read from here.
    pub settings: serde_json::Value,
}

impl Default for PublishOptions {
    fn default() -> Self {
        PublishOptions {
            destination: PathBuf::from("out"),
            template: None,
            encoding: "utf8".to_string(),
            readme: None,
            main_page_title: None,
            include_private: false,
            tutorials: None,
            package: None,
            settings: serde_json::Value::Null,
        }
    }
}

impl PublishOptions {
    /// Rejects option combinations the pipeline cannot honor.
    pub fn validate(&self) -> Result<(), PublishError> {
        let normalized = self.encoding.to_ascii_lowercase();
        if normalized != "utf8" && normalized != "utf-8" {
            return Err(PublishError::Config(format!(
                "unsupported encoding '{}': only utf8 is supported",
                self.encoding
            )));
        }
        Ok(())
    }
}

/// The `templates` section of the host configuration, flattened into the
/// switches the pipeline actually consults.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Render `{@link}` targets in monospace.
    pub monospace_links: bool,
    /// Monospace only those `{@link}` targets that name code symbols.
    pub clever_links: bool,
    /// Generate pretty-printed source pages and link to them.
    pub output_source_files: bool,
    /// Label nav entries with longnames instead of short names.
    pub use_longname_in_nav: bool,
    /// Print the generation date in the page footer.
    pub include_date: bool,
    /// Extra files or directories copied verbatim into the output.
    pub static_files: Vec<PathBuf>,
    /// Template file replacing the built-in page layout.
    pub layout_file: Option<PathBuf>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            monospace_links: false,
            clever_links: false,
            output_source_files: true,
            use_longname_in_nav: false,
            include_date: true,
            static_files: Vec::new(),
            layout_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    templates: RawTemplates,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTemplates {
    #[serde(default)]
    monospace_links: bool,
    #[serde(default)]
    clever_links: bool,
    #[serde(default)]
    default: RawDefault,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefault {
    output_source_files: Option<bool>,
    #[serde(default)]
    use_longname_in_nav: bool,
    include_date: Option<bool>,
    #[serde(default)]
    static_files: RawStaticFiles,
    layout_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStaticFiles {
    #[serde(default)]
    include: Vec<PathBuf>,
    /// Older configurations spell `include` as `paths`; honored when
    /// `include` is absent.
    #[serde(default)]
    paths: Vec<PathBuf>,
}

impl TemplateConfig {
    /// Reads the `templates` section out of the host configuration blob.
    /// Absent sections fall back to defaults; `outputSourceFiles` and
    /// `includeDate` are on unless explicitly set to `false`.
    pub fn from_settings(settings: &serde_json::Value) -> Result<TemplateConfig, PublishError> {
        let raw: RawSettings = if settings.is_null() {
            RawSettings::default()
        } else {
            serde_json::from_value(settings.clone())?
        };

        let templates = raw.templates;
        let default = templates.default;
        let static_files = if default.static_files.include.is_empty() {
            default.static_files.paths
        } else {
            default.static_files.include
        };

        Ok(TemplateConfig {
            monospace_links: templates.monospace_links,
            clever_links: templates.clever_links,
            output_source_files: default.output_source_files != Some(false),
            use_longname_in_nav: default.use_longname_in_nav,
            include_date: default.include_date != Some(false),
            static_files,
            layout_file: default.layout_file,
        })
    }
}
