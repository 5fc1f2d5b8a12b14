//! The doclet record and its supporting types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of code entity a doclet describes.
///
/// The first group of variants comes straight from the host parser. The
/// `GlobalObj`, `MainPage` and `Source` kinds never appear in parser output;
/// they are synthesized by the publish pipeline for the globals page, the
/// home page and the pretty-printed source listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocletKind {
    Class,
    Module,
    Namespace,
    Mixin,
    External,
    Interface,
    Function,
    Member,
    Constant,
    Typedef,
    Event,
    File,
    Package,
    #[serde(rename = "globalobj")]
    GlobalObj,
    #[serde(rename = "mainpage")]
    MainPage,
    Source,
    /// Any kind this generator does not handle specially.
    #[serde(other)]
    Unknown,
}

impl Default for DocletKind {
    fn default() -> Self {
        DocletKind::Unknown
    }
}

impl DocletKind {
    /// Kinds that get their own output file.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            DocletKind::Class
                | DocletKind::Module
                | DocletKind::Namespace
                | DocletKind::Mixin
                | DocletKind::External
                | DocletKind::Interface
        )
    }

    /// The longname namespace prefix the host assigns to this kind, if any.
    pub fn namespace(self) -> &'static str {
        match self {
            DocletKind::Module => "module:",
            DocletKind::External => "external:",
            DocletKind::Event => "event:",
            _ => "",
        }
    }
}

impl fmt::Display for DocletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocletKind::Class => "class",
            DocletKind::Module => "module",
            DocletKind::Namespace => "namespace",
            DocletKind::Mixin => "mixin",
            DocletKind::External => "external",
            DocletKind::Interface => "interface",
            DocletKind::Function => "function",
            DocletKind::Member => "member",
            DocletKind::Constant => "constant",
            DocletKind::Typedef => "typedef",
            DocletKind::Event => "event",
            DocletKind::File => "file",
            DocletKind::Package => "package",
            DocletKind::GlobalObj => "globalobj",
            DocletKind::MainPage => "mainpage",
            DocletKind::Source => "source",
            DocletKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Where a symbol lives relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Static,
    Instance,
    Inner,
    #[serde(other)]
    Unknown,
}

impl Scope {
    /// The punctuation the host uses for this scope in longnames: `.` for
    /// static, `#` for instance and `~` for inner members.
    pub fn punctuation(self) -> &'static str {
        match self {
            Scope::Static => ".",
            Scope::Instance => "#",
            Scope::Inner => "~",
            _ => "",
        }
    }

    /// The lowercase name used when the scope shows up in attribute lists.
    pub fn label(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Static => "static",
            Scope::Instance => "instance",
            Scope::Inner => "inner",
            Scope::Unknown => "",
        }
    }
}

/// A type annotation: one or more type names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeExpr {
    #[serde(default)]
    pub names: Vec<String>,
}

/// A documented parameter or property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, rename = "type")]
    pub doc_type: Option<TypeExpr>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default)]
    pub nullable: Option<bool>,
    /// True for repeatable (rest) parameters.
    #[serde(default)]
    pub variable: Option<bool>,
    #[serde(default)]
    pub defaultvalue: Option<serde_json::Value>,
}

impl Param {
    /// The default value rendered for display, without JSON string quotes.
    pub fn default_display(&self) -> Option<String> {
        self.defaultvalue.as_ref().map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// A documented return value or thrown error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnDoc {
    #[serde(default, rename = "type")]
    pub doc_type: Option<TypeExpr>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default)]
    pub nullable: Option<bool>,
}

/// A deprecation marker: the host emits either a bare `true` or a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecation {
    Flag(bool),
    Reason(String),
}

impl Deprecation {
    pub fn is_active(&self) -> bool {
        !matches!(self, Deprecation::Flag(false))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Deprecation::Reason(r) => Some(r),
            Deprecation::Flag(_) => None,
        }
    }
}

/// One example block. The host delivers plain strings; the publish pipeline
/// splits a leading `<caption>` off into the caption field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub code: String,
}

/// Where the documented symbol was found in the source tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMeta {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub lineno: Option<u64>,
}

/// One documentation record.
///
/// Every field except `kind` and `longname` is optional in the host dump, and
/// unknown attributes are ignored. The fields under "annotations" are filled
/// in by the publish pipeline, never by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doclet {
    #[serde(default)]
    pub kind: DocletKind,
    pub longname: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub memberof: Option<String>,
    #[serde(default)]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub classdesc: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub returns: Vec<ReturnDoc>,
    /// Documented `@throws` conditions.
    #[serde(default)]
    pub exceptions: Vec<ReturnDoc>,
    #[serde(default)]
    pub properties: Vec<Param>,
    #[serde(default, rename = "type")]
    pub doc_type: Option<TypeExpr>,
    #[serde(default, deserialize_with = "deserialize_examples")]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub see: Vec<String>,
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub todo: Vec<String>,
    #[serde(default)]
    pub tutorials: Vec<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
    #[serde(default)]
    pub access: Option<String>,
    /// Set by the host for `@abstract`/`@virtual` symbols.
    #[serde(default, rename = "virtual")]
    pub is_abstract: Option<bool>,
    #[serde(default, rename = "async")]
    pub is_async: Option<bool>,
    #[serde(default)]
    pub generator: Option<bool>,
    #[serde(default)]
    pub readonly: Option<bool>,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub augments: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    /// Longnames of symbols implementing this one, filled in by the host.
    #[serde(default)]
    pub implementations: Vec<String>,
    #[serde(default)]
    pub mixes: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub fires: Vec<String>,
    #[serde(default)]
    pub listens: Vec<String>,
    #[serde(default)]
    pub inherited: Option<bool>,
    #[serde(default)]
    pub inherits: Option<String>,
    #[serde(default)]
    pub overrides: Option<String>,
    #[serde(default)]
    pub defaultvalue: Option<serde_json::Value>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub variation: Option<String>,
    #[serde(default)]
    pub undocumented: Option<bool>,
    #[serde(default)]
    pub ignore: Option<bool>,
    #[serde(default)]
    pub meta: Option<DocMeta>,
    /// File list carried by `package` doclets.
    #[serde(default)]
    pub files: Vec<String>,
    /// Rendered readme HTML, carried only by the synthesized main-page doclet.
    #[serde(default)]
    pub readme: Option<String>,
    /// Escaped source text, carried only by synthesized source doclets.
    #[serde(default)]
    pub code: Option<String>,

    // Annotations written by the publish pipeline.
    /// Formatted attribute string, e.g. `(static, readonly) `.
    #[serde(default)]
    pub attribs: String,
    /// Formatted signature HTML appended to the displayed name.
    #[serde(default)]
    pub signature: Option<String>,
    /// Fragment identifier of this doclet within its page.
    #[serde(default)]
    pub id: Option<String>,
    /// Links to the doclet's ancestors, outermost first.
    #[serde(default)]
    pub ancestors: Vec<String>,
    /// Source path relative to the common prefix of all documented files.
    #[serde(default)]
    pub shortpath: Option<String>,
    /// Longnames of symbols listening to this event.
    #[serde(default)]
    pub listeners: Vec<String>,
    /// Exported symbols attached to module doclets for display.
    #[serde(default)]
    pub modules: Vec<Doclet>,
}

impl Doclet {
    /// Creates a bare doclet; used for the synthesized page doclets.
    pub fn new(kind: DocletKind, longname: impl Into<String>) -> Self {
        let longname = longname.into();
        Doclet {
            kind,
            name: longname.clone(),
            longname,
            ..Doclet::default()
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Whether this doclet was marked deprecated at all.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.as_ref().is_some_and(Deprecation::is_active)
    }

    /// The source path of the documented symbol, joined from its meta record.
    pub fn source_path(&self) -> Option<String> {
        let meta = self.meta.as_ref()?;
        let filename = meta.filename.as_deref()?;
        match meta.path.as_deref() {
            Some(path) if !path.is_empty() && path != "null" => {
                Some(format!("{}/{}", path.trim_end_matches('/'), filename))
            }
            _ => Some(filename.to_string()),
        }
    }
}

/// Examples arrive from the host as plain strings; accept those as captionless
/// example blocks, and accept the split form for round-tripping.
fn deserialize_examples<'de, D>(deserializer: D) -> Result<Vec<Example>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawExample {
        Text(String),
        Split(Example),
    }

    let raw: Vec<RawExample> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|e| match e {
            RawExample::Text(code) => Example {
                caption: String::new(),
                code,
            },
            RawExample::Split(example) => example,
        })
        .collect())
}
