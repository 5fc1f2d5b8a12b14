//! Data passed to the page templates.
//!
//! The templates are deliberately logic-light: every string that needs
//! linking, escaping or joining is prepared ahead of time, and fields
//! suffixed `_html` hold finished markup the templates print raw. The
//! structs here are the whole contract between the pipeline and a template
//! directory, so a custom template sees exactly the same data as the
//! built-in one.

use serde::Serialize;

/// The context for the `container` template: one entry per doclet shown on
/// the page. Symbol pages hold a single doc; the home page holds the
/// package doclets, the main page doclet and one doc per source file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContainerData {
    pub docs: Vec<DocView>,
}

/// One doclet prepared for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocView {
    pub kind: String,
    /// Routes the doc through the `mainpage` partial (main page and
    /// package doclets).
    pub is_mainpage: bool,
    pub is_package: bool,
    /// Routes the doc through the `source` partial.
    pub is_source: bool,
    /// Containers other than modules show their own name heading; module
    /// pages already carry the name in the page title.
    pub show_name_header: bool,
    pub name: String,
    pub variation: Option<String>,
    pub package_version: Option<String>,
    pub attribs: String,
    pub ancestors_html: String,
    pub classdesc_html: Option<String>,
    pub description_html: Option<String>,
    /// Class descriptions of a module's exported symbols, shown in the
    /// page header.
    pub module_classdescs: Vec<String>,
    /// A module's exported symbols, rendered in the overview block.
    pub exports: Vec<SymbolView>,
    /// The constructor block for classes (and namespaces with a call
    /// signature).
    pub overview: Option<SymbolView>,
    /// The details list for plain containers without an overview symbol.
    pub details: Option<DetailsView>,
    pub examples: Vec<ExampleView>,
    pub examples_label: String,
    pub augments_html: Vec<String>,
    pub requires_html: Vec<String>,
    pub classes: Vec<ChildLink>,
    pub interfaces: Vec<ChildLink>,
    pub namespaces: Vec<ChildLink>,
    pub mixes_html: Vec<String>,
    pub members: Vec<SymbolView>,
    pub methods: Vec<SymbolView>,
    pub typedefs: Vec<SymbolView>,
    pub events: Vec<SymbolView>,
    /// Rendered readme, carried by the main page doclet.
    pub readme_html: Option<String>,
    /// Escaped file contents, carried by source docs.
    pub code: Option<String>,
}

/// A symbol block: a method, member, typedef, event or constructor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolView {
    pub id: String,
    pub kind: String,
    /// Show the `Constructor` heading above the block; set on the overview
    /// symbol of a class page that also has a class description.
    pub constructor_label: bool,
    /// Attribute span, `new ` prefix where applicable, name and signature,
    /// already joined.
    pub heading_html: String,
    pub summary_html: Option<String>,
    pub description_html: Option<String>,
    /// Linked type names for members and typedefs, joined with `|`.
    pub type_names_html: Option<String>,
    pub details: DetailsView,
    pub examples: Vec<ExampleView>,
    pub examples_label: String,
    pub params: Option<TableView>,
    pub requires_html: Vec<String>,
    pub fires_html: Vec<String>,
    pub listens_html: Vec<String>,
    pub listeners_html: Vec<String>,
    pub throws_html: Vec<String>,
    pub throws_many: bool,
    pub returns_html: Vec<String>,
    pub returns_many: bool,
}

/// The definition list of tags shown under a symbol or page overview.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetailsView {
    /// Documented properties, shown as a table above the tag list.
    pub properties: Option<TableView>,
    pub version: Option<String>,
    pub since: Option<String>,
    pub inherited_from_html: Option<String>,
    pub overrides_html: Option<String>,
    pub implementations_html: Vec<String>,
    pub implements_html: Vec<String>,
    pub mixes_html: Vec<String>,
    /// `Yes` for a bare deprecation flag, otherwise the stated reason.
    pub deprecated_html: Option<String>,
    pub authors_html: Vec<String>,
    pub copyright_html: Option<String>,
    pub license: Option<String>,
    pub default_value: Option<String>,
    /// File and line links, omitted when source output is disabled.
    pub source_html: Option<String>,
    pub tutorials_html: Vec<String>,
    pub see_html: Vec<String>,
    pub todo_html: Vec<String>,
}

impl DetailsView {
    /// True when nothing in the list would render.
    pub fn is_empty(&self) -> bool {
        self.properties.is_none()
            && self.version.is_none()
            && self.since.is_none()
            && self.inherited_from_html.is_none()
            && self.overrides_html.is_none()
            && self.implementations_html.is_empty()
            && self.implements_html.is_empty()
            && self.mixes_html.is_empty()
            && self.deprecated_html.is_none()
            && self.authors_html.is_empty()
            && self.copyright_html.is_none()
            && self.license.is_none()
            && self.default_value.is_none()
            && self.source_html.is_none()
            && self.tutorials_html.is_empty()
            && self.see_html.is_empty()
            && self.todo_html.is_empty()
    }
}

/// A parameter or property table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableView {
    pub has_name: bool,
    pub has_attributes: bool,
    pub has_default: bool,
    pub rows: Vec<ParamRow>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParamRow {
    pub name: String,
    pub types_html: String,
    pub attributes_html: String,
    pub default_html: String,
    pub description_html: String,
}

/// One example block; the code is already escaped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExampleView {
    pub caption: String,
    pub code: String,
}

/// A child entry in a container's Classes/Interfaces/Namespaces lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChildLink {
    pub link: String,
    pub summary_html: String,
}

/// The context for the `tutorial` template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TutorialData {
    /// The tutorial's own title, shown as the article heading.
    pub header: String,
    pub content_html: String,
    pub children_links: Vec<String>,
}

/// The per-page fields the layout template prints around the content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageChrome {
    pub title: String,
    pub nav: String,
    /// Generator version printed in the footer.
    pub version: String,
    /// Formatted generation timestamp, omitted when dating is disabled.
    pub generated_on: Option<String>,
}

/// Picks between `Example` and `Examples` the way the section headings do.
pub fn examples_label(count: usize) -> String {
    if count > 1 { "Examples" } else { "Example" }.to_string()
}
