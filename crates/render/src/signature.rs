//! Signature and attribute decoration.
//!
//! Before any page is rendered, the publish pipeline walks every doclet and
//! fills in the display annotations the templates print verbatim: the
//! parenthesized attribute string (`(static, readonly) `), the call
//! signature with its parameter list and return types, and the type
//! annotation members carry after their name. The functions here build
//! those strings in place, so the templates stay free of formatting logic.

use docsmith_links::{html_safe, LinkMap};
use docsmith_model::{Doclet, DocletKind, Param, ReturnDoc, Scope};
use itertools::Itertools;

/// Whether a doclet's name is displayed with a call signature.
///
/// Functions and classes always get one; typedefs only when one of their
/// type names is `function`.
pub fn needs_signature(doclet: &Doclet) -> bool {
    match doclet.kind {
        DocletKind::Function | DocletKind::Class => true,
        DocletKind::Typedef => doclet
            .doc_type
            .as_ref()
            .is_some_and(|t| t.names.iter().any(|n| n.eq_ignore_ascii_case("function"))),
        _ => false,
    }
}

/// The decorated display name of one parameter or property: a `&hellip;`
/// marker for rest parameters and a trailing `opt`/`nullable`/`non-null`
/// attribute note.
pub fn update_item_name(item: &Param) -> String {
    let mut name = item.name.clone().unwrap_or_default();

    if item.variable == Some(true) {
        name = format!("&hellip;{}", name);
    }

    let attributes = signature_attributes(item.optional, item.nullable);
    if !attributes.is_empty() {
        name = format!(
            "{}<span class=\"signature-attributes\">{}</span>",
            name,
            attributes.join(", ")
        );
    }

    name
}

fn signature_attributes(optional: Option<bool>, nullable: Option<bool>) -> Vec<&'static str> {
    let mut attributes = Vec::new();
    if optional == Some(true) {
        attributes.push("opt");
    }
    match nullable {
        Some(true) => attributes.push("nullable"),
        Some(false) => attributes.push("non-null"),
        None => {}
    }
    attributes
}

/// Appends the parameter list to the doclet's signature. Parameters whose
/// name contains a dot document properties of another parameter and stay
/// out of the signature line.
pub fn add_signature_params(doclet: &mut Doclet) {
    let params = doclet
        .params
        .iter()
        .filter(|p| {
            p.name
                .as_deref()
                .is_some_and(|n| !n.is_empty() && !n.contains('.'))
        })
        .map(update_item_name)
        .join(", ");

    doclet.signature = Some(format!(
        "{}({})",
        doclet.signature.as_deref().unwrap_or(""),
        params
    ));
}

/// Wraps the signature and appends the linked return types, e.g.
/// `&rarr; {Promise.&lt;string&gt;}`.
pub fn add_signature_returns(links: &LinkMap, doclet: &mut Doclet) {
    // return-type attributes are merged across all @returns tags
    let mut attribs: Vec<&'static str> = Vec::new();
    for item in &doclet.returns {
        for attrib in attribs_for_return(item) {
            if !attribs.contains(&attrib) {
                attribs.push(attrib);
            }
        }
    }
    let attribs_string = build_attribs_string(&attribs);

    let return_types: Vec<String> = doclet
        .returns
        .iter()
        .flat_map(|item| build_item_type_strings(links, item.doc_type.as_ref()))
        .collect();
    let return_types_string = if return_types.is_empty() {
        String::new()
    } else {
        format!(" &rarr; {}{{{}}}", attribs_string, return_types.join("|"))
    };

    doclet.signature = Some(format!(
        "<span class=\"signature\">{}</span><span class=\"type-signature\">{}</span>",
        doclet.signature.as_deref().unwrap_or(""),
        return_types_string
    ));
}

/// Appends a member's linked type annotation to its signature, e.g.
/// ` :number|string`.
pub fn add_signature_types(links: &LinkMap, doclet: &mut Doclet) {
    let types = build_item_type_strings(links, doclet.doc_type.as_ref());
    let types_string = if types.is_empty() {
        String::new()
    } else {
        format!(" :{}", types.join("|"))
    };

    doclet.signature = Some(format!(
        "{}<span class=\"type-signature\">{}</span>",
        doclet.signature.as_deref().unwrap_or(""),
        types_string
    ));
}

/// Fills in the doclet's attribute span. The span is written even when the
/// attribute list is empty so templates can print it unconditionally.
pub fn add_attribs(doclet: &mut Doclet) {
    let attribs = attribs_for(doclet);
    let attribs: Vec<&str> = attribs.iter().map(String::as_str).collect();
    doclet.attribs = format!(
        "<span class=\"type-signature\">{}</span>",
        build_attribs_string(&attribs)
    );
}

/// The attribute words shown in front of a symbol's name, in display order.
pub fn attribs_for(doclet: &Doclet) -> Vec<String> {
    let mut attribs = Vec::new();

    if doclet.is_async == Some(true) {
        attribs.push("async".to_string());
    }
    if doclet.generator == Some(true) {
        attribs.push("generator".to_string());
    }
    if doclet.is_abstract == Some(true) {
        attribs.push("abstract".to_string());
    }
    if let Some(access) = doclet.access.as_deref() {
        if access != "public" {
            attribs.push(access.to_string());
        }
    }
    if let Some(scope) = doclet.scope {
        if scope != Scope::Instance
            && scope != Scope::Global
            && matches!(
                doclet.kind,
                DocletKind::Function | DocletKind::Member | DocletKind::Constant
            )
        {
            attribs.push(scope.label().to_string());
        }
    }
    if doclet.readonly == Some(true) && doclet.kind == DocletKind::Member {
        attribs.push("readonly".to_string());
    }
    if doclet.kind == DocletKind::Constant {
        attribs.push("constant".to_string());
    }
    match doclet.nullable {
        Some(true) => attribs.push("nullable".to_string()),
        Some(false) => attribs.push("non-null".to_string()),
        None => {}
    }

    attribs
}

/// The parenthesized, escaped attribute list, with its trailing space.
/// Empty input produces an empty string, not `() `.
pub fn build_attribs_string(attribs: &[&str]) -> String {
    if attribs.is_empty() {
        String::new()
    } else {
        html_safe(&format!("({}) ", attribs.join(", ")))
    }
}

/// One link per type name, escaped for display.
fn build_item_type_strings(
    links: &LinkMap,
    doc_type: Option<&docsmith_model::TypeExpr>,
) -> Vec<String> {
    doc_type
        .map(|t| {
            t.names
                .iter()
                .map(|name| links.link_to(name, &html_safe(name)))
                .collect()
        })
        .unwrap_or_default()
}

fn attribs_for_return(item: &ReturnDoc) -> Vec<&'static str> {
    match item.nullable {
        Some(true) => vec!["nullable"],
        Some(false) => vec!["non-null"],
        None => Vec::new(),
    }
}
