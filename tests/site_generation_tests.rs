//! End-to-end checks on the generated page set: the home page, symbol
//! pages, the globals page and the shared navigation sidebar.

mod common;

use common::{bare, doclet, publish_site, publish_site_with, widget_project, TestResult};
use docsmith::{DocletKind, Tutorial};
use serde_json::json;

#[test]
fn test_empty_input_still_produces_a_home_page() -> TestResult {
    let site = publish_site(Vec::new())?;

    assert_eq!(site.report.pages, 1);
    let index = site.page("index.html");
    assert!(index.contains("<title>docsmith: Home</title>"));
    assert!(index.contains("<h2><a href=\"index.html\">Home</a></h2>"));
    // the built-in statics ship alongside the pages
    assert!(site.has_page("styles/default.css"));
    assert!(site.has_page("scripts/linenumber.js"));
    Ok(())
}

#[test]
fn test_class_page_carries_signature_and_member_sections() -> TestResult {
    let site = publish_site(widget_project("/src/widget.js"))?;

    let page = site.page("Widget.html");
    assert!(page.contains("<h1 class=\"page-title\">Class: Widget</h1>"));
    assert!(page.contains("<div class=\"class-description\"><p>A rectangular thing on the screen.</p></div>"));
    // the constructor overview shows the decorated signature
    assert!(page.contains("new Widget<span class=\"signature\">(id)</span>"));
    // the optional parameter keeps its marker in the method heading
    assert!(page.contains("render<span class=\"signature\">(target<span class=\"signature-attributes\">opt</span>)</span>"));
    assert!(page.contains("&rarr; {boolean}"));
    // the member shows its type annotation instead of a call signature
    assert!(page.contains("<h3 class=\"subsection-title\">Members</h3>"));
    assert!(page.contains(" :number"));
    assert!(page.contains("<h3 class=\"subsection-title\">Methods</h3>"));
    Ok(())
}

#[test]
fn test_inline_links_resolve_on_every_symbol_page() -> TestResult {
    let site = publish_site(widget_project("/src/widget.js"))?;

    // {@link Widget#size} in the method description points at the anchor
    let class_page = site.page("Widget.html");
    assert!(class_page.contains("<a href=\"Widget.html#size\">Widget#size</a>"));
    assert!(!class_page.contains("{@link"));

    // {@link Widget} in the global factory resolves on the globals page
    let globals = site.page("global.html");
    assert!(globals.contains("<a href=\"Widget.html\">Widget</a>"));
    Ok(())
}

#[test]
fn test_nav_lists_classes_and_globals_on_every_page() -> TestResult {
    let site = publish_site(widget_project("/src/widget.js"))?;

    for name in ["index.html", "Widget.html", "global.html"] {
        let page = site.page(name);
        assert!(page.contains("<h3>Classes</h3>"), "{} misses Classes", name);
        assert!(page.contains("<li><a href=\"Widget.html\">Widget</a></li>"));
        assert!(page.contains("<h3>Global</h3>"));
        assert!(page.contains("<a href=\"global.html#createWidget\">createWidget</a>"));
    }
    Ok(())
}

#[test]
fn test_monospace_links_setting_wraps_link_text_in_code() -> TestResult {
    let settings = json!({ "templates": { "monospaceLinks": true } });
    let site = publish_site_with(
        widget_project("/src/widget.js"),
        settings,
        Tutorial::root(),
        |_| {},
    )?;

    let globals = site.page("global.html");
    assert!(globals.contains("<a href=\"Widget.html\"><code>Widget</code></a>"));
    Ok(())
}

#[test]
fn test_readme_and_main_page_title_show_on_home() -> TestResult {
    let site = publish_site_with(Vec::new(), serde_json::Value::Null, Tutorial::root(), |opts| {
        opts.readme = Some("<h3>Widgets</h3><p>A widget toolkit.</p>".to_string());
        opts.main_page_title = Some("Widget Toolkit".to_string());
    })?;

    let index = site.page("index.html");
    assert!(index.contains("<p>A widget toolkit.</p>"));
    Ok(())
}

#[test]
fn test_private_doclets_are_pruned_unless_requested() -> TestResult {
    let mut doclets = widget_project("/src/widget.js");
    doclets.push(doclet(json!({
        "kind": "function",
        "name": "internals",
        "longname": "Widget#internals",
        "memberof": "Widget",
        "scope": "instance",
        "access": "private"
    })));

    let hidden = publish_site(doclets.clone())?;
    assert!(!hidden.page("Widget.html").contains("internals"));

    let shown = publish_site_with(doclets, serde_json::Value::Null, Tutorial::root(), |opts| {
        opts.include_private = true;
    })?;
    let page = shown.page("Widget.html");
    assert!(page.contains("internals"));
    assert!(page.contains("(private) "));
    Ok(())
}

#[test]
fn test_module_page_shows_require_form_of_exports() -> TestResult {
    let doclets = vec![
        doclet(json!({
            "kind": "module",
            "name": "app",
            "longname": "module:app",
            "description": "<p>The application module.</p>"
        })),
        doclet(json!({
            "kind": "function",
            "name": "module:app",
            "longname": "module:app",
            "description": "<p>Boots the application.</p>"
        })),
    ];

    let site = publish_site(doclets)?;
    let page = site.page("module-app.html");
    assert!(page.contains("<h1 class=\"page-title\">Module: app</h1>"));
    assert!(page.contains("(require(&quot;app&quot;))") || page.contains("(require(\"app\"))"));
    // module exports stay out of the globals list, so no globals page exists
    assert!(!site.has_page("global.html"));
    Ok(())
}

#[test]
fn test_namespace_page_links_its_children() -> TestResult {
    let doclets = vec![
        bare(DocletKind::Namespace, "app", "app"),
        {
            let mut class = bare(DocletKind::Class, "Widget", "app.Widget");
            class.memberof = Some("app".to_string());
            class.summary = Some("a widget".to_string());
            class
        },
    ];

    let site = publish_site(doclets)?;
    let page = site.page("app.html");
    assert!(page.contains("<h3 class=\"subsection-title\">Classes</h3>"));
    assert!(page.contains("<a href=\"app.Widget.html\">Widget</a>"));
    // the breadcrumb on the child page walks back to the namespace
    let child = site.page("app.Widget.html");
    assert!(child.contains("<span class=\"ancestors\"><a href=\"app.html\">app</a>"));
    Ok(())
}

#[test]
fn test_unsupported_encoding_is_rejected() {
    let result = publish_site_with(Vec::new(), serde_json::Value::Null, Tutorial::root(), |opts| {
        opts.encoding = "latin1".to_string();
    });
    assert!(result.is_err());
}

#[test]
fn test_footer_date_honors_include_date() -> TestResult {
    let dated = publish_site(Vec::new())?;
    assert!(dated.page("index.html").contains(" on "));

    let settings = json!({ "templates": { "default": { "includeDate": false } } });
    let undated = publish_site_with(Vec::new(), settings, Tutorial::root(), |_| {})?;
    let index = undated.page("index.html");
    assert!(index.contains("docsmith"));
    assert!(!index.contains("</footer>\n on"));
    Ok(())
}
