//! Markdown rendering for tutorial and readme bodies.
//!
//! Bodies render through pulldown-cmark with the table, strikethrough,
//! footnote and task-list extensions on. Headings get stable `id`
//! attributes derived from their text so tutorials can deep-link sections;
//! repeated headings grow a numeric suffix.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use std::collections::HashMap;

/// Renders a markdown body to HTML with slugged heading ids.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let events: Vec<Event<'_>> = Parser::new_ext(markdown, options).collect();
    let mut rewritten: Vec<Event<'_>> = Vec::with_capacity(events.len() + 8);
    let mut used_ids: HashMap<String, usize> = HashMap::new();

    let mut index = 0;
    while index < events.len() {
        if let Event::Start(Tag::Heading(level, explicit_id, _)) = &events[index] {
            let end = heading_end(&events, index);
            let id = match explicit_id {
                Some(id) => (*id).to_string(),
                None => unique_slug(&heading_text(&events[index + 1..end]), &mut used_ids),
            };

            rewritten.push(Event::Html(CowStr::from(format!(
                "<{} id=\"{}\">",
                level, id
            ))));
            rewritten.extend(events[index + 1..end].iter().cloned());
            rewritten.push(Event::Html(CowStr::from(format!("</{}>", level))));

            index = end + 1;
            continue;
        }
        rewritten.push(events[index].clone());
        index += 1;
    }

    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, rewritten.into_iter());
    out
}

fn heading_end(events: &[Event<'_>], start: usize) -> usize {
    events[start + 1..]
        .iter()
        .position(|event| matches!(event, Event::End(Tag::Heading(..))))
        .map(|offset| start + 1 + offset)
        .unwrap_or(events.len())
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

fn unique_slug(text: &str, used: &mut HashMap<String, usize>) -> String {
    let mut base = slug::slugify(text);
    if base.is_empty() {
        base.push_str("section");
    }
    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{}-{}", base, *count - 1)
    }
}
