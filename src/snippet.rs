//! Search snippets arrive as HTML fragments such as
//! `the <span class="searchmatch">Analytical</span> Engine`. They are
//! untrusted: only the match highlight is allowed through.

use scraper::{ElementRef, Html, Node};

#[derive(Clone, Copy, PartialEq)]
enum Output {
    Html,
    Text,
}

/// Escaped HTML where `span.searchmatch` becomes `<mark>` and every other
/// tag is dropped (its text is kept).
pub fn to_safe_html(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut out = String::with_capacity(raw.len());
    walk(fragment.root_element(), Output::Html, &mut out);
    out
}

/// Text content only, with runs of whitespace collapsed to one space.
pub fn to_plain_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut out = String::with_capacity(raw.len());
    walk(fragment.root_element(), Output::Text, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn walk(el: ElementRef<'_>, mode: Output, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => match mode {
                Output::Html => escape_into(text, out),
                Output::Text => out.push_str(text),
            },
            Node::Element(element) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                if matches!(element.name(), "script" | "style") {
                    continue;
                }
                let highlight = mode == Output::Html
                    && element.name() == "span"
                    && element.classes().any(|c| c == "searchmatch");
                if highlight {
                    out.push_str("<mark>");
                    walk(child_el, mode, out);
                    out.push_str("</mark>");
                } else {
                    walk(child_el, mode, out);
                }
            }
            _ => {}
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
