//! Read-time rendering of markup bodies.
//!
//! Entries stored with `is_html == false` hold markup source; their display
//! HTML is derived on every read and never persisted.

use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::{ListStyleType, Options};
use once_cell::sync::Lazy;

static MARKUP_OPTIONS: Lazy<Options<'static>> = Lazy::new(|| {
    let mut options = Options::default();

    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.underline = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.list_style = ListStyleType::Dash;
    // Raw HTML passes through comrak and is scrubbed by the sanitizer below.
    render.r#unsafe = true;
    render.gfm_quirks = true;

    options
});

static SANITIZER: Lazy<AmmoniaBuilder<'static>> = Lazy::new(|| {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a", "abbr", "b", "blockquote", "br", "code", "dd", "del", "div", "dl", "dt", "em", "h1",
        "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "kbd", "li", "ol", "p", "pre", "s",
        "section", "span", "strong", "sub", "sup", "table", "tbody", "td", "th", "thead", "tr",
        "u", "ul",
    ]);
    builder.tags(tags);
    builder.add_tag_attributes("img", &["src", "alt", "title"]);
    builder.add_tag_attributes("td", &["colspan", "rowspan"]);
    builder.add_tag_attributes("th", &["colspan", "rowspan"]);

    builder
});

/// Render wiki markup to a sanitized HTML fragment.
pub fn render_markup(source: &str) -> String {
    let html = comrak::markdown_to_html(source, &MARKUP_OPTIONS);
    SANITIZER.clean(&html).to_string()
}
