// Report rendering
// Author: kelexine (https://github.com/kelexine)

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Link and image targets allowed through to the page.
const SAFE_SCHEMES: &[&str] = &["http:", "https:", "mailto:"];

/// Render model output as Markdown.
///
/// Raw HTML in the output is shown as text, never interpreted. Links and
/// images whose target is not http(s) or mailto keep only their text.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(text, options).filter_map(|event| match event {
        Event::Html(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link(_, ref dest, _) | Tag::Image(_, ref dest, _))
        | Event::End(Tag::Link(_, ref dest, _) | Tag::Image(_, ref dest, _))
            if !is_safe_target(dest) =>
        {
            None
        }
        other => Some(other),
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn is_safe_target(dest: &str) -> bool {
    let dest = dest.trim_start().to_ascii_lowercase();
    SAFE_SCHEMES.iter().any(|scheme| dest.starts_with(scheme))
}
