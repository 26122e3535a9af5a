// Page shell
// Author: kelexine (https://github.com/kelexine)

use super::report::render_markdown;
use super::{
    BUSY_TEXT, FAILURE_MESSAGE, INTRO, MISSING_IMAGE_WARNING, REPORT_HEADING,
    SUBMIT_LABEL, SUBTITLE, TITLE, UNREADABLE_UPLOAD_WARNING, UPLOAD_LABEL,
};
use crate::analysis::{Outcome, Submission};
use crate::vision::preview::{PREVIEW_CAPTION, PREVIEW_WIDTH};
use crate::vision::{Preview, ACCEPTED_EXTENSIONS};
use pulldown_cmark::escape::escape_html;
use std::fmt::Write;

const STYLE: &str = r#"
body { background-color: #f4f6f9; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; margin: 0; }
.app { max-width: 800px; margin: 2rem auto; padding: 2rem; border-radius: 15px; background-color: white; box-shadow: 0px 4px 20px rgba(0, 0, 0, 0.1); }
h1, h3, h4 { color: #0d3b66; }
label { display: block; font-weight: 600; margin: 1rem 0 0.5rem; }
.preview { margin: 1rem 0; }
.preview figcaption { color: #555; font-size: 0.9em; }
button { background-color: #007bff; color: white; font-weight: bold; border: none; border-radius: 8px; height: 3em; width: 100%; cursor: pointer; transition: 0.3s ease-in-out; }
button:hover { background-color: #0056b3; }
button:disabled { background-color: #6c9bd2; cursor: wait; }
.busy { color: #0d3b66; font-style: italic; }
.alert { padding: 0.75rem 1rem; border-radius: 8px; margin-top: 1.5rem; }
.alert.warning { background-color: #fff8e1; color: #8a6d00; }
.alert.error { background-color: #fdecea; color: #a12622; }
.report-body { line-height: 1.5; }
"#;

const SCRIPT: &str = r#"
const input = document.getElementById('image');
const figure = document.getElementById('preview');
const img = document.getElementById('preview-image');
input.addEventListener('change', () => {
  const file = input.files && input.files[0];
  if (!file) { return; }
  img.src = URL.createObjectURL(file);
  figure.hidden = false;
});
const form = document.getElementById('analysis-form');
form.addEventListener('submit', () => {
  document.getElementById('busy').hidden = false;
  form.querySelector('button').disabled = true;
});
"#;

/// The page before any submit.
pub fn render_index() -> String {
    render(None, None)
}

/// The page after a submit: the submitted image's preview and the outcome.
pub fn render_submission(submission: &Submission) -> String {
    render(submission.preview.as_ref(), Some(&submission.outcome))
}

fn render(preview: Option<&Preview>, outcome: Option<&Outcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let accept = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .chain(["image/jpeg".to_string(), "image/png".to_string()])
        .collect::<Vec<_>>()
        .join(",");

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<main class="app">
<h1>🧠 {title}</h1>
<h4><em>{subtitle}</em></h4>
<p>{intro}</p>
<form id="analysis-form" method="post" action="/analyze" enctype="multipart/form-data">
<label for="image">📤 {upload_label}</label>
<input type="file" id="image" name="image" accept="{accept}">
"#,
        title = TITLE,
        style = STYLE,
        subtitle = SUBTITLE,
        intro = INTRO,
        upload_label = UPLOAD_LABEL,
        accept = accept,
    );

    render_preview(&mut html, preview);

    let _ = write!(
        html,
        r#"<button type="submit">🔍 {submit_label}</button>
<p id="busy" class="busy" hidden>🧬 {busy}</p>
</form>
"#,
        submit_label = SUBMIT_LABEL,
        busy = BUSY_TEXT,
    );

    if let Some(outcome) = outcome {
        render_outcome(&mut html, outcome);
    }

    let _ = write!(html, "</main>\n<script>{}</script>\n</body>\n</html>\n", SCRIPT);
    html
}

fn render_preview(html: &mut String, preview: Option<&Preview>) {
    let (src, hidden) = match preview {
        Some(preview) => (preview.src.as_str(), ""),
        None => ("", " hidden"),
    };
    let _ = write!(
        html,
        r#"<figure id="preview" class="preview"{hidden}>
<img id="preview-image" src="{src}" width="{width}" alt="{caption}">
<figcaption>✅ {caption}</figcaption>
</figure>
"#,
        hidden = hidden,
        src = escaped(src),
        width = PREVIEW_WIDTH,
        caption = PREVIEW_CAPTION,
    );
}

fn render_outcome(html: &mut String, outcome: &Outcome) {
    html.push_str(r#"<section id="result">"#);
    match outcome {
        Outcome::Report(text) => {
            let _ = write!(
                html,
                r#"<h2>📝 {heading}</h2><div class="report-body">{body}</div>"#,
                heading = REPORT_HEADING,
                body = render_markdown(text),
            );
        }
        Outcome::NoAnalysis => {
            let _ = write!(html, r#"<div class="alert error" role="alert">❌ {}</div>"#, FAILURE_MESSAGE);
        }
        Outcome::MissingImage => {
            let _ = write!(
                html,
                r#"<div class="alert warning" role="alert">⚠️ {}</div>"#,
                MISSING_IMAGE_WARNING
            );
        }
        Outcome::UnreadableUpload => {
            let _ = write!(
                html,
                r#"<div class="alert warning" role="alert">⚠️ {}</div>"#,
                UNREADABLE_UPLOAD_WARNING
            );
        }
        Outcome::UnsupportedFormat(detail) => {
            let _ = write!(
                html,
                r#"<div class="alert warning" role="alert">⚠️ Unsupported file type: {}</div>"#,
                escaped(detail)
            );
        }
    }
    html.push_str("</section>\n");
}

/// Escape text for element content and double-quoted attributes.
fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail
    let _ = escape_html(&mut out, text);
    out
}
