//! Syntax highlighting backed by syntect's bundled syntaxes and themes.
//!
//! Languages are looked up case-insensitively by name or file extension
//! (`python`, `Rust`, `rs`, `js`). Styles are exact theme names such as
//! `InspiredGitHub` or `base16-ocean.dark`.

use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{start_highlighted_html_snippet, styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unknown style: {0}")]
    UnknownStyle(String),
    #[error("highlighting failed: {0}")]
    Render(String),
}

impl From<syntect::Error> for HighlightError {
    fn from(e: syntect::Error) -> Self { HighlightError::Render(e.to_string()) }
}

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let token = language.trim().to_ascii_lowercase();
    if token.is_empty() {
        return None;
    }
    SYNTAXES.find_syntax_by_token(&token)
}

fn find_theme(style: &str) -> Option<&'static Theme> {
    THEMES.themes.get(style)
}

/// Canonical stored form of a language token, or `None` when no syntax matches.
pub fn normalize_language(language: &str) -> Option<String> {
    find_syntax(language).map(|_| language.trim().to_ascii_lowercase())
}

pub fn is_known_style(style: &str) -> bool {
    find_theme(style).is_some()
}

/// What to render; mirrors the snippet columns that affect the output.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub title: &'a str,
    pub code: &'a str,
    pub language: &'a str,
    pub style: &'a str,
    pub linenos: bool,
}

/// Render `code` into a `<pre>` block with inline styles.
///
/// Unknown languages fall back to plain text; unknown styles are an error.
pub fn render_block(req: &RenderRequest<'_>) -> Result<String, HighlightError> {
    let theme = find_theme(req.style).ok_or_else(|| HighlightError::UnknownStyle(req.style.to_string()))?;
    let syntax = find_syntax(req.language).unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let (mut out, background) = start_highlighted_html_snippet(theme);
    let lines: Vec<&str> = LinesWithEndings::from(req.code).collect();
    let width = lines.len().to_string().len();

    for (idx, line) in lines.iter().enumerate() {
        if req.linenos {
            out.push_str(&format!("<span class=\"lineno\">{:>width$} </span>", idx + 1, width = width));
        }
        let regions = highlighter.highlight_line(line, &SYNTAXES)?;
        out.push_str(&styled_line_to_highlighted_html(&regions[..], IncludeBackground::IfDifferent(background))?);
    }
    out.push_str("</pre>\n");
    Ok(out)
}

/// Render a standalone HTML document titled after the snippet.
pub fn render_document(req: &RenderRequest<'_>) -> Result<String, HighlightError> {
    let block = render_block(req)?;
    let title = escape_html(req.title);
    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <title>{title}</title>\n  <meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\">\n</head>\n<body>\n<h2>{title}</h2>\n\n{block}</body>\n</html>\n"
    ))
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
