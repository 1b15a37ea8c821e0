//! Server-rendered pages.
//!
//! Each page is a pure function from view state to an HTML string. The
//! handlers in `routes` decide which state applies; nothing here does I/O.

pub mod charts;
pub mod layout;
pub mod results;
pub mod roadmap;
pub mod upload;

use std::borrow::Cow;

/// What a data-backed page can show once its fetch has settled.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Failed(String),
    /// The backend answered but had no record.
    Empty,
    Loaded(T),
}

pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Renders `<ul>` of escaped items, or the empty message when there are none.
pub(crate) fn item_list(items: &[String], empty_message: &str) -> String {
    if items.is_empty() {
        return format!(r#"<p class="muted">{}</p>"#, text(empty_message));
    }
    let mut html = String::from("<ul>");
    for item in items {
        html.push_str(&format!("<li>{}</li>", text(item)));
    }
    html.push_str("</ul>");
    html
}
