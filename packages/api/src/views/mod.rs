// ABOUTME: Server-rendered HTML pages
// ABOUTME: Shared page layout, escaping, error banner, and pager used by every view

pub mod errors;
pub mod landing;
pub mod pizzas;
pub mod toppings;

use crate::pagination::PaginationMeta;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
header a { font-weight: bold; text-decoration: none; color: #b22; }
ul.catalog li { margin: 0.4rem 0; }
ul.toppings { font-size: 0.9rem; color: #555; }
form { margin: 1rem 0; }
input[type=text] { padding: 0.3rem; }
button { padding: 0.3rem 0.8rem; }
button.danger { color: #b22; }
.error { background: #fee; border: 1px solid #c66; padding: 0.5rem; }
.muted { color: #777; }
nav.pager { margin-top: 1rem; }
"#;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap a page body in the document shell
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Pizzeria</title>
<style>{style}</style>
</head>
<body>
<header><a href="/">Pizzeria</a></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        body = body,
    )
}

/// Alert paragraph for a form error, or nothing
pub fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error" role="alert">{}</p>"#, escape(message)),
        None => String::new(),
    }
}

/// Previous / next links for an overview page
pub fn pager(base: &str, meta: &PaginationMeta) -> String {
    let mut links = Vec::new();

    if meta.has_previous_page {
        links.push(format!(
            r#"<a href="{base}?page=1">&laquo; first</a> <a href="{base}?page={prev}">previous</a>"#,
            base = base,
            prev = meta.page - 1,
        ));
    }

    links.push(format!(
        r#"<span>Page {} of {}</span>"#,
        meta.page, meta.total_pages
    ));

    if meta.has_next_page {
        links.push(format!(
            r#"<a href="{base}?page={next}">next</a> <a href="{base}?page=last">last &raquo;</a>"#,
            base = base,
            next = meta.page + 1,
        ));
    }

    format!(r#"<nav class="pager">{}</nav>"#, links.join(" "))
}
