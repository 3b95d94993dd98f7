//! HTML for the index and mirror pages.
//!
//! Every piece of scraped or configured text goes through `html-escape`.
//! Link targets that are not plain http(s) URLs are replaced by `#`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use mirror_common::Link;
use mirror_config::PageRegistry;
use std::fmt::Write;

pub const SITE_TITLE: &str = "Balance Mirror";

const UNSAFE_HREF: &str = "#";

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header><a href="/">{site}</a></header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = encode_text(title),
        site = SITE_TITLE,
    )
}

fn safe_href(url: &str) -> &str {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        url
    } else {
        UNSAFE_HREF
    }
}

/// Landing page listing every mirrored identifier.
pub fn index_page(registry: &PageRegistry) -> String {
    let mut body = format!("    <h1>{SITE_TITLE}</h1>\n");
    if registry.is_empty() {
        body.push_str("    <p>No pages configured.</p>\n");
    } else {
        body.push_str("    <ul class=\"pages\">\n");
        for (id, _) in registry.iter() {
            let _ = writeln!(
                body,
                "      <li><a href=\"/{}\">{}</a></li>",
                encode_double_quoted_attribute(id),
                encode_text(id)
            );
        }
        body.push_str("    </ul>\n");
    }
    layout(SITE_TITLE, &body)
}

/// Mirror page for one identifier.
pub fn links_page(title: &str, links: &[Link]) -> String {
    let mut body = format!("    <h1>{}</h1>\n", encode_text(title));
    if links.is_empty() {
        body.push_str("    <p>No links found.</p>\n");
    } else {
        body.push_str("    <ul class=\"links\">\n");
        for link in links {
            let _ = writeln!(
                body,
                "      <li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>",
                encode_double_quoted_attribute(safe_href(&link.url)),
                encode_text(&link.text)
            );
        }
        body.push_str("    </ul>\n");
    }
    layout(&format!("{title} | {SITE_TITLE}"), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let html = links_page(
            "turma<06>",
            &[Link::new("<b>Join</b>", "https://zoom.us/j/1?a=1&b=\"2\"")],
        );
        assert!(html.contains("turma&lt;06&gt;"));
        assert!(html.contains("&lt;b&gt;Join&lt;/b&gt;"));
        assert!(html.contains("href=\"https://zoom.us/j/1?a=1&amp;b=&quot;2&quot;\""));
        assert!(!html.contains("<b>Join"));
    }

    #[test]
    fn non_http_targets_are_neutralised() {
        let html = links_page("x", &[Link::new("Zoom", "javascript:alert('zoom')")]);
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn empty_list_says_so() {
        assert!(links_page("x", &[]).contains("No links found."));
    }

    #[test]
    fn index_lists_ids_in_order() {
        let registry = PageRegistry::from_pages([
            ("b-page".to_string(), "https://linktr.ee/b".to_string()),
            ("a-page".to_string(), "https://linktr.ee/a".to_string()),
        ])
        .unwrap();
        let html = index_page(&registry);
        assert!(html.contains(SITE_TITLE));
        let a = html.find("href=\"/a-page\"").unwrap();
        let b = html.find("href=\"/b-page\"").unwrap();
        assert!(a < b);
    }
}
