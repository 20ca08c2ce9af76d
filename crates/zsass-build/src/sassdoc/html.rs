/*
 * sassdoc/html.rs
 * Copyright (c) 2025 zsass-mixins contributors
 *
 * HTML page for generated documentation.
 */

use std::io::{self, Write};

use super::Documentation;
use super::parse::DocItem;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:960px;margin:0 auto;padding:0 1rem;color:#222}\
nav ul{list-style:none;padding:0}\
.item{border-top:1px solid #ddd;padding:1rem 0}\
.kind{color:#c6538c}\
pre{background:#f6f8fa;padding:.75rem;overflow:auto}\
table{border-collapse:collapse}\
td,th{border:1px solid #ddd;padding:.25rem .5rem;text-align:left}\
.deprecated{color:#b00}";

/// Write the documentation index page.
pub fn write_index<W: Write>(doc: &Documentation, buf: &mut W) -> io::Result<()> {
    let title = format!("{} v{}", doc.package.name, doc.package.version);
    let groups = doc.public_groups();

    writeln!(buf, "<!DOCTYPE html>")?;
    writeln!(buf, "<html lang=\"en\">")?;
    writeln!(buf, "<head>")?;
    writeln!(buf, "<meta charset=\"utf-8\">")?;
    writeln!(buf, "<title>{} - Documentation</title>", escape_html(&title))?;
    writeln!(buf, "<style>{}</style>", STYLE)?;
    writeln!(buf, "</head>")?;
    writeln!(buf, "<body>")?;
    writeln!(buf, "<header><h1>{}</h1></header>", escape_html(&title))?;

    writeln!(buf, "<nav><ul>")?;
    for (group, items) in &groups {
        writeln!(
            buf,
            "<li><a href=\"#group-{}\">{}</a><ul>",
            slug(group),
            escape_html(group)
        )?;
        for item in items {
            writeln!(
                buf,
                "<li><a href=\"#{}\">{}{}</a></li>",
                anchor(item),
                escape_html(item.kind.sigil()),
                escape_html(&item.name)
            )?;
        }
        writeln!(buf, "</ul></li>")?;
    }
    writeln!(buf, "</ul></nav>")?;

    writeln!(buf, "<main>")?;
    if groups.is_empty() {
        writeln!(
            buf,
            "<p>No documented items in <code>{}</code>.</p>",
            escape_html(&doc.source)
        )?;
    }
    for (group, items) in &groups {
        writeln!(
            buf,
            "<section id=\"group-{}\"><h2>{}</h2>",
            slug(group),
            escape_html(group)
        )?;
        for item in items {
            write_item(doc, item, buf)?;
        }
        writeln!(buf, "</section>")?;
    }
    writeln!(buf, "</main>")?;
    writeln!(buf, "</body>")?;
    writeln!(buf, "</html>")?;
    Ok(())
}

fn write_item<W: Write>(doc: &Documentation, item: &DocItem, buf: &mut W) -> io::Result<()> {
    writeln!(
        buf,
        "<article id=\"{}\" class=\"item\"><h3><span class=\"kind\">{}</span>{}</h3>",
        anchor(item),
        escape_html(item.kind.sigil()),
        escape_html(&item.name)
    )?;

    if let Some(message) = &item.deprecated {
        writeln!(
            buf,
            "<p class=\"deprecated\">Deprecated{}</p>",
            if message.is_empty() {
                String::new()
            } else {
                format!(": {}", escape_html(message))
            }
        )?;
    }

    for paragraph in item.description.split("\n\n").filter(|p| !p.trim().is_empty()) {
        writeln!(buf, "<p>{}</p>", escape_html(paragraph.trim()))?;
    }

    writeln!(
        buf,
        "<pre class=\"signature\"><code>{}</code></pre>",
        escape_html(&item.signature)
    )?;

    if !item.params.is_empty() {
        writeln!(
            buf,
            "<table class=\"params\"><tr><th>Name</th><th>Type</th><th>Default</th><th>Description</th></tr>"
        )?;
        for param in &item.params {
            writeln!(
                buf,
                "<tr><td><code>${}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&param.name),
                escape_html(param.type_.as_deref().unwrap_or("")),
                escape_html(param.default.as_deref().unwrap_or("")),
                escape_html(&param.description)
            )?;
        }
        writeln!(buf, "</table>")?;
    }

    if let Some(returns) = &item.returns {
        writeln!(
            buf,
            "<p class=\"returns\">Returns <code>{}</code> {}</p>",
            escape_html(returns.type_.as_deref().unwrap_or("")),
            escape_html(&returns.description)
        )?;
    }

    for example in &item.examples {
        writeln!(
            buf,
            "<pre class=\"example\"><code class=\"language-{}\">{}</code></pre>",
            escape_html(&example.language),
            escape_html(&example.code)
        )?;
    }

    if let Some(since) = &item.since {
        writeln!(buf, "<p class=\"since\">Since {}</p>", escape_html(since))?;
    }
    for author in &item.author {
        writeln!(buf, "<p class=\"author\">Author: {}</p>", escape_html(author))?;
    }
    for see in &item.see {
        writeln!(buf, "<p class=\"see\">See <code>{}</code></p>", escape_html(see))?;
    }
    for link in &item.links {
        writeln!(
            buf,
            "<p class=\"link\"><a href=\"{}\">{}</a></p>",
            escape_html(&link.url),
            escape_html(link.caption.as_deref().unwrap_or(&link.url))
        )?;
    }

    if let Some(href) = doc.source_link(item) {
        writeln!(
            buf,
            "<p><a class=\"source\" href=\"{}\">View source</a></p>",
            escape_html(&href)
        )?;
    }

    writeln!(buf, "</article>")?;
    Ok(())
}

fn anchor(item: &DocItem) -> String {
    format!("{}-{}", item.kind.as_str(), slug(&item.name))
}

fn slug(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}
