/*
 * sassdoc/parse.rs
 * Copyright (c) 2025 zsass-mixins contributors
 *
 * Extraction of SassDoc annotations from SCSS source.
 */

//! Annotation reader.
//!
//! Reads `///` comment blocks directly above `@mixin`, `@function`,
//! `$variable` and `%placeholder` declarations. `////` poster comments
//! set the default `@group` for the rest of the file.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:@(?P<kw>mixin|function)\s+(?P<callable>[\w-]+)|\$(?P<var>[\w-]+)\s*:|%(?P<placeholder>[\w-]+))")
        .expect("declaration regex")
});

static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^(?:\{(?P<type>[^}]*)\}\s*)?\$?(?P<name>[\w-]+(?:\.\.\.)?)\s*(?:\[(?P<default>[^\]]*)\])?\s*(?:-\s*)?(?P<desc>.*)$",
    )
    .expect("param regex")
});

static RETURN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:\{(?P<type>[^}]*)\}\s*)?(?P<desc>.*)$").expect("return regex")
});

/// Names starting with `_` or `-` are private unless annotated otherwise.
const PRIVATE_PREFIXES: [char; 2] = ['_', '-'];

const DEFAULT_GROUP: &str = "undefined";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Mixin,
    Function,
    Variable,
    Placeholder,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Mixin => "mixin",
            ItemKind::Function => "function",
            ItemKind::Variable => "variable",
            ItemKind::Placeholder => "placeholder",
        }
    }

    /// Prefix used when displaying the item name.
    pub fn sigil(&self) -> &'static str {
        match self {
            ItemKind::Mixin => "@mixin ",
            ItemKind::Function => "@function ",
            ItemKind::Variable => "$",
            ItemKind::Placeholder => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Return {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// One documented declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocItem {
    pub kind: ItemKind,
    pub name: String,
    /// 1-based line of the declaration.
    pub line: usize,
    /// Declaration line without the opening brace.
    pub signature: String,
    pub description: String,
    pub group: String,
    pub access: Access,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<Return>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub see: Vec<String>,
}

/// Parsed comment block, before it is attached to a declaration.
#[derive(Debug, Default)]
struct Block {
    description: Vec<String>,
    annotations: Vec<(String, Vec<String>)>,
}

impl Block {
    fn is_empty(&self) -> bool {
        self.description.is_empty() && self.annotations.is_empty()
    }

    /// Annotations start at the first column; indented lines continue the
    /// previous annotation.
    fn push_line(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix('@') {
            let (name, value) = match rest.find(char::is_whitespace) {
                Some(idx) => (&rest[..idx], rest[idx..].trim()),
                None => (rest, ""),
            };
            self.annotations
                .push((name.to_string(), vec![value.to_string()]));
        } else if let Some((_, lines)) = self.annotations.last_mut() {
            lines.push(line.to_string());
        } else {
            self.description.push(line.to_string());
        }
    }

    fn group(&self) -> Option<String> {
        self.annotations
            .iter()
            .rev()
            .find(|(name, _)| name == "group")
            .map(|(_, lines)| joined(lines))
            .filter(|group| !group.is_empty())
    }
}

/// Extract every documented item from SCSS source, in source order.
pub fn parse_items(source: &str) -> Vec<DocItem> {
    let mut items = Vec::new();
    let mut file_group: Option<String> = None;
    let mut poster: Option<Block> = None;
    let mut block = Block::default();

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("////") {
            let inline = rest.trim_start_matches('/').trim();
            match poster.take() {
                // closing marker
                Some(finished) => {
                    if let Some(group) = finished.group() {
                        file_group = Some(group);
                    }
                }
                None if !inline.is_empty() => {
                    let mut single = Block::default();
                    single.push_line(inline);
                    if let Some(group) = single.group() {
                        file_group = Some(group);
                    }
                }
                None => poster = Some(Block::default()),
            }
            continue;
        }
        if let Some(open) = poster.as_mut() {
            if let Some(rest) = trimmed.strip_prefix("///") {
                open.push_line(strip_marker_space(rest));
                continue;
            }
            // unterminated poster ends at the first non-comment line
            if let Some(group) = open.group() {
                file_group = Some(group);
            }
            poster = None;
        }

        if let Some(rest) = trimmed.strip_prefix("///") {
            block.push_line(strip_marker_space(rest));
            continue;
        }
        if block.is_empty() || trimmed.is_empty() {
            continue;
        }

        let finished = std::mem::take(&mut block);
        match DECLARATION.captures(line) {
            Some(caps) => {
                let (kind, name) = if let Some(name) = caps.name("callable") {
                    let kind = if &caps["kw"] == "mixin" {
                        ItemKind::Mixin
                    } else {
                        ItemKind::Function
                    };
                    (kind, name.as_str())
                } else if let Some(name) = caps.name("var") {
                    (ItemKind::Variable, name.as_str())
                } else {
                    (ItemKind::Placeholder, &caps["placeholder"])
                };
                items.push(build_item(
                    kind,
                    name,
                    idx + 1,
                    signature(line),
                    finished,
                    file_group.as_deref(),
                ));
            }
            None => {
                tracing::debug!(line = idx + 1, "Comment block is not attached to a declaration");
            }
        }
    }

    items
}

fn build_item(
    kind: ItemKind,
    name: &str,
    line: usize,
    signature: String,
    block: Block,
    file_group: Option<&str>,
) -> DocItem {
    let mut item = DocItem {
        kind,
        name: name.to_string(),
        line,
        signature,
        description: joined(&block.description),
        group: file_group.unwrap_or(DEFAULT_GROUP).to_string(),
        access: if name.starts_with(PRIVATE_PREFIXES) {
            Access::Private
        } else {
            Access::Public
        },
        params: Vec::new(),
        returns: None,
        examples: Vec::new(),
        deprecated: None,
        since: None,
        author: Vec::new(),
        links: Vec::new(),
        see: Vec::new(),
    };

    for (annotation, lines) in block.annotations {
        match annotation.as_str() {
            "param" | "arg" | "argument" | "parameter" => {
                if let Some(param) = parse_param(&joined(&lines)) {
                    item.params.push(param);
                }
            }
            "return" | "returns" => {
                item.returns = parse_return(&joined(&lines));
            }
            "example" => item.examples.push(parse_example(&lines)),
            "group" => {
                let group = joined(&lines);
                if !group.is_empty() {
                    item.group = group;
                }
            }
            "access" => match joined(&lines).as_str() {
                "private" => item.access = Access::Private,
                "public" => item.access = Access::Public,
                other => tracing::debug!(item = name, access = other, "Unknown @access value"),
            },
            "deprecated" => item.deprecated = Some(joined(&lines)),
            "since" => item.since = Some(joined(&lines)),
            "author" => item.author.push(joined(&lines)),
            "link" => {
                let text = joined(&lines);
                let mut parts = text.splitn(2, char::is_whitespace);
                if let Some(url) = parts.next().filter(|u| !u.is_empty()) {
                    item.links.push(Link {
                        url: url.to_string(),
                        caption: parts
                            .next()
                            .map(|c| c.trim().to_string())
                            .filter(|c| !c.is_empty()),
                    });
                }
            }
            "see" => item.see.push(joined(&lines)),
            other => tracing::debug!(item = name, annotation = other, "Ignoring annotation"),
        }
    }

    item
}

fn parse_param(text: &str) -> Option<Param> {
    let caps = PARAM.captures(text)?;
    Some(Param {
        name: caps["name"].to_string(),
        type_: caps.name("type").map(|m| m.as_str().trim().to_string()),
        default: caps.name("default").map(|m| m.as_str().trim().to_string()),
        description: caps
            .name("desc")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

fn parse_return(text: &str) -> Option<Return> {
    let caps = RETURN.captures(text)?;
    Some(Return {
        type_: caps.name("type").map(|m| m.as_str().trim().to_string()),
        description: caps
            .name("desc")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

/// `@example [language]` followed by code lines, dedented.
fn parse_example(lines: &[String]) -> Example {
    let language = lines
        .first()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .unwrap_or("scss")
        .to_string();

    let mut code: Vec<&str> = lines.iter().skip(1).map(String::as_str).collect();
    while code.last().is_some_and(|l| l.trim().is_empty()) {
        code.pop();
    }
    while code.first().is_some_and(|l| l.trim().is_empty()) {
        code.remove(0);
    }

    let indent = code
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let code = code
        .iter()
        .map(|l| l.get(indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    Example { language, code }
}

fn signature(line: &str) -> String {
    line.trim()
        .trim_end_matches('{')
        .trim_end()
        .trim_end_matches(';')
        .to_string()
}

fn strip_marker_space(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn joined(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
