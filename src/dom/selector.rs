// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS selector parsing and matching
//!
//! Covers what document queries in this crate actually use: tag, `#id`,
//! `.class`, attribute selectors, and comma-separated lists. Combinators
//! and pseudo-classes are out of scope.

use crate::error::{Error, Result};

use super::node::Node;

/// A parsed selector list (`a`, `a[href]`, `base[href], link[rel=canonical]`, ...)
#[derive(Debug, Clone)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

/// One compound selector: every part must match the same element
#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

/// Attribute selector
#[derive(Debug, Clone)]
struct AttrSelector {
    name: String,
    op: Option<AttrOp>,
    value: String,
}

/// Attribute selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
    /// [attr=value] - exact match
    Equals,
    /// [attr~=value] - word in space-separated list
    Includes,
    /// [attr^=value] - starts with
    Prefix,
    /// [attr$=value] - ends with
    Suffix,
    /// [attr*=value] - contains substring
    Substring,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(Error::selector(selector, "empty selector"));
        }

        let mut alternatives = Vec::new();
        for part in selector.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(Error::selector(selector, "empty alternative in list"));
            }
            alternatives.push(parse_compound(part)?);
        }

        Ok(Self { alternatives })
    }

    /// Check if an element node matches this selector
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        self.alternatives.iter().any(|c| c.matches(node))
    }
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if let Some(ref tag) = self.tag {
            match node.name() {
                Some(name) if name.eq_ignore_ascii_case(tag) => {}
                _ => return false,
            }
        }

        if let Some(ref id) = self.id {
            if node.attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let class_attr = node.attribute("class").unwrap_or_default();
            let have: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| have.contains(&c.as_str())) {
                return false;
            }
        }

        self.attrs.iter().all(|a| a.matches(node))
    }
}

impl AttrSelector {
    fn matches(&self, node: &Node) -> bool {
        let Some(actual) = node.attribute(&self.name) else {
            return false;
        };
        match self.op {
            None => true,
            Some(AttrOp::Equals) => actual == self.value,
            Some(AttrOp::Includes) => actual.split_whitespace().any(|w| w == self.value),
            Some(AttrOp::Prefix) => actual.starts_with(&self.value),
            Some(AttrOp::Suffix) => actual.ends_with(&self.value),
            Some(AttrOp::Substring) => actual.contains(&self.value),
        }
    }
}

fn parse_compound(input: &str) -> Result<Compound> {
    let mut compound = Compound::default();
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0;

    if input.contains(char::is_whitespace) {
        return Err(Error::selector(input, "combinators are not supported"));
    }

    // Leading tag name or universal selector
    if pos < chars.len() && chars[pos] != '#' && chars[pos] != '.' && chars[pos] != '[' {
        if chars[pos] == '*' {
            pos += 1;
        } else {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '-') {
                pos += 1;
            }
            if pos == start {
                return Err(Error::selector(input, "expected tag name"));
            }
            compound.tag = Some(chars[start..pos].iter().collect::<String>().to_ascii_lowercase());
        }
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                let (ident, next) = read_ident(&chars, pos + 1);
                if ident.is_empty() {
                    return Err(Error::selector(input, "empty id selector"));
                }
                compound.id = Some(ident);
                pos = next;
            }
            '.' => {
                let (ident, next) = read_ident(&chars, pos + 1);
                if ident.is_empty() {
                    return Err(Error::selector(input, "empty class selector"));
                }
                compound.classes.push(ident);
                pos = next;
            }
            '[' => {
                let close = chars[pos..]
                    .iter()
                    .position(|&c| c == ']')
                    .map(|offset| pos + offset)
                    .ok_or_else(|| Error::selector(input, "unterminated attribute selector"))?;
                let body: String = chars[pos + 1..close].iter().collect();
                compound.attrs.push(parse_attr_selector(input, &body)?);
                pos = close + 1;
            }
            c => {
                return Err(Error::selector(input, format!("unexpected '{}'", c)));
            }
        }
    }

    Ok(compound)
}

fn read_ident(chars: &[char], mut pos: usize) -> (String, usize) {
    let start = pos;
    while pos < chars.len()
        && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '-' || chars[pos] == '_')
    {
        pos += 1;
    }
    (chars[start..pos].iter().collect(), pos)
}

fn parse_attr_selector(selector: &str, body: &str) -> Result<AttrSelector> {
    let body = body.trim();
    if body.is_empty() {
        return Err(Error::selector(selector, "empty attribute selector"));
    }

    for (token, op) in [
        ("~=", AttrOp::Includes),
        ("^=", AttrOp::Prefix),
        ("$=", AttrOp::Suffix),
        ("*=", AttrOp::Substring),
        ("=", AttrOp::Equals),
    ] {
        if let Some(idx) = body.find(token) {
            let name = body[..idx].trim().to_ascii_lowercase();
            if name.is_empty() {
                return Err(Error::selector(selector, "missing attribute name"));
            }
            let raw = body[idx + token.len()..].trim();
            let value = raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| raw.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(raw)
                .to_string();
            return Ok(AttrSelector {
                name,
                op: Some(op),
                value,
            });
        }
    }

    Ok(AttrSelector {
        name: body.to_ascii_lowercase(),
        op: None,
        value: String::new(),
    })
}
