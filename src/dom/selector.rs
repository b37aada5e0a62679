//! Minimal CSS selector support for document queries.
//!
//! Only compound selectors made of a type, an id and classes are supported
//! (`input`, `.tagfield`, `#labels`, `input.tagfield#labels`), optionally
//! grouped with commas. Combinators and attribute selectors are rejected.

use std::fmt;

use thiserror::Error;

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unsupported selector syntax '{0}'")]
    Unsupported(String),

    #[error("missing name after '{0}'")]
    MissingName(char),
}

/// A simple compound selector: `tag#id.class1.class2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut compound = Compound::default();
        let mut chars = input.char_indices().peekable();

        // Leading type selector (or `*`)
        let tag_end = input
            .find(|c: char| c == '.' || c == '#')
            .unwrap_or(input.len());
        let tag = &input[..tag_end];
        if !tag.is_empty() && tag != "*" {
            if !tag.chars().all(is_name_char) {
                return Err(SelectorError::Unsupported(input.to_string()));
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        while chars.peek().is_some_and(|(i, _)| *i < tag_end) {
            chars.next();
        }

        while let Some((_, marker)) = chars.next() {
            let mut name = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c == '.' || c == '#' {
                    break;
                }
                if !is_name_char(c) {
                    return Err(SelectorError::Unsupported(input.to_string()));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SelectorError::MissingName(marker));
            }
            match marker {
                '.' => compound.classes.push(name),
                _ => compound.id = Some(name),
            }
        }

        Ok(compound)
    }

    fn matches(&self, tag: &str, id: Option<&str>, class: Option<&str>) -> bool {
        if let Some(want) = &self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if id != Some(want.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|want| {
            class
                .map(|c| c.split_ascii_whitespace().any(|t| t == want))
                .unwrap_or(false)
        })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// A parsed selector group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string such as `".tagfield, input#labels"`.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let groups = trimmed
            .split(',')
            .map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    return Err(SelectorError::Empty);
                }
                if part.contains(char::is_whitespace) {
                    return Err(SelectorError::Unsupported(part.to_string()));
                }
                Compound::parse(part)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: trimmed.to_string(),
            groups,
        })
    }

    /// Whether an element with the given tag, id and class attribute matches.
    pub fn matches(&self, tag: &str, id: Option<&str>, class: Option<&str>) -> bool {
        self.groups.iter().any(|g| g.matches(tag, id, class))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
