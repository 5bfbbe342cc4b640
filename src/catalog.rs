//! Recognised module codes and how timetable cells are matched against them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::error::{Result, ToolError};

/// How a module code is looked for inside a cell's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// The code must stand on its own: the characters on either side of the
    /// match may not be letters or digits.
    #[default]
    Token,
    /// Plain case-insensitive substring containment.
    Contains,
}

/// Set of module codes the extractor will report.
///
/// Codes are stored upper-cased with inner whitespace collapsed, so
/// `math  101` and `MATH 101` are the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCatalog {
    codes: BTreeSet<String>,
}

impl ModuleCatalog {
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|code| normalize(code.as_ref()))
            .filter(|code| !code.is_empty())
            .collect();
        Self { codes }
    }

    /// Loads a catalog from disk. A file whose content starts with `[` is read
    /// as a JSON array of strings; anything else as one code per line, with
    /// blank lines and `#` comments ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let catalog = if source.trim_start().starts_with('[') {
            let codes: Vec<String> = serde_json::from_str(&source)?;
            Self::from_codes(codes)
        } else {
            Self::from_codes(
                source
                    .lines()
                    .map(|line| line.split('#').next().unwrap_or_default()),
            )
        };

        if catalog.is_empty() {
            return Err(ToolError::InvalidCatalog(format!(
                "no module codes found in {}",
                path.display()
            )));
        }

        debug!(path = %path.display(), codes = catalog.len(), "loaded module catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Returns every catalogued code that occurs in `text`, in code order.
    pub fn matches(&self, text: &str, mode: MatchMode) -> Vec<&str> {
        let haystack = normalize(text);
        self.codes
            .iter()
            .filter(|code| match mode {
                MatchMode::Contains => haystack.contains(code.as_str()),
                MatchMode::Token => contains_token(&haystack, code),
            })
            .map(String::as_str)
            .collect()
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn contains_token(haystack: &str, code: &str) -> bool {
    haystack.match_indices(code).any(|(index, found)| {
        let before = haystack[..index].chars().next_back();
        let after = haystack[index + found.len()..].chars().next();
        !before.is_some_and(|ch| ch.is_ascii_alphanumeric())
            && !after.is_some_and(|ch| ch.is_ascii_alphanumeric())
    })
}
