use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    // "Section" + whitespace + digits + optional uppercase suffix ("Section 120B")
    static ref SECTION_REGEX: Regex = Regex::new(r"Section\s+\d+[A-Z]*").unwrap();
}

/// A penal-code section reference such as `Section 378` or `Section 457A`.
///
/// Text is kept exactly as the model phrased it; nothing checks the number
/// against a table of real sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Citation(String);

impl Citation {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Citation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Citation {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Citation {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Pull every section citation out of raw model output, in order of
/// appearance. Duplicates are kept; no match is an empty list.
pub fn extract_citations(text: &str) -> Vec<Citation> {
    SECTION_REGEX
        .find_iter(text)
        .map(|m| Citation::new(m.as_str()))
        .collect()
}
