//! Keyword policy supplied by the caller.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered list of case-folded terms a resume is scored against.
///
/// Entries are kept as given (duplicates included); each one counts toward
/// the total. The set is built once per policy and reused across resumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a set from raw entries. Each entry is trimmed and case-folded;
    /// blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_string())
                .filter(|k| !k.is_empty())
                .map(|k| fold_case(&k))
                .collect(),
        }
    }

    /// Parse a comma-separated list such as `"react, node,mysql"`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

/// Full Unicode case folding, so `"Straße"` and `"STRASSE"` compare equal.
pub(crate) fn fold_case(text: &str) -> String {
    caseless::default_case_fold_str(text)
}

impl Serialize for KeywordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.keywords.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeywordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
