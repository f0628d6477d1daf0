use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Legislature token as listed in the selector (a Roman numeral on the site)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Legislature(String);

impl Legislature {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Legislature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Legislature {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Id of one entity record
///
/// Attendance records also carry the plenary session number. Equality,
/// hashing and ordering only look at `token`; tokens compare by numeric value
/// and non-numeric tokens sort after every numeric one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawId", into = "RawId")]
pub struct EntityId {
    token: String,
    number: Option<String>,
}

/// On-disk layout: a bare string, or `[token, number]` for attendance
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Token(String),
    Pair(String, String),
}

impl From<RawId> for EntityId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Token(token) => EntityId::new(token),
            RawId::Pair(token, number) => EntityId::with_number(token, number),
        }
    }
}

impl From<EntityId> for RawId {
    fn from(id: EntityId) -> Self {
        match id.number {
            Some(number) => RawId::Pair(id.token, number),
            None => RawId::Token(id.token),
        }
    }
}

impl EntityId {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            number: None,
        }
    }

    pub fn with_number(token: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            number: Some(number.into()),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    fn numeric_token(&self) -> Option<u64> {
        self.token.trim().parse().ok()
    }

    /// Output line: `token` or `token,number`
    pub fn to_line(&self) -> String {
        match &self.number {
            Some(number) => format!("{},{}", self.token, number),
            None => self.token.clone(),
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl Ord for EntityId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_token(), other.numeric_token()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.token.cmp(&other.token)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.token.cmp(&other.token),
        }
    }
}

impl PartialOrd for EntityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sorts_numerically_not_lexicographically() {
        let mut ids: Vec<EntityId> = ["33", "4", "200"].into_iter().map(EntityId::new).collect();
        ids.sort();
        let tokens: Vec<&str> = ids.iter().map(|id| id.token()).collect();
        assert_eq!(tokens, vec!["4", "33", "200"]);
    }

    #[test]
    fn test_non_numeric_tokens_sort_last() {
        let mut ids: Vec<EntityId> = ["abc", "10", "9"].into_iter().map(EntityId::new).collect();
        ids.sort();
        let tokens: Vec<&str> = ids.iter().map(|id| id.token()).collect();
        assert_eq!(tokens, vec!["9", "10", "abc"]);
    }

    #[test]
    fn test_identity_is_the_token() {
        let mut set = HashSet::new();
        set.insert(EntityId::with_number("10", "5"));
        set.insert(EntityId::with_number("10", "6"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serialized_layout() {
        let plain = serde_json::to_string(&EntityId::new("42")).unwrap();
        let paired = serde_json::to_string(&EntityId::with_number("42", "7")).unwrap();
        assert_eq!(plain, r#""42""#);
        assert_eq!(paired, r#"["42","7"]"#);

        let back: EntityId = serde_json::from_str(&paired).unwrap();
        assert_eq!(back.number(), Some("7"));
    }

    #[test]
    fn test_to_line() {
        assert_eq!(EntityId::new("3").to_line(), "3");
        assert_eq!(EntityId::with_number("3", "12").to_line(), "3,12");
    }
}
