use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Canonical access-code token.
///
/// Invariants: non-empty, upper-case, no whitespace. Tokens are created by
/// normalization (or by [`CodeToken::new`] on already-clean literals) and are
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeToken(String);

impl CodeToken {
    /// Canonicalize a single raw piece into a token.
    ///
    /// Trims and upper-cases. Returns `None` when the piece is empty after
    /// trimming or still contains interior whitespace (a piece like that is
    /// not a code, it is un-split input).
    pub fn new(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(s.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated token set, first-seen order preserved for display.
///
/// Order is cosmetic only: matching and set arithmetic treat this as a set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CodeToken>", into = "Vec<CodeToken>")]
pub struct TokenSet {
    order: Vec<CodeToken>,
    seen: BTreeSet<CodeToken>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token; returns `false` if it was already present.
    pub fn insert(&mut self, token: CodeToken) -> bool {
        if self.seen.insert(token.clone()) {
            self.order.push(token);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, token: &CodeToken) -> bool {
        self.seen.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeToken> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tokens of `self` also present in `other`, in `self` order.
    pub fn intersect(&self, other: &TokenSet) -> Vec<CodeToken> {
        self.iter().filter(|t| other.contains(t)).cloned().collect()
    }

    /// Tokens of `self` absent from `other`, in `self` order.
    pub fn minus(&self, other: &TokenSet) -> Vec<CodeToken> {
        self.iter()
            .filter(|t| !other.contains(t))
            .cloned()
            .collect()
    }
}

impl FromIterator<CodeToken> for TokenSet {
    fn from_iter<I: IntoIterator<Item = CodeToken>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl From<Vec<CodeToken>> for TokenSet {
    fn from(tokens: Vec<CodeToken>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<TokenSet> for Vec<CodeToken> {
    fn from(set: TokenSet) -> Self {
        set.order
    }
}
