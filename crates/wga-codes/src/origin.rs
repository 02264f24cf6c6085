use crate::token::CodeToken;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes known to belong to the insurance system outright.
const KNOWN_INS_CODES: [&str; 6] = ["RRU", "A15", "B22", "R03", "INS", "MIRACLE"];

/// Where a code appears to come from. Advisory only — a foreign-looking code
/// is never an error, it is an annotation so the operator can judge intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "origin")]
pub enum CodeOrigin {
    /// Nothing about the code suggests it belongs to another system.
    Internal,
    /// The code looks like an insurance-system (INS) code.
    Foreign { reason: ForeignReason },
}

impl CodeOrigin {
    pub fn is_foreign(&self) -> bool {
        matches!(self, CodeOrigin::Foreign { .. })
    }
}

/// Why a code was flagged as foreign. First matching rule wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForeignReason {
    KnownExternal,
    PatternMatch,
    SubstringMatch,
}

impl fmt::Display for ForeignReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForeignReason::KnownExternal => write!(f, "Known INS code"),
            ForeignReason::PatternMatch => write!(f, "INS pattern (Letter+2 digits)"),
            ForeignReason::SubstringMatch => write!(f, "Contains INS/MIRACLE"),
        }
    }
}

fn matches_ins_pattern(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 3
        && matches!(bytes[0], b'A' | b'B' | b'R')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
}

/// Heuristic code-origin detector.
///
/// Rules, first match wins: exact membership in the known INS list, then the
/// letter-plus-two-digits shape, then an INS/MIRACLE substring.
pub fn detect_origin(token: &CodeToken) -> CodeOrigin {
    let code = token.as_str();

    if KNOWN_INS_CODES.contains(&code) {
        return CodeOrigin::Foreign {
            reason: ForeignReason::KnownExternal,
        };
    }
    if matches_ins_pattern(code) {
        return CodeOrigin::Foreign {
            reason: ForeignReason::PatternMatch,
        };
    }
    if code.contains("INS") || code.contains("MIRACLE") {
        return CodeOrigin::Foreign {
            reason: ForeignReason::SubstringMatch,
        };
    }
    CodeOrigin::Internal
}
