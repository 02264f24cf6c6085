use crate::token::{CodeToken, TokenSet};

/// Prefix carried by codes exported from the monthly Excel report.
pub const MODIFY_PREFIX: &str = "RRRR=";

/// Knobs for one normalization pass.
///
/// `branch_rewrite` is decided by the caller from role + platform (see the
/// policy registry); the tokenizer itself stays policy-free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Strip a leading `RRRR=` (case-insensitive) from each piece.
    pub strip_modify_prefix: bool,
    /// Rewrite bare 3-digit pieces to the branch-bundle shape `*A<nnn>FC`.
    pub branch_rewrite: bool,
}

fn is_three_digits(piece: &str) -> bool {
    piece.len() == 3 && piece.bytes().all(|b| b.is_ascii_digit())
}

fn is_pure_numeric(piece: &str) -> bool {
    !piece.is_empty() && piece.bytes().all(|b| b.is_ascii_digit())
}

/// Ignore rules, applied after canonicalization.
///
/// - `SNON<digits>`: test-system placeholders
/// - `V0<digits>...`: version stamps
/// - anything containing `@`: pasted email addresses
/// - pure numeric pieces, except exactly-3-digit branch codes which stay
fn is_ignored(code: &str) -> bool {
    if code.is_empty() {
        return true;
    }
    if let Some(rest) = code.strip_prefix("SNON") {
        if is_pure_numeric(rest) {
            return true;
        }
    }
    if let Some(rest) = code.strip_prefix("V0") {
        if rest.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
            return true;
        }
    }
    if code.contains('@') {
        return true;
    }
    if is_pure_numeric(code) && !is_three_digits(code) {
        return true;
    }
    false
}

/// Turn raw pasted text into a deduplicated, order-preserving canonical
/// token set.
///
/// Pieces are split on any run of whitespace, commas, or semicolons, then
/// trimmed, prefix-stripped, upper-cased, branch-rewritten, filtered through
/// the ignore rules, and deduplicated. Empty or garbage input yields an
/// empty set; this function cannot fail.
pub fn normalize(raw: &str, opts: NormalizeOptions) -> TokenSet {
    let mut out = TokenSet::new();

    for piece in raw.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        let mut piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        if opts.strip_modify_prefix
            && piece.len() >= MODIFY_PREFIX.len()
            && piece.as_bytes()[..MODIFY_PREFIX.len()]
                .eq_ignore_ascii_case(MODIFY_PREFIX.as_bytes())
        {
            // Matched prefix is pure ASCII, so the byte offset is a char
            // boundary.
            piece = &piece[MODIFY_PREFIX.len()..];
        }

        let mut code = piece.to_uppercase();

        if opts.branch_rewrite && is_three_digits(&code) {
            code = format!("*A{code}FC");
        }

        if is_ignored(&code) {
            continue;
        }

        if let Some(token) = CodeToken::new(&code) {
            out.insert(token);
        }
    }

    out
}

/// Number of canonical codes in a blob, for per-field counters.
pub fn count_codes(raw: &str) -> usize {
    normalize(raw, NormalizeOptions::default()).len()
}
