//! wga-codes
//!
//! Canonical access-code tokens and the pure text-level stages of the
//! comparison pipeline:
//!
//! - tokenizer/normalizer: raw pasted text -> deduplicated canonical tokens
//! - classifier: token -> semantic category (shape + literal sets)
//! - origin detector: advisory flag for codes that look like they belong to
//!   the insurance system rather than to us
//!
//! Deterministic, pure logic. No IO. Invalid or empty input degrades to an
//! empty token set, never an error.

mod classify;
mod normalize;
mod origin;
mod token;

pub use classify::{
    classify, is_branch_bundle_shape, CodeCategory, DEFAULT_FILE_MARKER, FUNCTION_MARKERS,
    REPORTING_BASES, REPORTING_REGIONS, SECURITY_CONTEXT_MARKERS,
};
pub use normalize::{count_codes, normalize, NormalizeOptions, MODIFY_PREFIX};
pub use origin::{detect_origin, CodeOrigin, ForeignReason};
pub use token::{CodeToken, TokenSet};
