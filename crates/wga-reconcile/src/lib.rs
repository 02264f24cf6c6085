//! wga-reconcile
//!
//! The reconciliation engine: the four comparison modes over canonical token
//! sets.
//!
//! - **Add**: requested vs added, with identity/structural partition and the
//!   policy-required split driven by validator details
//! - **Modify**: deleted vs re-added vs requested, validation on the final
//!   re-added state
//! - **Monthly**: export (RRRR=-stripped) vs tracker, no policy involved
//! - **BranchCheck**: codes-to-check against known branch codes
//!
//! Invariant carried through Add mode: a token flagged as the wrong
//! reporting base is never also counted as policy-required or extra.
//!
//! Deterministic, pure logic. No IO. Stateless per invocation.

mod engine;
mod types;

pub use engine::{check_branch_duplicates, compare_add, compare_modify, compare_monthly};
pub use types::{
    AddOutcome, AnnotatedCode, BranchCheckOutcome, ModifyOutcome, ModifyUnsupported,
    MonthlyOutcome, MonthlyTotals, Summary,
};
