//! wga-validate
//!
//! The policy validator. Given a canonical token set, an optional role, and
//! a target platform, evaluates the policy configuration table and produces
//! an ordered list of violations (errors) and advisories (warnings) plus a
//! structured detail record.
//!
//! Architectural decisions:
//! - Errors are returned in the order checks run; same input always yields
//!   byte-identical message ordering.
//! - Warnings never block success; only errors represent policy violations.
//! - Unknown or absent role on a role-matrix platform is a silent no-op
//!   producing an empty report (observed production behavior, pinned by
//!   scenario test).
//!
//! Deterministic, pure logic. No IO.

mod engine;
mod types;

pub use engine::{validate, ValidationInput};
pub use types::{
    Advisory, BranchBundleDetails, MarginPairing, MarkerDetails, ReportingDetails,
    ValidationDetails, ValidationReport, Violation,
};
