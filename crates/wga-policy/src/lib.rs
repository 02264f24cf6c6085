//! wga-policy
//!
//! The policy configuration table: per-role access rules (the "role matrix")
//! and per-platform validation strategy descriptors, loaded once into an
//! immutable [`PolicyRegistry`] that is validated for internal consistency
//! at construction time.
//!
//! Invariants enforced at load:
//! - exactly one policy per role name
//! - every marker referenced by policy is classifiable by `wga-codes`
//!   (classification and validation must never disagree)
//! - every branch-code-eligible role exists and allows branch bundles
//!
//! No policy is ever mutated after the registry is built.

mod matrix;
mod platform;
mod policy;
mod registry;

pub use matrix::BRANCH_CODE_ELIGIBLE_ROLES;
pub use platform::{Platform, PlatformDescriptor, UnknownPlatform, ValidationStrategy};
pub use policy::{
    ChequePolicy, MarkerPair, PermissionLevel, PermissionLevels, PolicyNote, ReportingPolicy,
    RolePolicy, PERMISSION_AXES,
};
pub use registry::PolicyRegistry;
