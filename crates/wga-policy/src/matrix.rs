//! The builtin role matrix, written as declarative specs and converted into
//! validated [`RolePolicy`] records by the registry.

use crate::platform::Platform;
use crate::policy::{
    ChequePolicy, MarkerPair, PermissionLevel, PermissionLevels, PolicyNote, ReportingPolicy,
    RolePolicy,
};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use wga_codes::CodeToken;

/// Roles whose raw 3-digit branch numbers are rewritten to branch bundles
/// during normalization. Registry validation asserts each member exists in
/// the matrix and allows branch bundles.
pub const BRANCH_CODE_ELIGIBLE_ROLES: [&str; 6] = [
    "BA & CAGE INQUIRY",
    "BA/ABM/BM and Backup",
    "Branch Assistant & Cage Profile",
    "INQUIRY ONLY - BRANCH ASSISTANT AND CAGE PROFILE - Secondary Role",
    "BA/ABM/BM ACWS INQUIRY",
    "BA ABM BM AND BACKUP PROFILE",
];

const BRANCH_RPTS_NOTE: &str = "Add WGBRANCH in RPTS";

/// Declarative shape of one matrix row. `levels` uses -1 for not-applicable.
pub(crate) struct RoleSpec {
    pub name: &'static str,
    pub allow_branch_bundle: bool,
    pub ism_func: Option<&'static str>,
    pub ism_scon: Option<&'static str>,
    pub bps_pac: Option<&'static str>,
    /// Branch-family roles pin WGBRANCH as the required RPTS base and carry
    /// the matching matrix note.
    pub pin_branch_base: bool,
    pub cheque_allowed: bool,
    pub levels: [i8; 9],
}

fn tok(s: &str) -> Result<CodeToken> {
    CodeToken::new(s).with_context(|| format!("invalid code literal {s:?} in role matrix"))
}

fn opt_tok(s: Option<&str>) -> Result<Option<CodeToken>> {
    s.map(tok).transpose()
}

impl RoleSpec {
    pub(crate) fn build(&self) -> Result<RolePolicy> {
        let mut markers = BTreeMap::new();
        markers.insert(
            Platform::Ism,
            MarkerPair {
                function: opt_tok(self.ism_func)?,
                security_context: opt_tok(self.ism_scon)?,
            },
        );
        markers.insert(
            Platform::Bps,
            MarkerPair {
                function: opt_tok(self.bps_pac)?,
                security_context: None,
            },
        );

        let (notes, required_base) = if self.pin_branch_base {
            let companion = tok("WGBRANCH")?;
            (
                vec![PolicyNote {
                    text: BRANCH_RPTS_NOTE.to_string(),
                    companion: Some(companion.clone()),
                }],
                Some(companion),
            )
        } else {
            (Vec::new(), None)
        };

        let levels = self.levels.map(|n| {
            if n < 0 {
                PermissionLevel::NotApplicable
            } else {
                PermissionLevel::Level(n as u8)
            }
        });

        Ok(RolePolicy {
            name: self.name.to_string(),
            allow_branch_bundle: self.allow_branch_bundle,
            markers,
            default_file: tok("*WGDFAR")?,
            default_margin: tok("*WGDFAR")?,
            reporting: ReportingPolicy {
                notes,
                base_required: true,
                region_required: true,
                required_base,
            },
            cheque_writing: if self.cheque_allowed {
                ChequePolicy::branch_default()
            } else {
                ChequePolicy::not_allowed()
            },
            permission_levels: PermissionLevels(levels),
        })
    }
}

pub(crate) const ROLE_SPECS: [RoleSpec; 11] = [
    RoleSpec {
        name: "BA & CAGE INQUIRY",
        allow_branch_bundle: true,
        ism_func: Some("*ICAGEFUNC"),
        ism_scon: Some("*SICAGESCON"),
        bps_pac: Some("*ICAGEPAC"),
        pin_branch_base: true,
        cheque_allowed: false,
        levels: [2, -1, -1, -1, -1, -1, -1, -1, 1],
    },
    RoleSpec {
        name: "BA/ABM/BM and Backup",
        allow_branch_bundle: true,
        ism_func: Some("*BRMGTFUNC"),
        ism_scon: Some("*SBRMGTSCON"),
        bps_pac: Some("*BRMGTPAC"),
        pin_branch_base: true,
        cheque_allowed: true,
        levels: [3, 2, 2, 3, 2, 2, 2, -1, 3],
    },
    RoleSpec {
        name: "Branch Assistant & Cage Profile",
        allow_branch_bundle: true,
        ism_func: Some("*CAGEFUNC"),
        ism_scon: Some("*SCAGESCON"),
        bps_pac: Some("*CAGEPAC"),
        pin_branch_base: true,
        cheque_allowed: true,
        levels: [3, 1, 1, 3, 1, 2, 1, -1, 2],
    },
    RoleSpec {
        name: "IA PROFILE",
        allow_branch_bundle: false,
        ism_func: Some("*IAFUNC"),
        ism_scon: Some("*IASCON"),
        bps_pac: Some("*IAPAC"),
        pin_branch_base: false,
        cheque_allowed: false,
        levels: [2, 3, 2, -1, -1, 1, 2, 3, 2],
    },
    RoleSpec {
        name: "ASSOCIATE IA PROFILE",
        allow_branch_bundle: false,
        ism_func: Some("*AIAFUNC"),
        ism_scon: Some("*AIASCON"),
        bps_pac: Some("*AIAPAC"),
        pin_branch_base: false,
        cheque_allowed: true,
        levels: [2, 2, 1, 1, -1, 1, 2, 2, 2],
    },
    RoleSpec {
        name: "SA WITH TRANSIT & SYND. PROFILE",
        allow_branch_bundle: false,
        ism_func: Some("*SATRSYFUNC"),
        ism_scon: Some("*SATRSYSCON"),
        bps_pac: Some("*SATRSYPAC"),
        pin_branch_base: false,
        cheque_allowed: true,
        levels: [2, 1, 1, 1, 1, 2, 1, 1, 1],
    },
    RoleSpec {
        name: "SA WITH SYNDICATE PROFILE",
        allow_branch_bundle: false,
        ism_func: Some("*SASYNBFUNC"),
        ism_scon: Some("*SASYNBSCON"),
        bps_pac: Some("*SASYNBPAC"),
        pin_branch_base: false,
        cheque_allowed: true,
        levels: [2, 1, 1, 1, -1, 1, 1, 1, 1],
    },
    RoleSpec {
        name: "SA PROFILE",
        allow_branch_bundle: false,
        ism_func: Some("*SAFUNC"),
        ism_scon: Some("*SASCON"),
        bps_pac: Some("*SAPAC"),
        pin_branch_base: false,
        cheque_allowed: true,
        levels: [2, 1, 1, 1, -1, 1, 1, 1, 1],
    },
    RoleSpec {
        name: "INQUIRY ONLY - BRANCH ASSISTANT AND CAGE PROFILE - Secondary Role",
        allow_branch_bundle: true,
        ism_func: None,
        ism_scon: None,
        bps_pac: None,
        pin_branch_base: true,
        cheque_allowed: false,
        levels: [1, -1, -1, -1, -1, -1, -1, -1, 1],
    },
    RoleSpec {
        name: "BA/ABM/BM ACWS INQUIRY",
        allow_branch_bundle: true,
        ism_func: None,
        ism_scon: None,
        bps_pac: None,
        pin_branch_base: true,
        cheque_allowed: false,
        levels: [1, -1, -1, -1, -1, -1, -1, -1, 1],
    },
    RoleSpec {
        name: "BA ABM BM AND BACKUP PROFILE",
        allow_branch_bundle: true,
        ism_func: Some("*BRMGTFUNC"),
        ism_scon: Some("*SBRMGTSCON"),
        bps_pac: Some("*BRMGTPAC"),
        pin_branch_base: true,
        cheque_allowed: true,
        levels: [3, 2, 2, 3, 2, 2, 2, -1, 3],
    },
];
