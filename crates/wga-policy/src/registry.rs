use crate::matrix::{BRANCH_CODE_ELIGIBLE_ROLES, ROLE_SPECS};
use crate::platform::{Platform, ValidationStrategy};
use crate::policy::RolePolicy;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use wga_codes::{classify, CodeCategory, CodeToken};

/// Immutable registry of role policies, validated for internal consistency
/// at construction. Load once at process start; read-only afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, RolePolicy>,
}

impl PolicyRegistry {
    /// Build the builtin role matrix and verify it.
    pub fn builtin() -> Result<Self> {
        let mut policies = BTreeMap::new();
        for spec in &ROLE_SPECS {
            let policy = spec.build()?;
            if policies.insert(policy.name.clone(), policy).is_some() {
                bail!("duplicate role policy: {:?}", spec.name);
            }
        }
        let registry = Self { policies };
        registry.verify_consistency()?;
        Ok(registry)
    }

    /// Build a registry from explicit policies (tests, future file loading).
    /// The same consistency checks apply.
    pub fn from_policies(list: Vec<RolePolicy>) -> Result<Self> {
        let mut policies = BTreeMap::new();
        for policy in list {
            let name = policy.name.clone();
            if policies.insert(name.clone(), policy).is_some() {
                bail!("duplicate role policy: {name:?}");
            }
        }
        let registry = Self { policies };
        registry.verify_consistency()?;
        Ok(registry)
    }

    /// Every marker referenced anywhere in policy must be classifiable, or
    /// validation and classification would silently disagree.
    fn verify_consistency(&self) -> Result<()> {
        for policy in self.policies.values() {
            let role = &policy.name;

            for (platform, pair) in &policy.markers {
                if let Some(func) = &pair.function {
                    expect_category(
                        func,
                        CodeCategory::FunctionMarker,
                        &format!("{role} / {platform} function marker"),
                    )?;
                }
                if let Some(scon) = &pair.security_context {
                    expect_category(
                        scon,
                        CodeCategory::SecurityContextMarker,
                        &format!("{role} / {platform} security-context marker"),
                    )?;
                }
            }

            expect_category(
                &policy.default_file,
                CodeCategory::DefaultFile,
                &format!("{role} default file marker"),
            )?;
            expect_category(
                &policy.default_margin,
                CodeCategory::DefaultFile,
                &format!("{role} default margin marker"),
            )?;

            if let Some(base) = &policy.reporting.required_base {
                expect_category(
                    base,
                    CodeCategory::ReportingBase,
                    &format!("{role} pinned reporting base"),
                )?;
            }
            for note in &policy.reporting.notes {
                if let Some(companion) = &note.companion {
                    if classify(companion) == CodeCategory::GenericAccessCode {
                        bail!(
                            "{role} note companion {companion} is not a classifiable policy code"
                        );
                    }
                }
            }
        }

        for role in BRANCH_CODE_ELIGIBLE_ROLES {
            let policy = self
                .policies
                .get(role)
                .with_context(|| format!("branch-code-eligible role {role:?} has no policy"))?;
            if !policy.allow_branch_bundle {
                bail!("branch-code-eligible role {role:?} does not allow branch bundles");
            }
        }

        for platform in Platform::ALL {
            if let ValidationStrategy::KnowledgeBase {
                required_markers, ..
            } = platform.descriptor().strategy
            {
                for marker in required_markers {
                    let token = CodeToken::new(marker)
                        .with_context(|| format!("{platform} marker {marker:?} is not canonical"))?;
                    expect_category(
                        &token,
                        CodeCategory::FunctionMarker,
                        &format!("{platform} required marker"),
                    )?;
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, role: &str) -> Option<&RolePolicy> {
        self.policies.get(role)
    }

    /// All policies, sorted by role name (deterministic iteration).
    pub fn roles(&self) -> impl Iterator<Item = &RolePolicy> {
        self.policies.values()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Whether normalization should rewrite bare 3-digit codes to branch
    /// bundles for this role/platform combination.
    pub fn branch_rewrite_applies(&self, role: Option<&str>, platform: Platform) -> bool {
        platform.descriptor().branch_rewrite
            && role.is_some_and(|r| BRANCH_CODE_ELIGIBLE_ROLES.contains(&r))
    }

    /// Canonical JSON snapshot of the whole table. Key order is stable
    /// (BTreeMap throughout), so the output is byte-stable across runs.
    pub fn canonical_json(&self) -> Result<String> {
        serde_json::to_string(&self.policies).context("serialize policy registry")
    }

    /// SHA-256 of the canonical snapshot, hex-encoded. Lets operators pin
    /// the matrix version a comparison ran against.
    pub fn content_hash(&self) -> Result<String> {
        let json = self.canonical_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

fn expect_category(token: &CodeToken, want: CodeCategory, what: &str) -> Result<()> {
    let got = classify(token);
    if got != want {
        bail!("{what}: {token} classifies as {got:?}, expected {want:?}");
    }
    Ok(())
}
