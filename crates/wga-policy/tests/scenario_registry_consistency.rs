use wga_codes::{classify, CodeCategory};
use wga_policy::{
    Platform, PolicyRegistry, ValidationStrategy, BRANCH_CODE_ELIGIBLE_ROLES,
};

#[test]
fn scenario_builtin_registry_loads_and_verifies() {
    let registry = PolicyRegistry::builtin().expect("builtin matrix must verify");
    assert_eq!(registry.len(), 11);
}

#[test]
fn scenario_every_policy_marker_is_classifiable() {
    // The registry enforces this at load; assert it independently so a
    // loosened load check cannot slip through unnoticed.
    let registry = PolicyRegistry::builtin().unwrap();
    for policy in registry.roles() {
        for pair in policy.markers.values() {
            if let Some(func) = &pair.function {
                assert_eq!(classify(func), CodeCategory::FunctionMarker, "{func}");
            }
            if let Some(scon) = &pair.security_context {
                assert_eq!(classify(scon), CodeCategory::SecurityContextMarker, "{scon}");
            }
        }
        assert_eq!(classify(&policy.default_file), CodeCategory::DefaultFile);
        if let Some(base) = &policy.reporting.required_base {
            assert_eq!(classify(base), CodeCategory::ReportingBase, "{base}");
        }
    }
}

#[test]
fn scenario_platform_required_markers_are_classifiable() {
    for platform in Platform::ALL {
        if let ValidationStrategy::KnowledgeBase {
            required_markers, ..
        } = platform.descriptor().strategy
        {
            for marker in required_markers {
                let token = wga_codes::CodeToken::new(marker).unwrap();
                assert_eq!(classify(&token), CodeCategory::FunctionMarker, "{marker}");
            }
        }
    }
}

#[test]
fn scenario_branch_eligible_roles_all_allow_bundles() {
    let registry = PolicyRegistry::builtin().unwrap();
    for role in BRANCH_CODE_ELIGIBLE_ROLES {
        let policy = registry.get(role).expect(role);
        assert!(policy.allow_branch_bundle, "{role}");
    }
}

#[test]
fn scenario_branch_rewrite_only_on_role_matrix_platforms_for_eligible_roles() {
    let registry = PolicyRegistry::builtin().unwrap();
    let cage = Some("BA & CAGE INQUIRY");
    let ia = Some("IA PROFILE");

    assert!(registry.branch_rewrite_applies(cage, Platform::Ism));
    assert!(registry.branch_rewrite_applies(cage, Platform::Bps));
    assert!(!registry.branch_rewrite_applies(cage, Platform::Croesus));
    assert!(!registry.branch_rewrite_applies(cage, Platform::Sis));
    assert!(!registry.branch_rewrite_applies(ia, Platform::Ism));
    assert!(!registry.branch_rewrite_applies(None, Platform::Ism));
}

#[test]
fn scenario_duplicate_role_names_are_rejected() {
    let registry = PolicyRegistry::builtin().unwrap();
    let policy = registry.get("SA PROFILE").unwrap().clone();
    let err = PolicyRegistry::from_policies(vec![policy.clone(), policy]).unwrap_err();
    assert!(err.to_string().contains("duplicate role policy"));
}

#[test]
fn scenario_content_hash_is_stable_across_loads() {
    let a = PolicyRegistry::builtin().unwrap().content_hash().unwrap();
    let b = PolicyRegistry::builtin().unwrap().content_hash().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}
