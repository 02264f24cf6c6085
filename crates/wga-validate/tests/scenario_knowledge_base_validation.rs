use wga_codes::{normalize, CodeToken, NormalizeOptions, TokenSet};
use wga_policy::{Platform, PolicyRegistry};
use wga_validate::{validate, ValidationInput, Violation};

fn tokens(raw: &str) -> TokenSet {
    normalize(raw, NormalizeOptions::default())
}

fn tok(s: &str) -> CodeToken {
    CodeToken::new(s).unwrap()
}

#[test]
fn scenario_croesus_requires_its_fixed_pair_regardless_of_role() {
    let registry = PolicyRegistry::builtin().unwrap();
    let added = tokens("CRWEB SOMECODE");
    let report = validate(
        &registry,
        &ValidationInput {
            added: &added,
            requested: None,
            role: None,
            platform: Platform::Croesus,
        },
    );
    assert_eq!(
        report.error_messages(),
        vec!["Missing required platform code: CRINQ"]
    );

    // Role selection changes nothing on a knowledge-base platform.
    let with_role = validate(
        &registry,
        &ValidationInput {
            added: &added,
            requested: None,
            role: Some("SA PROFILE"),
            platform: Platform::Croesus,
        },
    );
    assert_eq!(report, with_role);
}

#[test]
fn scenario_sis_margin_pairing_satisfied() {
    let registry = PolicyRegistry::builtin().unwrap();
    let added = tokens("*A311FC 311 *SISFUNC");
    let report = validate(
        &registry,
        &ValidationInput {
            added: &added,
            requested: None,
            role: None,
            platform: Platform::Sis,
        },
    );
    assert!(report.is_clean(), "errors: {:?}", report.error_messages());
    assert_eq!(report.details.margin_pairs.len(), 1);
    assert!(report.details.margin_pairs[0].satisfied);
}

#[test]
fn scenario_sis_missing_margin_equivalent_names_the_pairing() {
    let registry = PolicyRegistry::builtin().unwrap();
    let added = tokens("*A311FC *SISFUNC");
    let report = validate(
        &registry,
        &ValidationInput {
            added: &added,
            requested: None,
            role: None,
            platform: Platform::Sis,
        },
    );
    assert_eq!(
        report.error_messages(),
        vec!["Branch bundle *A311FC has no matching margin code 311"]
    );
    assert!(report.errors.contains(&Violation::MissingMarginEquivalent {
        bundle: tok("*A311FC"),
        margin: tok("311"),
    }));
}

#[test]
fn scenario_sis_checks_every_bundle_in_order() {
    let registry = PolicyRegistry::builtin().unwrap();
    let added = tokens("*A311FC *A445FC 445 *SISFUNC");
    let report = validate(
        &registry,
        &ValidationInput {
            added: &added,
            requested: None,
            role: None,
            platform: Platform::Sis,
        },
    );
    assert_eq!(
        report.error_messages(),
        vec!["Branch bundle *A311FC has no matching margin code 311"]
    );
    assert_eq!(report.details.margin_pairs.len(), 2);
}

#[test]
fn scenario_requested_generic_codes_must_all_be_added() {
    let registry = PolicyRegistry::builtin().unwrap();
    let requested = tokens("CODE1 CODE2 WGSTD");
    let added = tokens("CODE1 CRWEB CRINQ");
    let report = validate(
        &registry,
        &ValidationInput {
            added: &added,
            requested: Some(&requested),
            role: None,
            platform: Platform::Croesus,
        },
    );
    // WGSTD is structural (reporting base), not part of the cross-check.
    assert_eq!(
        report.error_messages(),
        vec!["Requested code CODE2 was not added"]
    );
}
