use crate::token::CodeToken;
use serde::{Deserialize, Serialize};

/// Semantic category of a code token. Derived purely from the token's text,
/// recomputed on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeCategory {
    BranchBundle,
    BranchNumeric,
    ReportingBase,
    ReportingRegion,
    FunctionMarker,
    SecurityContextMarker,
    DefaultFile,
    GenericAccessCode,
}

impl CodeCategory {
    /// Identity-bearing categories name a concrete grant that must line up
    /// between requested and added; everything else is structural.
    pub fn is_identity_bearing(&self) -> bool {
        matches!(
            self,
            CodeCategory::GenericAccessCode
                | CodeCategory::BranchBundle
                | CodeCategory::BranchNumeric
        )
    }
}

/// RPTS base group codes. Exactly one is expected per profile.
pub const REPORTING_BASES: [&str; 4] = ["WGSTD", "WGCOMMSTD", "WGBRANCH", "WGCOMPL"];

/// RPTS regional group codes. REGALL is the catch-all region.
pub const REPORTING_REGIONS: [&str; 7] =
    ["REGA", "REGB", "REGC", "REGD", "REGE", "REGF", "REGALL"];

/// Function-grant markers across all platforms: the ISM FUNC family, the BPS
/// combined profile (PAC) family, and the CROESUS/SIS platform codes.
///
/// Kept in sync with the role matrix by the policy registry's load-time
/// consistency check.
pub const FUNCTION_MARKERS: [&str; 19] = [
    "*SAFUNC",
    "*IAFUNC",
    "*AIAFUNC",
    "*SATRSYFUNC",
    "*SASYNBFUNC",
    "*BRMGTFUNC",
    "*CAGEFUNC",
    "*ICAGEFUNC",
    "*SAPAC",
    "*IAPAC",
    "*AIAPAC",
    "*SATRSYPAC",
    "*SASYNBPAC",
    "*BRMGTPAC",
    "*CAGEPAC",
    "*ICAGEPAC",
    "CRWEB",
    "CRINQ",
    "*SISFUNC",
];

/// Security-context (SCON) markers paired with the ISM FUNC family.
/// `*CAGESCON` is a legacy alias still seen on long-lived profiles.
pub const SECURITY_CONTEXT_MARKERS: [&str; 9] = [
    "*SASCON",
    "*IASCON",
    "*AIASCON",
    "*SATRSYSCON",
    "*SASYNBSCON",
    "*SBRMGTSCON",
    "*SCAGESCON",
    "*SICAGESCON",
    "*CAGESCON",
];

/// The default-file marker assumed present on every profile.
pub const DEFAULT_FILE_MARKER: &str = "*WGDFAR";

/// `*A` + exactly three digits + `FC` — bulk access to one physical branch.
pub fn is_branch_bundle_shape(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 7
        && code.starts_with("*A")
        && code.ends_with("FC")
        && bytes[2..5].iter().all(|b| b.is_ascii_digit())
}

fn is_three_digits(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a token. Total over all strings, first matching shape wins.
pub fn classify(token: &CodeToken) -> CodeCategory {
    let code = token.as_str();

    if is_branch_bundle_shape(code) {
        return CodeCategory::BranchBundle;
    }
    if is_three_digits(code) {
        return CodeCategory::BranchNumeric;
    }
    if REPORTING_BASES.contains(&code) {
        return CodeCategory::ReportingBase;
    }
    if REPORTING_REGIONS.contains(&code) {
        return CodeCategory::ReportingRegion;
    }
    if FUNCTION_MARKERS.contains(&code) {
        return CodeCategory::FunctionMarker;
    }
    if SECURITY_CONTEXT_MARKERS.contains(&code) {
        return CodeCategory::SecurityContextMarker;
    }
    if code == DEFAULT_FILE_MARKER {
        return CodeCategory::DefaultFile;
    }
    CodeCategory::GenericAccessCode
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(s: &str) -> CodeToken {
        CodeToken::new(s).unwrap()
    }

    #[test]
    fn branch_bundle_shape_wins_over_everything() {
        assert_eq!(classify(&tok("*A445FC")), CodeCategory::BranchBundle);
        assert_eq!(classify(&tok("*A311FC")), CodeCategory::BranchBundle);
        // wrong digit count is not a bundle
        assert_eq!(classify(&tok("*A44FC")), CodeCategory::GenericAccessCode);
        assert_eq!(classify(&tok("*A4455FC")), CodeCategory::GenericAccessCode);
    }

    #[test]
    fn bare_three_digit_codes_are_branch_numeric() {
        assert_eq!(classify(&tok("311")), CodeCategory::BranchNumeric);
        assert_eq!(classify(&tok("069")), CodeCategory::BranchNumeric);
    }

    #[test]
    fn reporting_literals_classify_before_markers() {
        assert_eq!(classify(&tok("WGBRANCH")), CodeCategory::ReportingBase);
        assert_eq!(classify(&tok("WGCOMMSTD")), CodeCategory::ReportingBase);
        assert_eq!(classify(&tok("REGALL")), CodeCategory::ReportingRegion);
        assert_eq!(classify(&tok("REGC")), CodeCategory::ReportingRegion);
    }

    #[test]
    fn marker_sets_and_default_file() {
        assert_eq!(classify(&tok("*BRMGTFUNC")), CodeCategory::FunctionMarker);
        assert_eq!(classify(&tok("*SBRMGTSCON")), CodeCategory::SecurityContextMarker);
        assert_eq!(classify(&tok("*CAGESCON")), CodeCategory::SecurityContextMarker);
        assert_eq!(classify(&tok("CRINQ")), CodeCategory::FunctionMarker);
        assert_eq!(classify(&tok("*SISFUNC")), CodeCategory::FunctionMarker);
        assert_eq!(classify(&tok("*WGDFAR")), CodeCategory::DefaultFile);
    }

    #[test]
    fn everything_else_is_generic() {
        for code in ["ABC123", "ZZTOP", "4456", "WG", "REGG"] {
            assert_eq!(classify(&tok(code)), CodeCategory::GenericAccessCode, "{code}");
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let t = tok("*A445FC");
        assert_eq!(classify(&t), classify(&t));
    }
}
