//! PII categories and their sensitivity table

use serde::{Deserialize, Serialize};
use std::fmt;

/// PII category enumeration covering Gulf/Middle-East identifiers and the
/// free-form categories the semantic oracle reports
///
/// Unknown tags coming from a custom pattern library or the oracle are kept
/// verbatim in [`PiiCategory::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PiiCategory {
    // Structured categories (pattern catalog)
    Email,
    Url,
    Phone,
    UaeEmiratesId,
    SaudiNationalId,
    KuwaitCivilId,
    QatarId,
    BahrainCpr,
    OmanCivilId,
    JordanNationalId,
    LebanonId,
    GulfPassport,
    PoBox,
    UaeVisa,
    ResidencePermit,
    CreditCard,
    LongNumericId,
    Date,
    GulfPostal,
    ProfessionalLicense,
    IbanGcc,

    // Semantic categories (oracle)
    Name,
    Address,
    Organization,
    School,
    JobTitle,
    CertificationNumber,
    LicenseNumber,
    NationalId,

    /// Any tag not listed above
    Other(String),
}

impl PiiCategory {
    /// Canonical snake_case tag
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Phone => "phone",
            Self::UaeEmiratesId => "uae_emirates_id",
            Self::SaudiNationalId => "saudi_national_id",
            Self::KuwaitCivilId => "kuwait_civil_id",
            Self::QatarId => "qatar_id",
            Self::BahrainCpr => "bahrain_cpr",
            Self::OmanCivilId => "oman_civil_id",
            Self::JordanNationalId => "jordan_national_id",
            Self::LebanonId => "lebanon_id",
            Self::GulfPassport => "gulf_passport",
            Self::PoBox => "po_box",
            Self::UaeVisa => "uae_visa",
            Self::ResidencePermit => "residence_permit",
            Self::CreditCard => "credit_card",
            Self::LongNumericId => "long_numeric_id",
            Self::Date => "date",
            Self::GulfPostal => "gulf_postal",
            Self::ProfessionalLicense => "professional_license",
            Self::IbanGcc => "iban_gcc",
            Self::Name => "name",
            Self::Address => "address",
            Self::Organization => "organization",
            Self::School => "school",
            Self::JobTitle => "job_title",
            Self::CertificationNumber => "certification_number",
            Self::LicenseNumber => "license_number",
            Self::NationalId => "national_id",
            Self::Other(tag) => tag,
        }
    }

    /// Upper-case label used inside placeholders
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Static sensitivity of the category, 1 (low) to 4 (critical)
    ///
    /// Unknown categories default to 2.
    pub fn sensitivity(&self) -> u8 {
        match self {
            Self::UaeEmiratesId
            | Self::SaudiNationalId
            | Self::KuwaitCivilId
            | Self::QatarId
            | Self::BahrainCpr
            | Self::OmanCivilId
            | Self::JordanNationalId
            | Self::LebanonId
            | Self::GulfPassport
            | Self::CreditCard
            | Self::IbanGcc
            | Self::NationalId => 4,

            Self::Email
            | Self::Phone
            | Self::Name
            | Self::Address
            | Self::Date
            | Self::LongNumericId
            | Self::UaeVisa
            | Self::ResidencePermit
            | Self::ProfessionalLicense
            | Self::CertificationNumber
            | Self::LicenseNumber => 3,

            Self::Url | Self::Organization | Self::School | Self::PoBox | Self::GulfPostal => 2,

            Self::JobTitle => 1,

            Self::Other(_) => 2,
        }
    }

    /// Categories the semantic oracle is asked to report
    pub fn semantic_categories() -> [PiiCategory; 8] {
        [
            Self::Name,
            Self::Address,
            Self::Organization,
            Self::School,
            Self::JobTitle,
            Self::CertificationNumber,
            Self::LicenseNumber,
            Self::NationalId,
        ]
    }
}

impl From<&str> for PiiCategory {
    fn from(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "email" => Self::Email,
            "url" => Self::Url,
            "phone" => Self::Phone,
            "uae_emirates_id" => Self::UaeEmiratesId,
            "saudi_national_id" => Self::SaudiNationalId,
            "kuwait_civil_id" => Self::KuwaitCivilId,
            "qatar_id" => Self::QatarId,
            "bahrain_cpr" => Self::BahrainCpr,
            "oman_civil_id" => Self::OmanCivilId,
            "jordan_national_id" => Self::JordanNationalId,
            "lebanon_id" => Self::LebanonId,
            "gulf_passport" => Self::GulfPassport,
            "po_box" => Self::PoBox,
            "uae_visa" => Self::UaeVisa,
            "residence_permit" => Self::ResidencePermit,
            "credit_card" => Self::CreditCard,
            "long_numeric_id" => Self::LongNumericId,
            "date" | "date_pattern" => Self::Date,
            "gulf_postal" => Self::GulfPostal,
            "professional_license" => Self::ProfessionalLicense,
            "iban_gcc" => Self::IbanGcc,
            "name" => Self::Name,
            "address" => Self::Address,
            "organization" => Self::Organization,
            "school" => Self::School,
            "job_title" => Self::JobTitle,
            "certification_number" => Self::CertificationNumber,
            "license_number" => Self::LicenseNumber,
            "national_id" => Self::NationalId,
            _ => Self::Other(normalized),
        }
    }
}

impl From<String> for PiiCategory {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<PiiCategory> for String {
    fn from(category: PiiCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(PiiCategory::UaeEmiratesId, 4)]
    #[test_case(PiiCategory::GulfPassport, 4)]
    #[test_case(PiiCategory::IbanGcc, 4)]
    #[test_case(PiiCategory::Email, 3)]
    #[test_case(PiiCategory::Phone, 3)]
    #[test_case(PiiCategory::Date, 3)]
    #[test_case(PiiCategory::Url, 2)]
    #[test_case(PiiCategory::Organization, 2)]
    #[test_case(PiiCategory::JobTitle, 1)]
    #[test_case(PiiCategory::Other("hobby".to_string()), 2)]
    fn test_sensitivity_table(category: PiiCategory, expected: u8) {
        assert_eq!(category.sensitivity(), expected);
    }

    #[test]
    fn test_parse_known_and_unknown_tags() {
        assert_eq!(PiiCategory::from("Email"), PiiCategory::Email);
        assert_eq!(PiiCategory::from(" job title "), PiiCategory::JobTitle);
        assert_eq!(PiiCategory::from("date_pattern"), PiiCategory::Date);
        assert_eq!(
            PiiCategory::from("Blood-Type"),
            PiiCategory::Other("blood_type".to_string())
        );
    }

    #[test]
    fn test_label_is_upper_snake_case() {
        assert_eq!(PiiCategory::UaeEmiratesId.label(), "UAE_EMIRATES_ID");
        assert_eq!(PiiCategory::Other("hobby".to_string()).label(), "HOBBY");
    }

    #[test]
    fn test_serde_uses_tag_strings() {
        let json = serde_json::to_string(&PiiCategory::JobTitle).unwrap();
        assert_eq!(json, "\"job_title\"");

        let parsed: PiiCategory = serde_json::from_str("\"organization\"").unwrap();
        assert_eq!(parsed, PiiCategory::Organization);
    }
}
