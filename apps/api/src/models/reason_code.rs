use serde::{Deserialize, Serialize};

/// Why a grant proposal is declined.
///
/// The serialized form is the human-readable label, which is also the stable
/// identifier clients send back in `/generate`. Any other string fails to
/// deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    #[serde(rename = "General Operating Support")]
    GeneralOperatingSupport,
    #[serde(rename = "Endowment")]
    Endowment,
    #[serde(rename = "Capital")]
    Capital,
    #[serde(rename = "Deficit Financing")]
    DeficitFinancing,
    #[serde(rename = "Unapproved Program Category")]
    UnapprovedProgramCategory,
    #[serde(rename = "Outside Approved Guidelines")]
    OutsideApprovedGuidelines,
    #[serde(rename = "Other Projects Higher Merit")]
    OtherProjectsHigherMerit,
    #[serde(
        rename = "Other Qualitative (Replace Govt. Funds, Poor Design, Capability Problems, Duplicative Effort, Budget Exhausted)"
    )]
    OtherQualitative,
}

impl ReasonCode {
    /// Every reason code, in catalog order.
    pub const ALL: [ReasonCode; 8] = [
        ReasonCode::GeneralOperatingSupport,
        ReasonCode::Endowment,
        ReasonCode::Capital,
        ReasonCode::DeficitFinancing,
        ReasonCode::UnapprovedProgramCategory,
        ReasonCode::OutsideApprovedGuidelines,
        ReasonCode::OtherProjectsHigherMerit,
        ReasonCode::OtherQualitative,
    ];

    /// Must stay identical to the serde rename of each variant.
    pub fn label(self) -> &'static str {
        match self {
            ReasonCode::GeneralOperatingSupport => "General Operating Support",
            ReasonCode::Endowment => "Endowment",
            ReasonCode::Capital => "Capital",
            ReasonCode::DeficitFinancing => "Deficit Financing",
            ReasonCode::UnapprovedProgramCategory => "Unapproved Program Category",
            ReasonCode::OutsideApprovedGuidelines => "Outside Approved Guidelines",
            ReasonCode::OtherProjectsHigherMerit => "Other Projects Higher Merit",
            ReasonCode::OtherQualitative => {
                "Other Qualitative (Replace Govt. Funds, Poor Design, Capability Problems, Duplicative Effort, Budget Exhausted)"
            }
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the `/reason-codes` listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReasonCodeOption {
    pub value: ReasonCode,
    pub label: &'static str,
}

impl From<ReasonCode> for ReasonCodeOption {
    fn from(code: ReasonCode) -> Self {
        ReasonCodeOption {
            value: code,
            label: code.label(),
        }
    }
}

/// The full catalog in stable order.
pub fn catalog() -> Vec<ReasonCodeOption> {
    ReasonCode::ALL.into_iter().map(ReasonCodeOption::from).collect()
}
