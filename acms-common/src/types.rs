//! Domain classification types
//!
//! One strict enum per classification dimension. Values arriving from the
//! HTTP boundary convert through serde; values arriving from storage convert
//! through `FromStr` at the database layer. Business logic only ever sees
//! these enums, never raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Airport size classification, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportSize {
    /// Up to 200k passengers/year
    Small,
    /// 200k to 1M passengers/year
    Medium,
    /// 1M to 10M passengers/year
    Large,
    /// Over 10M passengers/year
    International,
}

impl AirportSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            AirportSize::Small => "small",
            AirportSize::Medium => "medium",
            AirportSize::Large => "large",
            AirportSize::International => "international",
        }
    }

    pub fn all_variants() -> [AirportSize; 4] {
        [
            AirportSize::Small,
            AirportSize::Medium,
            AirportSize::Large,
            AirportSize::International,
        ]
    }
}

impl FromStr for AirportSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "small" => Ok(AirportSize::Small),
            "medium" => Ok(AirportSize::Medium),
            "large" => Ok(AirportSize::Large),
            "international" => Ok(AirportSize::International),
            other => Err(Error::InvalidInput(format!(
                "Unknown airport size: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AirportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of airport operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportType {
    Commercial,
    GeneralAviation,
    Military,
    Mixed,
}

impl AirportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AirportType::Commercial => "commercial",
            AirportType::GeneralAviation => "general_aviation",
            AirportType::Military => "military",
            AirportType::Mixed => "mixed",
        }
    }
}

impl FromStr for AirportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "commercial" => Ok(AirportType::Commercial),
            "general_aviation" => Ok(AirportType::GeneralAviation),
            "military" => Ok(AirportType::Military),
            "mixed" => Ok(AirportType::Mixed),
            other => Err(Error::InvalidInput(format!(
                "Unknown airport type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AirportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regulatory usage classification
///
/// Five-valued category assigned by the certification authority. Used as a
/// fallback source when an airport's size or passenger volume is not
/// recorded. `Private` is the restricted-use bucket; `I` through `IV` are
/// the ascending public-use classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageClass {
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "I")]
    ClassI,
    #[serde(rename = "II")]
    ClassII,
    #[serde(rename = "III")]
    ClassIII,
    #[serde(rename = "IV")]
    ClassIV,
}

impl UsageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageClass::Private => "private",
            UsageClass::ClassI => "I",
            UsageClass::ClassII => "II",
            UsageClass::ClassIII => "III",
            UsageClass::ClassIV => "IV",
        }
    }
}

impl FromStr for UsageClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "private" => Ok(UsageClass::Private),
            "I" => Ok(UsageClass::ClassI),
            "II" => Ok(UsageClass::ClassII),
            "III" => Ok(UsageClass::ClassIII),
            "IV" => Ok(UsageClass::ClassIV),
            other => Err(Error::InvalidInput(format!(
                "Unknown usage class: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for UsageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Safety category assigned to every regulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCategory {
    OperationalSafety,
    FireSafety,
    Security,
    Environmental,
    Infrastructure,
    EmergencyResponse,
    WildlifeManagement,
    Maintenance,
    PersonnelCertification,
    AirTrafficServices,
}

impl SafetyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyCategory::OperationalSafety => "operational_safety",
            SafetyCategory::FireSafety => "fire_safety",
            SafetyCategory::Security => "security",
            SafetyCategory::Environmental => "environmental",
            SafetyCategory::Infrastructure => "infrastructure",
            SafetyCategory::EmergencyResponse => "emergency_response",
            SafetyCategory::WildlifeManagement => "wildlife_management",
            SafetyCategory::Maintenance => "maintenance",
            SafetyCategory::PersonnelCertification => "personnel_certification",
            SafetyCategory::AirTrafficServices => "air_traffic_services",
        }
    }
}

impl FromStr for SafetyCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "operational_safety" => Ok(SafetyCategory::OperationalSafety),
            "fire_safety" => Ok(SafetyCategory::FireSafety),
            "security" => Ok(SafetyCategory::Security),
            "environmental" => Ok(SafetyCategory::Environmental),
            "infrastructure" => Ok(SafetyCategory::Infrastructure),
            "emergency_response" => Ok(SafetyCategory::EmergencyResponse),
            "wildlife_management" => Ok(SafetyCategory::WildlifeManagement),
            "maintenance" => Ok(SafetyCategory::Maintenance),
            "personnel_certification" => Ok(SafetyCategory::PersonnelCertification),
            "air_traffic_services" => Ok(SafetyCategory::AirTrafficServices),
            other => Err(Error::InvalidInput(format!(
                "Unknown safety category: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for SafetyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requirement criticality tier, D most critical
///
/// Tier D items are essential: certification requires 85% weighted
/// compliance within this tier. C items are complementary, B recommended
/// practices, A best practices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementTier {
    D,
    C,
    B,
    A,
}

impl RequirementTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementTier::D => "D",
            RequirementTier::C => "C",
            RequirementTier::B => "B",
            RequirementTier::A => "A",
        }
    }
}

impl FromStr for RequirementTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "D" => Ok(RequirementTier::D),
            "C" => Ok(RequirementTier::C),
            "B" => Ok(RequirementTier::B),
            "A" => Ok(RequirementTier::A),
            other => Err(Error::InvalidInput(format!(
                "Unknown requirement tier: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RequirementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an item is evaluated by the authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Documental (remote verification)
    #[serde(rename = "DOCS")]
    Docs,
    /// Operational (on-site verification)
    #[serde(rename = "TOPS")]
    Tops,
    /// Both verification modes required
    #[serde(rename = "BOTH")]
    Both,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Docs => "DOCS",
            EvaluationMode::Tops => "TOPS",
            EvaluationMode::Both => "BOTH",
        }
    }
}

impl FromStr for EvaluationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "DOCS" => Ok(EvaluationMode::Docs),
            "TOPS" => Ok(EvaluationMode::Tops),
            "BOTH" => Ok(EvaluationMode::Both),
            other => Err(Error::InvalidInput(format!(
                "Unknown evaluation mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compliance status of one (airport, regulation) record
///
/// `NotApplicable` is terminal and only ever set by an explicit
/// administrative update; the engine never transitions into it on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Partial,
    NotApplicable,
    PendingReview,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
            ComplianceStatus::Partial => "partial",
            ComplianceStatus::NotApplicable => "not_applicable",
            ComplianceStatus::PendingReview => "pending_review",
        }
    }
}

impl FromStr for ComplianceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "compliant" => Ok(ComplianceStatus::Compliant),
            "non_compliant" => Ok(ComplianceStatus::NonCompliant),
            "partial" => Ok(ComplianceStatus::Partial),
            "not_applicable" => Ok(ComplianceStatus::NotApplicable),
            "pending_review" => Ok(ComplianceStatus::PendingReview),
            other => Err(Error::InvalidInput(format!(
                "Unknown compliance status: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
