//! The KYC application record and the metadata describing its fields.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{KycError, KycStep};

pub const ID_TYPES: &[(&str, &str)] = &[
    ("passport", "Passport"),
    ("national_id", "National ID Card"),
    ("drivers_license", "Driver's License"),
];

pub const COUNTRIES: &[(&str, &str)] = &[
    ("Morocco", "Morocco"),
    ("France", "France"),
    ("Spain", "Spain"),
    ("United Kingdom", "United Kingdom"),
    ("United States", "United States"),
];

pub const EMPLOYMENT_STATUSES: &[(&str, &str)] = &[
    ("employed", "Employed"),
    ("self_employed", "Self-Employed"),
    ("business_owner", "Business Owner"),
    ("retired", "Retired"),
    ("student", "Student"),
    ("unemployed", "Unemployed"),
];

pub const ANNUAL_INCOME_RANGES: &[(&str, &str)] = &[
    ("under_100k", "Under 100,000"),
    ("100k_300k", "100,000 - 300,000"),
    ("300k_500k", "300,000 - 500,000"),
    ("500k_1m", "500,000 - 1,000,000"),
    ("above_1m", "Above 1,000,000"),
];

pub const SOURCES_OF_FUNDS: &[(&str, &str)] = &[
    ("salary", "Salary/Employment"),
    ("business", "Business Income"),
    ("investments", "Investment Returns"),
    ("inheritance", "Inheritance"),
    ("savings", "Savings"),
    ("other", "Other"),
];

pub const INVESTMENT_GOALS: &[(&str, &str)] = &[
    ("capital_growth", "Capital Growth"),
    ("regular_income", "Regular Income"),
    ("portfolio_diversification", "Portfolio Diversification"),
    ("retirement", "Retirement Planning"),
    ("wealth_preservation", "Wealth Preservation"),
];

pub const INVESTMENT_EXPERIENCE: &[(&str, &str)] = &[
    ("none", "None"),
    ("limited", "Limited (1-2 years)"),
    ("moderate", "Moderate (3-5 years)"),
    ("experienced", "Experienced (5+ years)"),
    ("professional", "Professional"),
];

/// Label for `value` in an option table, if listed
pub fn option_label(options: &[(&str, &'static str)], value: &str) -> Option<&'static str> {
    options
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
}

/// Reference to a document the user picked. The file is never opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    path: PathBuf,
}

impl DocumentHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// One KYC application. Every field may be empty at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycForm {
    // Personal
    pub full_name: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub id_type: String,
    pub id_number: String,
    pub phone_number: String,

    // Address
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,

    // Investment profile
    pub employment_status: String,
    pub occupation: String,
    pub annual_income: String,
    pub source_of_funds: String,
    pub investment_goals: String,
    pub investment_experience: String,
    pub risk_tolerance: String,

    // Documents
    pub id_document: Option<DocumentHandle>,
    pub proof_of_address: Option<DocumentHandle>,

    // Declarations
    pub is_pep: bool,
    pub is_sanctioned: bool,
    pub is_compliant: bool,
    pub additional_comments: String,
}

impl Default for KycForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            date_of_birth: String::new(),
            nationality: String::new(),
            id_type: "passport".to_string(),
            id_number: String::new(),
            phone_number: String::new(),
            street_address: String::new(),
            city: String::new(),
            province: String::new(),
            postal_code: String::new(),
            country: "Morocco".to_string(),
            employment_status: String::new(),
            occupation: String::new(),
            annual_income: String::new(),
            source_of_funds: String::new(),
            investment_goals: String::new(),
            investment_experience: String::new(),
            risk_tolerance: String::new(),
            id_document: None,
            proof_of_address: None,
            is_pep: false,
            is_sanctioned: false,
            is_compliant: false,
            additional_comments: String::new(),
        }
    }
}

/// A value that can be written into a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Document(Option<DocumentHandle>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
            FieldValue::Document(_) => "document",
        }
    }
}

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Phone,
    LongText,
    Select(&'static [(&'static str, &'static str)]),
    Document,
    Flag,
}

impl FieldKind {
    fn value_kind(self) -> &'static str {
        match self {
            FieldKind::Document => "document",
            FieldKind::Flag => "flag",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KycField {
    FullName,
    DateOfBirth,
    Nationality,
    IdType,
    IdNumber,
    PhoneNumber,
    StreetAddress,
    City,
    Province,
    PostalCode,
    Country,
    EmploymentStatus,
    Occupation,
    AnnualIncome,
    SourceOfFunds,
    InvestmentGoals,
    InvestmentExperience,
    RiskTolerance,
    IdDocument,
    ProofOfAddress,
    IsPep,
    IsSanctioned,
    IsCompliant,
    AdditionalComments,
}

impl KycField {
    pub fn all() -> &'static [KycField] {
        use KycField::*;
        &[
            FullName,
            DateOfBirth,
            Nationality,
            IdType,
            IdNumber,
            PhoneNumber,
            StreetAddress,
            City,
            Province,
            PostalCode,
            Country,
            EmploymentStatus,
            Occupation,
            AnnualIncome,
            SourceOfFunds,
            InvestmentGoals,
            InvestmentExperience,
            RiskTolerance,
            IdDocument,
            ProofOfAddress,
            IsPep,
            IsSanctioned,
            IsCompliant,
            AdditionalComments,
        ]
    }

    /// Fields shown on `step`, in display order
    pub fn for_step(step: KycStep) -> Vec<KycField> {
        Self::all()
            .iter()
            .copied()
            .filter(|f| f.step() == step)
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            KycField::FullName => "full_name",
            KycField::DateOfBirth => "date_of_birth",
            KycField::Nationality => "nationality",
            KycField::IdType => "id_type",
            KycField::IdNumber => "id_number",
            KycField::PhoneNumber => "phone_number",
            KycField::StreetAddress => "street_address",
            KycField::City => "city",
            KycField::Province => "province",
            KycField::PostalCode => "postal_code",
            KycField::Country => "country",
            KycField::EmploymentStatus => "employment_status",
            KycField::Occupation => "occupation",
            KycField::AnnualIncome => "annual_income",
            KycField::SourceOfFunds => "source_of_funds",
            KycField::InvestmentGoals => "investment_goals",
            KycField::InvestmentExperience => "investment_experience",
            KycField::RiskTolerance => "risk_tolerance",
            KycField::IdDocument => "id_document",
            KycField::ProofOfAddress => "proof_of_address",
            KycField::IsPep => "is_pep",
            KycField::IsSanctioned => "is_sanctioned",
            KycField::IsCompliant => "is_compliant",
            KycField::AdditionalComments => "additional_comments",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }

    pub fn step(self) -> KycStep {
        use KycField::*;
        match self {
            FullName | DateOfBirth | Nationality | IdType | IdNumber | PhoneNumber => {
                KycStep::Personal
            }
            StreetAddress | City | Province | PostalCode | Country => KycStep::Address,
            EmploymentStatus | Occupation | AnnualIncome | SourceOfFunds | InvestmentGoals
            | InvestmentExperience | RiskTolerance => KycStep::Profile,
            IdDocument | ProofOfAddress => KycStep::Documents,
            IsPep | IsSanctioned | IsCompliant | AdditionalComments => KycStep::Declarations,
        }
    }

    pub fn kind(self) -> FieldKind {
        use KycField::*;
        match self {
            DateOfBirth => FieldKind::Date,
            PhoneNumber => FieldKind::Phone,
            IdType => FieldKind::Select(ID_TYPES),
            Country => FieldKind::Select(COUNTRIES),
            EmploymentStatus => FieldKind::Select(EMPLOYMENT_STATUSES),
            AnnualIncome => FieldKind::Select(ANNUAL_INCOME_RANGES),
            SourceOfFunds => FieldKind::Select(SOURCES_OF_FUNDS),
            InvestmentGoals => FieldKind::Select(INVESTMENT_GOALS),
            InvestmentExperience => FieldKind::Select(INVESTMENT_EXPERIENCE),
            IdDocument | ProofOfAddress => FieldKind::Document,
            IsPep | IsSanctioned | IsCompliant => FieldKind::Flag,
            AdditionalComments => FieldKind::LongText,
            _ => FieldKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KycField::FullName => "Full Legal Name",
            KycField::DateOfBirth => "Date of Birth",
            KycField::Nationality => "Nationality",
            KycField::IdType => "ID Document Type",
            KycField::IdNumber => "ID Number",
            KycField::PhoneNumber => "Phone Number",
            KycField::StreetAddress => "Street Address",
            KycField::City => "City",
            KycField::Province => "Province/Region",
            KycField::PostalCode => "Postal Code",
            KycField::Country => "Country",
            KycField::EmploymentStatus => "Employment Status",
            KycField::Occupation => "Occupation",
            KycField::AnnualIncome => "Annual Income (MAD)",
            KycField::SourceOfFunds => "Source of Funds",
            KycField::InvestmentGoals => "Investment Goals",
            KycField::InvestmentExperience => "Investment Experience",
            KycField::RiskTolerance => "Risk Tolerance",
            KycField::IdDocument => "Government-Issued ID Document",
            KycField::ProofOfAddress => "Proof of Address",
            KycField::IsPep => "I am a Politically Exposed Person (PEP) or related to a PEP.",
            KycField::IsSanctioned => "I am subject to sanctions or other legal restrictions.",
            KycField::IsCompliant => "I hereby declare that all information provided in this form and the accompanying documents is accurate, complete, and true to the best of my knowledge.",
            KycField::AdditionalComments => "Additional Comments (Optional)",
        }
    }

    /// Secondary help text shown under the field
    pub fn hint(self) -> Option<&'static str> {
        match self {
            KycField::PhoneNumber => Some("+212..."),
            KycField::DateOfBirth => Some("YYYY-MM-DD"),
            KycField::IdDocument => Some("Upload a scan of your passport, national ID card, or driver's license (front and back)."),
            KycField::ProofOfAddress => Some("Upload a recent utility bill, bank statement, or official correspondence showing your name and address (no older than 3 months)."),
            KycField::IsPep => Some("A PEP is an individual who is or has been entrusted with prominent public functions."),
            KycField::IsCompliant => Some("I understand that providing false information may result in my account being rejected or closed, and may have legal consequences."),
            KycField::AdditionalComments => Some("Any additional information you'd like us to know..."),
            _ => None,
        }
    }

    /// Presentational marker only; nothing blocks on it
    pub fn required(self) -> bool {
        use KycField::*;
        matches!(
            self,
            FullName
                | DateOfBirth
                | Nationality
                | IdNumber
                | PhoneNumber
                | StreetAddress
                | City
                | Province
                | PostalCode
                | Occupation
                | IsCompliant
        )
    }
}

impl fmt::Display for KycField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl KycForm {
    /// Text content of a text-like field, `None` for flags and documents
    pub fn text(&self, field: KycField) -> Option<&str> {
        use KycField::*;
        Some(match field {
            FullName => &self.full_name,
            DateOfBirth => &self.date_of_birth,
            Nationality => &self.nationality,
            IdType => &self.id_type,
            IdNumber => &self.id_number,
            PhoneNumber => &self.phone_number,
            StreetAddress => &self.street_address,
            City => &self.city,
            Province => &self.province,
            PostalCode => &self.postal_code,
            Country => &self.country,
            EmploymentStatus => &self.employment_status,
            Occupation => &self.occupation,
            AnnualIncome => &self.annual_income,
            SourceOfFunds => &self.source_of_funds,
            InvestmentGoals => &self.investment_goals,
            InvestmentExperience => &self.investment_experience,
            RiskTolerance => &self.risk_tolerance,
            AdditionalComments => &self.additional_comments,
            IdDocument | ProofOfAddress | IsPep | IsSanctioned | IsCompliant => return None,
        })
    }

    fn text_mut(&mut self, field: KycField) -> Option<&mut String> {
        use KycField::*;
        Some(match field {
            FullName => &mut self.full_name,
            DateOfBirth => &mut self.date_of_birth,
            Nationality => &mut self.nationality,
            IdType => &mut self.id_type,
            IdNumber => &mut self.id_number,
            PhoneNumber => &mut self.phone_number,
            StreetAddress => &mut self.street_address,
            City => &mut self.city,
            Province => &mut self.province,
            PostalCode => &mut self.postal_code,
            Country => &mut self.country,
            EmploymentStatus => &mut self.employment_status,
            Occupation => &mut self.occupation,
            AnnualIncome => &mut self.annual_income,
            SourceOfFunds => &mut self.source_of_funds,
            InvestmentGoals => &mut self.investment_goals,
            InvestmentExperience => &mut self.investment_experience,
            RiskTolerance => &mut self.risk_tolerance,
            AdditionalComments => &mut self.additional_comments,
            IdDocument | ProofOfAddress | IsPep | IsSanctioned | IsCompliant => return None,
        })
    }

    /// Current value of one field
    pub fn get(&self, field: KycField) -> FieldValue {
        use KycField::*;
        match field {
            IdDocument => FieldValue::Document(self.id_document.clone()),
            ProofOfAddress => FieldValue::Document(self.proof_of_address.clone()),
            IsPep => FieldValue::Flag(self.is_pep),
            IsSanctioned => FieldValue::Flag(self.is_sanctioned),
            IsCompliant => FieldValue::Flag(self.is_compliant),
            _ => FieldValue::Text(self.text(field).unwrap_or_default().to_string()),
        }
    }

    /// Overwrite one field, leaving every other field untouched
    pub fn set(&mut self, field: KycField, value: FieldValue) -> Result<(), KycError> {
        let mismatch = |value: &FieldValue| KycError::ValueMismatch {
            field: field.name(),
            expected: field.kind().value_kind(),
            found: value.kind_name(),
        };

        match (field, value) {
            (KycField::IdDocument, FieldValue::Document(doc)) => self.id_document = doc,
            (KycField::ProofOfAddress, FieldValue::Document(doc)) => self.proof_of_address = doc,
            (KycField::IsPep, FieldValue::Flag(flag)) => self.is_pep = flag,
            (KycField::IsSanctioned, FieldValue::Flag(flag)) => self.is_sanctioned = flag,
            (KycField::IsCompliant, FieldValue::Flag(flag)) => self.is_compliant = flag,
            (field, FieldValue::Text(text)) => match self.text_mut(field) {
                Some(slot) => *slot = text,
                None => return Err(mismatch(&FieldValue::Text(text))),
            },
            (_, other) => return Err(mismatch(&other)),
        }
        Ok(())
    }
}
