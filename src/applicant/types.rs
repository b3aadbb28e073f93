use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}' (expected one of: {expected})")]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// Case-insensitive lookup of a display label in a closed set of variants.
fn parse_label<T: Copy>(
    field: &'static str,
    value: &str,
    variants: &[T],
    label: impl Fn(T) -> &'static str,
) -> Result<T, UnknownCategory> {
    let wanted = value.trim();
    variants
        .iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownCategory {
            field,
            value: value.to_string(),
            expected: variants
                .iter()
                .map(|v| label(*v))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Young adults")]
    YoungAdults,
    #[serde(rename = "adults")]
    Adults,
    #[serde(rename = "middle-aged adults")]
    MiddleAgedAdults,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [
        AgeGroup::YoungAdults,
        AgeGroup::Adults,
        AgeGroup::MiddleAgedAdults,
    ];

    /// Label exactly as the classifier saw it during training.
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::YoungAdults => "Young adults",
            AgeGroup::Adults => "adults",
            AgeGroup::MiddleAgedAdults => "middle-aged adults",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankName {
    #[serde(rename = "GT Bank")]
    GtBank,
    #[serde(rename = "Sterling Bank")]
    SterlingBank,
    #[serde(rename = "Fidelity Bank")]
    FidelityBank,
    #[serde(rename = "Access Bank")]
    AccessBank,
    #[serde(rename = "EcoBank")]
    EcoBank,
    #[serde(rename = "FCMB")]
    Fcmb,
    #[serde(rename = "Skye Bank")]
    SkyeBank,
    #[serde(rename = "UBA")]
    Uba,
    #[serde(rename = "Zenith Bank")]
    ZenithBank,
    #[serde(rename = "Diamond Bank")]
    DiamondBank,
    #[serde(rename = "First Bank")]
    FirstBank,
    #[serde(rename = "Union Bank")]
    UnionBank,
    #[serde(rename = "Stanbic IBTC")]
    StanbicIbtc,
    #[serde(rename = "Standard Chartered")]
    StandardChartered,
    #[serde(rename = "Heritage Bank")]
    HeritageBank,
    #[serde(rename = "Keystone Bank")]
    KeystoneBank,
    #[serde(rename = "Unity Bank")]
    UnityBank,
    #[serde(rename = "Wema Bank")]
    WemaBank,
}

impl BankName {
    pub const ALL: [BankName; 18] = [
        BankName::GtBank,
        BankName::SterlingBank,
        BankName::FidelityBank,
        BankName::AccessBank,
        BankName::EcoBank,
        BankName::Fcmb,
        BankName::SkyeBank,
        BankName::Uba,
        BankName::ZenithBank,
        BankName::DiamondBank,
        BankName::FirstBank,
        BankName::UnionBank,
        BankName::StanbicIbtc,
        BankName::StandardChartered,
        BankName::HeritageBank,
        BankName::KeystoneBank,
        BankName::UnityBank,
        BankName::WemaBank,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BankName::GtBank => "GT Bank",
            BankName::SterlingBank => "Sterling Bank",
            BankName::FidelityBank => "Fidelity Bank",
            BankName::AccessBank => "Access Bank",
            BankName::EcoBank => "EcoBank",
            BankName::Fcmb => "FCMB",
            BankName::SkyeBank => "Skye Bank",
            BankName::Uba => "UBA",
            BankName::ZenithBank => "Zenith Bank",
            BankName::DiamondBank => "Diamond Bank",
            BankName::FirstBank => "First Bank",
            BankName::UnionBank => "Union Bank",
            BankName::StanbicIbtc => "Stanbic IBTC",
            BankName::StandardChartered => "Standard Chartered",
            BankName::HeritageBank => "Heritage Bank",
            BankName::KeystoneBank => "Keystone Bank",
            BankName::UnityBank => "Unity Bank",
            BankName::WemaBank => "Wema Bank",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Other,
    Savings,
    Current,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [AccountType::Other, AccountType::Savings, AccountType::Current];

    pub fn label(self) -> &'static str {
        match self {
            AccountType::Other => "Other",
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Permanent,
    Unknown,
    Unemployed,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    Student,
    Retired,
    Contract,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 7] = [
        EmploymentStatus::Permanent,
        EmploymentStatus::Unknown,
        EmploymentStatus::Unemployed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Student,
        EmploymentStatus::Retired,
        EmploymentStatus::Contract,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Permanent => "Permanent",
            EmploymentStatus::Unknown => "Unknown",
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::SelfEmployed => "Self-Employed",
            EmploymentStatus::Student => "Student",
            EmploymentStatus::Retired => "Retired",
            EmploymentStatus::Contract => "Contract",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = UnknownCategory;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("age group", s, &Self::ALL, Self::label)
    }
}

impl FromStr for BankName {
    type Err = UnknownCategory;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("bank name", s, &Self::ALL, Self::label)
    }
}

impl FromStr for AccountType {
    type Err = UnknownCategory;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("bank account type", s, &Self::ALL, Self::label)
    }
}

impl FromStr for EmploymentStatus {
    type Err = UnknownCategory;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("employment status", s, &Self::ALL, Self::label)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for BankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One applicant submission as collected from the user.
///
/// Numeric fields are expected to already lie inside their [`FieldBounds`]
/// domain; the collection boundary clamps them (see [`RawInputRecord::clamped`]).
/// `bank_name_clients` is collected but never reaches the classifier.
///
/// [`FieldBounds`]: super::FieldBounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputRecord {
    pub loanamount: f64,
    pub termdays: f64,
    pub repayment_curr_ratio: f64,
    pub num_prev_loans: f64,
    pub avg_repay_delay_days: f64,
    pub total_firstrepaid_late: f64,
    pub avg_prev_repayment_ratio: f64,
    pub avg_duration_days: f64,
    pub avg_prev_interest: f64,
    pub age: u32,
    pub age_group: AgeGroup,
    pub bank_name_clients: BankName,
    pub bank_account_type: AccountType,
    pub employment_status_clients: EmploymentStatus,
}

impl Default for RawInputRecord {
    /// The values the input form starts with.
    fn default() -> Self {
        Self {
            loanamount: 50_000.0,
            termdays: 90.0,
            repayment_curr_ratio: 1.0,
            num_prev_loans: 3.0,
            avg_repay_delay_days: 10.0,
            total_firstrepaid_late: 2.0,
            avg_prev_repayment_ratio: 1.0,
            avg_duration_days: 180.0,
            avg_prev_interest: 5000.0,
            age: 30,
            age_group: AgeGroup::YoungAdults,
            bank_name_clients: BankName::GtBank,
            bank_account_type: AccountType::Other,
            employment_status_clients: EmploymentStatus::Permanent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_case_insensitive() {
        assert_eq!("adults".parse::<AgeGroup>().unwrap(), AgeGroup::Adults);
        assert_eq!("Middle-Aged Adults".parse::<AgeGroup>().unwrap(), AgeGroup::MiddleAgedAdults);
        assert_eq!("gt bank".parse::<BankName>().unwrap(), BankName::GtBank);
        assert_eq!(" savings ".parse::<AccountType>().unwrap(), AccountType::Savings);
        assert_eq!("self-employed".parse::<EmploymentStatus>().unwrap(), EmploymentStatus::SelfEmployed);
    }

    #[test]
    fn test_parse_unknown_label_lists_choices() {
        let err = "Checking".parse::<AccountType>().unwrap_err();
        assert_eq!(err.field, "bank account type");
        assert!(err.to_string().contains("Other, Savings, Current"));
    }

    #[test]
    fn test_closed_sets_have_expected_sizes() {
        assert_eq!(AgeGroup::ALL.len(), 3);
        assert_eq!(BankName::ALL.len(), 18);
        assert_eq!(AccountType::ALL.len(), 3);
        assert_eq!(EmploymentStatus::ALL.len(), 7);
    }

    #[test]
    fn test_labels_roundtrip_through_from_str() {
        for bank in BankName::ALL {
            assert_eq!(bank.label().parse::<BankName>().unwrap(), bank);
        }
        for status in EmploymentStatus::ALL {
            assert_eq!(status.to_string().parse::<EmploymentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_record_serializes_with_training_labels() {
        let record = RawInputRecord {
            age_group: AgeGroup::MiddleAgedAdults,
            employment_status_clients: EmploymentStatus::SelfEmployed,
            ..RawInputRecord::default()
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["age_group"], "middle-aged adults");
        assert_eq!(json["employment_status_clients"], "Self-Employed");
        assert_eq!(json["bank_name_clients"], "GT Bank");
    }
}
