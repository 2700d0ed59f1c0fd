//! Plan builder catalog
//!
//! Builder plans are keyed by contract type and billing frequency, separate
//! from the provider packages.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    MonthToMonth,
    Prepaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl ContractType {
    pub const ALL: [ContractType; 2] = [ContractType::Prepaid, ContractType::MonthToMonth];

    /// Billing frequencies a contract type may be paired with, in display
    /// order. The first entry is the default when the current frequency is
    /// not allowed.
    pub fn frequencies(self) -> &'static [Frequency] {
        match self {
            ContractType::MonthToMonth => &[Frequency::Monthly],
            ContractType::Prepaid => &[Frequency::Daily, Frequency::Weekly, Frequency::Monthly],
        }
    }

    pub fn allows(self, frequency: Frequency) -> bool {
        self.frequencies().contains(&frequency)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContractType::MonthToMonth => "month-to-month",
            ContractType::Prepaid => "prepaid",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ContractType::Prepaid => "Flexible, pay-as-you-go access. No credit checks required.",
            ContractType::MonthToMonth => "Recurring monthly billing. Cancel anytime with notice.",
        }
    }
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
        }
    }
}

impl FromStr for ContractType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "month-to-month" | "monthtomonth" | "m2m" => Ok(ContractType::MonthToMonth),
            "prepaid" => Ok(ContractType::Prepaid),
            other => Err(CoreError::Validation(format!("unknown contract type '{}'", other))),
        }
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(CoreError::Validation(format!("unknown frequency '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOption {
    pub id: String,
    pub contract_type: ContractType,
    pub frequency: Frequency,
    pub name: String,
    /// e.g. "20/10 Mbps"
    pub speed: String,
    pub price: u32,
    /// e.g. "3 Days"
    pub duration_label: String,
}

fn option(
    id: &str,
    contract_type: ContractType,
    frequency: Frequency,
    name: &str,
    speed: &str,
    price: u32,
    duration_label: &str,
) -> PlanOption {
    PlanOption {
        id: id.to_string(),
        contract_type,
        frequency,
        name: name.to_string(),
        speed: speed.to_string(),
        price,
        duration_label: duration_label.to_string(),
    }
}

/// The builder's plan table
pub fn plan_options() -> Vec<PlanOption> {
    use ContractType::*;
    use Frequency::*;

    vec![
        option("pd1", Prepaid, Daily, "Budget User", "20/10 Mbps", 51, "3 Days"),
        option("pd2", Prepaid, Daily, "Budget User", "50/25 Mbps", 93, "3 Days"),
        option("pd3", Prepaid, Daily, "Budget User", "10/5 Mbps", 48, "3 Days"),
        option("pw1", Prepaid, Weekly, "Light User", "20/10 Mbps", 88, "7 Days"),
        option("pw2", Prepaid, Weekly, "Light User", "50/25 Mbps", 185, "7 Days"),
        option("pw3", Prepaid, Weekly, "Light User", "10/5 Mbps", 83, "7 Days"),
        option("pm1", Prepaid, Monthly, "Family Plan", "20/10 Mbps", 305, "30 Days"),
        option("pm2", Prepaid, Monthly, "Family Plan", "50/25 Mbps", 622, "30 Days"),
        option("pm3", Prepaid, Monthly, "Family Plan", "10/5 Mbps", 289, "30 Days"),
        option("mm1", MonthToMonth, Monthly, "Family Plan", "20/10 Mbps", 305, "Month-to-Month"),
        option("mm2", MonthToMonth, Monthly, "Family Plan", "50/25 Mbps", 622, "Month-to-Month"),
        option("mm3", MonthToMonth, Monthly, "Family Plan", "10/5 Mbps", 289, "Month-to-Month"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_table() {
        assert_eq!(ContractType::MonthToMonth.frequencies(), &[Frequency::Monthly]);
        assert!(ContractType::Prepaid.allows(Frequency::Weekly));
        assert!(!ContractType::MonthToMonth.allows(Frequency::Daily));
    }

    #[test]
    fn test_every_plan_is_a_valid_pairing() {
        for plan in plan_options() {
            assert!(
                plan.contract_type.allows(plan.frequency),
                "{} pairs {} with {}",
                plan.id,
                plan.contract_type,
                plan.frequency.as_str()
            );
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Month-To-Month".parse::<ContractType>().unwrap(), ContractType::MonthToMonth);
        assert_eq!(" weekly ".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("yearly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&ContractType::MonthToMonth).unwrap();
        assert_eq!(json, "\"month-to-month\"");
        let json = serde_json::to_string(&Frequency::Daily).unwrap();
        assert_eq!(json, "\"daily\"");
    }
}
