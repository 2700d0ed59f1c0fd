//! Plan builder selector
//!
//! Narrows the builder catalog to one plan from a contract type and a
//! billing frequency. Every mutation re-runs [`PlanBuilder::reconcile`] so
//! the frequency is always legal for the contract type and the selection
//! always names a plan in the filtered set.

use crate::catalog::builder::plan_options;
use crate::catalog::{ContractType, Frequency, PlanOption};
use serde::{Deserialize, Serialize};

/// What the summary card shows for the selected plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub speed: String,
    pub duration_label: String,
    pub contract_type: ContractType,
    pub frequency: Frequency,
}

#[derive(Debug, Clone)]
pub struct PlanBuilder {
    options: Vec<PlanOption>,
    contract: ContractType,
    frequency: Frequency,
    selected: Option<String>,
}

impl PlanBuilder {
    /// Prepaid, daily, first matching plan selected
    pub fn new() -> Self {
        Self::with_options(plan_options())
    }

    pub fn with_options(options: Vec<PlanOption>) -> Self {
        let mut builder = Self {
            options,
            contract: ContractType::Prepaid,
            frequency: Frequency::Daily,
            selected: None,
        };
        builder.reconcile();
        builder
    }

    pub fn contract(&self) -> ContractType {
        self.contract
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn available_frequencies(&self) -> &'static [Frequency] {
        self.contract.frequencies()
    }

    /// The frequency picker is fixed when only one frequency is allowed.
    pub fn frequency_locked(&self) -> bool {
        self.available_frequencies().len() == 1
    }

    /// Plans matching the current contract type and frequency, in table order
    pub fn available_plans(&self) -> Vec<&PlanOption> {
        self.options
            .iter()
            .filter(|p| p.contract_type == self.contract && p.frequency == self.frequency)
            .collect()
    }

    pub fn set_contract(&mut self, contract: ContractType) {
        self.contract = contract;
        self.reconcile();
    }

    /// A frequency the contract type does not allow is replaced by the
    /// contract type's default.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
        self.reconcile();
    }

    /// Ids outside the filtered set are replaced during reconciliation.
    pub fn select_plan(&mut self, id: &str) {
        self.selected = Some(id.to_string());
        self.reconcile();
    }

    pub fn selected_plan(&self) -> Option<&PlanOption> {
        let id = self.selected.as_deref()?;
        self.available_plans().into_iter().find(|p| p.id == id)
    }

    pub fn summary(&self) -> Option<PlanSummary> {
        self.selected_plan().map(|plan| PlanSummary {
            id: plan.id.clone(),
            name: plan.name.clone(),
            price: plan.price,
            speed: plan.speed.clone(),
            duration_label: plan.duration_label.clone(),
            contract_type: self.contract,
            frequency: self.frequency,
        })
    }

    fn reconcile(&mut self) {
        let allowed = self.contract.frequencies();
        if !allowed.contains(&self.frequency) {
            self.frequency = allowed[0];
        }

        // Speed tier of whatever was selected before, even if it no longer matches
        let previous_speed = self
            .selected
            .as_deref()
            .and_then(|id| self.options.iter().find(|p| p.id == id))
            .map(|p| p.speed.clone());

        let plans = self.available_plans();
        let still_valid = self
            .selected
            .as_deref()
            .is_some_and(|id| plans.iter().any(|p| p.id == id));
        if still_valid {
            return;
        }

        let replacement = previous_speed
            .and_then(|speed| plans.iter().find(|p| p.speed == speed).copied())
            .or_else(|| plans.first().copied())
            .map(|p| p.id.clone());
        self.selected = replacement;
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let builder = PlanBuilder::new();
        assert_eq!(builder.contract(), ContractType::Prepaid);
        assert_eq!(builder.frequency(), Frequency::Daily);
        assert_eq!(builder.selected_id(), Some("pd1"));
        assert_eq!(builder.available_plans().len(), 3);
        assert!(!builder.frequency_locked());
    }

    #[test]
    fn test_month_to_month_forces_monthly() {
        for start in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            let mut builder = PlanBuilder::new();
            builder.set_frequency(start);
            builder.set_contract(ContractType::MonthToMonth);
            assert_eq!(builder.frequency(), Frequency::Monthly);
            assert!(builder.frequency_locked());
        }
    }

    #[test]
    fn test_prepaid_keeps_monthly() {
        let mut builder = PlanBuilder::new();
        builder.set_contract(ContractType::MonthToMonth);
        builder.set_contract(ContractType::Prepaid);
        assert_eq!(builder.frequency(), Frequency::Monthly);
    }

    #[test]
    fn test_illegal_frequency_resets_to_default() {
        let mut builder = PlanBuilder::new();
        builder.set_contract(ContractType::MonthToMonth);
        builder.set_frequency(Frequency::Weekly);
        assert_eq!(builder.frequency(), Frequency::Monthly);
    }

    #[test]
    fn test_switch_carries_speed_tier() {
        let mut builder = PlanBuilder::new();
        builder.set_frequency(Frequency::Weekly);
        assert_eq!(builder.selected_id(), Some("pw1"));
        builder.select_plan("pw2");
        let summary = builder.summary().unwrap();
        assert_eq!(summary.price, 185);
        assert_eq!(summary.duration_label, "7 Days");

        builder.set_contract(ContractType::MonthToMonth);
        assert_eq!(builder.frequency(), Frequency::Monthly);
        assert_eq!(builder.selected_id(), Some("mm2"));
        let summary = builder.summary().unwrap();
        assert_eq!(summary.speed, "50/25 Mbps");
        assert_eq!(summary.contract_type, ContractType::MonthToMonth);
    }

    #[test]
    fn test_switch_without_matching_tier_takes_first() {
        let mut options = plan_options();
        options.retain(|p| p.id != "mm2");
        let mut builder = PlanBuilder::with_options(options);
        builder.set_frequency(Frequency::Weekly);
        builder.select_plan("pw2");
        builder.set_contract(ContractType::MonthToMonth);
        assert_eq!(builder.selected_id(), Some("mm1"));
    }

    #[test]
    fn test_unknown_plan_id_is_replaced() {
        let mut builder = PlanBuilder::new();
        builder.select_plan("nope");
        assert_eq!(builder.selected_id(), Some("pd1"));
        builder.select_plan("mm1");
        assert_eq!(builder.selected_id(), Some("pd1"));
    }

    #[test]
    fn test_empty_filter_clears_selection() {
        let options: Vec<_> = plan_options()
            .into_iter()
            .filter(|p| p.contract_type == ContractType::Prepaid)
            .collect();
        let mut builder = PlanBuilder::with_options(options);
        builder.set_contract(ContractType::MonthToMonth);
        assert!(builder.selected_id().is_none());
        assert!(builder.summary().is_none());
    }
}
