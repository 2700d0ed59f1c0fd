//! Lead capture workflow
//!
//! ```text
//! Idle -> PackageChosen -> FormEditing -> Submitting -> Success
//!   ^                          ^               |          |
//!   |                          +---- failure --+          |
//!   +----------------------- close ----------------------+
//! ```
//!
//! A failed submission lands back in `FormEditing` with the error kept in
//! [`LeadWorkflow::last_error`] so the form can offer a retry.

use crate::address::Address;
use crate::backend::Backend;
use crate::catalog::Package;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Consent,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::Name => write!(f, "name"),
            FormField::Email => write!(f, "email"),
            FormField::Phone => write!(f, "phone"),
            FormField::Consent => write!(f, "consent"),
        }
    }
}

/// Contact details as typed; no format checks beyond presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub consent: bool,
}

impl LeadForm {
    /// Fields that block submission, in form order
    pub fn missing_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push(FormField::Name);
        }
        if self.email.trim().is_empty() {
            missing.push(FormField::Email);
        }
        if self.phone.trim().is_empty() {
            missing.push(FormField::Phone);
        }
        if !self.consent {
            missing.push(FormField::Consent);
        }
        missing
    }

    pub fn validate(&self) -> CoreResult<()> {
        match self.missing_fields().first() {
            Some(field) => Err(CoreError::MissingField(*field)),
            None => Ok(()),
        }
    }
}

/// A prospective customer's contact details and chosen package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub package_id: String,
    pub address: Address,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Lead {
    /// Presence check used on the receiving side of `submit_lead`.
    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Phone, &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(field));
            }
        }
        if self.package_id.trim().is_empty() {
            return Err(CoreError::Validation("package id is required".to_string()));
        }
        if self.address.street.trim().is_empty() {
            return Err(CoreError::Validation("address is required".to_string()));
        }
        Ok(())
    }
}

/// Identifies one submission started by [`LeadWorkflow::begin_submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadState {
    Idle,
    PackageChosen,
    FormEditing,
    Submitting,
    Success,
}

/// Confirmation details shown after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub name: String,
    pub package_name: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct LeadWorkflow {
    state: LeadState,
    package: Option<Package>,
    form: LeadForm,
    last_error: Option<String>,
    /// Bumped on every begin, close and package change
    generation: u64,
}

impl LeadWorkflow {
    pub fn new() -> Self {
        Self {
            state: LeadState::Idle,
            package: None,
            form: LeadForm::default(),
            last_error: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> LeadState {
        self.state
    }

    pub fn package(&self) -> Option<&Package> {
        self.package.as_ref()
    }

    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The lead modal is open whenever a package is chosen.
    pub fn is_open(&self) -> bool {
        self.package.is_some()
    }

    /// Start over with `package`; the form is cleared and any earlier
    /// success or error is forgotten.
    pub fn choose_package(&mut self, package: Package) -> CoreResult<()> {
        if self.state == LeadState::Submitting {
            return Err(CoreError::Validation(
                "a submission is already in progress".to_string(),
            ));
        }
        info!("Package chosen: {}", package.id);
        self.generation += 1;
        self.package = Some(package);
        self.form = LeadForm::default();
        self.last_error = None;
        self.state = LeadState::PackageChosen;
        Ok(())
    }

    /// Apply an edit to the contact form.
    pub fn edit<F>(&mut self, apply: F) -> CoreResult<()>
    where
        F: FnOnce(&mut LeadForm),
    {
        match self.state {
            LeadState::PackageChosen | LeadState::FormEditing => {
                apply(&mut self.form);
                self.state = LeadState::FormEditing;
                Ok(())
            }
            other => Err(CoreError::Validation(format!(
                "the form cannot be edited while {:?}",
                other
            ))),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        self.edit(|form| form.name = name)
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> CoreResult<()> {
        let email = email.into();
        self.edit(|form| form.email = email)
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> CoreResult<()> {
        let phone = phone.into();
        self.edit(|form| form.phone = phone)
    }

    pub fn set_consent(&mut self, consent: bool) -> CoreResult<()> {
        self.edit(|form| form.consent = consent)
    }

    /// Check the guards and move to `Submitting`, returning the lead to
    /// send and the token its outcome must be reported with. Nothing
    /// changes when a guard fails.
    pub fn begin_submit(
        &mut self,
        address: Option<&Address>,
    ) -> CoreResult<(SubmissionToken, Lead)> {
        if self.state == LeadState::Submitting {
            return Err(CoreError::Validation(
                "a submission is already in progress".to_string(),
            ));
        }
        if self.state == LeadState::Success {
            return Err(CoreError::Validation("this lead was already submitted".to_string()));
        }
        let package = self
            .package
            .as_ref()
            .ok_or_else(|| CoreError::Validation("choose a package first".to_string()))?;
        let address = address
            .ok_or_else(|| CoreError::Validation("check an address first".to_string()))?;
        self.form.validate()?;

        let lead = Lead {
            package_id: package.id.clone(),
            address: address.clone(),
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            phone: self.form.phone.clone(),
        };
        self.state = LeadState::Submitting;
        self.last_error = None;
        self.generation += 1;
        Ok((SubmissionToken(self.generation), lead))
    }

    /// Record the outcome of the outward call started by `begin_submit`.
    /// Outcomes for a submission that was closed or replaced since are
    /// dropped.
    pub fn finish_submit(&mut self, token: SubmissionToken, outcome: CoreResult<bool>) {
        if token.0 != self.generation {
            debug!("Discarding outcome of superseded submission {}", token.0);
            return;
        }
        if self.state != LeadState::Submitting {
            warn!("Ignoring submission outcome outside Submitting ({:?})", self.state);
            return;
        }
        match outcome {
            Ok(true) => {
                info!("Lead accepted for package {:?}", self.package.as_ref().map(|p| &p.id));
                self.state = LeadState::Success;
            }
            Ok(false) => {
                warn!("Lead was not acknowledged");
                self.last_error =
                    Some("We couldn't confirm your order. Please try again.".to_string());
                self.state = LeadState::FormEditing;
            }
            Err(e) => {
                warn!("Lead submission failed: {}", e);
                self.last_error = Some(format!("Submission failed: {}. Please try again.", e));
                self.state = LeadState::FormEditing;
            }
        }
    }

    /// Validate, send through `backend` and record the outcome. Validation
    /// failures return before the backend is called.
    pub async fn submit(
        &mut self,
        address: Option<&Address>,
        backend: &dyn Backend,
    ) -> CoreResult<()> {
        let (token, lead) = self.begin_submit(address)?;
        let outcome = backend.submit_lead(&lead).await;
        let result = match &outcome {
            Ok(true) => Ok(()),
            Ok(false) => Err(CoreError::Transport("lead was not acknowledged".to_string())),
            Err(e) => Err(e.clone()),
        };
        self.finish_submit(token, outcome);
        result
    }

    pub fn confirmation(&self) -> Option<Confirmation> {
        if self.state != LeadState::Success {
            return None;
        }
        let package = self.package.as_ref()?;
        Some(Confirmation {
            name: self.form.name.clone(),
            package_name: package.name.clone(),
            phone: self.form.phone.clone(),
        })
    }

    /// Close the modal: back to `Idle` with no package chosen.
    pub fn close(&mut self) {
        self.generation += 1;
        self.package = None;
        self.last_error = None;
        self.state = LeadState::Idle;
    }
}

impl Default for LeadWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::{CountingBackend, FailingBackend};
    use crate::catalog::Catalog;

    fn package() -> Package {
        Catalog::builtin().package("ff-20").cloned().unwrap()
    }

    fn address() -> Address {
        Address::new("15 Fibre Way", "Sandton", "Johannesburg")
    }

    fn filled() -> LeadWorkflow {
        let mut workflow = LeadWorkflow::new();
        workflow.choose_package(package()).unwrap();
        workflow.set_name("Thandi").unwrap();
        workflow.set_email("thandi@example.com").unwrap();
        workflow.set_phone("082 123 4567").unwrap();
        workflow.set_consent(true).unwrap();
        workflow
    }

    #[test]
    fn test_choose_resets_form() {
        let mut workflow = filled();
        assert_eq!(workflow.state(), LeadState::FormEditing);
        workflow.choose_package(package()).unwrap();
        assert_eq!(workflow.state(), LeadState::PackageChosen);
        assert_eq!(workflow.form(), &LeadForm::default());
        assert!(workflow.is_open());
    }

    #[test]
    fn test_edit_requires_package() {
        let mut workflow = LeadWorkflow::new();
        assert!(workflow.set_name("x").is_err());
        assert_eq!(workflow.state(), LeadState::Idle);
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let form = LeadForm {
            name: "A".into(),
            ..Default::default()
        };
        assert_eq!(
            form.missing_fields(),
            vec![FormField::Email, FormField::Phone, FormField::Consent]
        );
    }

    #[test]
    fn test_guards() {
        let mut workflow = filled();
        assert!(workflow.begin_submit(None).is_err());
        workflow.set_consent(false).unwrap();
        let err = workflow.begin_submit(Some(&address())).unwrap_err();
        assert_eq!(err, CoreError::MissingField(FormField::Consent));
        assert_eq!(workflow.state(), LeadState::FormEditing);
    }

    #[test]
    fn test_no_double_submit() {
        let mut workflow = filled();
        workflow.begin_submit(Some(&address())).unwrap();
        assert_eq!(workflow.state(), LeadState::Submitting);
        assert!(workflow.begin_submit(Some(&address())).is_err());
        assert!(workflow.set_phone("1").is_err());
    }

    #[tokio::test]
    async fn test_empty_phone_never_reaches_backend() {
        let backend = CountingBackend::default();
        let mut workflow = filled();
        workflow.set_phone("").unwrap();
        let err = workflow.submit(Some(&address()), &backend).await.unwrap_err();
        assert_eq!(err, CoreError::MissingField(FormField::Phone));
        assert_eq!(backend.lead_calls(), 0);
    }

    #[tokio::test]
    async fn test_success_then_close() {
        let backend = CountingBackend::default();
        let mut workflow = filled();
        workflow.submit(Some(&address()), &backend).await.unwrap();
        assert_eq!(backend.lead_calls(), 1);
        assert_eq!(workflow.state(), LeadState::Success);

        let confirmation = workflow.confirmation().unwrap();
        assert_eq!(confirmation.name, "Thandi");
        assert_eq!(confirmation.package_name, "Light User");
        assert_eq!(confirmation.phone, "082 123 4567");

        workflow.close();
        assert_eq!(workflow.state(), LeadState::Idle);
        assert!(workflow.package().is_none());
        assert!(workflow.confirmation().is_none());
    }

    #[tokio::test]
    async fn test_failure_surfaces_retryable_error() {
        let mut workflow = filled();
        let err = workflow
            .submit(Some(&address()), &FailingBackend)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(workflow.state(), LeadState::FormEditing);
        assert!(workflow.last_error().is_some());
        // Form is intact so the same lead can be retried
        assert_eq!(workflow.form().phone, "082 123 4567");

        let backend = CountingBackend::default();
        workflow.submit(Some(&address()), &backend).await.unwrap();
        assert_eq!(workflow.state(), LeadState::Success);
        assert!(workflow.last_error().is_none());
    }

    #[test]
    fn test_closed_submission_outcome_is_dropped() {
        let mut workflow = filled();
        let (first, _) = workflow.begin_submit(Some(&address())).unwrap();
        workflow.close();

        let other = Catalog::builtin().package("os-50").cloned().unwrap();
        workflow.choose_package(other).unwrap();
        workflow.set_name("Thandi").unwrap();
        workflow.set_email("thandi@example.com").unwrap();
        workflow.set_phone("082 123 4567").unwrap();
        workflow.set_consent(true).unwrap();
        let (second, _) = workflow.begin_submit(Some(&address())).unwrap();
        assert_ne!(first, second);

        // The first call resolves late; it must not complete the second lead
        workflow.finish_submit(first, Ok(true));
        assert_eq!(workflow.state(), LeadState::Submitting);
        assert!(workflow.confirmation().is_none());

        workflow.finish_submit(second, Ok(true));
        assert_eq!(workflow.state(), LeadState::Success);
        assert_eq!(workflow.confirmation().unwrap().package_name, "Family Plan");
    }

    #[test]
    fn test_outcome_after_close_is_ignored() {
        let mut workflow = filled();
        let (token, _) = workflow.begin_submit(Some(&address())).unwrap();
        workflow.close();
        workflow.finish_submit(token, Err(CoreError::Transport("late".into())));
        assert_eq!(workflow.state(), LeadState::Idle);
        assert!(workflow.last_error().is_none());
    }

    #[test]
    fn test_lead_wire_format() {
        let mut workflow = filled();
        let (_, lead) = workflow.begin_submit(Some(&address())).unwrap();
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["packageId"], "ff-20");
        assert_eq!(json["address"]["suburb"], "Sandton");
        assert!(lead.validate().is_ok());
    }
}
