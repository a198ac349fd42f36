//! Plan types for reservation operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use crate::reservation::NewReservation;

/// A single action to be taken during plan execution.
///
/// Each action corresponds to a specific database write performed when
/// the plan is executed. All actions of a plan run in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Book a validated reservation, re-checking availability first.
    CreateReservation(NewReservation),

    /// Subscribe a normalized email to the newsletter.
    Subscribe(String),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    ///
    /// # Examples
    ///
    /// ```
    /// use fausse::PlanAction;
    ///
    /// let action = PlanAction::Subscribe("zoe.park@example.com".into());
    /// assert_eq!(action.description(), "Subscribe zoe.park@example.com to the newsletter");
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(draft) => format!(
                "Reserve for {} ({}) party of {} at {}",
                draft.name(),
                draft.email(),
                draft.party_size(),
                draft.slot()
            ),
            Self::Subscribe(email) => format!("Subscribe {email} to the newsletter"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use fausse::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Reserve a table");
    /// assert_eq!(plan.description, "Reserve a table");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns the reservation this plan books, if any.
    #[must_use]
    pub fn reservation(&self) -> Option<&NewReservation> {
        self.actions.iter().find_map(|action| match action {
            PlanAction::CreateReservation(draft) => Some(draft),
            PlanAction::Subscribe(_) => None,
        })
    }
}
