//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database.

use chrono::Utc;

use crate::availability::AvailabilityChecker;
use crate::database::Database;
use crate::error::Result;
use crate::newsletter::Subscriber;
use crate::reservation::Reservation;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what was stored.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The stored reservation, if the plan booked one.
    pub reservation: Option<Reservation>,

    /// The newsletter subscriber, if the plan subscribed one.
    pub subscriber: Option<Subscriber>,

    /// Whether the subscriber row was created by this execution.
    pub newly_subscribed: bool,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            ..Self::default()
        }
    }
}

/// Executes operation plans against the database.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting without changes). In normal mode every action of a plan
/// runs in one IMMEDIATE transaction, and reservations are re-checked
/// against the checker inside it.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fausse::{
///     AvailabilityChecker, BookingPolicy, Database, PlanExecutor, ReservationRequest,
///     ReserveOptions, ReservePlan,
/// };
///
/// let mut db = Database::open_in_memory().unwrap();
/// let policy = BookingPolicy::default();
/// let checker = AvailabilityChecker::new(policy.clone());
/// let now = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let request = ReservationRequest::new("Ethan Rivera", "ethan@example.com", 2, "2030-06-01", "20:00");
///
/// let plan = ReservePlan::new(ReserveOptions::new(request, now), &policy)
///     .build_plan(db.connection())
///     .unwrap();
///
/// // Dry-run execution
/// let result = PlanExecutor::new(&mut db, &checker).dry_run().execute(&plan).unwrap();
/// assert!(result.reservation.is_none());
///
/// // Normal execution
/// let result = PlanExecutor::new(&mut db, &checker).execute(&plan).unwrap();
/// assert_eq!(result.reservation.unwrap().id().value(), 1);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    checker: &'a AvailabilityChecker,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database, checker: &'a AvailabilityChecker) -> Self {
        Self {
            db,
            checker,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but does not
    /// modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`](crate::Error::Unavailable) if the slot
    /// filled up since planning, [`Error::LockTimeout`](crate::Error::LockTimeout)
    /// if the write lock cannot be taken, or a database error. Nothing is
    /// written when an error is returned.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::from_plan(plan, self.dry_run);
        if self.dry_run {
            return Ok(result);
        }

        let checker = self.checker;
        let created_at = Utc::now();
        self.db.execute_in_transaction(|conn| {
            for action in &plan.actions {
                match action {
                    PlanAction::CreateReservation(draft) => {
                        let stored = Database::reserve_within(conn, draft, checker, created_at)?;
                        result.reservation = Some(stored);
                    }
                    PlanAction::Subscribe(email) => {
                        let (subscriber, created) = Database::subscribe(conn, email, created_at)?;
                        result.subscriber = Some(subscriber);
                        result.newly_subscribed = created;
                    }
                }
            }
            Ok(())
        })?;

        if let Some(reservation) = &result.reservation {
            log::info!(
                "Reservation {} confirmed: party of {} at {}",
                reservation.id(),
                reservation.party_size(),
                reservation.slot()
            );
        }
        if result.newly_subscribed {
            log::info!("New newsletter subscriber");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookingPolicy;
    use crate::database::test_util::{create_test_database, draft_at};
    use crate::error::Error;
    use chrono::NaiveDate;

    fn plan_for(party: u32, subscribe: bool) -> OperationPlan {
        let starts_at = NaiveDate::from_ymd_opt(2030, 6, 1)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let draft = draft_at(starts_at, party);
        let email = draft.email().to_string();
        let plan = OperationPlan::new("Test").add_action(PlanAction::CreateReservation(draft));
        if subscribe {
            plan.add_action(PlanAction::Subscribe(email))
        } else {
            plan
        }
    }

    #[test]
    fn test_execute_create_reservation() {
        let mut db = create_test_database();
        let checker = AvailabilityChecker::new(BookingPolicy::default());

        let result = PlanExecutor::new(&mut db, &checker)
            .execute(&plan_for(4, false))
            .unwrap();

        assert!(!result.dry_run);
        assert_eq!(result.actions_taken.len(), 1);
        let stored = result.reservation.unwrap();
        let loaded = Database::get_reservation(db.connection(), stored.id())
            .unwrap()
            .unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_execute_subscribes_in_same_transaction() {
        let mut db = create_test_database();
        let checker = AvailabilityChecker::new(BookingPolicy::default());

        let result = PlanExecutor::new(&mut db, &checker)
            .execute(&plan_for(2, true))
            .unwrap();

        assert!(result.newly_subscribed);
        assert_eq!(result.subscriber.unwrap().email(), "guest@example.com");
    }

    #[test]
    fn test_unavailable_rolls_back_subscription() {
        let mut db = create_test_database();
        let checker = AvailabilityChecker::new(BookingPolicy::new(4));

        PlanExecutor::new(&mut db, &checker)
            .execute(&plan_for(4, false))
            .unwrap();
        let err = PlanExecutor::new(&mut db, &checker)
            .execute(&plan_for(2, true))
            .unwrap_err();

        assert!(matches!(err, Error::Unavailable { .. }));
        assert!(Database::get_subscriber(db.connection(), "guest@example.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_dry_run_does_not_modify_database() {
        let mut db = create_test_database();
        let checker = AvailabilityChecker::new(BookingPolicy::default());

        let result = PlanExecutor::new(&mut db, &checker)
            .dry_run()
            .execute(&plan_for(2, true))
            .unwrap();

        assert!(result.dry_run);
        assert_eq!(result.actions_taken.len(), 2);
        assert!(Database::list_all_reservations(db.connection())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_execution_result_includes_warnings() {
        let mut db = create_test_database();
        let checker = AvailabilityChecker::new(BookingPolicy::default());

        let plan = OperationPlan::new("Test")
            .add_warning("Warning 1")
            .add_warning("Warning 2");
        let result = PlanExecutor::new(&mut db, &checker).execute(&plan).unwrap();

        assert_eq!(result.warnings, ["Warning 1", "Warning 2"]);
        assert!(result.reservation.is_none());
    }
}
