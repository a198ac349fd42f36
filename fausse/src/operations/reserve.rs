//! Reserve operation planning.
//!
//! Planning validates the raw request and runs a preliminary availability
//! check, so most rejections happen before any write lock is taken. The
//! executor repeats the check inside the transaction.

use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;

use crate::availability::{Availability, AvailabilityChecker};
use crate::config::BookingPolicy;
use crate::error::Result;
use crate::reservation::request::ReservationRequest;

use super::plan::{OperationPlan, PlanAction};

/// Options for a reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The raw reservation request.
    pub request: ReservationRequest,

    /// Current local date-time, used to reject past slots.
    pub now: NaiveDateTime,
}

impl ReserveOptions {
    /// Creates options evaluated at the given local time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fausse::{ReservationRequest, ReserveOptions};
    ///
    /// let now = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let request = ReservationRequest::new("Leo Carter", "leo@example.com", 2, "2030-06-01", "18:00");
    /// let options = ReserveOptions::new(request, now);
    /// assert_eq!(options.now, now);
    /// ```
    #[must_use]
    pub const fn new(request: ReservationRequest, now: NaiveDateTime) -> Self {
        Self { request, now }
    }

    /// Creates options evaluated at the current local time.
    #[must_use]
    pub fn now(request: ReservationRequest) -> Self {
        Self::new(request, Local::now().naive_local())
    }
}

/// A reservation plan generator.
///
/// This struct is responsible for analyzing a reserve request and
/// generating a plan that describes what actions to take.
pub struct ReservePlan<'a> {
    options: ReserveOptions,
    policy: &'a BookingPolicy,
}

impl<'a> ReservePlan<'a> {
    /// Creates a new reserve plan with the given options and policy.
    #[must_use]
    pub const fn new(options: ReserveOptions, policy: &'a BookingPolicy) -> Self {
        Self { options, policy }
    }

    /// Builds the plan for this request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) when
    /// validation fails, [`Error::Unavailable`](crate::Error::Unavailable)
    /// when the slot cannot seat the party, or a database error.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fausse::{BookingPolicy, Database, ReservationRequest, ReserveOptions, ReservePlan};
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// let policy = BookingPolicy::default();
    /// let now = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let request = ReservationRequest::new("Leo Carter", "leo@example.com", 2, "2030-06-01", "18:00")
    ///     .with_newsletter_signup(true);
    ///
    /// let plan = ReservePlan::new(ReserveOptions::new(request, now), &policy)
    ///     .build_plan(db.connection())
    ///     .unwrap();
    /// assert_eq!(plan.len(), 2);
    /// ```
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let draft = self.options.request.validate(self.policy, self.options.now)?;

        let checker = AvailabilityChecker::new(self.policy.clone());
        let availability = checker.check(conn, draft.slot(), draft.party_size())?;
        log::debug!("Preliminary check for {}: {availability:?}", draft.slot());

        let table = match availability {
            Availability::Available {
                table: Some(table), ..
            } => format!(" (table {table})"),
            _ => String::new(),
        };
        let mut plan = OperationPlan::new(format!(
            "Reserve party of {} at {}{table}",
            draft.party_size(),
            draft.slot()
        ));
        if availability.is_available()
            && availability.remaining_capacity() == draft.party_size().value()
        {
            plan = plan.add_warning(format!(
                "This booking takes the last seats at {}",
                draft.slot()
            ));
        }
        availability.into_table(draft.slot())?;

        let email = draft.email().to_string();
        plan = plan.add_action(PlanAction::CreateReservation(draft));
        if self.options.request.newsletter_signup {
            plan = plan.add_action(PlanAction::Subscribe(email));
        }

        Ok(plan)
    }
}
