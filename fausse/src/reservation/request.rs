//! Raw reservation requests and their validation.
//!
//! [`ReservationRequest`] mirrors the JSON body the reservation form posts.
//! Every field is accepted leniently at the deserialization boundary so that
//! [`ReservationRequest::validate`] can report all problems at once, keyed by
//! field name, instead of failing on the first malformed value.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::BookingPolicy;
use crate::newsletter::normalize_email;
use crate::party::PartySize;
use crate::reservation::NewReservation;
use crate::slot::{parse_date, parse_time, Slot};

/// Maximum length of a customer name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a phone number, in characters.
pub const MAX_PHONE_LEN: usize = 20;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// A problem with a single request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, as it appears in the request body.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Every field error found in one request, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Records another field error.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Iterates over the recorded errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns true if no error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if some error concerns `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Party size as sent by a client: a number, a float or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartySizeInput {
    /// An integer literal.
    Number(i64),
    /// A floating point literal; accepted only when it is a whole number.
    Float(f64),
    /// A string such as `"4"`.
    Text(String),
}

impl PartySizeInput {
    /// Converts the input into a party size.
    ///
    /// # Errors
    ///
    /// Returns a `party_size` field error for anything but a positive whole
    /// number within the allowed range.
    pub fn resolve(&self) -> Result<PartySize, FieldError> {
        let invalid = || FieldError::new("party_size", "party size must be a positive whole number");

        let value = match self {
            Self::Number(n) => *n,
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => *f as i64,
            Self::Float(_) => return Err(invalid()),
            Self::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        };

        PartySize::try_from(value).map_err(|e| FieldError::new("party_size", e.reason))
    }
}

impl From<i64> for PartySizeInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// A text field as sent by a client. Any JSON value is accepted so that a
/// wrong type becomes a field error rather than a rejected body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    /// A JSON string.
    Text(String),
    /// Any other JSON value; `null` reads as an empty string.
    Other(serde_json::Value),
}

impl TextInput {
    /// Returns the text, or a `field` error when the client sent a
    /// non-string value.
    ///
    /// # Errors
    ///
    /// Returns a field error for numbers, booleans, arrays and objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use fausse::reservation::request::TextInput;
    ///
    /// assert_eq!(TextInput::from("Ada").text("name").unwrap(), "Ada");
    /// let number = TextInput::Other(serde_json::json!(5));
    /// assert_eq!(number.text("name").unwrap_err().field, "name");
    /// ```
    pub fn text(&self, field: &str) -> Result<&str, FieldError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Other(serde_json::Value::Null) => Ok(""),
            Self::Other(_) => Err(FieldError::new(field, format!("{field} must be a string"))),
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A reservation request as submitted by the form.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fausse::{BookingPolicy, ReservationRequest};
///
/// let now = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let request = ReservationRequest::new("", "not-an-email", 0, "2030-04-30", "19:00");
///
/// let errors = request.validate(&BookingPolicy::default(), now).unwrap_err();
/// assert!(errors.contains("name"));
/// assert!(errors.contains("email"));
/// assert!(errors.contains("party_size"));
/// assert!(errors.contains("date"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Customer name.
    #[serde(default)]
    pub name: TextInput,
    /// Customer email.
    #[serde(default)]
    pub email: TextInput,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<TextInput>,
    /// Requested party size.
    #[serde(default)]
    pub party_size: Option<PartySizeInput>,
    /// Requested date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: TextInput,
    /// Requested time, `HH:MM`.
    #[serde(default)]
    pub time: TextInput,
    /// Whether to subscribe the email to the newsletter.
    #[serde(default)]
    pub newsletter_signup: bool,
}

impl ReservationRequest {
    /// Creates a request without phone number or newsletter signup.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        party_size: i64,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: TextInput::Text(name.into()),
            email: TextInput::Text(email.into()),
            phone: None,
            party_size: Some(PartySizeInput::Number(party_size)),
            date: TextInput::Text(date.into()),
            time: TextInput::Text(time.into()),
            newsletter_signup: false,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(TextInput::Text(phone.into()));
        self
    }

    /// Requests a newsletter subscription alongside the booking.
    #[must_use]
    pub fn with_newsletter_signup(mut self, signup: bool) -> Self {
        self.newsletter_signup = signup;
        self
    }

    /// Validates the request against the booking policy.
    ///
    /// `now` is the current local date-time; it decides whether the date or
    /// time lies in the past. Validation has no side effects.
    ///
    /// # Errors
    ///
    /// Returns every invalid field, in the order name, email, phone,
    /// `party_size`, date, time.
    pub fn validate(
        &self,
        policy: &BookingPolicy,
        now: NaiveDateTime,
    ) -> Result<NewReservation, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = collect(&mut errors, self.name.text("name").and_then(validate_name));
        let email = collect(&mut errors, self.email.text("email").and_then(normalize_email));
        let phone = collect(
            &mut errors,
            self.phone
                .as_ref()
                .map(|p| p.text("phone"))
                .transpose()
                .and_then(validate_phone),
        );
        let party_size = collect(
            &mut errors,
            self.party_size
                .as_ref()
                .ok_or_else(|| FieldError::new("party_size", "party size is required"))
                .and_then(PartySizeInput::resolve),
        );
        let date = collect(
            &mut errors,
            self.date.text("date").and_then(|raw| validate_date(raw, now)),
        );
        let time = collect(
            &mut errors,
            self.time
                .text("time")
                .and_then(|raw| validate_time(raw, date, policy, now)),
        );

        match (name, email, phone, party_size, date, time) {
            (Some(name), Some(email), Some(phone), Some(party_size), Some(date), Some(time))
                if errors.is_empty() =>
            {
                NewReservation::builder(name, email, party_size, Slot::new(date, time))
                    .phone(phone)
                    .build()
                    .map_err(|e| {
                        let mut errors = ValidationErrors::default();
                        errors.push(e);
                        errors
                    })
            }
            _ => Err(errors),
        }
    }
}

fn collect<T>(errors: &mut ValidationErrors, result: Result<T, FieldError>) -> Option<T> {
    result.map_err(|e| errors.push(e)).ok()
}

fn validate_name(raw: &str) -> Result<String, FieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FieldError::new("name", "name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(FieldError::new(
            "name",
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

fn validate_phone(raw: Option<&str>) -> Result<Option<String>, FieldError> {
    let Some(phone) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    if phone.chars().count() > MAX_PHONE_LEN {
        return Err(FieldError::new(
            "phone",
            format!("phone must be at most {MAX_PHONE_LEN} characters"),
        ));
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '))
    {
        return Err(FieldError::new("phone", "phone contains invalid characters"));
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(FieldError::new(
            "phone",
            format!("phone must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
        ));
    }

    Ok(Some(phone.to_string()))
}

fn validate_date(raw: &str, now: NaiveDateTime) -> Result<chrono::NaiveDate, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new("date", "date is required"));
    }
    let date = parse_date(raw).ok_or_else(|| FieldError::new("date", "date must be YYYY-MM-DD"))?;
    if date < now.date() {
        return Err(FieldError::new("date", "date is in the past"));
    }
    Ok(date)
}

fn validate_time(
    raw: &str,
    date: Option<chrono::NaiveDate>,
    policy: &BookingPolicy,
    now: NaiveDateTime,
) -> Result<chrono::NaiveTime, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new("time", "time is required"));
    }
    let time = parse_time(raw).ok_or_else(|| FieldError::new("time", "time must be HH:MM"))?;

    if !policy.is_within_service_hours(time) {
        return Err(FieldError::new(
            "time",
            format!(
                "time must be between {} and {}",
                policy.open().format("%H:%M"),
                policy.last_seating().format("%H:%M")
            ),
        ));
    }
    if !policy.is_slot_boundary(time) {
        return Err(FieldError::new(
            "time",
            format!(
                "time must fall on a {}-minute slot",
                policy.slot_interval().num_minutes()
            ),
        ));
    }
    if date.is_some_and(|d| d == now.date() && d.and_time(time) <= now) {
        return Err(FieldError::new("time", "time has already passed"));
    }

    Ok(time)
}
