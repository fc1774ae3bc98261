//! # Table Reservations
//!
//! The café reservation form and its conversion into a `Reservation`.
//!
//! The form starts prefilled from the signed-in customer, with no date or
//! time, two guests and a family gathering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::schedule::ClockTime;
use crate::types::{Reservation, ReservationKind, ReservationStatus, User};
use crate::validation::{
    validate_email, validate_guests, validate_name, validate_phone, validate_reservation_date,
    ValidationResult,
};

/// Party size the form starts with.
pub const DEFAULT_GUESTS: u32 = 2;

/// What the customer fills in on the reservation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReservationRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub time: Option<ClockTime>,
    pub guests: u32,
    pub kind: ReservationKind,
}

impl Default for ReservationRequest {
    fn default() -> Self {
        ReservationRequest {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            date: None,
            time: None,
            guests: DEFAULT_GUESTS,
            kind: ReservationKind::default(),
        }
    }
}

impl ReservationRequest {
    /// A blank form with contact fields copied from `user`.
    pub fn prefilled(user: Option<&User>) -> Self {
        match user {
            Some(user) => ReservationRequest {
                name: user.name.clone(),
                phone: user.phone.clone(),
                email: user.email.clone(),
                ..Default::default()
            },
            None => ReservationRequest::default(),
        }
    }

    /// Checks every field. The first failing field is reported.
    pub fn validate(&self, today: NaiveDate) -> ValidationResult<()> {
        validate_name(&self.name)?;
        validate_phone(&self.phone)?;
        validate_email(&self.email)?;

        let date = self.date.ok_or_else(|| ValidationError::Required {
            field: "date".to_string(),
        })?;
        validate_reservation_date(date, today)?;

        if self.time.is_none() {
            return Err(ValidationError::Required {
                field: "time".to_string(),
            });
        }

        validate_guests(self.guests)
    }

    /// Validates and builds a pending reservation.
    pub fn into_reservation(
        self,
        id: String,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> CoreResult<Reservation> {
        self.validate(today)?;

        let (Some(date), Some(time)) = (self.date, self.time) else {
            // validate() rejects missing date/time
            return Err(ValidationError::Required {
                field: "date".to_string(),
            }
            .into());
        };

        Ok(Reservation {
            id,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            date,
            time,
            guests: self.guests,
            kind: self.kind,
            status: ReservationStatus::Pending,
            created_at: now,
        })
    }
}

/// Reservation id: `RES-` followed by the last six digits of the epoch
/// millis.
pub fn generate_reservation_id(now: DateTime<Utc>) -> String {
    format!("RES-{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
    }

    fn filled() -> ReservationRequest {
        ReservationRequest {
            name: "Maria Souza".to_string(),
            phone: "(11) 98888-7777".to_string(),
            email: "maria@empresa.com.br".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
            time: "12:30".parse().ok(),
            guests: 8,
            kind: ReservationKind::Corporate,
        }
    }

    #[test]
    fn test_prefilled_copies_contact() {
        let user = User {
            id: "1".to_string(),
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
        };

        let form = ReservationRequest::prefilled(Some(&user));
        assert_eq!(form.name, "João Silva");
        assert_eq!(form.email, "joao@email.com");
        assert_eq!(form.guests, DEFAULT_GUESTS);
        assert_eq!(form.kind, ReservationKind::Family);
        assert!(form.date.is_none());

        let anonymous = ReservationRequest::prefilled(None);
        assert!(anonymous.name.is_empty());
    }

    #[test]
    fn test_valid_request() {
        assert!(filled().validate(today()).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let mut req = filled();
        req.date = None;
        assert!(matches!(
            req.validate(today()),
            Err(ValidationError::Required { ref field }) if field == "date"
        ));

        let mut req = filled();
        req.time = None;
        assert!(req.validate(today()).is_err());

        let mut req = filled();
        req.name = "  ".to_string();
        assert!(req.validate(today()).is_err());
    }

    #[test]
    fn test_guest_bounds() {
        let mut req = filled();
        req.guests = 0;
        assert!(req.validate(today()).is_err());
        req.guests = 21;
        assert!(req.validate(today()).is_err());
        req.guests = 20;
        assert!(req.validate(today()).is_ok());
    }

    #[test]
    fn test_past_date_rejected() {
        let mut req = filled();
        req.date = NaiveDate::from_ymd_opt(2024, 6, 8);
        assert!(req.validate(today()).is_err());
    }

    #[test]
    fn test_into_reservation() {
        let now = Utc.with_ymd_and_hms(2024, 6, 9, 10, 0, 0).unwrap();
        let res = filled()
            .into_reservation("RES-000123".to_string(), now, today())
            .unwrap();

        assert_eq!(res.id, "RES-000123");
        assert_eq!(res.status, ReservationStatus::Pending);
        assert_eq!(res.guests, 8);
        assert_eq!(res.time.to_string(), "12:30");
        assert_eq!(res.created_at, now);
    }

    #[test]
    fn test_into_reservation_rejects_invalid() {
        let mut req = filled();
        req.email = "maria".to_string();
        let err = req
            .into_reservation("RES-1".to_string(), Utc::now(), today())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_reservation_id_format() {
        let now = Utc.timestamp_millis_opt(1_717_920_987_654).unwrap();
        assert_eq!(generate_reservation_id(now), "RES-987654");
    }
}
