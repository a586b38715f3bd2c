//! # Appointment Commands
//!
//! Booking form, "my appointments" table, status buttons, and the admin
//! upcoming and calendar views.
//!
//! ```text
//!   book ──► BookingRequest ──► Store::book ──► BookingConfirmation
//!                                                 (receipt + "$50,000")
//!
//!   cancel / complete ──► Store::set_status under the session's policy
//! ```

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::debug;

use taller_core::{Appointment, UPCOMING_LIMIT};
use taller_store::{AppointmentFilter, AppointmentView, BookingReceipt, BookingRequest, CalendarDay};

use crate::error::ApiError;
use crate::state::Session;

/// Default span of the calendar view when no end date is given.
pub const CALENDAR_DEFAULT_DAYS: u64 = 7;

/// Booking receipt with the price rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    #[serde(flatten)]
    pub receipt: BookingReceipt,
    pub price_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayCount {
    pub date: NaiveDate,
    pub count: usize,
}

pub fn book_appointment(
    session: &mut Session,
    request: BookingRequest,
) -> Result<BookingConfirmation, ApiError> {
    let receipt = session.store_mut().book(request)?;
    let price_display = session.config().format_currency(receipt.price);
    Ok(BookingConfirmation {
        receipt,
        price_display,
    })
}

/// Appointment table, optionally filtered by date and status.
pub fn list_appointments(
    session: &Session,
    filter: AppointmentFilter,
) -> Result<Vec<AppointmentView>, ApiError> {
    debug!(?filter, "list_appointments command");
    Ok(session.store().appointment_views(filter)?)
}

pub fn cancel_appointment(session: &mut Session, id: &str) -> Result<Appointment, ApiError> {
    Ok(session.store_mut().cancel(id)?)
}

pub fn complete_appointment(session: &mut Session, id: &str) -> Result<Appointment, ApiError> {
    Ok(session.store_mut().complete(id)?)
}

/// Appointments scheduled for today, any status.
pub fn today_count(session: &Session) -> Result<TodayCount, ApiError> {
    let store = session.store();
    let date = store.today();
    Ok(TodayCount {
        date,
        count: store.count_on(date),
    })
}

/// Next open appointments. Admin only.
pub fn upcoming(session: &Session) -> Result<Vec<Appointment>, ApiError> {
    session.require_admin()?;
    Ok(session
        .store()
        .upcoming(UPCOMING_LIMIT)
        .into_iter()
        .cloned()
        .collect())
}

/// Appointments grouped by date. Admin only.
///
/// `from` defaults to today and `to` to a week after `from`.
pub fn calendar(
    session: &Session,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<CalendarDay>, ApiError> {
    session.require_admin()?;
    let from = from.unwrap_or_else(|| session.store().today());
    let to = match to {
        Some(to) => to,
        None => from
            .checked_add_days(Days::new(CALENDAR_DEFAULT_DAYS))
            .ok_or_else(|| ApiError::validation("from is out of range"))?,
    };
    if to < from {
        return Err(ApiError::validation("to must not be before from"));
    }
    Ok(session.store().calendar(from, to))
}

#[cfg(test)]
mod tests {
    use taller_core::{AppointmentStatus, NewClient, TimeSlot};
    use taller_store::{ClientRef, Clock};

    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn session() -> Session {
        Session::new(ConfigState::default(), Clock::Fixed(today()))
    }

    fn admin_session() -> Session {
        let mut session = session();
        session.gate_mut().login("admin", "admin123").unwrap();
        session
    }

    #[test]
    fn test_book_for_new_client() {
        let mut session = session();
        let confirmation = book_appointment(
            &mut session,
            BookingRequest {
                client: ClientRef::New(NewClient {
                    name: "Luis Rojas".to_string(),
                    phone: "999".to_string(),
                    email: String::new(),
                    make: "Nissan".to_string(),
                    model: "Sentra".to_string(),
                    year: 2018,
                    plate: "NIS018".to_string(),
                }),
                service: "Cambio de frenos".to_string(),
                date: today(),
                time: TimeSlot::H0900,
            },
        )
        .unwrap();

        assert_eq!(confirmation.price_display, "$150,000");
        assert_eq!(today_count(&session).unwrap().count, 1);

        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["service"], "Cambio de frenos");
        assert_eq!(json["time"], "09:00");
    }

    #[test]
    fn test_book_in_the_past_fails() {
        let mut session = session();
        let err = book_appointment(
            &mut session,
            BookingRequest {
                client: ClientRef::Existing {
                    client_id: "CLI001".to_string(),
                    vehicle_id: None,
                },
                service: "Cambio de aceite".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(),
                time: TimeSlot::H0800,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.store().appointments().len(), 2);
    }

    #[test]
    fn test_status_buttons() {
        let mut session = session();
        let done = complete_appointment(&mut session, "CIT001").unwrap();
        assert_eq!(done.status, AppointmentStatus::Completed);

        let cancelled = cancel_appointment(&mut session, "CIT002").unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

        let err = cancel_appointment(&mut session, "CIT999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_list_with_filter() {
        let session = session();
        let pending = list_appointments(
            &session,
            AppointmentFilter {
                date: None,
                status: Some(AppointmentStatus::Pending),
            },
        )
        .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].client_name, "María García");
    }

    #[test]
    fn test_admin_views_require_login() {
        let session = session();
        assert_eq!(upcoming(&session).unwrap_err().code, ErrorCode::Unauthorized);
        assert_eq!(
            calendar(&session, None, None).unwrap_err().code,
            ErrorCode::Unauthorized
        );
    }

    #[test]
    fn test_calendar_defaults_to_a_week() {
        let session = admin_session();
        let days = calendar(&session, None, None).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].appointments[0].id, "CIT001");

        let only_tomorrow = calendar(&session, Some(today()), today().succ_opt()).unwrap();
        assert_eq!(only_tomorrow.len(), 1);

        assert!(calendar(&session, today().succ_opt(), Some(today())).is_err());
        assert_eq!(upcoming(&session).unwrap().len(), 2);
    }
}
