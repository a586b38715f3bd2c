//! # Appointment Scheduler
//!
//! Booking, listing and status changes for appointments.
//!
//! ## Booking Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookingRequest                                                         │
//! │       │                                                                 │
//! │       ├── date < today? ─────────────────────► DateInPast               │
//! │       ├── service not in catalog? ───────────► NotFound(Service)        │
//! │       │                                                                 │
//! │       ├── ClientRef::New(form)                                          │
//! │       │      └── validate + build Client/Vehicle (not inserted yet)     │
//! │       │                                                                 │
//! │       └── ClientRef::Existing { client_id, vehicle_id? }                │
//! │              ├── unknown client ─────────────► NotFound(Client)         │
//! │              ├── vehicle of someone else ────► VehicleNotOwned          │
//! │              └── none given → first vehicle of the client               │
//! │                                                                         │
//! │  Every check passes → insert client/vehicle (if new) + appointment      │
//! │  status = Confirmed, price = catalog price (frozen)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written until every check has passed, so a failed booking
//! leaves the store as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use taller_core::validation::validate_booking_date;
use taller_core::{
    Appointment, AppointmentStatus, CoreError, IdPrefix, Money, NewClient, TimeSlot,
};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Who the appointment is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientRef {
    /// Register a client and vehicle as part of the booking.
    New(NewClient),
    /// Reuse a registered client. Without `vehicle_id` the client's first
    /// vehicle is used.
    Existing {
        client_id: String,
        vehicle_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub client: ClientRef,
    pub service: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
}

/// What the booking form shows after a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingReceipt {
    pub appointment_id: String,
    pub client_id: String,
    pub vehicle_id: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub price: Money,
}

/// List filter. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    fn matches(&self, appointment: &Appointment) -> bool {
        self.date.map_or(true, |d| appointment.date == d)
            && self.status.map_or(true, |s| appointment.status == s)
    }
}

/// Appointment row with client and vehicle details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentView {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub vehicle: String,
    pub plate: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub status: AppointmentStatus,
    pub price: Money,
}

/// One date of the calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

// =============================================================================
// Operations
// =============================================================================

impl Store {
    /// Books an appointment.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use taller_core::TimeSlot;
    /// use taller_store::{BookingRequest, ClientRef, Store, StoreConfig};
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    /// let mut store = Store::seeded(StoreConfig::new().fixed_date(today));
    ///
    /// let receipt = store
    ///     .book(BookingRequest {
    ///         client: ClientRef::Existing { client_id: "CLI001".into(), vehicle_id: None },
    ///         service: "Cambio de frenos".into(),
    ///         date: today,
    ///         time: TimeSlot::H0800,
    ///     })
    ///     .unwrap();
    /// assert_eq!(receipt.vehicle_id, "VEH001");
    /// ```
    pub fn book(&mut self, request: BookingRequest) -> StoreResult<BookingReceipt> {
        validate_booking_date(request.date, self.today())?;
        let price = self.service(&request.service)?.price;

        let (new_rows, client_id, vehicle_id) = match &request.client {
            ClientRef::New(form) => {
                let (client, vehicle) = self.prepare_registration(form)?;
                let ids = (client.id.clone(), vehicle.id.clone());
                (Some((client, vehicle)), ids.0, ids.1)
            }
            ClientRef::Existing {
                client_id,
                vehicle_id,
            } => {
                let vehicle_id = self.resolve_vehicle(client_id, vehicle_id.as_deref())?;
                (None, client_id.clone(), vehicle_id)
            }
        };

        let appointment = Appointment {
            id: self.fresh_id(IdPrefix::Appointment)?,
            client_id,
            vehicle_id,
            service: request.service,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Confirmed,
            price,
        };

        if let Some((client, vehicle)) = new_rows {
            self.insert_registration(client, vehicle);
        }

        info!(
            appointment_id = %appointment.id,
            client_id = %appointment.client_id,
            service = %appointment.service,
            date = %appointment.date,
            time = %appointment.time,
            "Appointment booked"
        );

        let receipt = BookingReceipt {
            appointment_id: appointment.id.clone(),
            client_id: appointment.client_id.clone(),
            vehicle_id: appointment.vehicle_id.clone(),
            service: appointment.service.clone(),
            date: appointment.date,
            time: appointment.time,
            price: appointment.price,
        };
        self.appointments.push(appointment);
        Ok(receipt)
    }

    fn resolve_vehicle(&self, client_id: &str, vehicle_id: Option<&str>) -> StoreResult<String> {
        self.client(client_id)?;

        match vehicle_id {
            Some(id) => {
                let vehicle = self.vehicle(id)?;
                if vehicle.client_id != client_id {
                    return Err(CoreError::VehicleNotOwned {
                        vehicle_id: id.to_string(),
                        client_id: client_id.to_string(),
                    }
                    .into());
                }
                Ok(vehicle.id.clone())
            }
            None => self
                .vehicles_of(client_id)
                .first()
                .map(|v| v.id.clone())
                .ok_or_else(|| StoreError::ForeignKeyViolation {
                    message: format!("client {} has no vehicle on file", client_id),
                }),
        }
    }

    pub fn appointment(&self, id: &str) -> StoreResult<&Appointment> {
        self.appointments
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("Appointment", id))
    }

    /// Appointments matching `filter`, in booking order.
    pub fn list_appointments(&self, filter: AppointmentFilter) -> Vec<&Appointment> {
        let rows: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| filter.matches(a))
            .collect();
        debug!(?filter, count = rows.len(), "Appointment list");
        rows
    }

    /// Like [`Store::list_appointments`], joined with client and vehicle.
    pub fn appointment_views(&self, filter: AppointmentFilter) -> StoreResult<Vec<AppointmentView>> {
        self.list_appointments(filter)
            .into_iter()
            .map(|a| {
                let client = self.client(&a.client_id)?;
                let vehicle = self.vehicle(&a.vehicle_id)?;
                Ok(AppointmentView {
                    id: a.id.clone(),
                    client_id: a.client_id.clone(),
                    client_name: client.name.clone(),
                    vehicle: format!("{} {}", vehicle.make, vehicle.model),
                    plate: vehicle.plate.clone(),
                    service: a.service.clone(),
                    date: a.date,
                    time: a.time,
                    status: a.status,
                    price: a.price,
                })
            })
            .collect()
    }

    /// Marks an appointment Cancelled.
    pub fn cancel(&mut self, id: &str) -> StoreResult<Appointment> {
        self.set_status(id, AppointmentStatus::Cancelled)
    }

    /// Marks an appointment Completed.
    pub fn complete(&mut self, id: &str) -> StoreResult<Appointment> {
        self.set_status(id, AppointmentStatus::Completed)
    }

    fn set_status(&mut self, id: &str, to: AppointmentStatus) -> StoreResult<Appointment> {
        let policy = self.config.transition_policy;
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("Appointment", id))?;

        let from = appointment.status;
        if let Err(err) = policy.check(id, from, to) {
            warn!(appointment_id = %id, %from, %to, "Status change rejected");
            return Err(err.into());
        }

        appointment.status = to;
        info!(appointment_id = %id, %from, %to, "Appointment status changed");
        Ok(appointment.clone())
    }

    /// Number of appointments on `date`, any status.
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.appointments.iter().filter(|a| a.date == date).count()
    }

    /// Open appointments from today on, earliest date first.
    ///
    /// Same-date rows keep booking order.
    pub fn upcoming(&self, limit: usize) -> Vec<&Appointment> {
        let today = self.today();
        let mut rows: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.date >= today && a.status.is_open())
            .collect();
        rows.sort_by_key(|a| a.date);
        rows.truncate(limit);
        rows
    }

    /// Appointments between `from` and `to` inclusive, grouped by date.
    pub fn calendar(&self, from: NaiveDate, to: NaiveDate) -> Vec<CalendarDay> {
        let mut rows: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.date >= from && a.date <= to)
            .collect();
        rows.sort_by_key(|a| (a.date, a.time));

        let mut days: Vec<CalendarDay> = Vec::new();
        for appointment in rows {
            match days.last_mut() {
                Some(day) if day.date == appointment.date => {
                    day.appointments.push(appointment.clone())
                }
                _ => days.push(CalendarDay {
                    date: appointment.date,
                    appointments: vec![appointment.clone()],
                }),
            }
        }
        days
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
