//! # Reporting Engine
//!
//! Read-only aggregations over a store.
//!
//! ## Ordering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Report                    Rows                   Order                 │
//! │  ────────────────────────  ─────────────────────  ────────────────────  │
//! │  status_distribution       statuses present       count desc,           │
//! │                                                   ties: declaration     │
//! │  revenue_by_service        Completed only         revenue desc,         │
//! │                                                   ties: first seen      │
//! │  revenue_by_month          Completed only         chronological         │
//! │  most_requested_services   all appointments       count desc,           │
//! │                                                   ties: first seen      │
//! │  most_frequent_clients     all appointments       count desc, top 10    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Revenue only counts Completed appointments: a booking that was never
//! carried out earned nothing.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::Datelike;
use serde::Serialize;
use tracing::debug;

use taller_core::{Appointment, AppointmentStatus, Money, TOP_CLIENTS_LIMIT};

use crate::error::StoreResult;
use crate::store::Store;

// =============================================================================
// Report Rows
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRevenue {
    pub service: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRevenue {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub service: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientVisits {
    pub client_id: String,
    pub name: String,
    pub appointments: usize,
}

/// Appointment counts per status, every status included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusTotals {
    pub confirmed: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Headline figures of the reports page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTotals {
    pub clients: usize,
    pub vehicles: usize,
    pub inventory_items: usize,
    pub appointments: usize,
    pub by_status: StatusTotals,
    /// Sum over Completed appointments.
    pub total_revenue: Money,
    /// Mean over Completed appointments, zero when there are none.
    pub mean_revenue: Money,
}

/// Figures shown on the dashboard home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_clients: usize,
    pub total_appointments: usize,
    pub appointments_today: usize,
    pub completed_revenue: Money,
    pub low_stock_items: usize,
}

// =============================================================================
// Reports
// =============================================================================

/// Read-only report view over a [`Store`].
///
/// ## Usage
/// ```rust
/// use taller_store::{Store, StoreConfig};
///
/// let store = Store::seeded(StoreConfig::new());
/// let reports = store.reports();
///
/// assert!(reports.revenue_by_service().is_empty());
/// assert_eq!(reports.most_requested_services().len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reports<'s> {
    store: &'s Store,
}

impl<'s> Reports<'s> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Reports { store }
    }

    fn completed(&self) -> impl Iterator<Item = &'s Appointment> {
        let store = self.store;
        store
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
    }

    /// Count per status present, most frequent first.
    pub fn status_distribution(&self) -> Vec<StatusCount> {
        let mut rows: Vec<StatusCount> = AppointmentStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: self
                    .store
                    .appointments
                    .iter()
                    .filter(|a| a.status == status)
                    .count(),
            })
            .filter(|row| row.count > 0)
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Completed revenue per service, highest first.
    pub fn revenue_by_service(&self) -> Vec<ServiceRevenue> {
        let totals = tally(self.completed().map(|a| (a.service.clone(), a.price)));
        let mut rows: Vec<ServiceRevenue> = totals
            .into_iter()
            .map(|(service, revenue)| ServiceRevenue { service, revenue })
            .collect();
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        debug!(services = rows.len(), "Revenue by service");
        rows
    }

    /// Completed revenue per calendar month, oldest first.
    pub fn revenue_by_month(&self) -> Vec<MonthRevenue> {
        let mut months: BTreeMap<(i32, u32), Money> = BTreeMap::new();
        for a in self.completed() {
            *months.entry((a.date.year(), a.date.month())).or_default() += a.price;
        }
        months
            .into_iter()
            .map(|((year, month), revenue)| MonthRevenue {
                month: format!("{:04}-{:02}", year, month),
                revenue,
            })
            .collect()
    }

    /// Bookings per service over all appointments, most booked first.
    pub fn most_requested_services(&self) -> Vec<ServiceCount> {
        let counts = tally(self.store.appointments.iter().map(|a| (a.service.clone(), 1usize)));
        let mut rows: Vec<ServiceCount> = counts
            .into_iter()
            .map(|(service, count)| ServiceCount { service, count })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// The ten clients with most appointments, with their current names.
    pub fn most_frequent_clients(&self) -> StoreResult<Vec<ClientVisits>> {
        let mut counts = tally(
            self.store
                .appointments
                .iter()
                .map(|a| (a.client_id.clone(), 1usize)),
        );
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_CLIENTS_LIMIT);

        counts
            .into_iter()
            .map(|(client_id, appointments)| {
                let name = self.store.client(&client_id)?.name.clone();
                Ok(ClientVisits {
                    client_id,
                    name,
                    appointments,
                })
            })
            .collect()
    }

    pub fn summary_totals(&self) -> SummaryTotals {
        let mut by_status = StatusTotals::default();
        for a in &self.store.appointments {
            match a.status {
                AppointmentStatus::Confirmed => by_status.confirmed += 1,
                AppointmentStatus::Pending => by_status.pending += 1,
                AppointmentStatus::Completed => by_status.completed += 1,
                AppointmentStatus::Cancelled => by_status.cancelled += 1,
            }
        }

        let total_revenue: Money = self.completed().map(|a| a.price).sum();
        SummaryTotals {
            clients: self.store.clients.len(),
            vehicles: self.store.vehicles.len(),
            inventory_items: self.store.items.len(),
            appointments: self.store.appointments.len(),
            mean_revenue: total_revenue.mean_over(by_status.completed),
            total_revenue,
            by_status,
        }
    }

    pub fn dashboard_metrics(&self) -> DashboardMetrics {
        DashboardMetrics {
            total_clients: self.store.clients.len(),
            total_appointments: self.store.appointments.len(),
            appointments_today: self.store.count_on(self.store.today()),
            completed_revenue: self.completed().map(|a| a.price).sum(),
            low_stock_items: self.store.items.iter().filter(|i| i.is_low_stock()).count(),
        }
    }
}

/// Sums values per key, keeping keys in order of first appearance.
///
/// Callers sort the result with a stable sort, so equal totals stay in
/// first-appearance order.
fn tally<K, V, I>(pairs: I) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
    V: std::ops::AddAssign + Copy,
    I: IntoIterator<Item = (K, V)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut rows: Vec<(K, V)> = Vec::new();
    for (key, value) in pairs {
        match index.get(&key) {
            Some(&at) => rows[at].1 += value,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push((key, value));
            }
        }
    }
    rows
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};
    use taller_core::TimeSlot;

    use super::*;
    use crate::scheduler::{BookingRequest, ClientRef};
    use crate::store::StoreConfig;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 30).unwrap()
    }

    fn store() -> Store {
        Store::seeded(StoreConfig::new().fixed_date(today()))
    }

    fn book(store: &mut Store, client: &str, service: &str, days: u64) -> String {
        store
            .book(BookingRequest {
                client: ClientRef::Existing {
                    client_id: client.to_string(),
                    vehicle_id: None,
                },
                service: service.to_string(),
                date: today() + Days::new(days),
                time: TimeSlot::H1100,
            })
            .unwrap()
            .appointment_id
    }

    #[test]
    fn test_seed_summary_has_no_revenue() {
        let totals = store().reports().summary_totals();
        assert_eq!(totals.clients, 2);
        assert_eq!(totals.vehicles, 2);
        assert_eq!(totals.inventory_items, 4);
        assert_eq!(totals.appointments, 2);
        assert_eq!(totals.by_status.completed, 0);
        assert_eq!(totals.by_status.confirmed, 1);
        assert_eq!(totals.by_status.pending, 1);
        assert_eq!(totals.total_revenue, Money::zero());
        assert_eq!(totals.mean_revenue, Money::zero());
    }

    #[test]
    fn test_revenue_counts_completed_only() {
        let mut store = store();
        store.complete("CIT002").unwrap();
        let extra = book(&mut store, "CLI001", "Cambio de aceite", 3);
        store.complete(&extra).unwrap();
        book(&mut store, "CLI002", "Cambio de frenos", 4);

        let reports = store.reports();
        let by_service = reports.revenue_by_service();
        assert_eq!(by_service.len(), 2);
        assert_eq!(by_service[0].service, "Revisión general");
        assert_eq!(by_service[0].revenue, Money::from_major(120_000));
        assert_eq!(by_service[1].service, "Cambio de aceite");
        assert_eq!(by_service[1].revenue, Money::from_major(50_000));

        let totals = reports.summary_totals();
        assert_eq!(totals.total_revenue, Money::from_major(170_000));
        assert_eq!(totals.mean_revenue, Money::from_major(85_000));
        assert_eq!(
            reports.dashboard_metrics().completed_revenue,
            Money::from_major(170_000)
        );
    }

    #[test]
    fn test_revenue_by_month_is_chronological() {
        let mut store = store();
        // today is 2024-05-30: +1 lands in May, +2 and +5 in June
        store.complete("CIT001").unwrap();
        store.complete("CIT002").unwrap();
        let june = book(&mut store, "CLI001", "Cambio de filtros", 5);
        store.complete(&june).unwrap();

        let months = store.reports().revenue_by_month();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-05");
        assert_eq!(months[0].revenue, Money::from_major(50_000));
        assert_eq!(months[1].month, "2024-06");
        assert_eq!(months[1].revenue, Money::from_major(180_000));
    }

    #[test]
    fn test_revenue_by_month_skips_open_and_cancelled() {
        let mut store = store();
        // every row below falls on 2024-05-31
        let done = book(&mut store, "CLI001", "Cambio de filtros", 1);
        store.complete(&done).unwrap();
        let cancelled = book(&mut store, "CLI002", "Cambio de frenos", 1);
        store.cancel(&cancelled).unwrap();
        let pending = book(&mut store, "CLI002", "Revisión general", 1);
        store
            .appointments
            .iter_mut()
            .filter(|a| a.id == pending)
            .for_each(|a| a.status = AppointmentStatus::Pending);
        // CIT001 stays Confirmed on the same day

        let months = store.reports().revenue_by_month();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, "2024-05");
        assert_eq!(months[0].revenue, Money::from_major(60_000));

        let by_service = store.reports().revenue_by_service();
        assert_eq!(by_service.len(), 1);
        assert_eq!(by_service[0].service, "Cambio de filtros");
    }

    #[test]
    fn test_revenue_totals_clamp_instead_of_overflowing() {
        let mut store = store();
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        for id in ["CIT001", "CIT002"] {
            store
                .appointments
                .iter_mut()
                .filter(|a| a.id == id)
                .for_each(|a| {
                    a.price = huge;
                    a.status = AppointmentStatus::Completed;
                });
        }

        let reports = store.reports();
        let totals = reports.summary_totals();
        assert_eq!(totals.total_revenue.cents(), i64::MAX);
        assert_eq!(totals.mean_revenue.cents(), i64::MAX / 2 + 1);
        assert_eq!(reports.dashboard_metrics().completed_revenue.cents(), i64::MAX);
        let months: Money = reports.revenue_by_month().iter().map(|m| m.revenue).sum();
        assert_eq!(months.cents(), i64::MAX);
    }

    #[test]
    fn test_status_distribution_ties_keep_declaration_order() {
        let mut store = store();
        let reports = store.reports().status_distribution();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].status, AppointmentStatus::Confirmed);
        assert_eq!(reports[1].status, AppointmentStatus::Pending);

        store.cancel("CIT001").unwrap();
        book(&mut store, "CLI001", "Cambio de aceite", 1);
        book(&mut store, "CLI002", "Cambio de aceite", 1);
        let rows = store.reports().status_distribution();
        assert_eq!(rows[0].status, AppointmentStatus::Confirmed);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].status, AppointmentStatus::Pending);
        assert_eq!(rows[2].status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_most_requested_services() {
        let mut store = store();
        book(&mut store, "CLI002", "Revisión general", 3);

        let rows = store.reports().most_requested_services();
        assert_eq!(rows[0].service, "Revisión general");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].service, "Cambio de aceite");
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_most_frequent_clients() {
        let mut store = store();
        book(&mut store, "CLI002", "Cambio de filtros", 3);

        let rows = store.reports().most_frequent_clients().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].client_id, "CLI002");
        assert_eq!(rows[0].name, "María García");
        assert_eq!(rows[0].appointments, 2);
        assert_eq!(rows[1].client_id, "CLI001");
    }

    #[test]
    fn test_most_frequent_clients_top_ten() {
        let mut store = store();
        for i in 0..12 {
            let reg = store
                .register(taller_core::NewClient {
                    name: format!("Cliente {}", i),
                    phone: format!("300000{:04}", i),
                    email: String::new(),
                    make: "Chevrolet".to_string(),
                    model: "Spark".to_string(),
                    year: 2012,
                    plate: format!("SPK{:03}", i),
                })
                .unwrap();
            book(&mut store, &reg.client_id, "Cambio de aceite", 1);
        }
        assert_eq!(store.reports().most_frequent_clients().unwrap().len(), 10);
    }

    #[test]
    fn test_dashboard_metrics() {
        let mut store = store();
        book(&mut store, "CLI001", "Cambio de aceite", 0);
        store.update_stock("INV003", 1).unwrap();

        let metrics = store.reports().dashboard_metrics();
        assert_eq!(metrics.total_clients, 2);
        assert_eq!(metrics.total_appointments, 3);
        assert_eq!(metrics.appointments_today, 1);
        assert_eq!(metrics.completed_revenue, Money::zero());
        assert_eq!(metrics.low_stock_items, 1);
    }

    #[test]
    fn test_empty_store_reports() {
        let store = Store::empty(StoreConfig::new().fixed_date(today()));
        let reports = store.reports();
        assert!(reports.status_distribution().is_empty());
        assert!(reports.revenue_by_month().is_empty());
        assert!(reports.most_frequent_clients().unwrap().is_empty());
        assert_eq!(reports.summary_totals().mean_revenue, Money::zero());
    }

    #[test]
    fn test_tally_keeps_first_appearance() {
        let rows = tally(vec![("b", 1), ("a", 2), ("b", 1), ("c", 2)]);
        assert_eq!(rows, vec![("b", 2), ("a", 2), ("c", 2)]);
    }
}
