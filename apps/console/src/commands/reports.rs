//! # Report Commands
//!
//! Admin dashboard figures and the report selector. Every command here
//! requires the admin login.
//!
//! ```text
//!   report summary          ──► SummaryTotals + formatted revenue
//!   report status           ──► [StatusCount]      (pie chart)
//!   report revenue-service  ──► [ServiceRevenue]   (bar chart)
//!   report revenue-month    ──► [MonthRevenue]     (line chart)
//!   report services         ──► [ServiceCount]
//!   report clients          ──► [ClientVisits]     (top 10)
//!   dashboard               ──► DashboardMetrics
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use taller_core::ValidationError;
use taller_store::{
    ClientVisits, DashboardMetrics, MonthRevenue, ServiceCount, ServiceRevenue, StatusCount,
    SummaryTotals,
};

use crate::error::ApiError;
use crate::state::Session;

/// Report selector entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Status,
    RevenueByService,
    RevenueByMonth,
    Services,
    Clients,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Summary,
        ReportKind::Status,
        ReportKind::RevenueByService,
        ReportKind::RevenueByMonth,
        ReportKind::Services,
        ReportKind::Clients,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::Status => "status",
            ReportKind::RevenueByService => "revenue-service",
            ReportKind::RevenueByMonth => "revenue-month",
            ReportKind::Services => "services",
            ReportKind::Clients => "clients",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "report".to_string(),
                allowed: ReportKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            })
    }
}

/// Summary report with revenue rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    #[serde(flatten)]
    pub totals: SummaryTotals,
    pub total_revenue_display: String,
    pub mean_revenue_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
    pub completed_revenue_display: String,
}

/// Output of [`report`], tagged with the report name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "report", content = "rows", rename_all = "snake_case")]
pub enum Report {
    Summary(SummaryView),
    Status(Vec<StatusCount>),
    RevenueByService(Vec<ServiceRevenue>),
    RevenueByMonth(Vec<MonthRevenue>),
    Services(Vec<ServiceCount>),
    Clients(Vec<ClientVisits>),
}

pub fn report(session: &Session, kind: ReportKind) -> Result<Report, ApiError> {
    session.require_admin()?;
    debug!(%kind, "report command");

    let reports = session.store().reports();
    let report = match kind {
        ReportKind::Summary => {
            let totals = reports.summary_totals();
            let config = session.config();
            Report::Summary(SummaryView {
                total_revenue_display: config.format_currency(totals.total_revenue),
                mean_revenue_display: config.format_currency(totals.mean_revenue),
                totals,
            })
        }
        ReportKind::Status => Report::Status(reports.status_distribution()),
        ReportKind::RevenueByService => Report::RevenueByService(reports.revenue_by_service()),
        ReportKind::RevenueByMonth => Report::RevenueByMonth(reports.revenue_by_month()),
        ReportKind::Services => Report::Services(reports.most_requested_services()),
        ReportKind::Clients => Report::Clients(reports.most_frequent_clients()?),
    };
    Ok(report)
}

pub fn dashboard(session: &Session) -> Result<DashboardView, ApiError> {
    session.require_admin()?;
    let metrics = session.store().reports().dashboard_metrics();
    Ok(DashboardView {
        completed_revenue_display: session.config().format_currency(metrics.completed_revenue),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taller_core::Money;
    use taller_store::Clock;

    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;

    fn admin_session() -> Session {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let mut session = Session::new(ConfigState::default(), Clock::Fixed(today));
        session.gate_mut().login("admin", "admin123").unwrap();
        session
    }

    #[test]
    fn test_report_kind_parsing() {
        assert_eq!("revenue-month".parse::<ReportKind>().unwrap(), ReportKind::RevenueByMonth);
        assert_eq!(" Summary ".parse::<ReportKind>().unwrap(), ReportKind::Summary);
        assert!("weekly".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_reports_require_admin() {
        let mut session = admin_session();
        session.gate_mut().logout();
        assert_eq!(
            report(&session, ReportKind::Summary).unwrap_err().code,
            ErrorCode::Unauthorized
        );
        assert_eq!(dashboard(&session).unwrap_err().code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_seed_summary_has_no_revenue() {
        let session = admin_session();
        let Report::Summary(view) = report(&session, ReportKind::Summary).unwrap() else {
            panic!("expected summary");
        };
        assert_eq!(view.totals.by_status.completed, 0);
        assert_eq!(view.totals.total_revenue, Money::zero());
        assert_eq!(view.mean_revenue_display, "$0");
    }

    #[test]
    fn test_revenue_after_completion() {
        let mut session = admin_session();
        session.store_mut().complete("CIT002").unwrap();

        let Report::RevenueByService(rows) = report(&session, ReportKind::RevenueByService).unwrap()
        else {
            panic!("expected revenue rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].service, "Revisión general");

        let view = dashboard(&session).unwrap();
        assert_eq!(view.completed_revenue_display, "$120,000");
        assert_eq!(view.metrics.total_clients, 2);
    }

    #[test]
    fn test_report_json_shape() {
        let session = admin_session();
        let json = serde_json::to_value(report(&session, ReportKind::Status).unwrap()).unwrap();
        assert_eq!(json["report"], "status");
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    }
}
