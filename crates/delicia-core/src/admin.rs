//! # Admin Reporting
//!
//! Read-only summaries behind the admin dashboard.
//!
//! ```text
//! ┌────────────────┐ ┌────────────────┐ ┌────────────────┐
//! │ Total revenue  │ │ Total orders   │ │ Reservations   │
//! └────────────────┘ └────────────────┘ └────────────────┘
//! ┌──────────────────────────────────────────────────────┐
//! │ Sales, last 7 days      ▂ ▅ ▃ ▇ ▁ ▆ ▄                │
//! │                       03/06 ...            09/06     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Days are taken from `created_at` in UTC; callers pass `today` in the
//! same reference.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, OrderStatus, Reservation, ReservationStatus};

/// Days shown on the sales chart by default.
pub const DEFAULT_SALES_DAYS: u32 = 7;

/// Longest sales chart: one year, leap day included.
pub const MAX_SALES_DAYS: u32 = 366;

/// Revenue for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DaySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Chart label, `dd/MM`.
    pub label: String,
    pub total: Money,
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_revenue: Money,
    pub total_orders: usize,
    pub total_reservations: usize,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    pub reservations_by_status: BTreeMap<ReservationStatus, usize>,
    /// Oldest day first, ending with `today`.
    pub sales_by_day: Vec<DaySales>,
}

impl DashboardSummary {
    pub fn build(
        orders: &[Order],
        reservations: &[Reservation],
        today: NaiveDate,
        days: u32,
    ) -> Self {
        let mut orders_by_status = BTreeMap::new();
        for order in orders {
            *orders_by_status.entry(order.status).or_insert(0) += 1;
        }

        let mut reservations_by_status = BTreeMap::new();
        for reservation in reservations {
            *reservations_by_status.entry(reservation.status).or_insert(0) += 1;
        }

        DashboardSummary {
            total_revenue: orders.iter().map(|o| o.total).sum(),
            total_orders: orders.len(),
            total_reservations: reservations.len(),
            orders_by_status,
            reservations_by_status,
            sales_by_day: sales_by_day(orders, today, days),
        }
    }
}

/// One bucket per day for the `days` days ending `today`, oldest first.
///
/// `days` is capped at `MAX_SALES_DAYS`. Orders created outside the range
/// are ignored.
pub fn sales_by_day(orders: &[Order], today: NaiveDate, days: u32) -> Vec<DaySales> {
    let days = days.min(MAX_SALES_DAYS);
    let mut buckets: Vec<DaySales> = (0..days as i64)
        .rev()
        .map(|back| today - Duration::days(back))
        .map(|date| DaySales {
            date,
            label: date.format("%d/%m").to_string(),
            total: Money::zero(),
            orders: 0,
        })
        .collect();

    let Some(first) = buckets.first().map(|b| b.date) else {
        return buckets;
    };

    for order in orders {
        let day = order.created_at.date_naive();
        if day < first || day > today {
            continue;
        }
        let index = (day - first).num_days() as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.total += order.total;
            bucket.orders += 1;
        }
    }

    buckets
}

/// Orders, most recent first.
pub fn orders_newest_first(orders: &[Order]) -> Vec<&Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Reservations, most recently made first.
pub fn reservations_newest_first(reservations: &[Reservation]) -> Vec<&Reservation> {
    let mut sorted: Vec<&Reservation> = reservations.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, ReservationKind};
    use chrono::{TimeZone, Utc};

    fn order(id: &str, cents: i64, day: u32, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            items: Vec::new(),
            total: Money::from_cents(cents),
            pickup_time: "08:00".parse().unwrap(),
            status,
            payment_method: PaymentMethod::Card,
            pickup_code: id.to_string(),
            customer_name: "Ana Lima".to_string(),
            customer_email: "ana@email.com".to_string(),
            customer_phone: "(21) 97777-6666".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
        }
    }

    fn reservation(id: &str, status: ReservationStatus, day: u32) -> Reservation {
        Reservation {
            id: id.to_string(),
            name: "Carlos Pereira".to_string(),
            phone: "(31) 96666-5555".to_string(),
            email: "carlos@email.com".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            time: "15:00".parse().unwrap(),
            guests: 4,
            kind: ReservationKind::Corporate,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
    }

    #[test]
    fn test_sales_by_day_buckets() {
        let orders = vec![
            order("PD1", 2590, 9, OrderStatus::Paid),
            order("PD2", 1000, 9, OrderStatus::Ready),
            order("PD3", 4590, 3, OrderStatus::Completed),
            // outside the 7-day range
            order("PD4", 9999, 2, OrderStatus::Completed),
        ];

        let days = sales_by_day(&orders, today(), 7);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].label, "03/06");
        assert_eq!(days[6].label, "09/06");
        assert_eq!(days[0].total.cents(), 4590);
        assert_eq!(days[6].total.cents(), 3590);
        assert_eq!(days[6].orders, 2);
        assert!(days[1..6].iter().all(|d| d.total.is_zero()));
    }

    #[test]
    fn test_sales_by_day_zero_days() {
        let orders = vec![order("PD1", 2590, 9, OrderStatus::Paid)];
        assert!(sales_by_day(&orders, today(), 0).is_empty());
    }

    #[test]
    fn test_sales_by_day_is_capped() {
        let orders = vec![order("PD1", 2590, 9, OrderStatus::Paid)];
        let days = sales_by_day(&orders, today(), u32::MAX);

        assert_eq!(days.len(), MAX_SALES_DAYS as usize);
        assert_eq!(days.last().map(|d| d.date), Some(today()));
        assert_eq!(days.last().map(|d| d.orders), Some(1));
    }

    #[test]
    fn test_dashboard_summary() {
        let orders = vec![
            order("PD1", 2590, 9, OrderStatus::Paid),
            order("PD2", 1000, 8, OrderStatus::Completed),
            order("PD3", 500, 1, OrderStatus::Completed),
        ];
        let reservations = vec![
            reservation("RES-1", ReservationStatus::Pending, 8),
            reservation("RES-2", ReservationStatus::Confirmed, 7),
        ];

        let summary = DashboardSummary::build(&orders, &reservations, today(), DEFAULT_SALES_DAYS);

        // revenue counts every order, not only the charted week
        assert_eq!(summary.total_revenue.cents(), 4090);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_reservations, 2);
        assert_eq!(summary.orders_by_status[&OrderStatus::Completed], 2);
        assert_eq!(summary.orders_by_status[&OrderStatus::Paid], 1);
        assert_eq!(
            summary.reservations_by_status[&ReservationStatus::Confirmed],
            1
        );
        assert_eq!(summary.sales_by_day.len(), 7);
    }

    #[test]
    fn test_newest_first() {
        let orders = vec![
            order("PD1", 100, 3, OrderStatus::Paid),
            order("PD2", 100, 9, OrderStatus::Paid),
            order("PD3", 100, 5, OrderStatus::Paid),
        ];
        let ids: Vec<&str> = orders_newest_first(&orders)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["PD2", "PD3", "PD1"]);

        let reservations = vec![
            reservation("RES-1", ReservationStatus::Pending, 1),
            reservation("RES-2", ReservationStatus::Pending, 4),
        ];
        assert_eq!(reservations_newest_first(&reservations)[0].id, "RES-2");
    }
}
