use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const LEAVE_APPLICATION: &str = "Leave Application";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveApplication {
    #[schema(example = "HR-LAP-2026-00001")]
    pub name: String,
    #[schema(example = "HR-EMP-00001")]
    pub employee: String,
    #[schema(example = "Jane Doe")]
    pub employee_name: String,
    #[schema(example = "Casual Leave")]
    pub leave_type: String,
    #[schema(example = "Open")]
    pub status: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub from_date: NaiveDate,
    #[schema(example = "2026-01-06", format = "date", value_type = String)]
    pub to_date: NaiveDate,
    pub half_day: bool,
    #[schema(format = "date", value_type = Option<String>)]
    pub half_day_date: Option<NaiveDate>,
    pub description: Option<String>,
    #[schema(example = 2.0)]
    pub total_leave_days: f64,
    #[schema(example = 8.0)]
    pub leave_balance: f64,
    #[schema(example = "lead@acme.test")]
    pub leave_approver: Option<String>,
    #[schema(example = "2026-01-02", format = "date", value_type = String)]
    pub posting_date: NaiveDate,

    // record owner, used for owner-scoped permission grants
    #[serde(skip)]
    pub owner: String,

    /// Whether the session user may cancel this application.
    #[sqlx(skip)]
    pub can_cancel: bool,
    /// Whether the session user may delete this application.
    #[sqlx(skip)]
    pub can_delete: bool,
}

/// Which leave applications a listing returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveScope {
    /// Applications of the employee, except cancelled ones.
    Own { employee: String },
    /// Open draft applications of other employees awaiting `approver`.
    Team { employee: String, approver: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Holiday {
    #[schema(example = "c1a2b3")]
    pub name: String,
    #[schema(example = "2026-12-25", format = "date", value_type = String)]
    pub holiday_date: NaiveDate,
    #[schema(example = "Christmas")]
    pub description: Option<String>,
}

/// Allocation figures for one leave type as of a date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaveAllocationDetails {
    pub total_leaves: f64,
    pub leaves_taken: f64,
    pub leaves_pending_approval: f64,
    pub remaining_leaves: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaveDetails {
    pub leave_allocation: BTreeMap<String, LeaveAllocationDetails>,
    /// Leave types without pay, hence without allocation.
    pub lwps: Vec<String>,
}

/// Submitted allocation of one leave type covering the lookup date.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AllocationWindow {
    pub leave_type: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub total_leaves: f64,
}

/// Days booked by a non-cancelled leave application.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaveUsage {
    pub leave_type: String,
    pub status: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub total_leave_days: f64,
}

impl LeaveDetails {
    /// Approved applications inside an allocation window count as taken, open
    /// ones as pending; the remainder is what is left to book.
    pub fn compute(
        allocations: &[AllocationWindow],
        usages: &[LeaveUsage],
        lwps: Vec<String>,
    ) -> Self {
        let mut leave_allocation = BTreeMap::new();

        for window in allocations {
            let mut details = LeaveAllocationDetails {
                total_leaves: window.total_leaves,
                ..Default::default()
            };

            let in_window = usages.iter().filter(|u| {
                u.leave_type == window.leave_type
                    && u.from_date >= window.from_date
                    && u.to_date <= window.to_date
            });
            for usage in in_window {
                match usage.status.as_str() {
                    "Approved" => details.leaves_taken += usage.total_leave_days,
                    "Open" => details.leaves_pending_approval += usage.total_leave_days,
                    _ => {}
                }
            }

            details.remaining_leaves =
                details.total_leaves - details.leaves_taken - details.leaves_pending_approval;
            leave_allocation.insert(window.leave_type.clone(), details);
        }

        Self {
            leave_allocation,
            lwps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    #[schema(example = 10.0)]
    pub allocated_leaves: f64,
    #[schema(example = 5.0)]
    pub balance_leaves: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn usage(leave_type: &str, status: &str, from: NaiveDate, days: f64) -> LeaveUsage {
        LeaveUsage {
            leave_type: leave_type.to_string(),
            status: status.to_string(),
            from_date: from,
            to_date: from,
            total_leave_days: days,
        }
    }

    #[test]
    fn remaining_subtracts_taken_and_pending() {
        let allocations = vec![AllocationWindow {
            leave_type: "Casual Leave".to_string(),
            from_date: date(2026, 1, 1),
            to_date: date(2026, 12, 31),
            total_leaves: 10.0,
        }];
        let usages = vec![
            usage("Casual Leave", "Approved", date(2026, 2, 1), 3.0),
            usage("Casual Leave", "Open", date(2026, 3, 1), 1.0),
            usage("Casual Leave", "Rejected", date(2026, 4, 1), 5.0),
            // outside the window
            usage("Casual Leave", "Approved", date(2025, 12, 1), 2.0),
            usage("Sick Leave", "Approved", date(2026, 2, 1), 4.0),
        ];

        let details = LeaveDetails::compute(&allocations, &usages, vec!["Leave Without Pay".into()]);
        let casual = &details.leave_allocation["Casual Leave"];

        assert_eq!(casual.leaves_taken, 3.0);
        assert_eq!(casual.leaves_pending_approval, 1.0);
        assert_eq!(casual.remaining_leaves, 6.0);
        assert!(!details.leave_allocation.contains_key("Sick Leave"));
        assert_eq!(details.lwps, vec!["Leave Without Pay".to_string()]);
    }
}
