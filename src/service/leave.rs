use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::doctype::PermAction;
use crate::model::leave::{Holiday, LEAVE_APPLICATION, LeaveApplication, LeaveBalance, LeaveScope};
use crate::store::{LeaveStore, MetaStore, StoreResult};

/// Leave applications in `scope`, each flagged with what `viewer` may do to it.
pub async fn list_leave_applications<S>(
    store: &S,
    scope: &LeaveScope,
    viewer: &str,
) -> StoreResult<Vec<LeaveApplication>>
where
    S: LeaveStore + MetaStore + ?Sized,
{
    let mut applications = store.leave_applications(scope).await?;

    for leave in &mut applications {
        let owner = Some(leave.owner.as_str());
        leave.can_cancel = store
            .has_permission(LEAVE_APPLICATION, PermAction::Cancel, viewer, owner)
            .await?;
        leave.can_delete = store
            .has_permission(LEAVE_APPLICATION, PermAction::Delete, viewer, owner)
            .await?;
    }

    Ok(applications)
}

/// Allocated and remaining days per leave type as of `date`.
pub async fn leave_balance_map<S: LeaveStore + ?Sized>(
    store: &S,
    employee: &str,
    date: NaiveDate,
) -> StoreResult<BTreeMap<String, LeaveBalance>> {
    let details = store.leave_details(employee, date).await?;

    Ok(details
        .leave_allocation
        .into_iter()
        .map(|(leave_type, allocation)| {
            (
                leave_type,
                LeaveBalance {
                    allocated_leaves: allocation.total_leaves,
                    balance_leaves: allocation.remaining_leaves,
                },
            )
        })
        .collect())
}

/// Leave types the employee can apply for: allocated ones, then leave
/// without pay types.
pub async fn leave_types<S: LeaveStore + ?Sized>(
    store: &S,
    employee: &str,
    date: NaiveDate,
) -> StoreResult<Vec<String>> {
    let details = store.leave_details(employee, date).await?;

    Ok(details
        .leave_allocation
        .into_keys()
        .chain(details.lwps)
        .collect())
}

pub async fn holidays_for_employee<S: LeaveStore + ?Sized>(
    store: &S,
    employee: &str,
) -> StoreResult<Vec<Holiday>> {
    match store.holiday_list_for_employee(employee).await? {
        Some(list) => store.holidays(&list).await,
        None => Ok(Vec::new()),
    }
}
