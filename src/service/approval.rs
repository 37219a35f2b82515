//! Approver resolution shared by the leave and expense workflows.
//!
//! The primary approver is the first hit of an ordered chain:
//! the employee's own override, then the first approver configured on the
//! employee's department, then nobody. Alternates are every approver of the
//! category configured anywhere in the department's subtree.

use tracing::debug;

use crate::model::department::{ApprovalDetails, ApproverCategory, ApproverEntry};
use crate::model::employee::ApproverAssignment;
use crate::store::{DirectoryStore, StoreResult};

pub async fn resolve_approvers<S: DirectoryStore + ?Sized>(
    store: &S,
    employee: &str,
    category: ApproverCategory,
) -> StoreResult<ApprovalDetails> {
    let assignment = store
        .approver_assignment(employee, category)
        .await?
        .unwrap_or_default();
    let department = non_empty(assignment.department.as_deref());

    let primary = match explicit_override(&assignment) {
        Some(approver) => Some(approver),
        None => department_default(store, department, category).await?,
    };

    let approver_name = match primary.as_deref() {
        Some(id) => store.user_full_name(id).await?,
        None => None,
    };

    let mut alternates = subtree_approvers(store, department, category).await?;
    if let Some(id) = primary.as_deref() {
        if !alternates.iter().any(|a| a.id == id) {
            alternates.push(ApproverEntry {
                id: id.to_string(),
                name: approver_name.clone(),
            });
        }
    }

    debug!(
        employee,
        %category,
        approver = ?primary,
        alternates = alternates.len(),
        "Resolved approvers"
    );

    Ok(ApprovalDetails {
        approver_id: primary,
        approver_name,
        alternates,
        is_mandatory: store.approver_mandatory(category).await?,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn explicit_override(assignment: &ApproverAssignment) -> Option<String> {
    non_empty(assignment.approver.as_deref()).map(str::to_string)
}

async fn department_default<S: DirectoryStore + ?Sized>(
    store: &S,
    department: Option<&str>,
    category: ApproverCategory,
) -> StoreResult<Option<String>> {
    let Some(department) = department else {
        return Ok(None);
    };
    let approver = store.department_approver_at(department, category, 1).await?;
    Ok(non_empty(approver.as_deref()).map(str::to_string))
}

/// Approvers of the department and all of its enabled descendants, first
/// occurrence of each id kept.
async fn subtree_approvers<S: DirectoryStore + ?Sized>(
    store: &S,
    department: Option<&str>,
    category: ApproverCategory,
) -> StoreResult<Vec<ApproverEntry>> {
    let Some(department) = department else {
        return Ok(Vec::new());
    };
    let Some(bounds) = store.department_bounds(department).await? else {
        return Ok(Vec::new());
    };

    let departments = store.departments_within(bounds).await?;
    let approvers = store.approvers_of(&departments, category).await?;

    let mut unique: Vec<ApproverEntry> = Vec::with_capacity(approvers.len());
    for approver in approvers {
        if !unique.iter().any(|a| a.id == approver.id) {
            unique.push(approver);
        }
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::department::DepartmentApprover;
    use crate::store::memory::{
        MemDepartment, MemEmployee, MemSettings, MemUser, MemoryData, MemoryStore,
    };
    use crate::utils::nested_set::NestedBounds;

    fn user(name: &str, full_name: &str) -> MemUser {
        MemUser {
            name: name.to_string(),
            full_name: Some(full_name.to_string()),
            enabled: true,
            ..Default::default()
        }
    }

    fn department(name: &str, parent: Option<&str>) -> MemDepartment {
        MemDepartment {
            name: name.to_string(),
            parent_department: parent.map(str::to_string),
            ..Default::default()
        }
    }

    fn approver(
        department: &str,
        category: ApproverCategory,
        idx: i32,
        user: &str,
    ) -> DepartmentApprover {
        DepartmentApprover {
            parent: department.to_string(),
            parentfield: category.to_string(),
            idx,
            approver: user.to_string(),
        }
    }

    /// Engineering
    /// ├── Platform
    /// └── Legacy (disabled)
    /// Finance
    fn org() -> MemoryData {
        let mut legacy = department("Legacy", Some("Engineering"));
        legacy.disabled = true;

        MemoryData {
            users: vec![
                user("lead@acme.test", "Team Lead"),
                user("platform@acme.test", "Platform Lead"),
                user("legacy@acme.test", "Legacy Lead"),
                user("cfo@acme.test", "CFO"),
                user("override@acme.test", "Override Approver"),
                user("expense@acme.test", "Expense Approver"),
            ],
            departments: vec![
                department("Engineering", None),
                department("Platform", Some("Engineering")),
                legacy,
                department("Finance", None),
            ],
            department_approvers: vec![
                approver("Engineering", ApproverCategory::Leave, 1, "lead@acme.test"),
                approver("Platform", ApproverCategory::Leave, 1, "platform@acme.test"),
                approver("Platform", ApproverCategory::Leave, 2, "lead@acme.test"),
                approver("Legacy", ApproverCategory::Leave, 1, "legacy@acme.test"),
                approver("Finance", ApproverCategory::Leave, 1, "cfo@acme.test"),
                approver("Engineering", ApproverCategory::Expense, 1, "expense@acme.test"),
            ],
            employees: vec![
                MemEmployee {
                    name: "EMP-1".into(),
                    employee_name: "Dev One".into(),
                    department: Some("Engineering".into()),
                    ..Default::default()
                },
                MemEmployee {
                    name: "EMP-2".into(),
                    employee_name: "Dev Two".into(),
                    department: Some("Engineering".into()),
                    leave_approver: Some("override@acme.test".into()),
                    ..Default::default()
                },
                MemEmployee {
                    name: "EMP-3".into(),
                    employee_name: "Contractor".into(),
                    leave_approver: Some("override@acme.test".into()),
                    ..Default::default()
                },
                MemEmployee {
                    name: "EMP-4".into(),
                    employee_name: "Nobody".into(),
                    ..Default::default()
                },
            ],
            settings: MemSettings {
                leave_approver_mandatory: true,
                expense_approver_mandatory: false,
            },
            ..Default::default()
        }
    }

    fn ids(entries: &[ApproverEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[actix_web::test]
    async fn department_default_is_primary_without_override() {
        let store = MemoryStore::new(org());

        let details = resolve_approvers(&store, "EMP-1", ApproverCategory::Leave)
            .await
            .unwrap();

        assert_eq!(details.approver_id.as_deref(), Some("lead@acme.test"));
        assert_eq!(details.approver_name.as_deref(), Some("Team Lead"));
        assert!(details.is_mandatory);
    }

    #[actix_web::test]
    async fn override_wins_over_department() {
        let store = MemoryStore::new(org());

        let details = resolve_approvers(&store, "EMP-2", ApproverCategory::Leave)
            .await
            .unwrap();

        assert_eq!(details.approver_id.as_deref(), Some("override@acme.test"));
        assert_eq!(details.approver_name.as_deref(), Some("Override Approver"));
        assert_eq!(
            details.alternates.last().map(|a| a.id.as_str()),
            Some("override@acme.test")
        );
    }

    #[actix_web::test]
    async fn padded_override_matches_subtree_approver() {
        let mut data = org();
        data.employees.push(MemEmployee {
            name: "EMP-5".into(),
            employee_name: "Dev Five".into(),
            department: Some("Engineering".into()),
            leave_approver: Some(" lead@acme.test ".into()),
            ..Default::default()
        });
        let store = MemoryStore::new(data);

        let details = resolve_approvers(&store, "EMP-5", ApproverCategory::Leave)
            .await
            .unwrap();
        let mut alternates = ids(&details.alternates);
        alternates.sort();

        assert_eq!(details.approver_id.as_deref(), Some("lead@acme.test"));
        assert_eq!(details.approver_name.as_deref(), Some("Team Lead"));
        assert_eq!(alternates, vec!["lead@acme.test", "platform@acme.test"]);
    }

    #[actix_web::test]
    async fn alternates_cover_enabled_subtree_once() {
        let store = MemoryStore::new(org());

        let details = resolve_approvers(&store, "EMP-1", ApproverCategory::Leave)
            .await
            .unwrap();
        let mut alternates = ids(&details.alternates);
        alternates.sort();

        // lead appears on two departments but only once here; Legacy is
        // disabled and Finance is outside the subtree
        assert_eq!(alternates, vec!["lead@acme.test", "platform@acme.test"]);
    }

    #[actix_web::test]
    async fn categories_do_not_mix() {
        let store = MemoryStore::new(org());

        let details = resolve_approvers(&store, "EMP-1", ApproverCategory::Expense)
            .await
            .unwrap();

        assert_eq!(details.approver_id.as_deref(), Some("expense@acme.test"));
        assert_eq!(ids(&details.alternates), vec!["expense@acme.test"]);
        assert!(!details.is_mandatory);
    }

    #[actix_web::test]
    async fn override_without_department_is_sole_alternate() {
        let store = MemoryStore::new(org());

        let details = resolve_approvers(&store, "EMP-3", ApproverCategory::Leave)
            .await
            .unwrap();

        assert_eq!(details.approver_id.as_deref(), Some("override@acme.test"));
        assert_eq!(ids(&details.alternates), vec!["override@acme.test"]);
    }

    #[actix_web::test]
    async fn nothing_configured_degrades_to_empty() {
        let store = MemoryStore::new(org());

        for employee in ["EMP-4", "does-not-exist"] {
            let details = resolve_approvers(&store, employee, ApproverCategory::Expense)
                .await
                .unwrap();

            assert_eq!(details.approver_id, None);
            assert_eq!(details.approver_name, None);
            assert!(details.alternates.is_empty());
            assert!(!details.is_mandatory);
        }
    }

    #[actix_web::test]
    async fn unknown_approver_user_has_no_name() {
        let mut data = org();
        data.employees[0].leave_approver = Some("ghost@acme.test".into());
        let store = MemoryStore::new(data);

        let details = resolve_approvers(&store, "EMP-1", ApproverCategory::Leave)
            .await
            .unwrap();

        assert_eq!(details.approver_id.as_deref(), Some("ghost@acme.test"));
        assert_eq!(details.approver_name, None);
        assert!(details
            .alternates
            .contains(&ApproverEntry { id: "ghost@acme.test".into(), name: None }));
    }

    #[actix_web::test]
    async fn explicit_interval_bounds_select_descendants() {
        let mut data = org();
        data.departments = vec![
            MemDepartment {
                bounds: Some(NestedBounds { lft: 1, rgt: 10 }),
                ..department("Engineering", None)
            },
            MemDepartment {
                bounds: Some(NestedBounds { lft: 2, rgt: 7 }),
                ..department("Platform", None)
            },
            MemDepartment {
                bounds: Some(NestedBounds { lft: 11, rgt: 12 }),
                ..department("Finance", None)
            },
        ];
        let store = MemoryStore::new(data);

        let mut within = store
            .departments_within(NestedBounds { lft: 1, rgt: 10 })
            .await
            .unwrap();
        within.sort();

        assert_eq!(within, vec!["Engineering".to_string(), "Platform".to_string()]);
    }
}
