use crate::model::expense::ClaimSummary;
use crate::store::{CurrencyStore, ExpenseStore, StoreResult};

/// Pending, approved and rejected totals of an employee's claims, labelled
/// with the currency of the company the claims were filed under.
pub async fn claim_summary<S>(store: &S, employee: &str) -> StoreResult<ClaimSummary>
where
    S: ExpenseStore + CurrencyStore + ?Sized,
{
    let totals = store.claim_totals(employee).await?;

    let currency = match totals.company.as_deref() {
        Some(company) => company_currency_label(store, company).await?,
        None => None,
    };

    Ok(ClaimSummary {
        total_pending_amount: totals.total_pending_amount,
        total_approved_amount: totals.total_approved_amount,
        total_rejected_amount: totals.total_rejected_amount,
        currency,
    })
}

async fn company_currency_label<S: CurrencyStore + ?Sized>(
    store: &S,
    company: &str,
) -> StoreResult<Option<String>> {
    let Some(code) = store.company_currency(company).await? else {
        return Ok(None);
    };

    Ok(Some(match store.currency(&code).await? {
        Some(currency) => currency.display(),
        None => code,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::currency::Currency;
    use crate::store::memory::{MemCompany, MemExpenseClaim, MemoryData, MemoryStore};

    fn claim(name: &str, status: &str, claimed: f64, sanctioned: f64, docstatus: i32) -> MemExpenseClaim {
        MemExpenseClaim {
            name: name.to_string(),
            employee: "EMP-1".to_string(),
            employee_name: "Dev One".to_string(),
            approval_status: status.to_string(),
            status: status.to_string(),
            expense_approver: Some("lead@acme.test".to_string()),
            total_claimed_amount: claimed,
            total_sanctioned_amount: sanctioned,
            posting_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            company: "Acme Ltd".to_string(),
            docstatus,
            expense_types: vec!["Travel".to_string()],
        }
    }

    fn store(symbol: Option<&str>) -> MemoryStore {
        MemoryStore::new(MemoryData {
            expense_claims: vec![
                claim("EXP-1", "Draft", 100.0, 0.0, 0),
                claim("EXP-2", "Approved", 250.0, 200.0, 1),
                claim("EXP-3", "Rejected", 300.0, 300.0, 1),
                // cancelled claims are left out
                claim("EXP-4", "Approved", 999.0, 999.0, 2),
            ],
            companies: vec![MemCompany {
                name: "Acme Ltd".into(),
                default_currency: "USD".into(),
                ..Default::default()
            }],
            currencies: vec![Currency {
                name: "USD".into(),
                symbol: symbol.map(str::to_string),
            }],
            ..Default::default()
        })
    }

    #[actix_web::test]
    async fn summary_sums_by_status_with_symbol() {
        let summary = claim_summary(&store(Some("$")), "EMP-1").await.unwrap();

        assert_eq!(
            summary,
            ClaimSummary {
                total_pending_amount: 100.0,
                total_approved_amount: 200.0,
                total_rejected_amount: 300.0,
                currency: Some("$".into()),
            }
        );
    }

    #[actix_web::test]
    async fn summary_falls_back_to_currency_code() {
        for symbol in [None, Some("")] {
            let summary = claim_summary(&store(symbol), "EMP-1").await.unwrap();
            assert_eq!(summary.currency.as_deref(), Some("USD"));
        }
    }

    #[actix_web::test]
    async fn summary_without_claims_has_no_currency() {
        let summary = claim_summary(&store(Some("$")), "EMP-9").await.unwrap();

        assert_eq!(summary.total_pending_amount, 0.0);
        assert_eq!(summary.total_approved_amount, 0.0);
        assert_eq!(summary.total_rejected_amount, 0.0);
        assert_eq!(summary.currency, None);
    }

    #[actix_web::test]
    async fn summary_currency_follows_latest_claim() {
        let older = claim("EXP-1", "Draft", 100.0, 0.0, 0);
        let latest = MemExpenseClaim {
            company: "Acme GmbH".to_string(),
            posting_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ..claim("EXP-2", "Draft", 50.0, 0.0, 0)
        };
        let store = MemoryStore::new(MemoryData {
            expense_claims: vec![older, latest],
            companies: vec![
                MemCompany {
                    name: "Acme Ltd".into(),
                    default_currency: "USD".into(),
                    ..Default::default()
                },
                MemCompany {
                    name: "Acme GmbH".into(),
                    default_currency: "EUR".into(),
                    ..Default::default()
                },
            ],
            currencies: vec![
                Currency {
                    name: "USD".into(),
                    symbol: Some("$".into()),
                },
                Currency {
                    name: "EUR".into(),
                    symbol: Some("€".into()),
                },
            ],
            ..Default::default()
        });

        let summary = claim_summary(&store, "EMP-1").await.unwrap();

        assert_eq!(summary.total_pending_amount, 150.0);
        assert_eq!(summary.currency.as_deref(), Some("€"));
    }
}
