use crate::model::advance::AdvanceBalance;
use crate::model::department::{ApprovalDetails, ApproverEntry};
use crate::model::doctype::{DocField, LinkOption};
use crate::model::employee::EmployeeInfo;
use crate::model::expense::{ClaimSummary, ExpenseClaimItem, ExpenseClaimType};
use crate::model::file::FileRecord;
use crate::model::leave::{Holiday, LeaveApplication, LeaveBalance};
use crate::model::user::UserInfo;
use crate::models::{LoginReqDto, LoginResponse};
use crate::service::upload::UploadRequest;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Portal API",
        version = "1.0.0",
        description = r#"
## Employee self-service portal

Read-side API behind the HR portal front-end.

### Features
- **Leave**
  - Own and team leave applications, balances, leave types, holidays
- **Expense**
  - Claims, claim summary, claim types, employee advances
- **Approvers**
  - Default and alternate leave and expense approvers per employee
- **Metadata**
  - Form fields and link options of document types, currency symbols
- **Files**
  - Base64 attachment upload

### Security
Every endpoint except `/auth/login` requires a **JWT Bearer** token.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::session::current_user,
        crate::api::session::current_employee,

        crate::api::leave::leave_applications,
        crate::api::leave::team_leave_applications,
        crate::api::leave::leave_balance,
        crate::api::leave::leave_types,
        crate::api::leave::holidays,
        crate::api::leave::leave_approval_details,

        crate::api::expense::expense_claims,
        crate::api::expense::expense_claim_summary,
        crate::api::expense::expense_approval_details,
        crate::api::expense::advances,
        crate::api::expense::expense_claim_types,
        crate::api::expense::expense_type_description,

        crate::api::currency::company_currencies,
        crate::api::currency::currency_symbols,

        crate::api::doctype::doctype_fields,
        crate::api::doctype::link_options,

        crate::api::file::upload_file
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            UserInfo,
            EmployeeInfo,
            LeaveApplication,
            LeaveBalance,
            Holiday,
            ApprovalDetails,
            ApproverEntry,
            ExpenseClaimItem,
            ClaimSummary,
            ExpenseClaimType,
            AdvanceBalance,
            DocField,
            LinkOption,
            UploadRequest,
            FileRecord
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login"),
        (name = "Session", description = "Signed-in user and employee"),
        (name = "Leave", description = "Leave applications, balances and approvers"),
        (name = "Expense", description = "Expense claims, advances and approvers"),
        (name = "Currency", description = "Currency display lookups"),
        (name = "Metadata", description = "Document type metadata for forms"),
        (name = "Files", description = "Attachment upload"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Prefix the protected paths are annotated with.
const DOC_PREFIX: &str = "/api";

/// The document with protected paths moved under the configured API prefix.
pub fn openapi_for(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if api_prefix != DOC_PREFIX {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| match path.strip_prefix(DOC_PREFIX) {
                Some(rest) if rest.starts_with('/') => (format!("{api_prefix}{rest}"), item),
                _ => (path, item),
            })
            .collect();
    }
    doc
}
