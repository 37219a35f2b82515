use crate::{
    api::{currency, doctype, expense, file, leave, session},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let burst = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond((60_000 / burst as u64).max(1))
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(login_limiter)
                .route(web::post().to(handlers::login)),
        ),
    );

    // Protected routes
    let api = web::scope(&config.api_prefix)
        .service(
            web::scope("/me")
                // /me
                .service(web::resource("").route(web::get().to(session::current_user)))
                // /me/employee
                .service(web::resource("/employee").route(web::get().to(session::current_employee))),
        )
        .service(
            web::scope("/employees/{employee}")
                .route("/leave-applications", web::get().to(leave::leave_applications))
                .route(
                    "/team-leave-applications",
                    web::get().to(leave::team_leave_applications),
                )
                .route("/leave-balance", web::get().to(leave::leave_balance))
                .route("/leave-types", web::get().to(leave::leave_types))
                .route("/holidays", web::get().to(leave::holidays))
                .route(
                    "/leave-approval-details",
                    web::get().to(leave::leave_approval_details),
                )
                .route("/expense-claims", web::get().to(expense::expense_claims))
                .route(
                    "/expense-claim-summary",
                    web::get().to(expense::expense_claim_summary),
                )
                .route(
                    "/expense-approval-details",
                    web::get().to(expense::expense_approval_details),
                )
                .route("/advances", web::get().to(expense::advances)),
        )
        .service(
            web::scope("/expense-claim-types")
                .service(web::resource("").route(web::get().to(expense::expense_claim_types)))
                .service(
                    web::resource("/{expense_type}/description")
                        .route(web::get().to(expense::expense_type_description)),
                ),
        )
        .service(
            web::scope("/currencies")
                .route("/companies", web::get().to(currency::company_currencies))
                .route("/symbols", web::get().to(currency::currency_symbols)),
        )
        .service(
            web::scope("/doctypes/{doctype}")
                .route("/fields", web::get().to(doctype::doctype_fields))
                .route("/link-options", web::get().to(doctype::link_options)),
        )
        .service(web::resource("/files").route(web::post().to(file::upload_file)));

    cfg.service(
        api.wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter), // rate limiting
    );
}
