//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    automated_payment::{create_automated_payment_endpoint, get_automated_payments_page},
    budget::{get_budget_page, save_budget_endpoint},
    dashboard::get_dashboard_page,
    endpoints,
    error_page::get_404_not_found,
    export::{export_transactions_endpoint, get_export_page},
    loan::{create_loan_endpoint, get_loans_page},
    logging::logging_middleware,
    savings::{get_savings_page, update_savings_goal_endpoint},
    transaction::{create_transaction_endpoint, get_transactions_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::BUDGET_VIEW, get(get_budget_page))
        .route(endpoints::SAVINGS_VIEW, get(get_savings_page))
        .route(
            endpoints::AUTOMATED_PAYMENTS_VIEW,
            get(get_automated_payments_page),
        )
        .route(endpoints::LOANS_VIEW, get(get_loans_page))
        .route(endpoints::EXPORT_VIEW, get(get_export_page));

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::BUDGET_API, post(save_budget_endpoint))
        .route(
            endpoints::SAVINGS_GOAL_API,
            post(update_savings_goal_endpoint),
        )
        .route(
            endpoints::AUTOMATED_PAYMENTS_API,
            post(create_automated_payment_endpoint),
        )
        .route(endpoints::LOANS_API, post(create_loan_endpoint))
        .route(endpoints::EXPORT_API, get(export_transactions_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use axum_test::TestServer;

    use crate::{endpoints, routing::build_router, test_utils::get_test_app_state};

    fn get_test_server() -> TestServer {
        TestServer::try_new(build_router(get_test_app_state())).expect("Could not create test server")
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn every_page_loads() {
        let server = get_test_server();

        for page in [
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::BUDGET_VIEW,
            endpoints::SAVINGS_VIEW,
            endpoints::AUTOMATED_PAYMENTS_VIEW,
            endpoints::LOANS_VIEW,
            endpoints::EXPORT_VIEW,
        ] {
            server.get(page).await.assert_status(StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_confirmation_is_rejected() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("confirmation", "hacked")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn added_transaction_appears_in_export() {
        let server = get_test_server();

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("date", "2025-05-20"),
                ("category", "Entertainment"),
                ("amount", "42.5"),
                ("description", "Concert"),
                ("transaction_type", "Expense"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let response = server.get(endpoints::EXPORT_API).await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.header(header::CONTENT_TYPE), "text/csv");
        assert_eq!(
            response.text(),
            "Date,Category,Amount,Description,Type,User\n\
            2025-05-20,Entertainment,42.5,Concert,Expense,default_user\n"
        );
    }

    #[tokio::test]
    async fn given_loan_shows_on_transactions_page() {
        let server = get_test_server();

        server
            .post(endpoints::LOANS_API)
            .form(&[
                ("name", "Car"),
                ("amount", "100"),
                ("loan_type", "Given"),
                ("due_date", "2026-01-01"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let response = server.get(endpoints::TRANSACTIONS_VIEW).await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Loan Given: Car"));
    }
}
