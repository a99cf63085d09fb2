use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::shared::api::ApiResponse;
use crate::subscription::application::domain::entities::Subscription;
use crate::subscription::application::ports::incoming::use_cases::{
    ListSubscriptionsError, ListSubscriptionsRequest,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSubscriptionsQuery {
    /// Restrict to one shop (administrators only)
    pub shop_id: Option<i32>,
}

/// List subscriptions visible to the caller
///
/// Administrators see every subscription, optionally narrowed to one shop.
/// Other callers see their own.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    params(ListSubscriptionsQuery),
    responses(
        (status = 200, description = "Subscriptions ordered by id", body = inline(SuccessResponse<Vec<Subscription>>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Shop scope requires administrator access", body = ErrorResponse),
    )
)]
#[get("/api/v1/subscriptions")]
pub async fn list_subscriptions_handler(
    user: AuthenticatedUser,
    query: web::Query<ListSubscriptionsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let caller = match resolve_caller_or_response(&data, &user).await {
        Ok(caller) => caller,
        Err(resp) => return resp,
    };

    let request = ListSubscriptionsRequest {
        caller: caller.id,
        is_admin: caller.is_superuser,
        shop_id: query.into_inner().shop_id,
    };

    match data.subscription.list_subscriptions.execute(request).await {
        Ok(subscriptions) => ApiResponse::success(subscriptions),
        Err(ListSubscriptionsError::Forbidden) => ApiResponse::forbidden(
            "FORBIDDEN",
            "Only administrators may list a shop's subscriptions",
        ),
        Err(ListSubscriptionsError::RepositoryError(e)) => {
            error!(error = %e, "Listing subscriptions failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::application::services::ListSubscriptionsService;
    use crate::subscription::application::domain::entities::SubscriptionScope;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, test_token_provider};
    use crate::tests::support::in_memory::{InMemoryUsers, UserSeed};
    use crate::tests::support::mocks::{sample_subscription, MockSubscriptions};
    use actix_web::{test, App};
    use std::sync::Arc;

    async fn get(repo: MockSubscriptions, email: &str, uri: &str) -> (u16, serde_json::Value) {
        let users = InMemoryUsers::default();
        users.seed(UserSeed::new("Admin", "admin@x.com").superuser());
        users.seed(UserSeed::new("Bob", "bob@x.com"));
        let state = TestAppStateBuilder::default()
            .with_users(users)
            .with_list_subscriptions(ListSubscriptionsService::new(Arc::new(repo)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_provider())
                .service(list_subscriptions_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", bearer(email)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_regular_user_gets_own_records() {
        let mut repo = MockSubscriptions::new();
        repo.expect_list_subscriptions()
            .withf(|scope| matches!(scope, SubscriptionScope::User(_)))
            .returning(|_| Ok(vec![sample_subscription(1, 1, Some(42))]));

        let (status, body) = get(repo, "bob@x.com", "/api/v1/subscriptions").await;

        assert_eq!(status, 200);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_regular_user_shop_scope_is_forbidden() {
        let mut repo = MockSubscriptions::new();
        repo.expect_list_subscriptions().times(0);

        let (status, body) = get(repo, "bob@x.com", "/api/v1/subscriptions?shop_id=1").await;

        assert_eq!(status, 403);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[actix_web::test]
    async fn test_admin_shop_scope() {
        let mut repo = MockSubscriptions::new();
        repo.expect_list_subscriptions()
            .withf(|scope| *scope == SubscriptionScope::Shop(1))
            .returning(|_| Ok(vec![]));

        let (status, _) = get(repo, "admin@x.com", "/api/v1/subscriptions?shop_id=1").await;

        assert_eq!(status, 200);
    }
}
