use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::domain::entities::{UserId, UserRole};
use crate::auth::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, TokenType,
};
use crate::shared::api::ApiResponse;

use super::super::cookies::ACCESS_TOKEN_COOKIE;

/// Caller holding a valid access token, verified or not.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub is_verified: bool,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let Some(jwt_service) = req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
    else {
        tracing::error!("TokenProvider is not registered as app data");
        return Err(create_api_error(ApiResponse::internal_error()));
    };

    let Some(token) = extract_token_from_header(req).or_else(|| extract_token_from_cookie(req))
    else {
        return Err(create_api_error(ApiResponse::unauthorized(
            "MISSING_AUTH_TOKEN",
            "Missing or invalid authorization header",
        )));
    };

    match jwt_service.verify_token(&token) {
        Ok(claims) if claims.is_type(TokenType::Access) => Ok(AuthenticatedUser {
            user_id: claims.sub,
            is_verified: claims.is_verified,
            role: claims.role,
        }),
        Ok(_) => Err(create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN_TYPE",
            "Invalid token type",
        ))),
        Err(TokenError::TokenExpired) => Err(create_api_error(ApiResponse::unauthorized(
            "TOKEN_EXPIRED",
            "Access token has expired",
        ))),
        Err(_) => Err(create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN",
            "Invalid or expired token",
        ))),
    }
}

/// Authenticated caller whose email address is confirmed.
#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl FromRequest for VerifiedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|auth_user| {
            if !auth_user.is_verified {
                return Err(create_api_error(ApiResponse::forbidden(
                    "EMAIL_NOT_VERIFIED",
                    "Email verification required",
                )));
            }
            Ok(VerifiedUser {
                user_id: auth_user.user_id,
                role: auth_user.role,
            })
        });
        ready(result)
    }
}

/// Authenticated caller with the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: UserId,
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|auth_user| {
            if !auth_user.is_admin() {
                return Err(create_api_error(ApiResponse::forbidden(
                    "ADMIN_REQUIRED",
                    "Administrator access required",
                )));
            }
            Ok(AdminUser {
                user_id: auth_user.user_id,
            })
        });
        ready(result)
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_token_from_cookie(req: &HttpRequest) -> Option<String> {
    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::auth_helper::test_helpers::{
        create_test_jwt_service, token_provider_data,
    };
    use actix_web::{cookie::Cookie, get, test, App, HttpResponse, Responder};
    use uuid::Uuid;

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        HttpResponse::Ok().body(user.user_id.to_string())
    }

    #[get("/verified")]
    async fn verified_only(_user: VerifiedUser) -> impl Responder {
        HttpResponse::Ok().finish()
    }

    #[get("/admin")]
    async fn admin_only(_user: AdminUser) -> impl Responder {
        HttpResponse::Ok().finish()
    }

    fn access_token(user_id: Uuid, verified: bool, role: UserRole) -> String {
        create_test_jwt_service()
            .generate_access_token(UserId::from(user_id), verified, role)
            .unwrap()
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(token_provider_data())
                    .service(whoami)
                    .service(verified_only)
                    .service(admin_only),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn bearer_header_authenticates() {
        let app = app!();
        let user_id = Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((
                "Authorization",
                format!("Bearer {}", access_token(user_id, true, UserRole::Customer)),
            ))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body = test::read_body(resp).await;
        assert_eq!(body, user_id.to_string());
    }

    #[actix_web::test]
    async fn access_cookie_is_accepted() {
        let app = app!();
        let token = access_token(Uuid::new_v4(), true, UserRole::Customer);
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, token))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorized() {
        let app = app!();
        let req = test::TestRequest::get().uri("/whoami").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "MISSING_AUTH_TOKEN");
    }

    #[actix_web::test]
    async fn refresh_token_is_rejected_as_access() {
        let app = app!();
        let refresh = create_test_jwt_service()
            .generate_refresh_token(UserId::from(Uuid::new_v4()), true, UserRole::Customer)
            .unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {refresh}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_TOKEN_TYPE");
    }

    #[actix_web::test]
    async fn unverified_user_is_forbidden() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/verified")
            .insert_header((
                "Authorization",
                format!("Bearer {}", access_token(Uuid::new_v4(), false, UserRole::Customer)),
            ))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "EMAIL_NOT_VERIFIED");
    }

    #[actix_web::test]
    async fn customer_cannot_reach_admin_route() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((
                "Authorization",
                format!("Bearer {}", access_token(Uuid::new_v4(), true, UserRole::Customer)),
            ))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "ADMIN_REQUIRED");
    }

    #[actix_web::test]
    async fn admin_passes_admin_route() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((
                "Authorization",
                format!("Bearer {}", access_token(Uuid::new_v4(), true, UserRole::Admin)),
            ))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}
