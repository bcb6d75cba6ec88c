#[cfg(test)]
pub mod test_helpers {
    use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
    use crate::auth::application::domain::entities::{UserId, UserRole};
    use crate::auth::application::ports::outgoing::TokenProvider;
    use actix_web::web;
    use std::sync::Arc;
    use uuid::Uuid;

    pub fn create_test_jwt_service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            issuer: "storefront-test".to_string(),
            secret_key: "test_secret_key_for_testing_only_0123456789".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 86_400,
            verification_token_expiry: 86_400,
        })
    }

    /// Same shape main registers, so the auth extractors find it.
    pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
        let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(create_test_jwt_service());
        web::Data::new(provider)
    }

    /// `Authorization` header value for a freshly signed access token.
    pub fn bearer(user_id: Uuid, is_verified: bool, role: UserRole) -> String {
        let token = create_test_jwt_service()
            .generate_access_token(UserId::from(user_id), is_verified, role)
            .expect("test token");
        format!("Bearer {token}")
    }
}
