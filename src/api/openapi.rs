use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    EmailRequest, LoginRequestDto, LogoutRequestDto, MessageResponse, RefreshTokenRequestDto,
    RegisterUserRequest, RegisterUserResponse, RegisteredUser, VerifyEmailResponse,
};
use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::use_cases::{
    change_password::ChangePasswordInput, fetch_profile::UserProfile,
    login_user::{LoginUserResponse, UserInfo},
    logout_user::LogoutResponse, refresh_token::RefreshTokenResponse,
    reset_password::ResetPasswordInput, update_profile::UpdateUserInput,
};
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::{NewProduct, ProductPatch};
use crate::health::{HealthResponse, ReadinessResponse};
use crate::order::adapter::incoming::web::routes::UpdateOrderStatusRequest;
use crate::order::application::domain::checkout::{NewOrderRequest, OrderLineRequest};
use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderItem, OrderStatus, PayingStatus, PaymentMethod, RefundStatus,
};
use crate::order::application::domain::stats::{
    MonthlyRevenue, OrderStats, StatusCount, TopProduct,
};
use crate::order::application::ports::outgoing::OrderEvent;
use crate::payment::adapter::incoming::web::routes::{CreatePaymentRequest, WebhookAck};
use crate::payment::application::domain::entities::{PaymentLink, PaymentProvider};
use crate::review::application::domain::entities::{NewReview, RatingSummary, Review};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "Flower shop storefront: accounts, catalog, orders, online payments and reviews",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        crate::health::health,
        crate::health::readiness,

        // Auth
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_user_email_handler,
        crate::auth::adapter::incoming::web::routes::resend_verification_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::forgot_password_handler,
        crate::auth::adapter::incoming::web::routes::reset_password_handler,

        // Users
        crate::auth::adapter::incoming::web::routes::get_profile_handler,
        crate::auth::adapter::incoming::web::routes::update_profile_handler,
        crate::auth::adapter::incoming::web::routes::change_password_handler,
        crate::auth::adapter::incoming::web::routes::list_users_handler,

        // Catalog
        crate::catalog::adapter::incoming::web::routes::list_products_handler,
        crate::catalog::adapter::incoming::web::routes::get_product_handler,
        crate::catalog::adapter::incoming::web::routes::list_categories_handler,
        crate::catalog::adapter::incoming::web::routes::create_product_handler,
        crate::catalog::adapter::incoming::web::routes::update_product_handler,
        crate::catalog::adapter::incoming::web::routes::delete_product_handler,

        // Orders
        crate::order::adapter::incoming::web::routes::create_order_handler,
        crate::order::adapter::incoming::web::routes::list_my_orders_handler,
        crate::order::adapter::incoming::web::routes::order_events_handler,
        crate::order::adapter::incoming::web::routes::get_order_handler,
        crate::order::adapter::incoming::web::routes::cancel_order_handler,
        crate::order::adapter::incoming::web::routes::admin_list_orders_handler,
        crate::order::adapter::incoming::web::routes::update_order_status_handler,
        crate::order::adapter::incoming::web::routes::complete_refund_handler,
        crate::order::adapter::incoming::web::routes::order_stats_handler,

        // Payments
        crate::payment::adapter::incoming::web::routes::create_payment_handler,
        crate::payment::adapter::incoming::web::routes::momo_ipn_handler,
        crate::payment::adapter::incoming::web::routes::payos_webhook_handler,

        // Reviews
        crate::review::adapter::incoming::web::routes::create_review_handler,
        crate::review::adapter::incoming::web::routes::list_product_reviews_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<RegisterUserResponse>,
            ErrorResponse,
            ErrorDetail,
            HealthResponse,
            ReadinessResponse,

            // Auth
            UserRole,
            RegisterUserRequest,
            RegisterUserResponse,
            RegisteredUser,
            VerifyEmailResponse,
            EmailRequest,
            MessageResponse,
            LoginRequestDto,
            LoginUserResponse,
            UserInfo,
            RefreshTokenRequestDto,
            RefreshTokenResponse,
            LogoutRequestDto,
            LogoutResponse,
            ResetPasswordInput,
            ChangePasswordInput,
            UpdateUserInput,
            UserProfile,

            // Catalog
            Product,
            NewProduct,
            ProductPatch,

            // Orders
            OrderStatus,
            PayingStatus,
            RefundStatus,
            PaymentMethod,
            OrderItem,
            HistoryEntry,
            Order,
            OrderLineRequest,
            NewOrderRequest,
            UpdateOrderStatusRequest,
            OrderEvent,
            OrderStats,
            StatusCount,
            MonthlyRevenue,
            TopProduct,

            // Payments
            PaymentProvider,
            PaymentLink,
            CreatePaymentRequest,
            WebhookAck,

            // Reviews
            Review,
            NewReview,
            RatingSummary,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "auth", description = "Registration, login and password recovery"),
        (name = "users", description = "Customer profile endpoints"),
        (name = "products", description = "Public catalog"),
        (name = "orders", description = "Checkout and order tracking"),
        (name = "payments", description = "MoMo and PayOS checkout and callbacks"),
        (name = "reviews", description = "Product reviews"),
        (name = "admin", description = "Back-office endpoints, admin role required"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
