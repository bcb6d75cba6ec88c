pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::{auth, catalog, email, order, payment, review};

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::incoming::web::cookies::AuthCookieConfig;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::token_repository_redis::RedisTokenRepository;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::use_cases::{
    change_password::ChangePasswordUseCase, create_user::CreateUserUseCase,
    fetch_profile::FetchUserProfileService, forgot_password::ForgotPasswordUseCase,
    list_users::ListUsersService, login_user::LoginUserUseCase, logout_user::LogoutUseCase,
    refresh_token::RefreshTokenUseCase, resend_verification::ResendVerificationUseCase,
    reset_password::ResetPasswordUseCase, update_profile::UpdateUserProfileService,
    verify_user_email::VerifyUserEmailUseCase,
};
use crate::catalog::adapter::outgoing::{ProductQueryPostgres, ProductRepositoryPostgres};
use crate::catalog::application::catalog_use_cases::CatalogUseCases;
use crate::catalog::application::service::{
    CreateProductService, DeleteProductService, GetProductService, ListCategoriesService,
    ListProductsService, UpdateProductService,
};
use crate::email::adapter::outgoing::{MockEmailSender, SmtpEmailSender};
use crate::email::application::ports::outgoing::EmailSender;
use crate::email::application::services::EmailService;
use crate::order::adapter::outgoing::{OrderEventBus, OrderQueryPostgres, OrderRepositoryPostgres};
use crate::order::application::order_use_cases::OrderUseCases;
use crate::order::application::ports::incoming::use_cases::OrderPaymentUseCase;
use crate::order::application::service::{
    ChangeOrderStatusService, CompleteRefundService, CreateOrderService, GetOrderService,
    ListOrdersService, OrderNotifications, OrderPaymentService, OrderStatsService,
};
use crate::payment::adapter::outgoing::{MomoConfig, MomoGateway, PayosConfig, PayosGateway};
use crate::payment::application::payment_use_cases::PaymentUseCases;
use crate::payment::application::service::{
    CreatePaymentService, HandleNotificationService, PaymentGateways,
};
use crate::review::adapter::outgoing::{ReviewQueryPostgres, ReviewRepositoryPostgres};
use crate::review::application::review_use_cases::ReviewUseCases;
use crate::review::application::service::{CreateReviewService, ListProductReviewsService};
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};
use crate::shared::app_urls::AppUrls;

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub catalog: CatalogUseCases,
    pub orders: OrderUseCases,
    pub payments: PaymentUseCases,
    pub reviews: ReviewUseCases,
    pub cookies: AuthCookieConfig,
    pub order_events: OrderEventBus,
}

#[cfg(not(tarpaulin_include))]
fn payment_gateways(urls: &AppUrls) -> PaymentGateways {
    let mut gateways = PaymentGateways::default();

    match MomoConfig::from_env(urls) {
        Ok(config) => gateways = gateways.with(Arc::new(MomoGateway::new(config))),
        Err(e) => warn!("MoMo payments disabled: {}", e),
    }
    match PayosConfig::from_env() {
        Ok(config) => gateways = gateways.with(Arc::new(PayosGateway::new(config))),
        Err(e) => warn!("PayOS payments disabled: {}", e),
    }

    info!("Payment providers enabled: {:?}", gateways.providers());
    gateways
}

#[cfg(not(tarpaulin_include))]
fn cors_origins(urls: &AppUrls) -> Vec<String> {
    match env::var("CORS_ALLOWED_ORIGINS") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect(),
        _ => vec![urls.storefront_url.clone(), urls.admin_url.clone()],
    }
}

#[cfg(not(tarpaulin_include))]
fn build_cors(origins: &[String]) -> Cors {
    origins.iter().fold(
        Cors::default()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");
    let urls = AppUrls::from_env();

    // SMTP SETUPS
    let from_email = env::var("EMAIL_FROM").expect("EMAIL_FROM not set");
    let email_sender: Arc<dyn EmailSender + Send + Sync> = if rust_env == "test" {
        // Local Mailpit
        let host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        Arc::new(SmtpEmailSender::new_local(&host, port, &from_email))
    } else if let Ok(smtp_server) = env::var("SMTP_SERVER") {
        let smtp_user = env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        Arc::new(
            SmtpEmailSender::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
                .expect("Invalid SMTP configuration"),
        )
    } else if rust_env == "production" {
        panic!("SMTP_SERVER must be set in production");
    } else {
        warn!("SMTP_SERVER not set, outgoing mail is only logged");
        Arc::new(MockEmailSender::new())
    };

    let server_url = format!("{host}:{port}");

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");
    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .expect("Failed to create Redis pool");
    let redis_arc = Arc::new(redis_pool.clone());

    // ===== Auth =====
    let jwt_config = JwtConfig::from_env().expect("Invalid JWT configuration");
    let cookies = AuthCookieConfig::new(
        AuthCookieConfig::secure_from_env(),
        jwt_config.access_token_expiry,
        jwt_config.refresh_token_expiry,
    );
    let refresh_ttl = jwt_config.refresh_token_expiry;
    let jwt_service = Arc::new(JwtTokenService::new(jwt_config));
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = jwt_service.clone();

    let password_hasher = Arc::new(Argon2Hasher::from_env().expect("Invalid ARGON2_* settings"));
    let user_query = Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));
    let user_repo = Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc)));
    let token_repo = Arc::new(RedisTokenRepository::new(Arc::clone(&redis_arc), refresh_ttl));

    let email_service = EmailService::new(
        email_sender,
        token_provider.clone(),
        urls.clone(),
    );

    let create_user = CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        password_hasher.clone(),
    );
    let register = UserRegistrationOrchestrator::new(
        Arc::new(create_user),
        Arc::new(email_service.clone()),
    );

    let auth = AuthUseCases {
        register: Arc::new(register),
        verify_email: Arc::new(VerifyUserEmailUseCase::new(
            user_repo.clone(),
            jwt_service.clone(),
        )),
        resend_verification: Arc::new(ResendVerificationUseCase::new(
            user_query.clone(),
            Arc::new(email_service.clone()),
        )),
        login: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            password_hasher.clone(),
            jwt_service.clone(),
        )),
        refresh_token: Arc::new(RefreshTokenUseCase::new(
            jwt_service.clone(),
            token_repo.clone(),
            user_query.clone(),
        )),
        logout: Arc::new(LogoutUseCase::new(token_repo.clone(), jwt_service.clone())),
        forgot_password: Arc::new(ForgotPasswordUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            Arc::new(email_service.clone()),
        )),
        reset_password: Arc::new(ResetPasswordUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            password_hasher.clone(),
            token_repo.clone(),
        )),
        change_password: Arc::new(ChangePasswordUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            password_hasher,
        )),
        fetch_profile: Arc::new(FetchUserProfileService::new(user_query.clone())),
        update_profile: Arc::new(UpdateUserProfileService::new(user_repo)),
        list_users: Arc::new(ListUsersService::new(user_query.clone())),
    };

    // ===== Catalog =====
    let product_query = ProductQueryPostgres::new(Arc::clone(&db_arc));
    let product_repo = ProductRepositoryPostgres::new(Arc::clone(&db_arc));
    let catalog = CatalogUseCases {
        list: Arc::new(ListProductsService::new(product_query.clone())),
        get: Arc::new(GetProductService::new(product_query.clone())),
        create: Arc::new(CreateProductService::new(product_repo.clone())),
        update: Arc::new(UpdateProductService::new(product_repo.clone())),
        delete: Arc::new(DeleteProductService::new(product_repo)),
        categories: Arc::new(ListCategoriesService::new(product_query.clone())),
    };

    // ===== Orders =====
    let order_events = OrderEventBus::default();
    let order_query = OrderQueryPostgres::new(Arc::clone(&db_arc));
    let order_repo = OrderRepositoryPostgres::new(Arc::clone(&db_arc));
    let notifications =
        OrderNotifications::new(Arc::new(order_events.clone()), Arc::new(email_service));

    let order_payment: Arc<dyn OrderPaymentUseCase + Send + Sync> =
        Arc::new(OrderPaymentService::new(
            order_query.clone(),
            order_repo.clone(),
            notifications.clone(),
        ));
    let orders = OrderUseCases {
        create: Arc::new(CreateOrderService::new(
            order_repo.clone(),
            Arc::new(product_query),
            user_query,
            notifications.clone(),
        )),
        get: Arc::new(GetOrderService::new(order_query.clone())),
        list: Arc::new(ListOrdersService::new(order_query.clone())),
        change_status: Arc::new(ChangeOrderStatusService::new(
            order_query.clone(),
            order_repo.clone(),
            notifications.clone(),
        )),
        complete_refund: Arc::new(CompleteRefundService::new(
            order_query.clone(),
            order_repo,
            notifications,
        )),
        stats: Arc::new(OrderStatsService::new(order_query)),
        payment: order_payment.clone(),
    };

    // ===== Payments =====
    let gateways = payment_gateways(&urls);
    let payments = PaymentUseCases {
        create: Arc::new(CreatePaymentService::new(
            order_payment.clone(),
            gateways.clone(),
            urls.clone(),
        )),
        notify: Arc::new(HandleNotificationService::new(order_payment, gateways)),
    };

    // ===== Reviews =====
    let reviews = ReviewUseCases {
        create: Arc::new(CreateReviewService::new(
            ReviewRepositoryPostgres::new(Arc::clone(&db_arc)),
            orders.get.clone(),
        )),
        list: Arc::new(ListProductReviewsService::new(ReviewQueryPostgres::new(
            Arc::clone(&db_arc),
        ))),
    };

    let state = AppState {
        auth,
        catalog,
        orders,
        payments,
        reviews,
        cookies,
        order_events,
    };

    let origins = cors_origins(&urls);
    let openapi = ApiDoc::openapi();

    info!("Server run on: {}", server_url);
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&origins))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::from(Arc::clone(&db_arc)))
            .app_data(web::Data::new(redis_pool.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::catalog::adapter::incoming::web::routes as catalog_routes;
    use crate::order::adapter::incoming::web::routes as order_routes;
    use crate::payment::adapter::incoming::web::routes as payment_routes;
    use crate::review::adapter::incoming::web::routes as review_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth_routes::register_user_handler);
    cfg.service(auth_routes::verify_user_email_handler);
    cfg.service(auth_routes::resend_verification_handler);
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::refresh_token_handler);
    cfg.service(auth_routes::logout_user_handler);
    cfg.service(auth_routes::forgot_password_handler);
    cfg.service(auth_routes::reset_password_handler);
    // Users
    cfg.service(auth_routes::get_profile_handler);
    cfg.service(auth_routes::update_profile_handler);
    cfg.service(auth_routes::change_password_handler);
    cfg.service(auth_routes::list_users_handler);
    // Catalog
    cfg.service(catalog_routes::list_products_handler);
    cfg.service(catalog_routes::get_product_handler);
    cfg.service(catalog_routes::list_categories_handler);
    cfg.service(catalog_routes::create_product_handler);
    cfg.service(catalog_routes::update_product_handler);
    cfg.service(catalog_routes::delete_product_handler);
    // Reviews
    cfg.service(review_routes::create_review_handler);
    cfg.service(review_routes::list_product_reviews_handler);
    // Orders; the event stream must come before /api/orders/{id}
    cfg.service(order_routes::order_events_handler);
    cfg.service(order_routes::create_order_handler);
    cfg.service(order_routes::list_my_orders_handler);
    cfg.service(order_routes::get_order_handler);
    cfg.service(order_routes::cancel_order_handler);
    cfg.service(order_routes::admin_list_orders_handler);
    cfg.service(order_routes::order_stats_handler);
    cfg.service(order_routes::update_order_status_handler);
    cfg.service(order_routes::complete_refund_handler);
    // Payments
    cfg.service(payment_routes::create_payment_handler);
    cfg.service(payment_routes::momo_ipn_handler);
    cfg.service(payment_routes::payos_webhook_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
