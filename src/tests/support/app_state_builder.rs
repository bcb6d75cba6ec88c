use crate::auth::adapter::incoming::web::cookies::AuthCookieConfig;
use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    change_password::IChangePasswordUseCase, create_user::ICreateUserUseCase,
    fetch_profile::FetchUserProfileUseCase, forgot_password::IForgotPasswordUseCase,
    list_users::ListUsersUseCase, login_user::ILoginUserUseCase, logout_user::ILogoutUseCase,
    refresh_token::IRefreshTokenUseCase, resend_verification::IResendVerificationUseCase,
    reset_password::IResetPasswordUseCase, update_profile::UpdateUserProfileUseCase,
    verify_user_email::IVerifyUserEmailUseCase,
};
use crate::catalog::application::catalog_use_cases::CatalogUseCases;
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListCategoriesUseCase,
    ListProductsUseCase, UpdateProductUseCase,
};
use crate::order::adapter::outgoing::OrderEventBus;
use crate::order::application::order_use_cases::OrderUseCases;
use crate::order::application::ports::incoming::use_cases::{
    ChangeOrderStatusUseCase, CompleteRefundUseCase, CreateOrderUseCase, GetOrderUseCase,
    ListOrdersUseCase, OrderPaymentUseCase, OrderStatsUseCase,
};
use crate::payment::application::payment_use_cases::PaymentUseCases;
use crate::payment::application::ports::incoming::use_cases::{
    CreatePaymentUseCase, HandleNotificationUseCase,
};
use crate::review::application::ports::incoming::use_cases::{
    CreateReviewUseCase, ListProductReviewsUseCase,
};
use crate::review::application::review_use_cases::ReviewUseCases;
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

/// Builds an `AppState` where every use case is a stub unless overridden.
pub struct TestAppStateBuilder {
    auth: AuthUseCases,
    catalog: CatalogUseCases,
    orders: OrderUseCases,
    payments: PaymentUseCases,
    reviews: ReviewUseCases,
    order_events: OrderEventBus,
}

fn registration(create_user: Arc<dyn ICreateUserUseCase + Send + Sync>) -> Arc<UserRegistrationOrchestrator> {
    Arc::new(UserRegistrationOrchestrator::new(
        create_user,
        Arc::new(StubUserEmailNotifier),
    ))
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            auth: AuthUseCases {
                register: registration(Arc::new(StubCreateUserUseCase)),
                verify_email: Arc::new(StubVerifyUserEmailUseCase),
                resend_verification: Arc::new(StubResendVerificationUseCase),
                login: Arc::new(StubLoginUserUseCase),
                refresh_token: Arc::new(StubRefreshTokenUseCase),
                logout: Arc::new(StubLogoutUserUseCase),
                forgot_password: Arc::new(StubForgotPasswordUseCase),
                reset_password: Arc::new(StubResetPasswordUseCase),
                change_password: Arc::new(StubChangePasswordUseCase),
                fetch_profile: Arc::new(StubFetchUserProfileUseCase),
                update_profile: Arc::new(StubUpdateUserProfileUseCase),
                list_users: Arc::new(StubListUsersUseCase),
            },
            catalog: CatalogUseCases {
                list: Arc::new(StubListProductsUseCase),
                get: Arc::new(StubGetProductUseCase),
                create: Arc::new(StubCreateProductUseCase),
                update: Arc::new(StubUpdateProductUseCase),
                delete: Arc::new(StubDeleteProductUseCase),
                categories: Arc::new(StubListCategoriesUseCase),
            },
            orders: OrderUseCases {
                create: Arc::new(StubCreateOrderUseCase),
                get: Arc::new(StubGetOrderUseCase),
                list: Arc::new(StubListOrdersUseCase),
                change_status: Arc::new(StubChangeOrderStatusUseCase),
                complete_refund: Arc::new(StubCompleteRefundUseCase),
                stats: Arc::new(StubOrderStatsUseCase),
                payment: Arc::new(StubOrderPaymentUseCase),
            },
            payments: PaymentUseCases {
                create: Arc::new(StubCreatePaymentUseCase),
                notify: Arc::new(StubHandleNotificationUseCase),
            },
            reviews: ReviewUseCases {
                create: Arc::new(StubCreateReviewUseCase),
                list: Arc::new(StubListProductReviewsUseCase),
            },
            order_events: OrderEventBus::default(),
        }
    }
}

impl TestAppStateBuilder {
    // ===== Auth =====
    pub fn with_create_user(mut self, uc: Arc<dyn ICreateUserUseCase + Send + Sync>) -> Self {
        self.auth.register = registration(uc);
        self
    }

    pub fn with_verify_email(mut self, uc: Arc<dyn IVerifyUserEmailUseCase + Send + Sync>) -> Self {
        self.auth.verify_email = uc;
        self
    }

    pub fn with_resend_verification(
        mut self,
        uc: Arc<dyn IResendVerificationUseCase + Send + Sync>,
    ) -> Self {
        self.auth.resend_verification = uc;
        self
    }

    pub fn with_login_user(mut self, uc: Arc<dyn ILoginUserUseCase + Send + Sync>) -> Self {
        self.auth.login = uc;
        self
    }

    pub fn with_refresh_token(mut self, uc: Arc<dyn IRefreshTokenUseCase + Send + Sync>) -> Self {
        self.auth.refresh_token = uc;
        self
    }

    pub fn with_logout_user(mut self, uc: Arc<dyn ILogoutUseCase + Send + Sync>) -> Self {
        self.auth.logout = uc;
        self
    }

    pub fn with_forgot_password(
        mut self,
        uc: Arc<dyn IForgotPasswordUseCase + Send + Sync>,
    ) -> Self {
        self.auth.forgot_password = uc;
        self
    }

    pub fn with_reset_password(mut self, uc: Arc<dyn IResetPasswordUseCase + Send + Sync>) -> Self {
        self.auth.reset_password = uc;
        self
    }

    pub fn with_change_password(
        mut self,
        uc: Arc<dyn IChangePasswordUseCase + Send + Sync>,
    ) -> Self {
        self.auth.change_password = uc;
        self
    }

    pub fn with_fetch_profile(mut self, uc: Arc<dyn FetchUserProfileUseCase + Send + Sync>) -> Self {
        self.auth.fetch_profile = uc;
        self
    }

    pub fn with_update_profile(
        mut self,
        uc: Arc<dyn UpdateUserProfileUseCase + Send + Sync>,
    ) -> Self {
        self.auth.update_profile = uc;
        self
    }

    pub fn with_list_users(mut self, uc: Arc<dyn ListUsersUseCase + Send + Sync>) -> Self {
        self.auth.list_users = uc;
        self
    }

    // ===== Catalog =====
    pub fn with_list_products(mut self, uc: Arc<dyn ListProductsUseCase + Send + Sync>) -> Self {
        self.catalog.list = uc;
        self
    }

    pub fn with_get_product(mut self, uc: Arc<dyn GetProductUseCase + Send + Sync>) -> Self {
        self.catalog.get = uc;
        self
    }

    pub fn with_create_product(mut self, uc: Arc<dyn CreateProductUseCase + Send + Sync>) -> Self {
        self.catalog.create = uc;
        self
    }

    pub fn with_update_product(mut self, uc: Arc<dyn UpdateProductUseCase + Send + Sync>) -> Self {
        self.catalog.update = uc;
        self
    }

    pub fn with_delete_product(mut self, uc: Arc<dyn DeleteProductUseCase + Send + Sync>) -> Self {
        self.catalog.delete = uc;
        self
    }

    pub fn with_list_categories(
        mut self,
        uc: Arc<dyn ListCategoriesUseCase + Send + Sync>,
    ) -> Self {
        self.catalog.categories = uc;
        self
    }

    // ===== Orders =====
    pub fn with_create_order(mut self, uc: Arc<dyn CreateOrderUseCase + Send + Sync>) -> Self {
        self.orders.create = uc;
        self
    }

    pub fn with_get_order(mut self, uc: Arc<dyn GetOrderUseCase + Send + Sync>) -> Self {
        self.orders.get = uc;
        self
    }

    pub fn with_list_orders(mut self, uc: Arc<dyn ListOrdersUseCase + Send + Sync>) -> Self {
        self.orders.list = uc;
        self
    }

    pub fn with_change_order_status(
        mut self,
        uc: Arc<dyn ChangeOrderStatusUseCase + Send + Sync>,
    ) -> Self {
        self.orders.change_status = uc;
        self
    }

    pub fn with_complete_refund(mut self, uc: Arc<dyn CompleteRefundUseCase + Send + Sync>) -> Self {
        self.orders.complete_refund = uc;
        self
    }

    pub fn with_order_stats(mut self, uc: Arc<dyn OrderStatsUseCase + Send + Sync>) -> Self {
        self.orders.stats = uc;
        self
    }

    // ===== Payments =====
    pub fn with_create_payment(mut self, uc: Arc<dyn CreatePaymentUseCase + Send + Sync>) -> Self {
        self.payments.create = uc;
        self
    }

    pub fn with_handle_notification(
        mut self,
        uc: Arc<dyn HandleNotificationUseCase + Send + Sync>,
    ) -> Self {
        self.payments.notify = uc;
        self
    }

    // ===== Reviews =====
    pub fn with_create_review(mut self, uc: Arc<dyn CreateReviewUseCase + Send + Sync>) -> Self {
        self.reviews.create = uc;
        self
    }

    pub fn with_list_product_reviews(
        mut self,
        uc: Arc<dyn ListProductReviewsUseCase + Send + Sync>,
    ) -> Self {
        self.reviews.list = uc;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            auth: self.auth,
            catalog: self.catalog,
            orders: self.orders,
            payments: self.payments,
            reviews: self.reviews,
            cookies: AuthCookieConfig::new(false, 900, 86_400),
            order_events: self.order_events,
        })
    }
}
