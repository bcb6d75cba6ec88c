//! Default use cases for `TestAppStateBuilder`. Each one answers with a
//! harmless failure so a test only wires what its route actually calls.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::use_cases::{
    change_password::{ChangePasswordError, ChangePasswordInput, IChangePasswordUseCase},
    create_user::{CreateUserError, CreateUserInput, CreateUserOutput, ICreateUserUseCase},
    fetch_profile::{FetchUserError, FetchUserProfileUseCase, UserProfile},
    forgot_password::{ForgotPasswordError, IForgotPasswordUseCase},
    list_users::{ListUsersError, ListUsersUseCase},
    login_user::{ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse},
    logout_user::{ILogoutUseCase, LogoutRequest, LogoutResponse},
    refresh_token::{
        IRefreshTokenUseCase, RefreshTokenError, RefreshTokenRequest, RefreshTokenResponse,
    },
    resend_verification::{IResendVerificationUseCase, ResendVerificationError},
    reset_password::{IResetPasswordUseCase, ResetPasswordError, ResetPasswordInput},
    update_profile::{UpdateUserError, UpdateUserInput, UpdateUserProfileUseCase},
    verify_user_email::{IVerifyUserEmailUseCase, VerifyUserEmailError},
};
use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::catalog::application::domain::product_rules::{NewProduct, ProductPatch};
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductError, CreateProductUseCase, DeleteProductError, DeleteProductUseCase,
    GetProductError, GetProductUseCase, ListCategoriesError, ListCategoriesUseCase,
    ListProductsError, ListProductsUseCase, UpdateProductError, UpdateProductUseCase,
};
use crate::email::application::ports::outgoing::{
    EmailRecipient, UserEmailNotificationError, UserEmailNotifier,
};
use crate::order::application::domain::checkout::NewOrderRequest;
use crate::order::application::domain::entities::{Order, OrderListFilter, OrderStatus};
use crate::order::application::domain::stats::{OrderStats, StatsRange};
use crate::order::application::domain::transitions::TransitionActor;
use crate::order::application::ports::incoming::use_cases::{
    ChangeOrderStatusError, ChangeOrderStatusUseCase, CompleteRefundError, CompleteRefundUseCase,
    CreateOrderError, CreateOrderUseCase, GetOrderError, GetOrderUseCase, ListOrdersError,
    ListOrdersUseCase, OrderPaymentError, OrderPaymentUseCase, OrderStatsError,
    OrderStatsUseCase, OrderViewer,
};
use crate::payment::application::domain::entities::{PaymentLink, PaymentProvider};
use crate::payment::application::ports::incoming::use_cases::{
    CreatePaymentError, CreatePaymentUseCase, HandleNotificationError,
    HandleNotificationUseCase, NotificationOutcome,
};
use crate::review::application::domain::entities::{NewReview, ProductReviews, Review};
use crate::review::application::ports::incoming::use_cases::{
    CreateReviewError, CreateReviewUseCase, ListProductReviewsError, ListProductReviewsUseCase,
};
use crate::shared::pagination::{PageRequest, PageResult};

// ============================ Auth =============================

pub struct StubCreateUserUseCase;

#[async_trait]
impl ICreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, _input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
        Err(CreateUserError::RepositoryError("stub".to_string()))
    }
}

pub struct StubUserEmailNotifier;

#[async_trait]
impl UserEmailNotifier for StubUserEmailNotifier {
    async fn send_verification_email(
        &self,
        _recipient: &EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        _recipient: &EmailRecipient,
        _reset_token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }
}

pub struct StubVerifyUserEmailUseCase;

#[async_trait]
impl IVerifyUserEmailUseCase for StubVerifyUserEmailUseCase {
    async fn execute(&self, _token: &str) -> Result<(), VerifyUserEmailError> {
        Err(VerifyUserEmailError::TokenInvalid)
    }
}

pub struct StubResendVerificationUseCase;

#[async_trait]
impl IResendVerificationUseCase for StubResendVerificationUseCase {
    async fn execute(&self, _email: &str) -> Result<(), ResendVerificationError> {
        Ok(())
    }
}

pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::InvalidCredentials)
    }
}

pub struct StubRefreshTokenUseCase;

#[async_trait]
impl IRefreshTokenUseCase for StubRefreshTokenUseCase {
    async fn execute(
        &self,
        _request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        Err(RefreshTokenError::TokenInvalid)
    }
}

pub struct StubLogoutUserUseCase;

#[async_trait]
impl ILogoutUseCase for StubLogoutUserUseCase {
    async fn execute(&self, _request: LogoutRequest) -> LogoutResponse {
        LogoutResponse {
            message: "Logged out".to_string(),
        }
    }
}

pub struct StubForgotPasswordUseCase;

#[async_trait]
impl IForgotPasswordUseCase for StubForgotPasswordUseCase {
    async fn execute(&self, _email: &str) -> Result<(), ForgotPasswordError> {
        Ok(())
    }
}

pub struct StubResetPasswordUseCase;

#[async_trait]
impl IResetPasswordUseCase for StubResetPasswordUseCase {
    async fn execute(&self, _input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
        Err(ResetPasswordError::InvalidToken)
    }
}

pub struct StubChangePasswordUseCase;

#[async_trait]
impl IChangePasswordUseCase for StubChangePasswordUseCase {
    async fn execute(
        &self,
        _user_id: UserId,
        _input: ChangePasswordInput,
    ) -> Result<(), ChangePasswordError> {
        Err(ChangePasswordError::UserNotFound)
    }
}

pub struct StubFetchUserProfileUseCase;

#[async_trait]
impl FetchUserProfileUseCase for StubFetchUserProfileUseCase {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchUserError> {
        Err(FetchUserError::UserNotFound(user_id))
    }
}

pub struct StubUpdateUserProfileUseCase;

#[async_trait]
impl UpdateUserProfileUseCase for StubUpdateUserProfileUseCase {
    async fn execute(
        &self,
        _user_id: UserId,
        _input: UpdateUserInput,
    ) -> Result<UserProfile, UpdateUserError> {
        Err(UpdateUserError::InvalidInput("stub".to_string()))
    }
}

pub struct StubListUsersUseCase;

#[async_trait]
impl ListUsersUseCase for StubListUsersUseCase {
    async fn execute(
        &self,
        _search: Option<String>,
        page: PageRequest,
    ) -> Result<PageResult<UserProfile>, ListUsersError> {
        Ok(PageResult::new(vec![], page, 0))
    }
}

// ============================ Catalog =============================

pub struct StubListProductsUseCase;

#[async_trait]
impl ListProductsUseCase for StubListProductsUseCase {
    async fn execute(
        &self,
        _filter: ProductListFilter,
        _sort: ProductSort,
        page: PageRequest,
    ) -> Result<PageResult<Product>, ListProductsError> {
        Ok(PageResult::new(vec![], page, 0))
    }
}

pub struct StubGetProductUseCase;

#[async_trait]
impl GetProductUseCase for StubGetProductUseCase {
    async fn execute(&self, _id: Uuid) -> Result<Product, GetProductError> {
        Err(GetProductError::NotFound)
    }
}

pub struct StubCreateProductUseCase;

#[async_trait]
impl CreateProductUseCase for StubCreateProductUseCase {
    async fn execute(&self, _product: NewProduct) -> Result<Product, CreateProductError> {
        Err(CreateProductError::RepositoryError("stub".to_string()))
    }
}

pub struct StubUpdateProductUseCase;

#[async_trait]
impl UpdateProductUseCase for StubUpdateProductUseCase {
    async fn execute(&self, _id: Uuid, _patch: ProductPatch) -> Result<Product, UpdateProductError> {
        Err(UpdateProductError::NotFound)
    }
}

pub struct StubDeleteProductUseCase;

#[async_trait]
impl DeleteProductUseCase for StubDeleteProductUseCase {
    async fn execute(&self, _id: Uuid) -> Result<(), DeleteProductError> {
        Err(DeleteProductError::NotFound)
    }
}

pub struct StubListCategoriesUseCase;

#[async_trait]
impl ListCategoriesUseCase for StubListCategoriesUseCase {
    async fn execute(&self) -> Result<Vec<String>, ListCategoriesError> {
        Ok(vec![])
    }
}

// ============================ Orders =============================

pub struct StubCreateOrderUseCase;

#[async_trait]
impl CreateOrderUseCase for StubCreateOrderUseCase {
    async fn execute(
        &self,
        _user_id: UserId,
        _request: NewOrderRequest,
    ) -> Result<Order, CreateOrderError> {
        Err(CreateOrderError::RepositoryError("stub".to_string()))
    }
}

pub struct StubGetOrderUseCase;

#[async_trait]
impl GetOrderUseCase for StubGetOrderUseCase {
    async fn execute(&self, _order_id: Uuid, _viewer: OrderViewer) -> Result<Order, GetOrderError> {
        Err(GetOrderError::NotFound)
    }
}

pub struct StubListOrdersUseCase;

#[async_trait]
impl ListOrdersUseCase for StubListOrdersUseCase {
    async fn execute(
        &self,
        _filter: OrderListFilter,
        page: PageRequest,
    ) -> Result<PageResult<Order>, ListOrdersError> {
        Ok(PageResult::new(vec![], page, 0))
    }
}

pub struct StubChangeOrderStatusUseCase;

#[async_trait]
impl ChangeOrderStatusUseCase for StubChangeOrderStatusUseCase {
    async fn execute(
        &self,
        _order_id: Uuid,
        _actor: TransitionActor,
        _next: OrderStatus,
    ) -> Result<Order, ChangeOrderStatusError> {
        Err(ChangeOrderStatusError::NotFound)
    }
}

pub struct StubCompleteRefundUseCase;

#[async_trait]
impl CompleteRefundUseCase for StubCompleteRefundUseCase {
    async fn execute(&self, _order_id: Uuid, _admin: UserId) -> Result<Order, CompleteRefundError> {
        Err(CompleteRefundError::NotFound)
    }
}

pub struct StubOrderStatsUseCase;

#[async_trait]
impl OrderStatsUseCase for StubOrderStatsUseCase {
    async fn execute(&self, _range: StatsRange) -> Result<OrderStats, OrderStatsError> {
        Err(OrderStatsError::QueryFailed("stub".to_string()))
    }
}

pub struct StubOrderPaymentUseCase;

#[async_trait]
impl OrderPaymentUseCase for StubOrderPaymentUseCase {
    async fn find_by_id(&self, _order_id: Uuid) -> Result<Option<Order>, OrderPaymentError> {
        Ok(None)
    }

    async fn find_by_reference(
        &self,
        _reference: &str,
    ) -> Result<Option<Order>, OrderPaymentError> {
        Ok(None)
    }

    async fn attach_reference(
        &self,
        _order_id: Uuid,
        _reference: &str,
    ) -> Result<Order, OrderPaymentError> {
        Err(OrderPaymentError::NotFound)
    }

    async fn mark_paid(&self, _order_id: Uuid, _note: &str) -> Result<Order, OrderPaymentError> {
        Err(OrderPaymentError::NotFound)
    }

    async fn mark_failed(&self, _order_id: Uuid, _reason: &str) -> Result<Order, OrderPaymentError> {
        Err(OrderPaymentError::NotFound)
    }
}

// ============================ Payments =============================

pub struct StubCreatePaymentUseCase;

#[async_trait]
impl CreatePaymentUseCase for StubCreatePaymentUseCase {
    async fn execute(
        &self,
        _order_id: Uuid,
        _user_id: UserId,
        provider: PaymentProvider,
    ) -> Result<PaymentLink, CreatePaymentError> {
        Err(CreatePaymentError::ProviderUnavailable(provider))
    }
}

pub struct StubHandleNotificationUseCase;

#[async_trait]
impl HandleNotificationUseCase for StubHandleNotificationUseCase {
    async fn execute(
        &self,
        provider: PaymentProvider,
        _payload: Value,
    ) -> Result<NotificationOutcome, HandleNotificationError> {
        Err(HandleNotificationError::ProviderUnavailable(provider))
    }
}

// ============================ Reviews =============================

pub struct StubCreateReviewUseCase;

#[async_trait]
impl CreateReviewUseCase for StubCreateReviewUseCase {
    async fn execute(&self, _user_id: UserId, _review: NewReview) -> Result<Review, CreateReviewError> {
        Err(CreateReviewError::OrderNotFound)
    }
}

pub struct StubListProductReviewsUseCase;

#[async_trait]
impl ListProductReviewsUseCase for StubListProductReviewsUseCase {
    async fn execute(
        &self,
        _product_id: Uuid,
        page: PageRequest,
    ) -> Result<ProductReviews, ListProductReviewsError> {
        Ok(ProductReviews {
            summary: Default::default(),
            reviews: PageResult::new(vec![], page, 0),
        })
    }
}
