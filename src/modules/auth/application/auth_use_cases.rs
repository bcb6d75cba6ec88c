use std::sync::Arc;

use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    change_password::IChangePasswordUseCase, fetch_profile::FetchUserProfileUseCase,
    forgot_password::IForgotPasswordUseCase, list_users::ListUsersUseCase,
    login_user::ILoginUserUseCase, logout_user::ILogoutUseCase,
    refresh_token::IRefreshTokenUseCase, resend_verification::IResendVerificationUseCase,
    reset_password::IResetPasswordUseCase, update_profile::UpdateUserProfileUseCase,
    verify_user_email::IVerifyUserEmailUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub register: Arc<UserRegistrationOrchestrator>,
    pub verify_email: Arc<dyn IVerifyUserEmailUseCase + Send + Sync>,
    pub resend_verification: Arc<dyn IResendVerificationUseCase + Send + Sync>,
    pub login: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub refresh_token: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    pub logout: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub forgot_password: Arc<dyn IForgotPasswordUseCase + Send + Sync>,
    pub reset_password: Arc<dyn IResetPasswordUseCase + Send + Sync>,
    pub change_password: Arc<dyn IChangePasswordUseCase + Send + Sync>,
    pub fetch_profile: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    pub update_profile: Arc<dyn UpdateUserProfileUseCase + Send + Sync>,
    pub list_users: Arc<dyn ListUsersUseCase + Send + Sync>,
}
