pub mod change_password;
pub mod create_user;
pub mod fetch_profile;
pub mod forgot_password;
pub mod list_users;
pub mod login_user;
pub mod logout_user;
pub mod refresh_token;
pub mod resend_verification;
pub mod reset_password;
pub mod update_profile;
pub mod verify_user_email;

#[cfg(test)]
pub mod test_support;
