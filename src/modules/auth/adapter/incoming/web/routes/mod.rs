mod login_user;
mod logout_user;
mod password_reset;
mod profile;
mod refresh_token;
mod register_user;
mod resend_verification;
mod verify_email;

pub use login_user::*;
pub use logout_user::*;
pub use password_reset::*;
pub use profile::*;
pub use refresh_token::*;
pub use register_user::*;
pub use resend_verification::*;
pub use verify_email::*;
