pub mod health;
pub mod login;
pub mod password_reset;
pub mod resend_verification;
pub mod verify;
