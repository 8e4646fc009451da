pub mod health;
pub mod notification;
pub mod token;

pub use health::{health_check, readiness_check};
pub use notification::send_notification;
pub use token::send_token;
