pub mod database;
pub mod fcm;

pub use database::TokenStore;
pub use fcm::{FcmClient, PushMessage};
