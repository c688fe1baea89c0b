#[cfg(feature = "smtp")]
mod smtp_credentials;
#[cfg(feature = "smtp")]
pub mod smtp_mode;
#[cfg(feature = "smtp")]
pub mod smtp_handler;
