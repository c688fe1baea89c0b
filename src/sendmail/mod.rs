#[cfg(feature = "sendmail")]
pub mod sendmail_handler;
