#[cfg(feature = "mail")]
pub mod mail;
#[cfg(feature = "smtp")]
pub mod smtp;
#[cfg(feature = "sendmail")]
pub mod sendmail;
