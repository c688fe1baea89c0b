/// Connection security for the SMTP relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpMode {
    /// Production relay over implicit TLS with `ESMTP`
    RelayEsmtp,
    /// Production relay upgraded with `STARTTLS`
    RelayStartTls,
    /// Testing relay without `ESMTP` or `STARTTLS`
    Testing,
}
