use async_trait::async_trait;

use crate::mail::mail_draft::MailDraft;

/// Does the actual delivery of a draft. Implemented per transport.
///
/// Handlers are expected to validate addresses when the draft's
/// `config.validate` flag is set, deliver once per
/// [`MailDraft::delivery_groups`] group, and reset the draft after a
/// successful send when `clear_after` is set.
#[async_trait]
pub trait MailHandler: Send + Sync {
    async fn send(&self, draft: &mut MailDraft, clear_after: bool) -> anyhow::Result<()>;
}
