use std::path::{Path, PathBuf};

use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentDisposition {
    Attachment,
    Inline,
}

#[derive(Debug, Clone)]
pub enum AttachmentContent {
    /// Read from disk when the message is rendered.
    File(PathBuf),
    /// Already in memory.
    Bytes(Bytes),
}

/// One attachment of a draft. File contents are loaded at render time, so
/// a missing file surfaces as a send error rather than an attach error.
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub content: AttachmentContent,
    pub disposition: AttachmentDisposition,
    /// Delivery file name override.
    pub rename: Option<String>,
    /// MIME type override. Defaults to application/octet-stream.
    pub mime: Option<String>,
}

impl MailAttachment {
    pub fn from_file<T: AsRef<Path>>(path: T) -> Self {
        MailAttachment {
            content: AttachmentContent::File(path.as_ref().to_path_buf()),
            disposition: AttachmentDisposition::Attachment,
            rename: None,
            mime: None,
        }
    }

    pub fn from_bytes<T: AsRef<str>>(name: T, bytes: impl Into<Bytes>) -> Self {
        MailAttachment {
            content: AttachmentContent::Bytes(bytes.into()),
            disposition: AttachmentDisposition::Attachment,
            rename: Some(name.as_ref().to_string()),
            mime: None,
        }
    }

    pub fn disposition(mut self, disposition: AttachmentDisposition) -> Self {
        self.disposition = disposition;
        self
    }

    pub fn rename<T: AsRef<str>>(mut self, name: T) -> Self {
        self.rename = Some(name.as_ref().to_string());
        self
    }

    pub fn mime<T: AsRef<str>>(mut self, mime: T) -> Self {
        self.mime = Some(mime.as_ref().to_string());
        self
    }

    /// File name used on the wire: the rename if set, otherwise the source
    /// file name.
    pub fn delivery_name(&self) -> String {
        if let Some(rename) = &self.rename {
            return rename.clone();
        }
        match &self.content {
            AttachmentContent::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| String::from("attachment")),
            AttachmentContent::Bytes(_) => String::from("attachment"),
        }
    }
}
