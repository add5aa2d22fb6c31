//! Attachment model.

use crate::error::Result;
use crate::relationship::{DownloadSource, ResourceKind};

/// The `attachment` object type. Downloadable when `downloadUrl` is present.
pub static ATTACHMENT: ResourceKind = ResourceKind::new("attachment", "id")
    .with_download(DownloadSource::Attribute("downloadUrl"));

entity! {
    /// A file attached to a candidate or employee.
    ///
    /// Use [`can_download`](crate::Resource::can_download) before
    /// [`download`](crate::Resource::download).
    Attachment => ATTACHMENT
}

impl Attachment {
    pub fn id(&self) -> Result<u64> {
        self.0.field_as("id")
    }

    pub fn attachment_type(&self) -> Result<String> {
        self.0.field_as("attachmentType")
    }

    pub fn content_type(&self) -> Result<String> {
        self.0.field_as("contentType")
    }
}
