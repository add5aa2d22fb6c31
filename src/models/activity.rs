//! Activity model.

use crate::error::Result;
use crate::models::EMPLOYEE;
use crate::relationship::{DownloadSource, Relationship, ResourceKind};
use crate::resource::Resource;

static RELATIONSHIPS: [Relationship; 1] =
    [Relationship::one("employee", &EMPLOYEE).url_key("activityEmployee")];

/// The `activity` object type. Its form is downloadable.
pub static ACTIVITY: ResourceKind = ResourceKind::new("activity", "id")
    .with_relationships(&RELATIONSHIPS)
    .with_download(DownloadSource::RelationshipUrl("formDownloadUrl"));

entity! {
    /// An onboarding activity with a downloadable form.
    Activity => ACTIVITY
}

impl Activity {
    pub fn id(&self) -> Result<u64> {
        self.0.field_as("id")
    }

    pub fn description(&self) -> Result<String> {
        self.0.field_as("activityDesc")
    }

    pub fn employee_id(&self) -> Result<u64> {
        self.0.field_as("activityEmployee")
    }

    pub async fn employee(&mut self) -> Result<&Resource> {
        self.0.one("employee").await
    }
}
