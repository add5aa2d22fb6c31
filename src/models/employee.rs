//! Employee model.

use crate::error::Result;
use crate::models::{ATTACHMENT, CANDIDATE, LOCATION, PACKET};
use crate::relationship::{Relationship, ResourceKind};
use crate::resource::Resource;

static RELATIONSHIPS: [Relationship; 4] = [
    Relationship::one("candidate", &CANDIDATE),
    Relationship::many("packets", &PACKET).singular("activityPacket"),
    Relationship::one("location", &LOCATION),
    // Employees expose no attachments URL; it sits next to the history log.
    Relationship::many("attachments", &ATTACHMENT)
        .singular("attachment")
        .derived_from("historylog", "attachment"),
];

/// The `employee` object type.
pub static EMPLOYEE: ResourceKind =
    ResourceKind::new("employee", "employeeId").with_relationships(&RELATIONSHIPS);

entity! {
    /// A Taleo employee.
    ///
    /// Employees link back to the candidate they were hired from, to their
    /// onboarding packets, to their work location and to their attachments.
    Employee => EMPLOYEE
}

impl Employee {
    pub fn id(&self) -> Result<u64> {
        self.0.field_as("employeeId")
    }

    /// ID of the candidate this employee was hired from.
    pub fn candidate_id(&self) -> Result<u64> {
        self.0.field_as("candidate")
    }

    pub fn first_name(&self) -> Result<String> {
        self.0.field_as("firstName")
    }

    pub fn last_name(&self) -> Result<String> {
        self.0.field_as("lastName")
    }

    pub fn ssn(&self) -> Result<String> {
        self.0.field_as("ssn")
    }

    pub fn location_id(&self) -> Result<u64> {
        self.0.field_as("location")
    }

    pub async fn candidate(&mut self) -> Result<&Resource> {
        self.0.one("candidate").await
    }

    /// Onboarding packets assigned to this employee.
    pub async fn packets(&mut self) -> Result<&[Resource]> {
        self.0.many("packets").await
    }

    pub async fn location(&mut self) -> Result<&Resource> {
        self.0.one("location").await
    }

    pub async fn attachments(&mut self) -> Result<&[Resource]> {
        self.0.many("attachments").await
    }
}
