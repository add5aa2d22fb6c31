//! Onboarding packet model.

use crate::error::Result;
use crate::models::EMPLOYEE;
use crate::relationship::{Relationship, ResourceKind};
use crate::resource::Resource;

static RELATIONSHIPS: [Relationship; 1] =
    [Relationship::one("employee", &EMPLOYEE).url_key("employeeId")];

/// The `packet` object type.
pub static PACKET: ResourceKind =
    ResourceKind::new("packet", "activityPacketId").with_relationships(&RELATIONSHIPS);

entity! {
    /// An activity packet assigned to an employee.
    Packet => PACKET
}

impl Packet {
    pub fn id(&self) -> Result<u64> {
        self.0.field_as("activityPacketId")
    }

    pub fn employee_id(&self) -> Result<u64> {
        self.0.field_as("employeeId")
    }

    pub fn activities_completed(&self) -> Result<u32> {
        self.0.field_as("activitiesCompleted")
    }

    pub fn activities_count(&self) -> Result<u32> {
        self.0.field_as("activitiesCount")
    }

    /// Whether every activity in the packet is completed.
    pub fn is_complete(&self) -> Result<bool> {
        Ok(self.activities_completed()? >= self.activities_count()?)
    }

    pub async fn employee(&mut self) -> Result<&Resource> {
        self.0.one("employee").await
    }
}
