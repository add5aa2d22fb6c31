//! Location model.

use crate::error::Result;
use crate::relationship::ResourceKind;

/// The `location` object type.
pub static LOCATION: ResourceKind = ResourceKind::new("location", "id");

entity! {
    /// A work location.
    Location => LOCATION
}

impl Location {
    pub fn id(&self) -> Result<u64> {
        self.0.field_as("id")
    }

    pub fn name(&self) -> Result<String> {
        self.0.field_as("locationName")
    }
}
