//! Conversion between generic resources and typed entities.

use crate::error::{Result, TaleoError};
use crate::relationship::ResourceKind;
use crate::resource::Resource;

/// A typed view over a [`Resource`] of one kind.
///
/// Implementors are thin wrappers; every field accessor is a projection of
/// the underlying resource's attributes.
pub trait Entity: Sized + Send {
    /// The kind every wrapped resource must have.
    fn kind() -> &'static ResourceKind;

    /// Wrap a resource without checking its kind.
    fn wrap(resource: Resource) -> Self;

    fn resource(&self) -> &Resource;

    fn resource_mut(&mut self) -> &mut Resource;

    fn into_resource(self) -> Resource;

    /// Wrap a resource, checking that it has this entity's kind.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::KindMismatch`] for resources of another kind.
    fn from_resource(resource: Resource) -> Result<Self> {
        if resource.kind() != Self::kind() {
            return Err(TaleoError::KindMismatch {
                expected: Self::kind().name,
                found: resource.kind().name,
            });
        }
        Ok(Self::wrap(resource))
    }
}
