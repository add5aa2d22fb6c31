//! Taleo resource kinds and their typed entities.
//!
//! Each module declares one static [`ResourceKind`](crate::ResourceKind)
//! with its relationships, and a typed wrapper exposing field accessors.

/// Declare a typed entity wrapping a [`Resource`](crate::Resource) of `$kind`.
macro_rules! entity {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(crate::resource::Resource);

        impl crate::traits::Entity for $name {
            fn kind() -> &'static crate::relationship::ResourceKind {
                &$kind
            }

            fn wrap(resource: crate::resource::Resource) -> Self {
                Self(resource)
            }

            fn resource(&self) -> &crate::resource::Resource {
                &self.0
            }

            fn resource_mut(&mut self) -> &mut crate::resource::Resource {
                &mut self.0
            }

            fn into_resource(self) -> crate::resource::Resource {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = crate::resource::Resource;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<$name> for crate::resource::Resource {
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> core::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }
    };
}

mod activity;
mod attachment;
mod candidate;
mod employee;
mod location;
mod packet;

pub use activity::*;
pub use attachment::*;
pub use candidate::*;
pub use employee::*;
pub use location::*;
pub use packet::*;
