//! Strongly-typed integer ids for Hetzner Cloud resources.
//!
//! Every resource is identified by a positive integer. Wrapping those in distinct
//! types keeps a server id from being passed where an image id is expected.
//!
//! Several actions accept either a bare id or the resource object itself; those
//! arguments are expressed as [`IdOrObject`] and normalized with
//! [`IdOrObject::resolve`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed id wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new id wrapper.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw integer id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parses an id from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not an unsigned integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| Error::InvalidId(input.to_string()))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'a, T> From<$name> for IdOrObject<'a, T>
        where
            T: Identified<Id = $name>,
        {
            fn from(id: $name) -> Self {
                Self::Id(id)
            }
        }
    };
}

id_type!(ServerId, "Server id");
id_type!(ActionId, "Action id");
id_type!(ImageId, "Image id");
id_type!(ServerTypeId, "Server type id");
id_type!(SshKeyId, "SSH key id");
id_type!(IsoId, "ISO id");
id_type!(NetworkId, "Network id");

/// A resource that exposes its own id.
pub trait Identified {
    /// Id type of the resource.
    type Id: Copy;

    /// Returns the resource id.
    fn id(&self) -> Self::Id;
}

/// Argument that is either a bare id or a borrowed resource object.
pub enum IdOrObject<'a, T: Identified> {
    /// Raw identifier.
    Id(T::Id),
    /// Resource object; its id is used.
    Object(&'a T),
}

impl<T: Identified> IdOrObject<'_, T> {
    /// Normalize to the identifier sent on the wire.
    #[must_use]
    pub fn resolve(&self) -> T::Id {
        match self {
            Self::Id(id) => *id,
            Self::Object(object) => object.id(),
        }
    }
}

impl<T> fmt::Debug for IdOrObject<'_, T>
where
    T: Identified + fmt::Debug,
    T::Id: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
        }
    }
}

impl<T: Identified> Clone for IdOrObject<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Identified> Copy for IdOrObject<'_, T> {}

impl<'a, T: Identified> From<&'a T> for IdOrObject<'a, T> {
    fn from(object: &'a T) -> Self {
        Self::Object(object)
    }
}

impl<T> From<u64> for IdOrObject<'_, T>
where
    T: Identified,
    T::Id: From<u64>,
{
    fn from(id: u64) -> Self {
        Self::Id(T::Id::from(id))
    }
}

/// Implements [`Identified`] for a resource with a public `id` field.
#[macro_export]
macro_rules! identified {
    ($resource:ty, $id:ty) => {
        impl $crate::id::Identified for $resource {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}
