//! Newtype IDs for the records served by the FarmaLink API.
//!
//! Use the `define_id!` macro to create wrappers that keep a product id from
//! being passed where a purchase id is expected.

/// Define a type-safe ID wrapper around `i32`.
///
/// The generated type is `Copy`, hashes and compares like the inner value,
/// and (de)serializes transparently as a JSON number.
///
/// ```rust
/// # use farmalink_core::define_id;
/// define_id!(LotId);
///
/// let lot = LotId::new(7);
/// assert_eq!(lot.as_i32(), 7);
/// assert_eq!(lot.to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(PurchaseId);
define_id!(SupplierId);
define_id!(EmployeeId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_plain_numbers_on_the_wire() {
        assert_eq!(serde_json::to_string(&PurchaseId::new(42)).unwrap(), "42");
        let id: ProductId = serde_json::from_str("3").unwrap();
        assert_eq!(id, ProductId::from(3));
        assert_eq!(i32::from(id), 3);
    }
}
