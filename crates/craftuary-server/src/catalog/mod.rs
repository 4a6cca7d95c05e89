//! Catalog query layer: filter construction, sort allow-listing, and the
//! sample-set fallback served when the store is unreachable or empty.

pub mod filter;
pub mod mock;
pub mod sort;
