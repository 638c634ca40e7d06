//! Read-through cache for collection and relationship listings.
//!
//! Entries live until the uniform TTL elapses or a write explicitly forgets
//! them; nothing is pre-populated. Services own the invalidation policy,
//! this module only provides the store and the key space.

mod keys;
mod store;

pub use keys::CacheKey;
pub use store::CacheStore;
