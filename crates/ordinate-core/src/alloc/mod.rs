//! Hash collections used throughout Ordinate.
//!
//! Chart code keys small maps by shape names and point indices; AHash is a
//! faster fit for those than SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
