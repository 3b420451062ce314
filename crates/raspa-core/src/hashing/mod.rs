//! Hashing y JSON canónico para fingerprints de iteraciones y carpetas.

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{hash_bytes, hash_str, hash_value};
