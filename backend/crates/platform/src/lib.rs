//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the service crates:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)

pub mod password;
