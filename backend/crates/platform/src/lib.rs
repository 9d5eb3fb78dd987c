//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, key derivation, random tokens)
//! - Password policy and hashing (Argon2id)
//! - Outbound mail capability

pub mod crypto;
pub mod mail;
pub mod password;
