//! Credential handling: Argon2id password storage ([`password`]) and
//! HS256 session tokens ([`jwt`]).

pub mod jwt;
pub mod password;
