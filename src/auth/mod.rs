pub mod error;
pub mod jwt;

pub use jwt::{AuthUser, Claim, decode_jwt, encode_jwt};
