//! JWT creation and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, InviteClaims, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};
