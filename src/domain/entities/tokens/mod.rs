//! 인증 토큰 엔티티 모듈

pub mod auth_token;

pub use auth_token::AuthToken;
