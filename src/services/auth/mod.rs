//! 인증 서비스 모듈
//!
//! 불투명(opaque) API 토큰의 발급과 검증을 담당합니다.
//! 토큰은 사용자당 하나이며 최초 발급 후 재사용됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token = token_service.create_token(request).await?;
//! let user = token_service.authenticate(Some("Token 9944b09199c6...")).await?;
//! ```

pub mod token_service;

pub use token_service::TokenService;
