//! # Core Module
//!
//! 애플리케이션 전역에서 사용하는 에러 타입을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 JSON 에러 응답 생성
//! - **필드 에러**: `FieldErrors`로 필드별 검증 메시지 수집
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find(id: &str) -> AppResult<Recipe> {
//!     repo.find(id).await?.ok_or_else(|| AppError::NotFound("Recipe not found".into()))
//! }
//! ```

pub mod errors;

pub use errors::*;
