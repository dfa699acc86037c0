//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): MongoDB 문서로 저장되는 객체 (`User`, `Recipe`, `Label`, `AuthToken`)
//! - **Models** (`./`): 요청 처리 중에만 존재하는 값 객체
//!   - [`auth::AuthenticatedUser`] - 인증 미들웨어가 확인한 호출자
//!   - [`auth::RequiredRole`] - 라우트별 역할 요구 사항
//!   - [`recipes::RecipeFilter`] - 레시피 목록 필터

pub mod auth;
pub mod recipes;
