//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조체를 정의합니다.
//! 요청 구조체는 `validator::Validate`를 구현하며 핸들러에서 검증한 뒤
//! 서비스로 전달됩니다. 응답 구조체는 엔티티에서 `From`으로 변환됩니다.
//!
//! | 모듈 | 요청 | 응답 |
//! |------|------|------|
//! | [`users`] | 회원가입, 토큰 발급, 프로필 수정, 관리자 사용자 관리 | `UserResponse`, `AdminUserResponse`, `TokenResponse` |
//! | [`recipes`] | 레시피 생성/수정, 레이블 수정, 목록 쿼리 | `RecipeResponse`, `RecipeDetailResponse`, `LabelResponse` |
//!
//! 요청 본문에 포함된 알 수 없는 필드(예: 레시피의 `user`)는 무시됩니다.

pub mod users;
pub mod recipes;
