//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록, 자격 증명 확인, 프로필 관리, 관리자 계정 관리를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일 도메인 정규화 및 중복 방지
//! - 자격 증명 실패 사유 비노출
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::new(repositories.users.clone(), 12);
//! let response = user_service.create_user(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
