//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 이메일 정규화
//! - [`display_terminal`] - 서버 부트스트랩 단계 터미널 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::normalize_email;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let email = normalize_email("Cook@Example.COM");
//! print_boxed_title("RECIPE SERVICE READY");
//! ```

pub mod string_utils;
pub mod display_terminal;
