//! 사용자 관련 DTO
//!
//! - `request` - 회원가입, 토큰 발급, 프로필/관리자 수정 요청
//! - `response` - 비밀번호 해시를 제외한 사용자 응답

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
