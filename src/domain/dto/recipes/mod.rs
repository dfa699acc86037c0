//! 레시피/태그/재료 DTO
//!
//! - `request` - 레시피 쓰기 요청, 레이블 수정 요청, 목록 쿼리
//! - `response` - 목록/상세 레시피 응답, 레이블 응답, 이미지 업로드 응답

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
