//! 레시피 도메인 서비스 모듈
//!
//! - [`recipe_service::RecipeService`] - 레시피 CRUD, 중첩 레이블 해석, 이미지 업로드
//! - [`label_service::LabelServices`] - 태그/재료 조회, 이름 변경, 삭제
//! - [`image_service::ImageStore`] - 업로드 이미지 검증 및 파일 저장

pub mod recipe_service;
pub mod label_service;
pub mod image_service;

pub use recipe_service::RecipeService;
pub use label_service::{LabelService, LabelServices};
pub use image_service::ImageStore;
