//! Recipe Entity Module
//!
//! 사용자 소유의 레시피와 레이블(태그/재료) 엔티티를 정의합니다.
//! 레시피와 레이블의 다대다 관계는 레시피 문서의 `tag_ids`/`ingredient_ids`
//! 배열로 표현됩니다. 레시피를 삭제해도 레이블은 삭제되지 않습니다.

pub mod recipe;
pub mod label;

pub use recipe::Recipe;
pub use label::{Label, LabelKind};
