//! # Domain Entities Module
//!
//! MongoDB 컬렉션에 영속화되는 엔티티를 정의합니다.
//!
//! | 엔티티 | 컬렉션 | 소유자 |
//! |--------|--------|--------|
//! | [`users::user::User`] | `users` | - |
//! | [`tokens::AuthToken`] | `tokens` | `user_id` |
//! | [`recipes::Recipe`] | `recipes` | `owner_id` |
//! | [`recipes::Label`] (Tag) | `tags` | `owner_id` |
//! | [`recipes::Label`] (Ingredient) | `ingredients` | `owner_id` |
//!
//! 모든 엔티티는 `_id`로 `ObjectId`를 사용하며, 외부에는 24자리 16진수 문자열로 노출됩니다.

pub mod users;
pub mod tokens;
pub mod recipes;
