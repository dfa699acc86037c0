//! 사용자 요청 DTO

pub mod create_user;
pub mod auth_request;
pub mod update_user;

pub use create_user::{AdminCreateUserRequest, CreateUserRequest};
pub use auth_request::TokenRequest;
pub use update_user::{AdminUpdateUserRequest, UpdateProfileRequest};
