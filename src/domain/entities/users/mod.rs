//! Users Entity Module
//!
//! 사용자 계정 엔티티와 역할 상수를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! let user = User::new(
//!     "cook@Example.COM".to_string(),   // 저장 전 normalize_email 적용
//!     "Cook".to_string(),
//!     hashed_password,
//! );
//! assert!(!user.is_staff);
//! ```

pub mod user;

/// 역할 이름. `AuthenticatedUser::roles`와 `RequiredRole`에서 사용됩니다.
pub mod roles {
    pub const USER: &str = "user";
    pub const STAFF: &str = "staff";
    pub const SUPERUSER: &str = "superuser";
}
