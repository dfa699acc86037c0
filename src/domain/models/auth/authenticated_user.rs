use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;

/// 토큰 검증으로 확인된 호출자 정보
///
/// 모든 소유자 범위(owner-scoped) 저장소 호출은 이 구조체의 `user_id`를
/// 명시적인 인자로 전달받습니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: ObjectId,

    pub email: String,

    /// 계정 플래그에서 파생된 역할 목록
    pub roles: Vec<String>,
}

impl TryFrom<&User> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자입니다".to_string()))?;

        Ok(Self {
            user_id,
            email: user.email.clone(),
            roles: user.roles(),
        })
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            )
            .into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user_from_staff_user() {
        let mut user = User::new("root@x.com".to_string(), String::new(), "h".to_string());
        user.id = Some(ObjectId::new());
        user.is_staff = true;

        let auth = AuthenticatedUser::try_from(&user).unwrap();
        assert_eq!(auth.user_id, user.id.unwrap());
        assert_eq!(auth.roles, vec!["user".to_string(), "staff".to_string()]);
    }

    #[test]
    fn test_unsaved_user_is_rejected() {
        let user = User::new("a@x.com".to_string(), String::new(), "h".to_string());
        assert!(AuthenticatedUser::try_from(&user).is_err());
    }
}
