//! 사용자 수정 요청 DTO
use serde::Deserialize;
use validator::Validate;

/// 본인 프로필 부분 수정 (`PATCH /user/me`)
///
/// 이름과 비밀번호만 변경할 수 있으며, 그 외 필드는 무시됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 255, message = "이름은 255자를 넘을 수 없습니다"))]
    pub name: Option<String>,

    #[validate(length(
        min = 10,
        max = 128,
        message = "비밀번호는 10자 이상 128자 이하여야 합니다"
    ))]
    pub password: Option<String>,
}

/// 관리자용 사용자 부분 수정 (`PATCH /admin/users/{id}`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(max = 255, message = "이름은 255자를 넘을 수 없습니다"))]
    pub name: Option<String>,

    #[validate(length(
        min = 10,
        max = 128,
        message = "비밀번호는 10자 이상 128자 이하여야 합니다"
    ))]
    pub password: Option<String>,

    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl From<UpdateProfileRequest> for AdminUpdateUserRequest {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            name: request.name,
            password: request.password,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_ignores_other_fields() {
        let parsed: UpdateProfileRequest =
            serde_json::from_str(r#"{"name": "New", "email": "x@y.com", "is_staff": true}"#).unwrap();

        assert_eq!(parsed.name.as_deref(), Some("New"));
        assert!(parsed.password.is_none());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_profile_update_short_password() {
        let request = UpdateProfileRequest {
            name: None,
            password: Some("short".to_string()),
        };
        assert!(request.validate().is_err());
    }
}
