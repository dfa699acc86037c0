//! 사용자 생성 요청 DTO
//!
//! 회원가입(`POST /user/create`)과 관리자 사용자 생성(`POST /admin/users`)에서 사용합니다.
//! 필드가 누락된 요청도 역직렬화는 성공시키고, 필드별 검증 메시지로 400을 응답합니다.

use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청
///
/// ```json
/// { "email": "cook@example.com", "password": "1234567890", "name": "Cook" }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 128,
        message = "비밀번호는 10자 이상 128자 이하여야 합니다"
    ))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "이름은 255자를 넘을 수 없습니다"))]
    pub name: Option<String>,
}

/// 관리자용 사용자 생성 요청
///
/// 회원가입 필드에 계정 플래그를 추가로 받습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    #[serde(default)]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 128,
        message = "비밀번호는 10자 이상 128자 이하여야 합니다"
    ))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "이름은 255자를 넘을 수 없습니다"))]
    pub name: Option<String>,

    #[serde(default)]
    pub is_staff: bool,

    #[serde(default)]
    pub is_superuser: bool,
}

impl From<AdminCreateUserRequest> for CreateUserRequest {
    fn from(request: AdminCreateUserRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            name: request.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_password_length_boundary() {
        let nine = request("a@example.com", "123456789").validate().unwrap_err();
        assert!(nine.field_errors().contains_key("password"));

        assert!(request("a@example.com", "1234567890").validate().is_ok());
    }

    #[test]
    fn test_blank_email_is_invalid() {
        let errors = request("", "1234567890").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() {
        let parsed: CreateUserRequest = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        let errors = parsed.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
