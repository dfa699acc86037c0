//! 토큰 발급 요청 DTO
use serde::Deserialize;
use validator::Validate;

/// 이메일/비밀번호로 API 토큰을 요청합니다.
///
/// 누락된 필드는 빈 문자열로 채워집니다. 빈 이메일은 필드 에러,
/// 빈 비밀번호는 자격 증명 실패로 처리됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    pub password: String,
}
