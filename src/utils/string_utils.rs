//! 문자열 처리 유틸리티
//!
//! 입력 문자열의 공백 정리, 필수값 검증, 이메일 정규화, 경로 id 파싱을 제공합니다.

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;

/// 필수 문자열 검증 후 앞뒤 공백을 제거한 값을 반환합니다.
///
/// 공백만 있는 문자열은 빈 값으로 취급하며, `field_name` 필드의 검증 에러를 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::field(field_name, "빈 값일 수 없습니다"));
    }
    Ok(trimmed.to_string())
}

pub fn trim_string(value: &str) -> String {
    value.trim().to_string()
}

/// 이메일 주소를 정규화합니다.
///
/// 앞뒤 공백을 제거하고 마지막 `@` 뒤의 도메인 부분만 소문자로 바꿉니다.
/// 로컬 부분(`@` 앞)의 대소문자는 그대로 유지됩니다.
///
/// ```rust,ignore
/// assert_eq!(normalize_email("Test.User@EXAMPLE.Com"), "Test.User@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// URL 경로의 id를 파싱합니다.
///
/// 형식이 잘못된 id는 존재하지 않는 리소스와 같게 취급하여 `NotFound`를 반환합니다.
pub fn parse_object_id(raw: &str, resource: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::NotFound(format!("{}을(를) 찾을 수 없습니다", resource)))
}
