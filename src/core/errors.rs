//! # Application Error Handling System
//!
//! 레시피 서비스 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! `thiserror`로 에러 타입을 정의하고 `actix_web::ResponseError`를 구현하여
//! 모든 계층의 에러가 일관된 JSON 응답으로 변환되도록 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 단일 메시지 입력값 오류 |
//! | `InvalidFields` | 400 Bad Request | 필드별 검증 실패 (`fields` 맵 포함) |
//! | `InvalidCredentials` | 400 Bad Request | 토큰 발급 시 자격 증명 불일치 |
//! | `AuthenticationError` | 401 Unauthorized | 토큰 누락/무효 |
//! | `AuthorizationError` | 403 Forbidden | 관리자 권한 부족 |
//! | `NotFound` | 404 Not Found | 리소스 없음 또는 다른 사용자 소유 |
//! | `ConflictError` | 409 Conflict | 저장소 유니크 제약 위반 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `StorageError` | 500 Internal Server Error | 미디어 파일 저장 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 다른 사용자의 리소스에 대한 접근은 403이 아닌 404로 응답합니다.
//! 리소스 존재 여부를 소유자가 아닌 사용자에게 노출하지 않기 위함입니다.
//!
//! ## 필드 에러 응답 형식
//!
//! ```json
//! {
//!   "error": "입력값 검증에 실패했습니다",
//!   "fields": {
//!     "password": ["비밀번호는 최소 10자 이상이어야 합니다"]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// 필드 이름별 검증 메시지 모음
///
/// 응답 JSON의 키 순서를 고정하기 위해 `BTreeMap`을 사용합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 하나에 대한 메시지 하나로 구성된 에러 모음을 생성합니다.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// 에러가 하나라도 있으면 `InvalidFields`로 변환합니다.
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                fields.add(&field, message);
            }
        }
        fields
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 인프라 계층(`DatabaseError`, `StorageError`), 비즈니스 계층
/// (`ValidationError`, `InvalidFields`, `NotFound`, `ConflictError`),
/// 보안 계층(`InvalidCredentials`, `AuthenticationError`, `AuthorizationError`)
/// 에러를 모두 포괄합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (단일 메시지)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필드 단위 입력값 검증 에러
    #[error("Validation error: {0}")]
    InvalidFields(FieldErrors),

    /// 이메일/비밀번호 조합으로 인증할 수 없음
    #[error("제공된 자격 증명으로 인증할 수 없습니다")]
    InvalidCredentials,

    /// 리소스 찾을 수 없음 에러
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 미디어 파일 저장 에러
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 예상치 못한 내부 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 필드 하나에 대한 검증 에러를 생성합니다.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AppError::InvalidFields(FieldErrors::single(field, message))
    }

    pub fn status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_)
            | AppError::InvalidFields(_)
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) | AppError::StorageError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidFields(FieldErrors::from(errors))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status()
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status();

        let body = match self {
            AppError::InvalidFields(fields) => serde_json::json!({
                "error": "입력값 검증에 실패했습니다",
                "fields": fields,
            }),
            _ if status.is_server_error() => {
                // 내부 에러 상세는 로그에만 남김
                log::error!("{}", self);
                serde_json::json!({ "error": "서버 내부 오류가 발생했습니다" })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        actix_web::HttpResponse::build(status).json(body)
    }
}

/// 애플리케이션 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 컨텍스트를 붙여 `InternalError`로 변환하는 헬퍼 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;
    use validator::Validate;

    fn body_json(error: &AppError) -> serde_json::Value {
        let bytes = error
            .error_response()
            .into_body()
            .try_into_bytes()
            .unwrap_or_default();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_credentials_is_bad_request() {
        assert_eq!(
            AppError::InvalidCredentials.error_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Recipe not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Staff only".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(&error);
        assert!(!body["error"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[test]
    fn test_field_errors_are_rendered_per_field() {
        let mut fields = FieldErrors::single("password", "too short");
        fields.add("email", "required");
        fields.add("password", "too common");

        let body = body_json(&AppError::InvalidFields(fields));
        assert_eq!(body["fields"]["password"].as_array().unwrap().len(), 2);
        assert_eq!(body["fields"]["email"][0], "required");
    }

    #[test]
    fn test_field_errors_from_validator() {
        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 10, message = "too short"))]
            password: String,
        }

        let errors = Probe { password: "short".to_string() }.validate().unwrap_err();
        let fields = FieldErrors::from(errors);

        assert_eq!(fields.get("password"), Some(&["too short".to_string()][..]));
    }

    #[test]
    fn test_field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(matches!(
            FieldErrors::single("title", "required").into_result(),
            Err(AppError::InvalidFields(_))
        ));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
