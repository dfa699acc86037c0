//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기(회원가입, 자격 증명 확인, 프로필 조회/수정,
//! 관리자 계정 관리)를 담당합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       UserService                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  Registration        Authentication       Profile       │
//! │  • 입력 검증          • bcrypt 검증         • 조회/수정     │
//! │  • 이메일 정규화      • 활성 계정 확인       • 관리자 수정   │
//! │  • 비밀번호 해싱                                          │
//! └─────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │            Arc<dyn UserRepository> (Mongo / Memory)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 보안 설계 원칙
//!
//! - 비밀번호는 bcrypt 해시로만 저장되며 응답 DTO에 포함되지 않습니다.
//! - bcrypt cost는 환경별로 다릅니다 ([`crate::config::PasswordConfig`]).
//! - 토큰 발급 실패 사유(이메일 없음, 비밀번호 불일치, 비활성 계정)는
//!   응답에서 구분하지 않고 모두 [`AppError::InvalidCredentials`]로 반환합니다.

use std::sync::Arc;

use bcrypt::hash;
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::config::SuperuserConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext, FieldErrors};
use crate::domain::dto::users::request::{
    AdminCreateUserRequest, AdminUpdateUserRequest, CreateUserRequest, UpdateProfileRequest,
};
use crate::domain::dto::users::response::{AdminUserResponse, UserResponse};
use crate::domain::entities::users::user::User;
use crate::repositories::users::{UserChanges, UserRepository};
use crate::utils::string_utils::{normalize_email, parse_object_id, trim_string};

/// 이메일 중복 시 `email` 필드 메시지
pub const DUPLICATE_EMAIL_MESSAGE: &str = "user with this email already exists.";

/// 새 계정에 부여할 플래그
#[derive(Debug, Clone, Copy, Default)]
struct AccountFlags {
    is_staff: bool,
    is_superuser: bool,
}

/// 사용자 관리 비즈니스 로직 서비스
///
/// ## 주요 책임
///
/// 1. **회원가입**: 입력값 검증, 이메일 정규화, 중복 확인, 비밀번호 해싱
/// 2. **자격 증명 확인**: 토큰 발급 전 이메일/비밀번호 검증
/// 3. **프로필 관리**: 본인 이름/비밀번호 변경
/// 4. **관리자 기능**: 사용자 목록/생성/수정, 초기 관리자 계정 부트스트랩
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let user_service = UserService::new(repositories.users.clone(), PasswordConfig::bcrypt_cost());
///
/// let created = user_service.create_user(request).await?;
/// let user = user_service.authenticate("cook@example.com", "1234567890").await?;
/// ```
pub struct UserService {
    /// 사용자 저장소 (MongoDB 또는 메모리)
    users: Arc<dyn UserRepository>,

    /// bcrypt 해싱 비용
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// 새 사용자 계정 생성
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 생성된 사용자 (비밀번호 제외)
    /// * `Err(AppError::InvalidFields)` - 이메일 누락/형식 오류/중복, 비밀번호 길이 위반
    ///
    /// # 처리 과정
    ///
    /// 1. 요청 필드 검증 (모든 필드 에러를 한 번에 수집)
    /// 2. 이메일 도메인 부분 소문자 정규화
    /// 3. 중복 이메일 확인
    /// 4. bcrypt 해싱 후 저장
    ///
    /// # 로깅
    ///
    /// ```text
    /// [DEBUG] Password hashing took: 3.1ms
    /// [INFO] 사용자 생성 완료: cook@example.com (12.4ms)
    /// ```
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let user = self.register(request, AccountFlags::default()).await?;
        Ok(UserResponse::from(user))
    }

    /// 관리자 화면에서 사용자 생성 (계정 플래그 지정 가능)
    pub async fn create_user_as_admin(&self, request: AdminCreateUserRequest) -> AppResult<AdminUserResponse> {
        let flags = AccountFlags {
            is_staff: request.is_staff || request.is_superuser,
            is_superuser: request.is_superuser,
        };

        let user = self.register(CreateUserRequest::from(request), flags).await?;
        Ok(AdminUserResponse::from(user))
    }

    /// 관리자(superuser) 계정 생성
    ///
    /// `is_staff`와 `is_superuser`가 모두 설정됩니다.
    pub async fn create_superuser(&self, email: &str, password: &str, name: &str) -> AppResult<User> {
        let request = CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: Some(name.to_string()),
        };

        self.register(request, AccountFlags { is_staff: true, is_superuser: true }).await
    }

    /// 환경 변수로 지정된 관리자 계정이 없으면 생성합니다.
    ///
    /// 새로 생성했으면 `true`, 이미 존재하면 `false`를 반환합니다.
    pub async fn ensure_superuser(&self, config: &SuperuserConfig) -> AppResult<bool> {
        let email = normalize_email(&config.email);

        if self.users.find_by_email(&email).await?.is_some() {
            log::debug!("관리자 계정이 이미 존재합니다: {}", email);
            return Ok(false);
        }

        let user = self
            .create_superuser(&email, &config.password, &config.name)
            .await?;
        log::info!("관리자 계정 생성: {}", user.email);

        Ok(true)
    }

    async fn register(&self, mut request: CreateUserRequest, flags: AccountFlags) -> AppResult<User> {
        let start_time = std::time::Instant::now();

        request.email = trim_string(&request.email);

        let mut errors = match request.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        if request.email.is_empty() && !errors.contains("email") {
            errors.add("email", "이메일은 필수 항목입니다");
        }

        errors.into_result()?;

        let email = normalize_email(&request.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::field("email", DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = self.hash_password(&request.password)?;
        let name = request.name.as_deref().map(trim_string).unwrap_or_default();

        let mut user = User::new(email, name, password_hash);
        user.is_staff = flags.is_staff;
        user.is_superuser = flags.is_superuser;

        // 동시 가입으로 유니크 인덱스에 걸린 경우도 같은 필드 에러로 응답
        let created = self.users.create(user).await.map_err(|e| match e {
            AppError::ConflictError(_) => AppError::field("email", DUPLICATE_EMAIL_MESSAGE),
            other => other,
        })?;

        log::info!("사용자 생성 완료: {} ({:?})", created.email, start_time.elapsed());

        Ok(created)
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        Ok(password_hash)
    }

    /// 이메일/비밀번호 자격 증명 확인
    ///
    /// 이메일 없음, 빈 비밀번호, 비밀번호 불일치, 비활성 계정은 모두
    /// `InvalidCredentials`입니다. 실패 사유는 `warn` 로그로만 남깁니다.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let start_time = std::time::Instant::now();
        let email = normalize_email(email);

        if password.is_empty() {
            log::warn!("토큰 발급 거부 (빈 비밀번호): {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let Some(user) = self.users.find_by_email(&email).await? else {
            log::warn!("토큰 발급 거부 (알 수 없는 이메일): {}", email);
            return Err(AppError::InvalidCredentials);
        };

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(password, &user.password_hash)
            .with_context(|| format!("비밀번호 검증 실패 ({})", email))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::warn!("토큰 발급 거부 (비밀번호 불일치): {}", email);
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            log::warn!("토큰 발급 거부 (비활성 계정): {}", email);
            return Err(AppError::InvalidCredentials);
        }

        log::debug!("Total password verification took: {:?}", start_time.elapsed());

        Ok(user)
    }

    /// 토큰 소유자 조회. 존재하지 않거나 비활성이면 `AuthenticationError`.
    pub async fn find_active(&self, id: &ObjectId) -> AppResult<User> {
        match self.users.find_by_id(id).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string())),
            None => Err(AppError::AuthenticationError("토큰 사용자를 찾을 수 없습니다".to_string())),
        }
    }

    pub async fn get_profile(&self, id: &ObjectId) -> AppResult<UserResponse> {
        Ok(UserResponse::from(self.find_user(id).await?))
    }

    /// 본인 프로필 부분 수정 (이름, 비밀번호)
    pub async fn update_profile(&self, id: &ObjectId, request: UpdateProfileRequest) -> AppResult<UserResponse> {
        let user = self.apply_update(id, AdminUpdateUserRequest::from(request)).await?;
        Ok(UserResponse::from(user))
    }

    /// 가입 순으로 모든 사용자를 반환합니다.
    pub async fn list_users(&self) -> AppResult<Vec<AdminUserResponse>> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(AdminUserResponse::from).collect())
    }

    pub async fn get_user(&self, id: &str) -> AppResult<AdminUserResponse> {
        let id = parse_object_id(id, "사용자")?;
        Ok(AdminUserResponse::from(self.find_user(&id).await?))
    }

    /// 관리자용 사용자 부분 수정
    pub async fn update_user(&self, id: &str, request: AdminUpdateUserRequest) -> AppResult<AdminUserResponse> {
        let id = parse_object_id(id, "사용자")?;
        let user = self.apply_update(&id, request).await?;

        log::info!(
            "관리자 사용자 수정: {} (active={}, staff={}, superuser={})",
            user.email, user.is_active, user.is_staff, user.is_superuser
        );

        Ok(AdminUserResponse::from(user))
    }

    async fn find_user(&self, id: &ObjectId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    async fn apply_update(&self, id: &ObjectId, request: AdminUpdateUserRequest) -> AppResult<User> {
        request.validate()?;

        let password_hash = match request.password.as_deref() {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };

        let changes = UserChanges {
            name: request.name.as_deref().map(trim_string),
            password_hash,
            is_active: request.is_active,
            is_staff: request.is_staff,
            is_superuser: request.is_superuser,
        };

        if changes.is_empty() {
            return self.find_user(id).await;
        }

        self.users
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}
