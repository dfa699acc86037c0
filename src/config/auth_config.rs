//! 인증 관련 설정 모듈
//!
//! API 토큰 형식과 초기 관리자(superuser) 계정 부트스트랩 설정을 관리합니다.

use std::env;

/// API 토큰 설정
pub struct TokenConfig;

impl TokenConfig {
    /// `Authorization` 헤더에서 허용하는 인증 스킴
    ///
    /// `Token <key>` 형식이 기본이며 `Bearer <key>`도 허용합니다.
    pub const SCHEMES: [&'static str; 2] = ["Token", "Bearer"];

    /// 발급되는 토큰 키의 길이 (16진수 문자 수)
    pub const KEY_LENGTH: usize = 40;
}

/// 초기 관리자 계정 설정
///
/// `SUPERUSER_EMAIL`과 `SUPERUSER_PASSWORD`가 모두 설정된 경우에만
/// 서버 시작 시 관리자 계정을 생성합니다. 이미 존재하면 아무것도 하지 않습니다.
#[derive(Debug, Clone)]
pub struct SuperuserConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SuperuserConfig {
    pub fn from_env() -> Option<Self> {
        let email = env::var("SUPERUSER_EMAIL").ok()?;
        let password = env::var("SUPERUSER_PASSWORD").ok()?;

        if email.trim().is_empty() || password.is_empty() {
            log::warn!("SUPERUSER_EMAIL/SUPERUSER_PASSWORD 값이 비어 있어 관리자 부트스트랩을 건너뜁니다");
            return None;
        }

        Some(Self {
            email,
            password,
            name: env::var("SUPERUSER_NAME").unwrap_or_default(),
        })
    }
}
