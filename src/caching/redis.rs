//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 JSON 캐시 클라이언트입니다.
//! 사용자 조회 결과처럼 읽기 빈도가 높은 데이터를 TTL과 함께 저장합니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`가 멀티플렉싱된 단일 연결을 유지하며,
//! 연결이 끊어지면 다음 명령에서 자동으로 재연결합니다.
//! 핸들 복제 비용이 낮으므로 명령마다 복제해서 사용합니다.
//!
//! ## 에러 정책
//!
//! 캐시는 보조 저장소입니다. 호출 측(리포지토리)은 캐시 에러를 로그만 남기고
//! 원본 저장소 결과로 계속 진행해야 합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

/// Redis 캐시 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
///
/// let cache = RedisClient::connect("redis://localhost:6379").await?;
/// cache.set_with_expiry("user:64f0c2...", &user, 600).await?;
/// let cached: Option<User> = cache.get("user:64f0c2...").await?;
/// cache.del("user:64f0c2...").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
}

impl RedisClient {
    /// Redis 서버에 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn connect(redis_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(redis_url)?;
        let mut connection = client.get_connection_manager().await?;

        redis::cmd("PING").query_async::<()>(&mut connection).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { connection })
    }

    /// 키에 저장된 JSON 값을 역직렬화하여 반환합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization failed",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 값을 JSON으로 직렬화하여 TTL(초)과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let json = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization failed",
                e.to_string(),
            ))
        })?;

        let mut conn = self.connection.clone();
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.connection.clone();
        conn.del(key).await
    }
}
