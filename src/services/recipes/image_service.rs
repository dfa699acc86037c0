//! # 레시피 이미지 저장소
//!
//! 업로드된 바이트가 실제로 디코딩 가능한 이미지인지 확인한 뒤
//! `MEDIA_ROOT/uploads/recipe/{uuid}.{ext}`에 저장합니다.
//!
//! ## 저장 절차
//!
//! 1. 크기 확인 (`MAX_UPLOAD_BYTES`)
//! 2. 포맷 추정 후 전체 디코딩으로 검증
//! 3. 같은 디렉터리의 임시 파일에 기록한 뒤 최종 경로로 rename
//!
//! 검증에 실패하면 디스크에 아무것도 남지 않습니다.
//! 디코딩과 파일 I/O는 `web::block`으로 블로킹 스레드 풀에서 실행됩니다.

use std::fs;
use std::path::{Path, PathBuf};

use actix_web::web;
use uuid::Uuid;

use crate::config::MediaConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

/// 업로드 이미지가 저장되는 `MEDIA_ROOT` 하위 디렉터리
pub const RECIPE_IMAGE_DIR: &str = "uploads/recipe";

pub struct ImageStore {
    media_root: PathBuf,
    media_url: String,
    max_upload_bytes: usize,
}

impl ImageStore {
    pub fn new(media_root: PathBuf, media_url: String, max_upload_bytes: usize) -> Self {
        Self {
            media_root,
            media_url,
            max_upload_bytes,
        }
    }

    /// `MEDIA_ROOT`, `MEDIA_URL`, `MAX_UPLOAD_BYTES` 환경 변수로 구성합니다.
    pub fn from_config() -> Self {
        Self::new(
            MediaConfig::media_root(),
            MediaConfig::media_url(),
            MediaConfig::max_upload_bytes(),
        )
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// 이미지를 검증하고 저장한 뒤 `MEDIA_ROOT` 기준 상대 경로를 반환합니다.
    pub async fn store(&self, bytes: Vec<u8>) -> AppResult<String> {
        if bytes.len() > self.max_upload_bytes {
            return Err(too_large(self.max_upload_bytes));
        }

        let media_root = self.media_root.clone();

        let relative_path = web::block(move || -> AppResult<String> {
            let extension = detect_extension(&bytes)?;
            let relative_path = format!("{}/{}.{}", RECIPE_IMAGE_DIR, Uuid::new_v4(), extension);

            write_atomically(&media_root.join(&relative_path), &bytes)?;
            Ok(relative_path)
        })
        .await
        .context("이미지 저장 작업 실패")??;

        log::info!("레시피 이미지 저장: {}", relative_path);

        Ok(relative_path)
    }

    /// 저장된 이미지를 삭제합니다. 실패해도 요청은 실패시키지 않습니다.
    pub async fn remove(&self, relative_path: &str) {
        let path = self.media_root.join(relative_path);
        let display = relative_path.to_string();

        match web::block(move || fs::remove_file(path)).await {
            Ok(Ok(())) => log::debug!("이전 이미지 삭제: {}", display),
            Ok(Err(e)) => log::warn!("이미지 삭제 실패 ({}): {}", display, e),
            Err(e) => log::warn!("이미지 삭제 작업 실패 ({}): {}", display, e),
        }
    }
}

pub(crate) fn too_large(max_upload_bytes: usize) -> AppError {
    AppError::field(
        "image",
        format!("파일 크기는 {}바이트를 넘을 수 없습니다", max_upload_bytes),
    )
}

/// 바이트를 끝까지 디코딩해 보고 포맷에 맞는 확장자를 반환합니다.
pub fn detect_extension(bytes: &[u8]) -> AppResult<&'static str> {
    let invalid = || {
        AppError::field(
            "image",
            "유효한 이미지를 업로드하세요. 업로드한 파일이 이미지가 아니거나 손상되었습니다",
        )
    };

    let format = image::guess_format(bytes).map_err(|_| invalid())?;
    image::load_from_memory_with_format(bytes, format).map_err(|_| invalid())?;

    format.extensions_str().first().copied().ok_or_else(invalid)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let storage_error = |e: std::io::Error| AppError::StorageError(format!("{}: {}", path.display(), e));

    let parent = path
        .parent()
        .ok_or_else(|| AppError::StorageError(format!("잘못된 저장 경로: {}", path.display())))?;
    fs::create_dir_all(parent).map_err(storage_error)?;

    let temp_path = path.with_extension("part");
    if let Err(e) = fs::write(&temp_path, bytes).and_then(|_| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(storage_error(e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let image = image::RgbImage::new(4, 4);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn temp_store(max: usize) -> ImageStore {
        let root = std::env::temp_dir().join(format!("recipe-media-{}", Uuid::new_v4()));
        ImageStore::new(root, "/media/".to_string(), max)
    }

    #[test]
    fn test_detect_extension() {
        assert_eq!(detect_extension(&png_bytes()).unwrap(), "png");
        assert!(detect_extension(b"notanimage").is_err());
    }

    #[test]
    fn test_truncated_png_is_rejected() {
        let bytes = png_bytes();
        assert!(detect_extension(&bytes[..bytes.len() / 2]).is_err());
    }

    #[actix_web::test]
    async fn test_store_and_remove() {
        let store = temp_store(1024 * 1024);

        let relative = store.store(png_bytes()).await.unwrap();
        let absolute = store.media_root().join(&relative);

        assert!(relative.starts_with("uploads/recipe/"));
        assert!(relative.ends_with(".png"));
        assert!(absolute.exists());

        store.remove(&relative).await;
        assert!(!absolute.exists());

        let _ = fs::remove_dir_all(store.media_root());
    }

    #[actix_web::test]
    async fn test_invalid_upload_writes_nothing() {
        let store = temp_store(1024 * 1024);

        assert!(store.store(b"notanimage".to_vec()).await.is_err());
        assert!(!store.media_root().join(RECIPE_IMAGE_DIR).exists());
    }

    #[actix_web::test]
    async fn test_oversize_upload_is_rejected() {
        let store = temp_store(16);

        match store.store(png_bytes()).await {
            Err(AppError::InvalidFields(fields)) => assert!(fields.contains("image")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
