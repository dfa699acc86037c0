//! 레시피/레이블 요청 DTO
//!
//! 요청 본문은 모든 필드를 `Option`으로 받은 뒤, 쓰기 모드에 따라
//! 필수 필드 검사와 정규화를 거쳐 [`RecipeChanges`] / 레이블 이름으로 변환됩니다.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::core::errors::{AppError, AppResult, FieldErrors};
use crate::domain::entities::recipes::LabelKind;
use crate::domain::models::recipes::RecipeFilter;
use crate::utils::string_utils::{trim_string, validate_required_string};

/// 가격 전체 자릿수 상한
pub const PRICE_MAX_DIGITS: u32 = 5;
/// 가격 소수점 이하 자릿수 상한
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// 쓰기 요청 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST: 필수 필드가 모두 있어야 함
    Create,
    /// PUT: 필수 필드가 모두 있어야 하며, 주어진 필드로 교체
    Replace,
    /// PATCH: 주어진 필드만 병합
    Partial,
}

impl WriteMode {
    pub fn requires_all(&self) -> bool {
        !matches!(self, WriteMode::Partial)
    }
}

/// 필드가 있으면 `null`을 거부합니다. 필드 생략은 `#[serde(default)]`로 `None`이 됩니다.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| D::Error::custom("null 값은 허용되지 않습니다"))
}

/// 중첩 레이블 입력 (`{"name": "Vegan"}`)
#[derive(Debug, Clone, Deserialize)]
pub struct LabelPayload {
    #[serde(default)]
    pub name: String,
}

/// 레시피 생성/수정 요청 본문
///
/// `user`, `id`, `image` 같은 알 수 없는 필드는 역직렬화 단계에서 무시되므로
/// 소유자 변경 시도는 조용히 무시됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipePayload {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 255, message = "제목은 255자를 넘을 수 없습니다"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "non_null")]
    #[validate(range(min = 0, message = "조리 시간은 0 이상이어야 합니다"))]
    pub time_minutes: Option<i32>,

    #[serde(default, deserialize_with = "non_null")]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 255, message = "링크는 255자를 넘을 수 없습니다"))]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "non_null")]
    pub tags: Option<Vec<LabelPayload>>,

    #[serde(default, deserialize_with = "non_null")]
    pub ingredients: Option<Vec<LabelPayload>>,
}

/// 검증과 정규화를 마친 레시피 변경 사항
///
/// `None`은 "변경 없음", 레이블 목록의 `Some(vec![])`은 "연결 모두 해제"입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

impl RecipeChanges {
    pub fn label_names(&self, kind: LabelKind) -> Option<&[String]> {
        match kind {
            LabelKind::Tag => self.tags.as_deref(),
            LabelKind::Ingredient => self.ingredients.as_deref(),
        }
    }
}

impl RecipePayload {
    /// 요청을 검증하고 정규화된 변경 사항으로 변환합니다.
    ///
    /// 모든 필드 에러를 한 번에 모아 `InvalidFields`로 반환합니다.
    pub fn into_changes(self, mode: WriteMode) -> AppResult<RecipeChanges> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        if mode.requires_all() {
            let required = [
                ("title", self.title.is_none()),
                ("time_minutes", self.time_minutes.is_none()),
                ("price", self.price.is_none()),
            ];
            for (field, missing) in required {
                if missing {
                    errors.add(field, "필수 항목입니다");
                }
            }
        }

        let title = match self.title.as_deref().map(|t| validate_required_string(t, "title")) {
            Some(Ok(title)) => Some(title),
            Some(Err(AppError::InvalidFields(fields))) => {
                errors.merge(fields);
                None
            }
            Some(Err(other)) => return Err(other),
            None => None,
        };

        let price = match self.price.map(normalize_price) {
            Some(Ok(price)) => Some(price),
            Some(Err(message)) => {
                errors.add("price", message);
                None
            }
            None => None,
        };

        let tags = normalize_label_list(LabelKind::Tag, self.tags, &mut errors);
        let ingredients = normalize_label_list(LabelKind::Ingredient, self.ingredients, &mut errors);

        errors.into_result()?;

        Ok(RecipeChanges {
            title,
            time_minutes: self.time_minutes,
            price,
            description: self.description.map(|d| trim_string(&d)),
            link: self.link.map(|l| trim_string(&l)),
            tags,
            ingredients,
        })
    }
}

/// 가격 자릿수를 검증하고 소수점 이하 2자리로 맞춥니다.
///
/// 후행 0은 자릿수 계산에서 제외됩니다 (`2.340` → `2.34`).
pub fn normalize_price(price: Decimal) -> Result<Decimal, String> {
    let normalized = price.normalize();
    let decimals = normalized.scale();
    let digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    let whole_digits = digits.saturating_sub(decimals);

    if digits.max(decimals) > PRICE_MAX_DIGITS {
        return Err(format!("전체 자릿수는 {}자리를 넘을 수 없습니다", PRICE_MAX_DIGITS));
    }
    if decimals > PRICE_DECIMAL_PLACES {
        return Err(format!("소수점 이하는 {}자리까지 입력할 수 있습니다", PRICE_DECIMAL_PLACES));
    }
    if whole_digits > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
        return Err(format!(
            "소수점 앞은 {}자리까지 입력할 수 있습니다",
            PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES
        ));
    }

    let mut rescaled = normalized;
    rescaled.rescale(PRICE_DECIMAL_PLACES);
    Ok(rescaled)
}

/// 레이블 이름 하나를 정규화합니다 (공백 제거, 1..=255자).
pub fn normalize_label_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("이름은 비어 있을 수 없습니다".to_string());
    }
    if trimmed.chars().count() > 255 {
        return Err("이름은 255자를 넘을 수 없습니다".to_string());
    }
    Ok(trimmed.to_string())
}

/// 중첩 레이블 목록에서 이름을 추출하고 중복을 제거합니다 (입력 순서 유지).
fn normalize_label_list(
    kind: LabelKind,
    labels: Option<Vec<LabelPayload>>,
    errors: &mut FieldErrors,
) -> Option<Vec<String>> {
    let labels = labels?;
    let mut names: Vec<String> = Vec::with_capacity(labels.len());

    for label in labels {
        match normalize_label_name(&label.name) {
            Ok(name) if !names.contains(&name) => names.push(name),
            Ok(_) => {}
            Err(message) => errors.add(kind.param(), message),
        }
    }

    Some(names)
}

/// 레이블 수정 요청 본문 (`PUT`/`PATCH /recipe/tags/{id}`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelUpdateRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
}

impl LabelUpdateRequest {
    /// 검증된 새 이름을 반환합니다. PATCH에서 이름이 없으면 `None`.
    pub fn into_name(self, mode: WriteMode) -> AppResult<Option<String>> {
        match self.name {
            Some(name) => normalize_label_name(&name)
                .map(Some)
                .map_err(|message| AppError::field("name", message)),
            None if mode.requires_all() => Err(AppError::field("name", "필수 항목입니다")),
            None => Ok(None),
        }
    }
}

/// 레시피 목록 쿼리 (`?tags=..&ingredients=..`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

impl RecipeListQuery {
    pub fn filter(&self) -> AppResult<RecipeFilter> {
        RecipeFilter::parse(self.tags.as_deref(), self.ingredients.as_deref())
    }
}

/// 레이블 목록 쿼리 (`?assigned_only=1`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelListQuery {
    pub assigned_only: Option<String>,
}

impl LabelListQuery {
    pub fn assigned_only(&self) -> AppResult<bool> {
        match self.assigned_only.as_deref().map(str::trim) {
            None | Some("") | Some("0") => Ok(false),
            Some("1") => Ok(true),
            Some(_) => Err(AppError::field("assigned_only", "0 또는 1만 허용됩니다")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn payload(json: &str) -> RecipePayload {
        serde_json::from_str(json).unwrap()
    }

    fn field_errors(result: AppResult<RecipeChanges>) -> FieldErrors {
        match result {
            Err(AppError::InvalidFields(fields)) => fields,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price(dec("2.34")).unwrap().to_string(), "2.34");
        assert_eq!(normalize_price(dec("5")).unwrap().to_string(), "5.00");
        assert_eq!(normalize_price(dec("2.340")).unwrap().to_string(), "2.34");
        assert_eq!(normalize_price(dec("999.99")).unwrap().to_string(), "999.99");

        assert!(normalize_price(dec("2.345")).is_err());
        assert!(normalize_price(dec("1000")).is_err());
        assert!(normalize_price(dec("123456")).is_err());
    }

    #[test]
    fn test_explicit_null_is_rejected() {
        let err = serde_json::from_str::<RecipePayload>(r#"{"title": null}"#).unwrap_err();
        assert!(err.to_string().contains("null 값은 허용되지 않습니다"));
        assert!(serde_json::from_str::<RecipePayload>(r#"{"tags": null}"#).is_err());
        assert!(serde_json::from_str::<LabelUpdateRequest>(r#"{"name": null}"#).is_err());

        let omitted = payload(r#"{"description": "Moist"}"#);
        assert!(omitted.title.is_none());
        assert_eq!(omitted.description.as_deref(), Some("Moist"));
    }

    #[test]
    fn test_create_requires_core_fields() {
        let fields = field_errors(payload(r#"{"title": "Cake"}"#).into_changes(WriteMode::Create));

        assert!(fields.contains("time_minutes"));
        assert!(fields.contains("price"));
        assert!(!fields.contains("title"));
    }

    #[test]
    fn test_partial_accepts_subset() {
        let changes = payload(r#"{"title": " Pie "}"#)
            .into_changes(WriteMode::Partial)
            .unwrap();

        assert_eq!(changes.title.as_deref(), Some("Pie"));
        assert!(changes.price.is_none());
        assert!(changes.tags.is_none());
    }

    #[test]
    fn test_blank_title_and_negative_time_rejected() {
        let fields = field_errors(
            payload(r#"{"title": "  ", "time_minutes": -1, "price": "1.00"}"#)
                .into_changes(WriteMode::Create),
        );

        assert!(fields.contains("title"));
        assert!(fields.contains("time_minutes"));
    }

    #[test]
    fn test_nested_labels_are_trimmed_and_deduplicated() {
        let changes = payload(
            r#"{"tags": [{"name": "Thai"}, {"name": " Thai "}, {"name": "Dinner"}], "ingredients": []}"#,
        )
        .into_changes(WriteMode::Partial)
        .unwrap();

        assert_eq!(changes.tags, Some(vec!["Thai".to_string(), "Dinner".to_string()]));
        assert_eq!(changes.ingredients, Some(vec![]));
    }

    #[test]
    fn test_blank_label_name_rejected() {
        let fields = field_errors(
            payload(r#"{"ingredients": [{"name": ""}]}"#).into_changes(WriteMode::Partial),
        );
        assert!(fields.contains("ingredients"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let changes = payload(r#"{"user": "someone-else", "id": 7, "link": "https://x.test"}"#)
            .into_changes(WriteMode::Partial)
            .unwrap();

        assert_eq!(changes.link.as_deref(), Some("https://x.test"));
    }

    #[test]
    fn test_label_update_modes() {
        let missing = LabelUpdateRequest { name: None };
        assert!(missing.clone().into_name(WriteMode::Replace).is_err());
        assert_eq!(missing.into_name(WriteMode::Partial).unwrap(), None);

        let renamed = LabelUpdateRequest { name: Some(" Brunch ".to_string()) };
        assert_eq!(renamed.into_name(WriteMode::Partial).unwrap(), Some("Brunch".to_string()));
    }

    #[test]
    fn test_assigned_only_values() {
        let query = |v: Option<&str>| LabelListQuery { assigned_only: v.map(str::to_string) };

        assert!(!query(None).assigned_only().unwrap());
        assert!(!query(Some("0")).assigned_only().unwrap());
        assert!(query(Some("1")).assigned_only().unwrap());
        assert!(query(Some("yes")).assigned_only().is_err());
    }
}
