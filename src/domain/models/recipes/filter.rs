//! 레시피 목록 필터
//!
//! `?tags=<id>,<id>&ingredients=<id>` 쿼리를 파싱한 결과입니다.
//! 한 파라미터 안의 id들은 OR(하나라도 연결되어 있으면 포함),
//! 두 파라미터가 모두 주어지면 각각을 만족해야 합니다.

use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppResult, FieldErrors};
use crate::domain::entities::recipes::{LabelKind, Recipe};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub tags: Option<Vec<ObjectId>>,
    pub ingredients: Option<Vec<ObjectId>>,
}

impl RecipeFilter {
    /// 쿼리 문자열 값에서 필터를 생성합니다.
    ///
    /// 빈 값은 필터 없음으로 취급하고, 잘못된 id는 파라미터 이름으로 필드 에러를 반환합니다.
    pub fn parse(tags: Option<&str>, ingredients: Option<&str>) -> AppResult<Self> {
        let mut errors = FieldErrors::new();

        let mut parse = |kind: LabelKind, raw: Option<&str>| match raw.map(parse_id_list) {
            Some(Ok(ids)) => ids,
            Some(Err(message)) => {
                errors.add(kind.param(), message);
                None
            }
            None => None,
        };

        let filter = Self {
            tags: parse(LabelKind::Tag, tags),
            ingredients: parse(LabelKind::Ingredient, ingredients),
        };

        errors.into_result()?;
        Ok(filter)
    }

    pub fn ids(&self, kind: LabelKind) -> Option<&[ObjectId]> {
        match kind {
            LabelKind::Tag => self.tags.as_deref(),
            LabelKind::Ingredient => self.ingredients.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.ingredients.is_none()
    }

    /// 메모리 저장소용 매칭
    pub fn matches(&self, recipe: &Recipe) -> bool {
        [LabelKind::Tag, LabelKind::Ingredient]
            .into_iter()
            .all(|kind| match self.ids(kind) {
                Some(ids) => recipe.has_any_label(kind, ids),
                None => true,
            })
    }
}

/// 콤마로 구분된 id 목록을 파싱합니다. 비어 있으면 `None`.
pub fn parse_id_list(raw: &str) -> Result<Option<Vec<ObjectId>>, String> {
    let mut ids = Vec::new();

    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = ObjectId::parse_str(part)
            .map_err(|_| format!("유효하지 않은 ID입니다: {}", part))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    Ok(if ids.is_empty() { None } else { Some(ids) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_id_list() {
        let a = ObjectId::new();
        let b = ObjectId::new();

        let parsed = parse_id_list(&format!("{}, {},{}", a, b, a)).unwrap();
        assert_eq!(parsed, Some(vec![a, b]));

        assert_eq!(parse_id_list("").unwrap(), None);
        assert_eq!(parse_id_list(" , ").unwrap(), None);
        assert!(parse_id_list("12,abc").is_err());
    }

    #[test]
    fn test_parse_reports_bad_parameter() {
        let err = RecipeFilter::parse(Some("nope"), None).unwrap_err();
        match err {
            crate::core::errors::AppError::InvalidFields(fields) => {
                assert!(fields.contains("tags"));
                assert!(!fields.contains("ingredients"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_matches_requires_each_given_filter() {
        let tag = ObjectId::new();
        let ingredient = ObjectId::new();

        let mut recipe = Recipe::new(ObjectId::new(), "Stew".into(), 30, Decimal::new(500, 2));
        recipe.tag_ids.push(tag);

        let tag_only = RecipeFilter { tags: Some(vec![tag]), ingredients: None };
        let both = RecipeFilter { tags: Some(vec![tag]), ingredients: Some(vec![ingredient]) };

        assert!(RecipeFilter::default().matches(&recipe));
        assert!(tag_only.matches(&recipe));
        assert!(!both.matches(&recipe));

        recipe.ingredient_ids.push(ingredient);
        assert!(both.matches(&recipe));
    }
}
