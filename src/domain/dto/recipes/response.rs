//! 레시피/레이블 응답 DTO
//!
//! 목록 응답은 설명과 이미지를 제외한 요약 필드만, 상세 응답은 전체 필드를 포함합니다.
//! 가격은 항상 소수점 이하 2자리 문자열입니다 (`"2.34"`).

use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::recipes::{Label, LabelKind, Recipe};

/// 태그/재료 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResponse {
    pub id: String,
    pub name: String,
}

impl From<&Label> for LabelResponse {
    fn from(label: &Label) -> Self {
        Self {
            id: label.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: label.name.clone(),
        }
    }
}

impl From<Label> for LabelResponse {
    fn from(label: Label) -> Self {
        LabelResponse::from(&label)
    }
}

/// 레시피 응답 조립에 필요한 레이블 조회 테이블
#[derive(Debug, Default)]
pub struct LabelIndex {
    tags: HashMap<ObjectId, Label>,
    ingredients: HashMap<ObjectId, Label>,
}

impl LabelIndex {
    pub fn insert_all(&mut self, kind: LabelKind, labels: Vec<Label>) {
        let map = match kind {
            LabelKind::Tag => &mut self.tags,
            LabelKind::Ingredient => &mut self.ingredients,
        };
        for label in labels {
            if let Some(id) = label.id {
                map.insert(id, label);
            }
        }
    }

    /// 레시피에 저장된 순서대로 레이블을 반환합니다. 조회되지 않는 id는 건너뜁니다.
    pub fn resolve(&self, kind: LabelKind, ids: &[ObjectId]) -> Vec<LabelResponse> {
        let map = match kind {
            LabelKind::Tag => &self.tags,
            LabelKind::Ingredient => &self.ingredients,
        };
        ids.iter()
            .filter_map(|id| map.get(id))
            .map(LabelResponse::from)
            .collect()
    }
}

/// 레시피 목록 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub time_minutes: i32,
    pub price: String,
    pub link: String,
    pub tags: Vec<LabelResponse>,
    pub ingredients: Vec<LabelResponse>,
}

impl RecipeResponse {
    pub fn build(recipe: &Recipe, labels: &LabelIndex) -> Self {
        Self {
            id: recipe.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: format!("{:.2}", recipe.price),
            link: recipe.link.clone(),
            tags: labels.resolve(LabelKind::Tag, &recipe.tag_ids),
            ingredients: labels.resolve(LabelKind::Ingredient, &recipe.ingredient_ids),
        }
    }
}

/// 레시피 상세
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub summary: RecipeResponse,
    pub description: String,
    /// `MEDIA_URL` 기준 이미지 URL
    pub image: Option<String>,
}

impl RecipeDetailResponse {
    pub fn build(recipe: &Recipe, labels: &LabelIndex, media_url: &str) -> Self {
        Self {
            summary: RecipeResponse::build(recipe, labels),
            description: recipe.description.clone(),
            image: image_url(recipe, media_url),
        }
    }
}

/// 이미지 업로드 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeImageResponse {
    pub id: String,
    pub image: Option<String>,
}

impl RecipeImageResponse {
    pub fn build(recipe: &Recipe, media_url: &str) -> Self {
        Self {
            id: recipe.id.map(|id| id.to_hex()).unwrap_or_default(),
            image: image_url(recipe, media_url),
        }
    }
}

/// 호스트 없이 `MEDIA_URL` 기준 경로만 만듭니다.
fn image_url(recipe: &Recipe, media_url: &str) -> Option<String> {
    recipe
        .image
        .as_ref()
        .map(|path| format!("{}{}", media_url, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_detail_flattens_summary_fields() {
        let owner = ObjectId::new();
        let mut tag = Label::new(owner, "Dinner".to_string());
        tag.id = Some(ObjectId::new());

        let mut recipe = Recipe::new(owner, "Curry".to_string(), 25, Decimal::new(550, 2));
        recipe.id = Some(ObjectId::new());
        recipe.tag_ids = vec![tag.id.unwrap(), ObjectId::new()];
        recipe.image = Some("uploads/recipe/a.png".to_string());

        let mut index = LabelIndex::default();
        index.insert_all(LabelKind::Tag, vec![tag]);

        let json = serde_json::to_value(RecipeDetailResponse::build(&recipe, &index, "/media/")).unwrap();

        assert_eq!(json["title"], "Curry");
        assert_eq!(json["price"], "5.50");
        assert_eq!(json["tags"].as_array().unwrap().len(), 1);
        assert_eq!(json["tags"][0]["name"], "Dinner");
        assert_eq!(json["image"], "/media/uploads/recipe/a.png");
        assert_eq!(json["description"], "");
    }

    #[test]
    fn test_list_item_has_no_description_or_image() {
        let recipe = Recipe::new(ObjectId::new(), "Toast".to_string(), 2, Decimal::new(100, 2));
        let json = serde_json::to_value(RecipeResponse::build(&recipe, &LabelIndex::default())).unwrap();

        assert!(json.get("description").is_none());
        assert!(json.get("image").is_none());
        assert_eq!(json["price"], "1.00");
    }
}
