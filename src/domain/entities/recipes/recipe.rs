use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LabelKind;

/// 레시피 엔티티
///
/// `owner_id`는 생성 이후 변경되지 않습니다.
/// `price`는 문자열로 저장되어 소수 정밀도가 보존됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_id: ObjectId,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    /// `MEDIA_ROOT` 기준 상대 경로 (예: `uploads/recipe/<uuid>.png`)
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<ObjectId>,
    #[serde(default)]
    pub ingredient_ids: Vec<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Recipe {
    pub fn new(owner_id: ObjectId, title: String, time_minutes: i32, price: Decimal) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            owner_id,
            title,
            time_minutes,
            price,
            description: String::new(),
            link: String::new(),
            image: None,
            tag_ids: Vec::new(),
            ingredient_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn label_ids(&self, kind: LabelKind) -> &[ObjectId] {
        match kind {
            LabelKind::Tag => &self.tag_ids,
            LabelKind::Ingredient => &self.ingredient_ids,
        }
    }

    pub fn label_ids_mut(&mut self, kind: LabelKind) -> &mut Vec<ObjectId> {
        match kind {
            LabelKind::Tag => &mut self.tag_ids,
            LabelKind::Ingredient => &mut self.ingredient_ids,
        }
    }

    /// 주어진 id 중 하나라도 연결되어 있는지 확인합니다.
    pub fn has_any_label(&self, kind: LabelKind, ids: &[ObjectId]) -> bool {
        self.label_ids(kind).iter().any(|id| ids.contains(id))
    }
}
