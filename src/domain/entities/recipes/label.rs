use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 레이블 종류
///
/// 태그와 재료는 `{id, owner, name}`으로 구조가 같고 동작도 같으므로
/// 하나의 엔티티 타입을 공유하고 종류로만 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Tag,
    Ingredient,
}

impl LabelKind {
    /// MongoDB 컬렉션 이름
    pub fn collection(&self) -> &'static str {
        match self {
            LabelKind::Tag => "tags",
            LabelKind::Ingredient => "ingredients",
        }
    }

    /// 레시피 문서에서 이 레이블 id 목록이 저장된 필드
    pub fn recipe_field(&self) -> &'static str {
        match self {
            LabelKind::Tag => "tag_ids",
            LabelKind::Ingredient => "ingredient_ids",
        }
    }

    /// 요청/응답 JSON 및 쿼리 파라미터에서 쓰는 이름
    pub fn param(&self) -> &'static str {
        match self {
            LabelKind::Tag => "tags",
            LabelKind::Ingredient => "ingredients",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LabelKind::Tag => "태그",
            LabelKind::Ingredient => "재료",
        }
    }
}

/// 사용자 소유 레이블 (태그 또는 재료)
///
/// (owner_id, name) 조합은 종류별로 유일합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_id: ObjectId,
    pub name: String,
}

impl Label {
    pub fn new(owner_id: ObjectId, name: String) -> Self {
        Self {
            id: None,
            owner_id,
            name,
        }
    }
}
