//! Food catalog model and the read-only query surface the recommendation
//! engine consumes.
//!
//! The engine treats categories and ingredient tags as opaque labels; the
//! canonical dataset keeps the original Korean labels (categories 한식, 중식,
//! 일식, 양식, 패스트푸드, 분식, 찜/탕 and tags 고기, 면, 국물, 밥, 튀김,
//! 해산물, 닭, 야채).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A single dish in the catalog. `name` is the identity used for
/// de-duplication everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub category: String,
    pub ingredient_tags: Vec<String>,
}

impl FoodItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        ingredient_tags: Vec<String>,
    ) -> Self {
        Self { name: name.into(), category: category.into(), ingredient_tags }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.ingredient_tags.iter().any(|t| t == tag)
    }

    /// AND semantics: every requested tag must be present.
    pub fn has_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().all(|tag| self.has_tag(tag.as_ref()))
    }
}

/// Read-only query interface the engine delegates all catalog access to.
/// Implementations must be safe to call concurrently; the engine itself never
/// mutates catalog state.
pub trait FoodCatalog {
    fn by_ingredient(&self, tag: &str) -> Vec<FoodItem>;
    fn by_category(&self, category: &str) -> Vec<FoodItem>;
    fn all(&self) -> Vec<FoodItem>;
    fn excluding_names(&self, names: &HashSet<String>) -> Vec<FoodItem>;

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// Immutable in-memory catalog, built once at startup (from the seed table or
/// a database snapshot) and handed to the engine by reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<FoodItem>,
}

impl InMemoryCatalog {
    /// Validates the uniqueness invariant on `name` before accepting external
    /// data.
    pub fn new(items: Vec<FoodItem>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.clone()) {
                return Err(DomainError::DuplicateFoodName(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Catalog backed by the built-in seed dataset.
    pub fn with_seed_foods() -> Self {
        // Seed names are checked for uniqueness in tests.
        Self { items: seed_foods() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl FoodCatalog for InMemoryCatalog {
    fn by_ingredient(&self, tag: &str) -> Vec<FoodItem> {
        self.items.iter().filter(|item| item.has_tag(tag)).cloned().collect()
    }

    fn by_category(&self, category: &str) -> Vec<FoodItem> {
        self.items.iter().filter(|item| item.category == category).cloned().collect()
    }

    fn all(&self) -> Vec<FoodItem> {
        self.items.clone()
    }

    fn excluding_names(&self, names: &HashSet<String>) -> Vec<FoodItem> {
        self.items.iter().filter(|item| !names.contains(&item.name)).cloned().collect()
    }
}

/// Seed row kept as static data so the dataset ships with the binary.
#[derive(Debug, Clone, Copy)]
struct FoodSeed {
    name: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
}

const FOOD_SEEDS: &[FoodSeed] = &[
    // 한식
    FoodSeed { name: "김치찌개", category: "한식", tags: &["국물", "고기"] },
    FoodSeed { name: "된장찌개", category: "한식", tags: &["국물", "야채"] },
    FoodSeed { name: "비빔밥", category: "한식", tags: &["밥", "야채"] },
    FoodSeed { name: "불고기", category: "한식", tags: &["고기", "밥"] },
    FoodSeed { name: "냉면", category: "한식", tags: &["면"] },
    FoodSeed { name: "국밥", category: "한식", tags: &["국물", "밥", "고기"] },
    FoodSeed { name: "제육볶음", category: "한식", tags: &["고기", "밥"] },
    FoodSeed { name: "낙지볶음", category: "한식", tags: &["해산물", "밥"] },
    // 중식
    FoodSeed { name: "짜장면", category: "중식", tags: &["면"] },
    FoodSeed { name: "짬뽕", category: "중식", tags: &["면", "국물", "해산물"] },
    FoodSeed { name: "볶음밥", category: "중식", tags: &["밥"] },
    FoodSeed { name: "탕수육", category: "중식", tags: &["고기", "튀김"] },
    FoodSeed { name: "마파두부", category: "중식", tags: &["밥", "야채"] },
    // 일식
    FoodSeed { name: "초밥", category: "일식", tags: &["밥", "해산물"] },
    FoodSeed { name: "라멘", category: "일식", tags: &["면", "국물"] },
    FoodSeed { name: "돈카츠", category: "일식", tags: &["고기", "튀김"] },
    FoodSeed { name: "우동", category: "일식", tags: &["면", "국물"] },
    FoodSeed { name: "소바", category: "일식", tags: &["면"] },
    // 양식
    FoodSeed { name: "파스타", category: "양식", tags: &["면"] },
    FoodSeed { name: "스테이크", category: "양식", tags: &["고기"] },
    FoodSeed { name: "리조또", category: "양식", tags: &["밥"] },
    FoodSeed { name: "샐러드", category: "양식", tags: &["야채"] },
    // 패스트푸드
    FoodSeed { name: "햄버거", category: "패스트푸드", tags: &["고기"] },
    FoodSeed { name: "후라이드치킨", category: "패스트푸드", tags: &["닭", "튀김"] },
    FoodSeed { name: "양념치킨", category: "패스트푸드", tags: &["닭", "튀김"] },
    FoodSeed { name: "핫도그", category: "패스트푸드", tags: &["고기", "튀김"] },
    // 분식
    FoodSeed { name: "떡볶이", category: "분식", tags: &["야채"] },
    FoodSeed { name: "김밥", category: "분식", tags: &["밥", "야채"] },
    FoodSeed { name: "라볶이", category: "분식", tags: &["면", "국물"] },
    FoodSeed { name: "순대", category: "분식", tags: &["고기"] },
    FoodSeed { name: "불닭볶음면", category: "분식", tags: &["면"] },
    // 찜/탕
    FoodSeed { name: "삼계탕", category: "찜/탕", tags: &["국물", "닭"] },
    FoodSeed { name: "갈비찜", category: "찜/탕", tags: &["고기"] },
    FoodSeed { name: "마라탕", category: "찜/탕", tags: &["국물", "면", "고기"] },
    FoodSeed { name: "부대찌개", category: "찜/탕", tags: &["국물", "고기", "면"] },
    FoodSeed { name: "감자탕", category: "찜/탕", tags: &["국물", "고기"] },
];

/// The built-in dataset as owned items.
pub fn seed_foods() -> Vec<FoodItem> {
    FOOD_SEEDS
        .iter()
        .map(|seed| FoodItem {
            name: seed.name.to_owned(),
            category: seed.category.to_owned(),
            ingredient_tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
        })
        .collect()
}
