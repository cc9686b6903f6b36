//! Keyword-to-filter mapper for the dialogue front end.
//!
//! Routing is a single pass over an ordered keyword table with
//! case-insensitive substring matching; the first matching row wins and rows
//! are never combined. The table is evaluated in a fixed priority order:
//! category rows, then ingredient rows, then generic intent rows. Overlapping
//! keywords rely on that order (e.g. "치킨" appears in the fast-food category
//! row and would otherwise hit the 닭 ingredient row).

use rand::Rng;

use crate::catalog::FoodCatalog;
use crate::recommend::{FoodFilter, Provenance, Recommendation, RecommendationEngine};

/// Spicy requests skip the filter engine and match these dish names
/// literally, in catalog order. Renaming a catalog entry silently drops it
/// from the shortlist; kept as-is because the original behaved this way.
pub const SPICY_SHORTLIST: &[&str] =
    &["김치찌개", "떡볶이", "짬뽕", "마라탕", "불닭볶음면", "낙지볶음"];

const SPICY_REASON: &str = "매콤한 게 땡길 땐 이거!";
const SPICY_RESULT_LIMIT: usize = 3;

enum KeywordTarget {
    Category(&'static str),
    Ingredients(&'static [&'static str]),
    Spicy,
}

struct KeywordRow {
    keywords: &'static [&'static str],
    target: KeywordTarget,
}

/// Ordered table; earlier rows take precedence.
const KEYWORD_TABLE: &[KeywordRow] = &[
    // Category rows.
    KeywordRow { keywords: &["한식", "korean"], target: KeywordTarget::Category("한식") },
    KeywordRow { keywords: &["중식", "chinese"], target: KeywordTarget::Category("중식") },
    KeywordRow { keywords: &["일식", "japanese"], target: KeywordTarget::Category("일식") },
    KeywordRow { keywords: &["양식", "western"], target: KeywordTarget::Category("양식") },
    KeywordRow {
        keywords: &["패스트푸드", "치킨", "버거", "햄버거", "피자"],
        target: KeywordTarget::Category("패스트푸드"),
    },
    KeywordRow { keywords: &["분식"], target: KeywordTarget::Category("분식") },
    KeywordRow { keywords: &["찜", "탕"], target: KeywordTarget::Category("찜/탕") },
    // Ingredient rows.
    KeywordRow { keywords: &["고기", "meat"], target: KeywordTarget::Ingredients(&["고기"]) },
    KeywordRow { keywords: &["면", "국수", "noodle"], target: KeywordTarget::Ingredients(&["면"]) },
    KeywordRow { keywords: &["국물", "broth"], target: KeywordTarget::Ingredients(&["국물"]) },
    KeywordRow { keywords: &["밥", "rice"], target: KeywordTarget::Ingredients(&["밥"]) },
    KeywordRow { keywords: &["튀김", "fried"], target: KeywordTarget::Ingredients(&["튀김"]) },
    KeywordRow {
        keywords: &["해산물", "seafood"],
        target: KeywordTarget::Ingredients(&["해산물"]),
    },
    KeywordRow { keywords: &["닭", "chicken"], target: KeywordTarget::Ingredients(&["닭"]) },
    KeywordRow { keywords: &["야채", "채소"], target: KeywordTarget::Ingredients(&["야채"]) },
    // Generic intent rows.
    KeywordRow { keywords: &["매운", "매콤", "얼큰"], target: KeywordTarget::Spicy },
    KeywordRow { keywords: &["든든"], target: KeywordTarget::Ingredients(&["밥"]) },
    KeywordRow { keywords: &["가벼", "깔끔"], target: KeywordTarget::Ingredients(&["야채"]) },
];

/// Where a message routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueRoute {
    Filter(FoodFilter),
    SpicyShortlist,
    RandomFallback,
}

/// Maps a free-text message to a filter invocation. No keyword match falls
/// back to a uniform random draw over the whole catalog.
pub fn route_message(message: &str) -> DialogueRoute {
    let normalized = message.to_lowercase();

    for row in KEYWORD_TABLE {
        if row.keywords.iter().any(|keyword| normalized.contains(keyword)) {
            return match row.target {
                KeywordTarget::Category(category) => {
                    DialogueRoute::Filter(FoodFilter::default().with_category(category))
                }
                KeywordTarget::Ingredients(tags) => {
                    DialogueRoute::Filter(FoodFilter::default().with_ingredients(tags.to_vec()))
                }
                KeywordTarget::Spicy => DialogueRoute::SpicyShortlist,
            };
        }
    }

    DialogueRoute::RandomFallback
}

/// Up to three shortlist dishes, in catalog order, not randomized.
pub fn spicy_shortlist<C: FoodCatalog>(catalog: &C) -> Vec<Recommendation> {
    catalog
        .all()
        .into_iter()
        .filter(|item| SPICY_SHORTLIST.contains(&item.name.as_str()))
        .take(SPICY_RESULT_LIMIT)
        .map(|item| Recommendation::from_item(item, SPICY_REASON, Provenance::Filtered))
        .collect()
}

/// Full dialogue turn: route the message and run the resulting invocation
/// against the engine's catalog.
pub fn respond<C: FoodCatalog, R: Rng + ?Sized>(
    engine: &RecommendationEngine<C>,
    message: &str,
    rng: &mut R,
) -> Vec<Recommendation> {
    match route_message(message) {
        DialogueRoute::Filter(filter) => engine.recommend_filtered(&filter, rng),
        DialogueRoute::SpicyShortlist => spicy_shortlist(engine.catalog()),
        DialogueRoute::RandomFallback => engine.recommend_filtered(&FoodFilter::default(), rng),
    }
}
