//! Leaderboard builder
//!
//! Pure transform from raw records to a ranking and a category tally:
//! normalize fields, coerce scores, stable-sort descending, assign ranks.
//! Nothing here can fail; empty input gives empty output.

use crate::domain::entities::{CategoryTally, Entity, FieldMap, RankedEntity, RawRecord};

/// Extract name, category and score from each record, applying defaults
pub fn normalize(records: &[RawRecord], fields: &FieldMap) -> Vec<Entity> {
    records
        .iter()
        .map(|record| Entity {
            name: record.text_or(&fields.name, ""),
            category: record.text_or(&fields.category, ""),
            score: record.score(&fields.score),
        })
        .collect()
}

/// Sort by score descending and assign 1-based ranks
///
/// The sort is stable: equal scores keep their input order.
pub fn rank(mut entities: Vec<Entity>) -> Vec<RankedEntity> {
    entities.sort_by(|a, b| b.score.cmp(&a.score));
    entities
        .into_iter()
        .enumerate()
        .map(|(i, entity)| RankedEntity { rank: i + 1, entity })
        .collect()
}

/// The first `n` ranked entities, or all of them if there are fewer
pub fn top_n(ranked: &[RankedEntity], n: usize) -> &[RankedEntity] {
    &ranked[..n.min(ranked.len())]
}

/// Count entities per category
pub fn tally<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> CategoryTally {
    let mut tally = CategoryTally::default();
    for entity in entities {
        tally.add(&entity.category);
    }
    tally
}

/// Case-insensitive substring match on name or category
///
/// An empty term matches everything.
pub fn matches_search(entity: &Entity, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || entity.name.to_lowercase().contains(&term)
        || entity.category.to_lowercase().contains(&term)
}

/// A full ranking plus the tally over every ranked entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub ranked: Vec<RankedEntity>,
    pub tally: CategoryTally,
}

impl Leaderboard {
    pub fn build(records: &[RawRecord], fields: &FieldMap) -> Self {
        let ranked = rank(normalize(records, fields));
        let tally = tally(ranked.iter().map(|r| &r.entity));
        Self { ranked, tally }
    }
}
