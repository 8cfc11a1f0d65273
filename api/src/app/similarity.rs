//! Similar product selection
//!
//! The model answers with free text that should contain product IDs. IDs are
//! pulled out with a UUID pattern and only kept when they name a product in
//! the candidate pool; anything else in the answer is ignored.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::entities::{Product, ProductId};

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b")
        .expect("Valid UUID regex")
});

/// Extract the distinct product IDs from a model answer, in the order they
/// appear. Nothing is capped here; callers validate against the pool first.
pub fn parse_product_ids(answer: &str) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    UUID_PATTERN
        .find_iter(answer)
        .filter_map(|m| Uuid::parse_str(m.as_str()).ok())
        .map(ProductId)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Choose similar products for `target`.
///
/// Candidates named by the model come first, in pool order. If that leaves
/// fewer than `limit`, the rest is filled with same-category candidates in
/// creation order, oldest first.
pub fn select_similar(
    target: &Product,
    suggested: &[ProductId],
    candidates: &[Product],
    limit: usize,
) -> Vec<Product> {
    let suggested: HashSet<ProductId> = suggested.iter().copied().collect();

    let mut selected: Vec<Product> = candidates
        .iter()
        .filter(|p| p.id != target.id && suggested.contains(&p.id))
        .take(limit)
        .cloned()
        .collect();

    if selected.len() < limit {
        let chosen: HashSet<ProductId> = selected.iter().map(|p| p.id).collect();
        let mut fallback: Vec<&Product> = candidates
            .iter()
            .filter(|p| {
                p.id != target.id && p.category == target.category && !chosen.contains(&p.id)
            })
            .collect();
        fallback.sort_by_key(|p| p.created_at);

        let missing = limit - selected.len();
        selected.extend(fallback.into_iter().take(missing).cloned());
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::entities::{Category, UserId};
    use crate::test_utils::test_product;

    fn aged(category: Category, age_days: i64) -> Product {
        Product {
            created_at: Utc::now() - Duration::days(age_days),
            ..test_product(UserId::new(), category)
        }
    }

    #[test]
    fn parse_ids_from_comma_separated_answer() {
        let a = ProductId::new();
        let b = ProductId::new();
        let answer = format!("{}, {}", a, b);

        assert_eq!(parse_product_ids(&answer), vec![a, b]);
    }

    #[test]
    fn parse_ids_ignores_noise_and_duplicates() {
        let a = ProductId::new();
        let b = ProductId::new();
        let answer = format!(
            "Here are my picks:\n1. ID: {} (same glaze)\n2. {}\n3. {}\n4. not-an-id, 12345",
            a,
            b.to_string().to_uppercase(),
            a
        );

        assert_eq!(parse_product_ids(&answer), vec![a, b]);
    }

    #[test]
    fn parse_ids_keeps_every_id() {
        let ids: Vec<ProductId> = (0..8).map(|_| ProductId::new()).collect();
        let answer = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        assert_eq!(parse_product_ids(&answer), ids);
    }

    #[test]
    fn unknown_ids_before_real_picks_do_not_crowd_them_out() {
        let target = aged(Category::Metalwork, 1);
        let pool: Vec<Product> = (0..4).map(|i| aged(Category::Jewelry, 10 - i)).collect();
        let unknown: Vec<ProductId> = (0..5).map(|_| ProductId::new()).collect();
        let answer = unknown
            .iter()
            .chain(pool.iter().map(|p| &p.id))
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let selected = select_similar(&target, &parse_product_ids(&answer), &pool, 4);
        assert_eq!(selected, pool);
    }

    #[test]
    fn parse_ids_from_empty_answer() {
        assert!(parse_product_ids("").is_empty());
        assert!(parse_product_ids("I could not find anything similar.").is_empty());
    }

    #[test]
    fn suggested_ids_outside_pool_are_dropped() {
        let target = aged(Category::Pottery, 1);
        let in_pool = aged(Category::Jewelry, 3);
        let candidates = vec![in_pool.clone()];

        let selected = select_similar(
            &target,
            &[ProductId::new(), in_pool.id, target.id],
            &candidates,
            4,
        );

        assert_eq!(selected, vec![in_pool]);
    }

    #[test]
    fn suggestions_keep_pool_order_and_limit() {
        let target = aged(Category::Textiles, 1);
        let pool: Vec<Product> = (0..6).map(|i| aged(Category::Jewelry, 10 - i)).collect();
        let suggested: Vec<ProductId> = pool.iter().rev().map(|p| p.id).collect();

        let selected = select_similar(&target, &suggested, &pool, 4);
        let ids: Vec<ProductId> = selected.iter().map(|p| p.id).collect();
        let expected: Vec<ProductId> = pool[..4].iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn pads_with_same_category_oldest_first() {
        let target = aged(Category::Woodwork, 1);
        let suggested = aged(Category::Paintings, 2);
        let newer = aged(Category::Woodwork, 5);
        let oldest = aged(Category::Woodwork, 50);
        let middle = aged(Category::Woodwork, 20);
        let unrelated = aged(Category::Metalwork, 90);
        let candidates = vec![
            suggested.clone(),
            newer.clone(),
            oldest.clone(),
            unrelated,
            middle.clone(),
        ];

        let selected = select_similar(&target, &[suggested.id], &candidates, 4);
        let ids: Vec<ProductId> = selected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![suggested.id, oldest.id, middle.id, newer.id]);
    }

    #[test]
    fn padding_never_duplicates_suggestions() {
        let target = aged(Category::Ceramics, 1);
        let a = aged(Category::Ceramics, 10);
        let b = aged(Category::Ceramics, 5);
        let candidates = vec![a.clone(), b.clone()];

        let selected = select_similar(&target, &[b.id], &candidates, 4);
        let ids: Vec<ProductId> = selected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn no_suggestions_falls_back_entirely() {
        let target = aged(Category::Sculptures, 1);
        let candidates: Vec<Product> = (0..6).map(|i| aged(Category::Sculptures, i + 2)).collect();

        let selected = select_similar(&target, &[], &candidates, 4);
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|p| p.category == Category::Sculptures));
        // Oldest first
        assert_eq!(selected[0].id, candidates[5].id);
    }

    #[test]
    fn empty_pool_gives_nothing() {
        let target = aged(Category::Pottery, 1);
        assert!(select_similar(&target, &[ProductId::new()], &[], 4).is_empty());
    }
}
