//! Leaderboard of the rating store
//!
//! Items ordered by descending rating. Equal ratings fall back to lexical
//! identifier order so the output is reproducible.

use crate::rating::store::RatingStore;
use crate::types::Standing;
use std::cmp::Ordering;

/// Separator between rating and item in a rendered leaderboard line
pub const DELIMITER: &str = " - ";

/// Rank all items of the store, best first.
///
/// `limit` truncates the ranking; `None` or `Some(0)` returns everything.
pub fn best(store: &RatingStore, limit: Option<usize>) -> Vec<Standing> {
    let mut ranking: Vec<_> = store
        .iter()
        .map(|(item_id, entry)| (item_id, entry.rating))
        .collect();

    ranking.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });

    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        ranking.truncate(limit);
    }

    ranking
        .into_iter()
        .enumerate()
        .map(|(index, (item_id, rating))| Standing {
            position: index + 1,
            item_id: item_id.clone(),
            rating,
        })
        .collect()
}

/// Format a standing the way the ranking list shows it: `"1210 - a.jpg"`
pub fn render_line(standing: &Standing) -> String {
    format!("{:.0}{}{}", standing.rating, DELIMITER, standing.item_id)
}

/// Recover the item identifier from a rendered leaderboard line
pub fn parse_line(line: &str) -> Option<&str> {
    line.split_once(DELIMITER).map(|(_, item_id)| item_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::store::RatingSnapshot;
    use proptest::collection::btree_map;
    use proptest::prelude::*;

    fn store_from(pairs: &[(&str, f64)]) -> RatingStore {
        let persisted: RatingSnapshot = pairs
            .iter()
            .map(|(id, rating)| (id.to_string(), *rating))
            .collect();
        RatingStore::initialize(persisted.keys().cloned(), &persisted, 1200.0)
    }

    #[test]
    fn test_best_orders_by_rating_then_name() {
        let store = store_from(&[
            ("c.jpg", 1200.0),
            ("a.jpg", 1300.0),
            ("d.jpg", 1150.0),
            ("b.jpg", 1200.0),
        ]);

        let ranking = best(&store, None);
        let order: Vec<&str> = ranking.iter().map(|s| s.item_id.as_str()).collect();
        assert_eq!(order, vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);

        let positions: Vec<usize> = ranking.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_best_with_limit() {
        let store = store_from(&[("a", 1.0), ("b", 3.0), ("c", 2.0)]);

        let top_two = best(&store, Some(2));
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[0].item_id, "b");
        assert_eq!(top_two[1].item_id, "c");

        assert_eq!(best(&store, Some(0)).len(), 3);
        assert_eq!(best(&store, Some(10)).len(), 3);
        assert!(best(&RatingStore::new(1200.0), None).is_empty());
    }

    #[test]
    fn test_render_and_parse_line() {
        let standing = Standing {
            position: 1,
            item_id: "holiday - beach.jpg".to_string(),
            rating: 1209.6,
        };

        let line = render_line(&standing);
        assert_eq!(line, "1210 - holiday - beach.jpg");
        assert_eq!(parse_line(&line), Some("holiday - beach.jpg"));
        assert_eq!(parse_line("no delimiter"), None);
    }

    proptest! {
        #[test]
        fn prop_best_is_sorted_and_limit_is_prefix(
            ratings in btree_map("[a-z]{1,6}", -2000.0f64..4000.0, 0..30),
            limit in 0usize..40,
        ) {
            let store = RatingStore::initialize(ratings.keys().cloned(), &ratings, 1200.0);
            let full = best(&store, None);

            prop_assert_eq!(full.len(), store.len());
            for window in full.windows(2) {
                prop_assert!(window[0].rating >= window[1].rating);
            }

            let limited = best(&store, Some(limit));
            let expected_len = if limit == 0 { full.len() } else { limit.min(full.len()) };
            prop_assert_eq!(limited.len(), expected_len);
            prop_assert_eq!(&limited[..], &full[..expected_len]);
        }
    }
}
