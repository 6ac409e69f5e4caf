use std::cmp::Reverse;

use crate::types::ContentItem;

/// Newest first. Stable, so equal timestamps keep their input order.
pub fn sort_by_last_modified(mut items: Vec<ContentItem>) -> Vec<ContentItem> {
    items.sort_by_cached_key(|i| Reverse(i.last_modified_or_epoch()));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, ts: Option<&str>) -> ContentItem {
        let i = ContentItem::new(title);
        match ts {
            Some(t) => i.with_last_modified(t),
            None => i,
        }
    }

    fn titles(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn missing_timestamp_sorts_last() {
        let out = sort_by_last_modified(vec![item("bare", None), item("dated", Some("2023-06-01T00:00:00Z"))]);
        assert_eq!(titles(&out), vec!["dated", "bare"]);
    }

    #[test]
    fn descending_and_stable() {
        let out = sort_by_last_modified(vec![
            item("a", Some("2022-01-01T00:00:00Z")),
            item("b", Some("2024-01-01T00:00:00Z")),
            item("c", Some("2022-01-01T00:00:00Z")),
            item("d", None),
            item("e", Some("2024-01-01T00:00:00Z")),
            item("f", Some("not a date")),
        ]);
        assert_eq!(titles(&out), vec!["b", "e", "a", "c", "d", "f"]);
        let stamps: Vec<i64> = out.iter().map(ContentItem::last_modified_or_epoch).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn empty_input() {
        assert!(sort_by_last_modified(Vec::new()).is_empty());
    }
}
