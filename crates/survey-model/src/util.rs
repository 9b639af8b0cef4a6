use std::collections::HashSet;
use std::hash::Hash;

/// Returns true if no element appears twice.
pub fn slice_unique<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(item))
}

/// Returns every element that appears more than once, each listed once, in
/// the order its second occurrence is met.
pub fn duplicates<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if !seen.insert(item) && reported.insert(item) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_unique_cases() {
        let cases: Vec<(Vec<&str>, bool)> = vec![
            (vec!["foo", "bar"], true),
            (vec!["foo", "foo"], false),
            (vec!["foo", "foo", "foo", "bar"], false),
            (vec![], true),
            (vec!["foo", "bar", "baz", "foobar", "foo"], false),
            (vec!["foo", "foo "], true),
        ];
        for (idx, (input, expected)) in cases.into_iter().enumerate() {
            assert_eq!(slice_unique(&input), expected, "case {idx}");
        }
    }

    #[test]
    fn duplicates_reported_once() {
        let items = ["a", "b", "a", "c", "a", "b"];
        assert_eq!(duplicates(&items), vec!["a", "b"]);
        assert!(duplicates::<&str>(&[]).is_empty());
    }
}
