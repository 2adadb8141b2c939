use std::collections::HashMap;

/// Counts occurrences and returns the `limit` most frequent values. Equal
/// counts keep the order in which values were first seen.
pub fn top_by_frequency<I, S>(items: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counted = count_in_order(items);
    // sort_by is stable, so ties stay in first-seen order
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted.truncate(limit);
    counted
}

/// Counts occurrences in first-seen order.
pub fn count_in_order<I, S>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut counted: Vec<(String, usize)> = Vec::new();

    for item in items {
        let item = item.as_ref();
        match position.get(item) {
            Some(&idx) => counted[idx].1 += 1,
            None => {
                position.insert(item.to_string(), counted.len());
                counted.push((item.to_string(), 1));
            }
        }
    }
    counted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_seen_order() {
        let ranked = top_by_frequency(["b", "a", "c", "a", "c", "d"], 3);
        assert_eq!(
            ranked,
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_limit_larger_than_input() {
        assert_eq!(top_by_frequency(["x"], 10), vec![("x".to_string(), 1)]);
        assert!(top_by_frequency(Vec::<String>::new(), 5).is_empty());
    }
}
