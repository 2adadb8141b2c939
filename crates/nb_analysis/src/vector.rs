use std::collections::HashMap;

const MIN_TERM_CHARS: usize = 3;

/// Splits text into case-folded terms: maximal runs of alphabetic characters
/// (any script) at least three characters long.
pub fn terms(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for c in text.chars() {
        if c.is_alphabetic() {
            current.push(c);
            current_chars += 1;
            continue;
        }
        if current_chars >= MIN_TERM_CHARS {
            out.push(current.to_lowercase());
        }
        current.clear();
        current_chars = 0;
    }
    if current_chars >= MIN_TERM_CHARS {
        out.push(current.to_lowercase());
    }
    out
}

/// Term frequency vector over an article's text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    counts: HashMap<String, u32>,
    norm: f64,
}

impl TermVector {
    pub fn from_text(text: &str) -> Self {
        let mut counts = HashMap::new();
        for term in terms(text) {
            *counts.entry(term).or_insert(0u32) += 1;
        }
        let norm = counts
            .values()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt();
        Self { counts, norm }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Cosine similarity; zero when either side has no terms.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let dot: f64 = small
            .counts
            .iter()
            .map(|(term, &count)| f64::from(count) * f64::from(large.count(term)))
            .sum();
        dot / (self.norm * other.norm)
    }
}

pub fn vectorize(text: &str) -> TermVector {
    TermVector::from_text(text)
}
