//! Context retrieval: keyword-overlap search over the fixed astrological corpus.
//!
//! Not an embedding search. Scoring per candidate:
//! 1. Jaccard similarity of lowercase whitespace-token sets (query vs text)
//! 2. +0.3 when a zodiac filter is given (candidates of other signs are skipped)
//! 3. +0.2 per query token found in the candidate's keyword list
//! 4. clamp to [0, 1], drop anything under `MIN_SIMILARITY`
//!
//! Results are stable-sorted by descending score, so ties keep corpus order.

pub mod corpus;

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::zodiac::ZodiacSign;

pub use corpus::{CorpusEntry, CORPUS};

const ZODIAC_BONUS: f64 = 0.3;
const KEYWORD_BONUS: f64 = 0.2;
const MIN_SIMILARITY: f64 = 0.1;

/// A corpus entry paired with its score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub entry: CorpusEntry,
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct ContextRetriever {
    corpus: Vec<CorpusEntry>,
}

impl Default for ContextRetriever {
    fn default() -> Self {
        Self::with_corpus(CORPUS.to_vec())
    }
}

impl ContextRetriever {
    pub fn with_corpus(corpus: Vec<CorpusEntry>) -> Self {
        Self { corpus }
    }

    pub fn search(
        &self,
        query: &str,
        zodiac_filter: Option<ZodiacSign>,
        top_k: usize,
    ) -> Vec<ScoredEntry> {
        let query_words = tokenize(query);

        let mut results: Vec<ScoredEntry> = self
            .corpus
            .iter()
            .filter(|entry| zodiac_filter.map_or(true, |sign| entry.zodiac == sign))
            .filter_map(|entry| {
                let mut similarity = jaccard(&query_words, &tokenize(entry.text));

                if zodiac_filter.is_some() {
                    similarity += ZODIAC_BONUS;
                }

                let keyword_overlap = entry
                    .keywords
                    .iter()
                    .filter(|k| query_words.contains(k.to_lowercase().as_str()))
                    .count();
                similarity += KEYWORD_BONUS * keyword_overlap as f64;

                let similarity = similarity.clamp(0.0, 1.0);

                (similarity >= MIN_SIMILARITY).then(|| ScoredEntry {
                    entry: *entry,
                    similarity,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    pub fn by_zodiac(&self, sign: ZodiacSign) -> Vec<CorpusEntry> {
        self.corpus
            .iter()
            .filter(|entry| entry.zodiac == sign)
            .copied()
            .collect()
    }

    /// Snippet texts for a sign, queried by "<sign> <traits>" and filtered to the sign.
    pub fn retrieve_context(&self, sign: ZodiacSign, traits: &str, top_k: usize) -> Vec<String> {
        let query = format!("{sign} {traits}");
        let contexts: Vec<String> = self
            .search(&query, Some(sign), top_k)
            .into_iter()
            .map(|r| r.entry.text.to_string())
            .collect();

        debug!("Retrieved {} contexts for {}", contexts.len(), sign);
        contexts
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_has_one_entry_per_sign() {
        assert_eq!(CORPUS.len(), 12);
        let retriever = ContextRetriever::default();
        for sign in ZodiacSign::ALL {
            assert_eq!(retriever.by_zodiac(sign).len(), 1, "{sign}");
        }
        assert!(retriever.by_zodiac(ZodiacSign::Unknown).is_empty());
    }

    #[test]
    fn test_keyword_query_finds_matching_entry() {
        let retriever = ContextRetriever::default();
        let results = retriever.search("leadership charisma warmth", None, 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.id, "leo_leadership");
        // jaccard 3/20 + 3 keywords * 0.2
        assert!((results[0].similarity - 0.75).abs() < 1e-9, "{}", results[0].similarity);
    }

    #[test]
    fn test_zodiac_filter_skips_other_signs_and_adds_bonus() {
        let retriever = ContextRetriever::default();
        let results = retriever.search("Leo confident, warm, and charismatic", Some(ZodiacSign::Leo), 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.zodiac, ZodiacSign::Leo);
        assert!(results[0].similarity > ZODIAC_BONUS);
    }

    #[test]
    fn test_score_is_clamped_to_one() {
        let retriever = ContextRetriever::default();
        let results = retriever.search(
            "leadership charisma warmth inspire",
            Some(ZodiacSign::Leo),
            1,
        );
        assert_eq!(results[0].similarity, 1.0);
    }

    #[test]
    fn test_unrelated_query_returns_nothing() {
        let retriever = ContextRetriever::default();
        assert!(retriever.search("quantum chromodynamics", None, 3).is_empty());
        assert!(retriever.search("", None, 3).is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order_and_top_k_truncates() {
        let text = "steady hands build bridges";
        let retriever = ContextRetriever::with_corpus(vec![
            CorpusEntry {
                id: "first",
                text,
                zodiac: ZodiacSign::Taurus,
                theme: "t",
                keywords: &["bridges"],
            },
            CorpusEntry {
                id: "second",
                text,
                zodiac: ZodiacSign::Virgo,
                theme: "t",
                keywords: &["bridges"],
            },
            CorpusEntry {
                id: "third",
                text,
                zodiac: ZodiacSign::Libra,
                theme: "t",
                keywords: &["bridges"],
            },
        ]);

        let results = retriever.search("steady bridges", None, 2);
        let ids: Vec<&str> = results.iter().map(|r| r.entry.id).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_retrieve_context_returns_sign_snippets() {
        let retriever = ContextRetriever::default();
        let contexts = retriever.retrieve_context(
            ZodiacSign::Taurus,
            "grounded, reliable, and sensual",
            2,
        );
        assert_eq!(contexts.len(), 1);
        assert!(contexts[0].starts_with("Taurus signs are known"));
    }
}
