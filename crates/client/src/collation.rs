//! # Name Collation
//!
//! Named, pluggable string comparators used to order the derived view, plus the
//! diacritic folding shared with keyword search.
//!
//! Both collators compare at base-letter strength: letter case and tone marks
//! never decide an order on their own.

use std::{cmp::Ordering, sync::Arc};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// A named comparator over display strings.
///
/// Implementations must be deterministic, antisymmetric, and transitive.
pub trait Collator: Send + Sync {
    /// Collation name, as accepted by `collator_for`.
    fn name(&self) -> &str;

    fn compare(&self, left: &str, right: &str) -> Ordering;
}

/// Lower-cases and strips every combining mark after canonical decomposition.
///
/// "Việt Nam" folds to "viet nam". Letters without a decomposition (such as
/// "đ") are kept as they are.
pub fn fold_diacritics(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Ignores case and all diacritics.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseLetterCollator;

impl Collator for BaseLetterCollator {
    fn name(&self) -> &str {
        "base"
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        fold_diacritics(left).cmp(&fold_diacritics(right))
    }
}

/// Vietnamese alphabet order at base-letter strength.
///
/// Tone marks (grave, acute, hook above, tilde, dot below) and case are ignored.
/// The letters ă, â, đ, ê, ô, ơ and ư sort as distinct letters right after
/// their base letter: a < ă < â < b, d < đ < e, o < ô < ơ < p, u < ư < v.
#[derive(Debug, Clone, Copy, Default)]
pub struct VietnameseCollator;

const BREVE: char = '\u{0306}';
const CIRCUMFLEX: char = '\u{0302}';
const HORN: char = '\u{031B}';

impl VietnameseCollator {
    fn weights(value: &str) -> Vec<u32> {
        let mut weights: Vec<u32> = Vec::with_capacity(value.len());
        for c in value.nfd() {
            if is_combining_mark(c) {
                let rank = match c {
                    BREVE => 1,
                    CIRCUMFLEX => 2,
                    HORN => 3,
                    _ => continue,
                };
                if let Some(last) = weights.last_mut() {
                    *last = (*last & !0b11) | rank;
                }
                continue;
            }
            for lower in c.to_lowercase() {
                let (base, rank) = match lower {
                    'đ' => ('d', 1),
                    other => (other, 0),
                };
                weights.push(((base as u32) << 2) | rank);
            }
        }
        weights
    }
}

impl Collator for VietnameseCollator {
    fn name(&self) -> &str {
        "vi"
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        Self::weights(left).cmp(&Self::weights(right))
    }
}

/// The collator used when none is configured.
pub fn default_collator() -> Arc<dyn Collator> {
    Arc::new(VietnameseCollator)
}

/// Looks up a collator by name ("vi" or "base").
pub fn collator_for(name: &str) -> Option<Arc<dyn Collator>> {
    match name {
        "vi" => Some(Arc::new(VietnameseCollator)),
        "base" => Some(Arc::new(BaseLetterCollator)),
        _ => None,
    }
}
