//! Vote-based nearest matching of a probe embedding against the gallery.
//!
//! Every gallery entry within the distance tolerance casts one vote for
//! its name; the name with the most votes wins. Ties break to the
//! lexicographically smallest name, so the result is deterministic and
//! independent of the order entries appear in the gallery file.

use crate::gallery::Gallery;
use crate::types::Embedding;
use std::collections::BTreeMap;

/// Default Euclidean distance tolerance for a positive match.
pub const DEFAULT_TOLERANCE: f32 = 0.6;

/// Label shown for faces that match no gallery entry.
pub const UNKNOWN_LABEL: &str = "Stranger";

/// Compares probe embeddings against a gallery by tolerance-gated voting.
#[derive(Debug, Clone, Copy)]
pub struct VoteMatcher {
    pub tolerance: f32,
}

impl Default for VoteMatcher {
    fn default() -> Self {
        Self { tolerance: DEFAULT_TOLERANCE }
    }
}

impl VoteMatcher {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Return the winning name, or `None` when no entry clears the tolerance.
    pub fn best_match<'a>(&self, probe: &Embedding, gallery: &'a Gallery) -> Option<&'a str> {
        let mut votes: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in gallery.entries() {
            // A distance between mismatched dimensions would only cover the
            // shorter prefix and look spuriously close; such entries never
            // vote.
            if entry.embedding.values.len() != probe.values.len() {
                continue;
            }
            if probe.distance(&entry.embedding) <= self.tolerance {
                *votes.entry(entry.name.as_str()).or_insert(0) += 1;
            }
        }

        // BTreeMap iterates names in lexicographic order; requiring a
        // strictly greater count keeps the first maximum, which is the
        // smallest name among tied counts.
        let mut best: Option<(&str, usize)> = None;
        for (name, count) in votes {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name)
    }

    /// Like [`best_match`](Self::best_match) but substitutes
    /// [`UNKNOWN_LABEL`] when nothing matches.
    pub fn label<'a>(&self, probe: &Embedding, gallery: &'a Gallery) -> &'a str {
        self.best_match(probe, gallery).unwrap_or(UNKNOWN_LABEL)
    }
}
