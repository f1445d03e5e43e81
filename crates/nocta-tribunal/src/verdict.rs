//! # Verdicts & Weighted Tally
//!
//! The verdict enum and the pure tally computation over a set of weighted
//! ballots. The tally is deliberately a function of the ballot multiset and
//! nothing else — re-running it over the same ballots always yields the
//! same verdict, and it never needs to see which voter cast which ballot.
//!
//! ## Tally Rules
//!
//! 1. Zero ballots resolve to [`Verdict::Absolution`] — absence of votes
//!    must never produce a punishment.
//! 2. The winner is the verdict with the strictly greatest weighted sum.
//! 3. Ties break toward the *less severe* verdict: a tribunal does not
//!    escalate punishment on an indecisive vote.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The adjudicated outcome of a dossier.
///
/// Variants are declared in severity order (`Absolution < Warning <
/// Suspension < Ban`). The ordering exists for tie-breaking only — it
/// plays no part in scoring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Verdict {
    /// The subject is cleared.
    Absolution,
    /// Formal warning on record; no platform restriction.
    Warning,
    /// Temporary removal of platform privileges.
    Suspension,
    /// Permanent removal of platform privileges.
    Ban,
}

impl Verdict {
    /// All verdicts in ascending severity order.
    pub fn all() -> &'static [Verdict] {
        &[Self::Absolution, Self::Warning, Self::Suspension, Self::Ban]
    }

    /// The canonical string tag for serialization and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absolution => "absolution",
            Self::Warning => "warning",
            Self::Suspension => "suspension",
            Self::Ban => "ban",
        }
    }

    /// Whether this verdict cascades a platform-wide restriction onto the
    /// subject's account.
    pub fn requires_restriction(&self) -> bool {
        matches!(self, Self::Suspension | Self::Ban)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Weighted Tally ─────────────────────────────────────────────────────

/// Weighted sums per verdict, accumulated from recorded ballots.
///
/// Holds only aggregates — a tally never carries voter identities, so
/// handing one to a caller cannot leak the choice-to-voter mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    sums: BTreeMap<Verdict, u64>,
}

impl VoteTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ballot's weight to its chosen verdict.
    pub fn record(&mut self, choice: Verdict, weight: u32) {
        *self.sums.entry(choice).or_insert(0) += u64::from(weight);
    }

    /// The weighted sum currently recorded for a verdict.
    pub fn weighted_sum(&self, verdict: Verdict) -> u64 {
        self.sums.get(&verdict).copied().unwrap_or(0)
    }

    /// The total weight across all recorded ballots.
    pub fn total_weight(&self) -> u64 {
        self.sums.values().sum()
    }

    /// Whether no ballots have been recorded.
    pub fn is_empty(&self) -> bool {
        self.total_weight() == 0
    }

    /// Decide the winning verdict under the tally rules.
    ///
    /// The map iterates in ascending severity, and only a *strictly*
    /// greater sum displaces the current winner — which is exactly the
    /// lenient tie-break. An empty tally yields `Absolution`.
    pub fn decide(&self) -> Verdict {
        let mut winner = Verdict::Absolution;
        let mut best = 0u64;
        for (&verdict, &sum) in &self.sums {
            if sum > best {
                winner = verdict;
                best = sum;
            }
        }
        winner
    }
}

/// Tally a collection of `(choice, weight)` ballots into a verdict.
///
/// Pure and order-independent: the same multiset of ballots always
/// resolves to the same verdict.
pub fn tally_verdict(ballots: impl IntoIterator<Item = (Verdict, u32)>) -> Verdict {
    let mut tally = VoteTally::new();
    for (choice, weight) in ballots {
        tally.record(choice, weight);
    }
    tally.decide()
}
