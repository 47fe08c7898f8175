//! Mutation verdicts and their memo-table states

use serde::Serialize;

/// Tri-state answer to "does this call change the tracked value?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MutationKind {
    Mutator,
    Inspector,
    Uncertain,
}

impl MutationKind {
    /// Mutator wins over Uncertain, Uncertain over Inspector
    pub fn merge(self, other: MutationKind) -> MutationKind {
        use MutationKind::*;
        match (self, other) {
            (Mutator, _) | (_, Mutator) => Mutator,
            (Uncertain, _) | (_, Uncertain) => Uncertain,
            (Inspector, Inspector) => Inspector,
        }
    }

    pub fn is_mutator(self) -> bool {
        self == MutationKind::Mutator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub kind: MutationKind,
    /// The callee returns (an alias of) the tracked value
    pub returned_by_reference: bool,
}

impl Verdict {
    pub const INSPECTOR: Verdict = Verdict::new(MutationKind::Inspector);
    pub const MUTATOR: Verdict = Verdict::new(MutationKind::Mutator);
    pub const UNCERTAIN: Verdict = Verdict::new(MutationKind::Uncertain);

    pub const fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            returned_by_reference: false,
        }
    }

    pub fn merge(self, other: Verdict) -> Verdict {
        Verdict {
            kind: self.kind.merge(other.kind),
            returned_by_reference: self.returned_by_reference || other.returned_by_reference,
        }
    }
}

/// Memo entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSlot {
    /// Still on the classifier stack; re-entry sees the current assumption
    Pending(Verdict),
    /// Final verdict. `height` is the deepest call hop below the slot that
    /// was inspected, so the verdict holds for any query with that much
    /// depth budget left.
    Done { verdict: Verdict, height: usize },
}

impl CacheSlot {
    /// Verdict usable by a query at `depth` under `max_depth`
    pub fn reusable(&self, depth: usize, max_depth: usize) -> Option<Verdict> {
        match *self {
            CacheSlot::Done { verdict, height } if depth + height <= max_depth => Some(verdict),
            _ => None,
        }
    }
}
