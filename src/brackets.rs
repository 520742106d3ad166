//! Loop bracket resolution.
//!
//! Brainfuck loops are delimited by `[` and `]`. Before a program runs, every
//! bracket is paired with its partner so that jumps are O(1) lookups and a
//! malformed program is rejected before any instruction executes.

use std::fmt;

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

/// A `[` without a closing partner, or a `]` without an opening one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unmatched bracket {kind} at instruction {ip}")]
pub struct UnmatchedBracket {
    /// Character position of the offending bracket.
    pub ip: usize,
    pub kind: UnmatchedBracketKind,
}

/// Bidirectional jump table between matching `[` and `]` positions.
///
/// `targets[i]` holds the partner of the bracket at position `i`, and is
/// `None` for every non-bracket position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketMap {
    targets: Vec<Option<usize>>,
    pairs: usize,
}

impl BracketMap {
    /// Pair every bracket in `program` using a stack of pending `[` positions.
    ///
    /// A `]` with nothing pending fails immediately. Any `[` still pending at
    /// the end fails with the innermost one's position.
    pub fn resolve(program: &[char]) -> Result<Self, UnmatchedBracket> {
        let mut targets: Vec<Option<usize>> = vec![None; program.len()];
        let mut stack: Vec<usize> = Vec::new();
        let mut pairs = 0;

        for (i, &c) in program.iter().enumerate() {
            if c == '[' {
                stack.push(i);
            } else if c == ']' {
                let Some(open_index) = stack.pop() else {
                    return Err(UnmatchedBracket {
                        ip: i,
                        kind: UnmatchedBracketKind::Close,
                    });
                };
                targets[open_index] = Some(i);
                targets[i] = Some(open_index);
                pairs += 1;
            }
        }

        if let Some(unmatched_open) = stack.last().copied() {
            return Err(UnmatchedBracket {
                ip: unmatched_open,
                kind: UnmatchedBracketKind::Open,
            });
        }

        Ok(Self { targets, pairs })
    }

    /// Position of the bracket matching the one at `position`.
    pub fn target(&self, position: usize) -> Option<usize> {
        self.targets.get(position).copied().flatten()
    }

    /// Number of matched `[`/`]` pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    /// True when the program contains no loops.
    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// Matched `(open, close)` pairs, ordered by the opening position.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.filter(|&j| j > i).map(|j| (i, j)))
    }
}
