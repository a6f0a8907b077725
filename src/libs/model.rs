//! Value types for tandem repeats, self alignments and their edit paths.
//!
//! All coordinates are 0-based and half-open, as reported by the Dazzler tools.

use crate::libs::error::{DumpError, Result};
use itertools::Itertools;
use std::fmt;

/// A self alignment of a read against a shifted copy of itself.
///
/// Spans `[ab, ae)` on the A copy and `[bb, be)` on the B copy. Equality,
/// hashing and ordering are by value, so cover sets can be plain `HashSet`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelfAlignment {
    pub ab: i64,
    pub ae: i64,
    pub bb: i64,
    pub be: i64,
}

impl SelfAlignment {
    pub fn new(ab: i64, ae: i64, bb: i64, be: i64) -> Self {
        Self { ab, ae, bb, be }
    }

    /// Diagonal offset, close to the unit length of the repeat.
    pub fn distance(&self) -> i64 {
        self.ab - self.bb
    }

    pub fn a_len(&self) -> i64 {
        self.ae - self.ab
    }

    pub fn b_len(&self) -> i64 {
        self.be - self.bb
    }

    /// `(ae - ab) / (be - bb)` rounded to 3 decimals, ties to even.
    ///
    /// ```
    /// use trdump::libs::model::SelfAlignment;
    /// let aln = SelfAlignment::new(100, 1100, 0, 1000);
    /// assert_eq!(aln.slope().unwrap(), 1.0);
    /// let aln = SelfAlignment::new(100, 1100, 0, 900);
    /// assert_eq!(aln.slope().unwrap(), 1.111);
    /// ```
    pub fn slope(&self) -> Result<f64> {
        if self.be == self.bb {
            return Err(DumpError::DegenerateAlignment { alignment: *self });
        }
        let ratio = self.a_len() as f64 / self.b_len() as f64;
        Ok((ratio * 1000.0).round_ties_even() / 1000.0)
    }

    /// Clean shifted self matches have a slope close to 1.0; noisy ones drift away.
    pub fn is_slope_normal(&self, tolerance: f64) -> Result<bool> {
        Ok((self.slope()? - 1.0).abs() <= tolerance + f64::EPSILON)
    }
}

impl fmt::Display for SelfAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.ab, self.ae, self.bb, self.be)
    }
}

/// Canonical order: grouped by diagonal, then by start on the A copy.
///
/// The sort is stable, so duplicates keep their dump order.
pub fn sort_canonical(alignments: &mut [SelfAlignment]) {
    alignments.sort_by_key(|aln| (aln.distance(), aln.ab));
}

/// A tandem repeat interval `[start, end)` on a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TandemRepeat {
    pub start: i64,
    pub end: i64,
}

impl TandemRepeat {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Everything the coordinate dumps say about one read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadDump {
    pub id: u64,
    pub trs: Vec<TandemRepeat>,
    pub alignments: Vec<SelfAlignment>,
}

impl ReadDump {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    Match,
    Insertion,
    Deletion,
    Mismatch,
}

impl EditOp {
    pub fn as_char(&self) -> char {
        match self {
            EditOp::Match => '=',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
            EditOp::Mismatch => 'X',
        }
    }
}

/// The trimmed alignment of one self alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentPath {
    pub aseq: String,
    pub bseq: String,
    pub ops: Vec<EditOp>,
}

impl AlignmentPath {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// One character per position, e.g. `===I==X`
    pub fn fcigar(&self) -> String {
        self.ops.iter().map(|op| op.as_char()).collect()
    }

    /// Run-length compressed edit string, e.g. `3=1I2=1X`
    ///
    /// ```
    /// use trdump::libs::model::{AlignmentPath, EditOp};
    /// let path = AlignmentPath {
    ///     aseq: "AC-GT".to_string(),
    ///     bseq: "ACAGA".to_string(),
    ///     ops: vec![EditOp::Match, EditOp::Match, EditOp::Insertion, EditOp::Match, EditOp::Mismatch],
    /// };
    /// assert_eq!(path.cigar(), "2=1I1=1X");
    /// ```
    pub fn cigar(&self) -> String {
        self.ops
            .iter()
            .dedup_with_count()
            .map(|(n, op)| format!("{}{}", n, op.as_char()))
            .join("")
    }

    /// Fraction of positions that are exact matches.
    pub fn identity(&self) -> f64 {
        if self.ops.is_empty() {
            return 0.0;
        }
        let matches = self.ops.iter().filter(|op| **op == EditOp::Match).count();
        matches as f64 / self.ops.len() as f64
    }
}
