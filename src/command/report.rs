use std::fmt;

use crate::host::ConduitKind;
use crate::model::ElementId;

/// Why a conduit run was left out of the placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The centerline is not a straight line.
    Curved,
    /// The run has no diameter (rectangular duct).
    NoDiameter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curved => f.write_str("curved centerline"),
            Self::NoDiameter => f.write_str("no diameter"),
        }
    }
}

/// A conduit run that was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRun {
    pub element: ElementId,
    pub kind: ConduitKind,
    pub reason: SkipReason,
}

/// Outcome of one hole placement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoleReport {
    /// Whether the hole family symbol had to be activated.
    pub activated_symbol: bool,
    /// Holes placed for ducts.
    pub duct_holes: Vec<ElementId>,
    /// Holes placed for pipes.
    pub pipe_holes: Vec<ElementId>,
    pub skipped: Vec<SkippedRun>,
}

impl HoleReport {
    /// Total number of holes placed.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.duct_holes.len() + self.pipe_holes.len()
    }

    /// Every placed hole, ducts first.
    pub fn holes(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.duct_holes.iter().chain(&self.pipe_holes).copied()
    }
}

impl fmt::Display for HoleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "placed {} holes ({} for ducts, {} for pipes)",
            self.placed(),
            self.duct_holes.len(),
            self.pipe_holes.len()
        )?;
        if !self.skipped.is_empty() {
            write!(f, ", skipped {} runs", self.skipped.len())?;
        }
        Ok(())
    }
}
