//! Boundary self-test records.
//!
//! The engine's per-axis boundary walk reports every pixel transition whose
//! observed `(body, material)` pair after crossing a boundary disagrees with
//! the geometry's own expected values. The viewport surfaces these findings
//! verbatim; they are domain-level results, not viewer errors.

use std::fmt;

use glam::DVec3;

/// One geometry-consistency violation found by the boundary self-test.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryError {
    /// Start point of the crossing.
    pub from: DVec3,
    /// End point of the crossing.
    pub to: DVec3,
    /// `(body, material)` pair before the crossing.
    pub initial: (u32, u32),
    /// `(body, material)` pair observed after the crossing.
    pub observed: (u32, u32),
    /// `(body, material)` pair the geometry expects after the crossing.
    pub expected: (u32, u32),
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Error going from ({:.5e},{:.5e},{:.5e}) to ({:.5e},{:.5e},{:.5e}): ",
            self.from.x, self.from.y, self.from.z, self.to.x, self.to.y, self.to.z
        )?;
        writeln!(
            f,
            "   - Initial body and material  : {:3} {:3}",
            self.initial.0, self.initial.1
        )?;
        writeln!(
            f,
            "   - Final body and material    : {:3} {:3}",
            self.observed.0, self.observed.1
        )?;
        write!(
            f,
            "   - Expected body and material : {:3} {:3}",
            self.expected.0, self.expected.1
        )
    }
}

/// Formats a self-test result summary for display.
#[must_use]
pub fn format_report(errors: &[BoundaryError], elapsed_ms: u64) -> String {
    if errors.is_empty() {
        return format!("Test completed in {elapsed_ms} milliseconds.\n No errors found at this plane\n");
    }

    let mut report = format!("Test completed in {elapsed_ms} milliseconds.\n\n");
    for error in errors {
        report.push_str(&error.to_string());
        report.push('\n');
    }
    report
}
