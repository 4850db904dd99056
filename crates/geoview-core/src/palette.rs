//! The shared classification color palette.
//!
//! A single process-wide table of 60 RGB triples maps material or body ids to
//! display colors. Every viewport's compositor reads the same table, so it is
//! passed around explicitly as a [`SharedPalette`] rather than living in a
//! global.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::error::{GeoViewError, Result};

/// Number of palette entries. Classification ids at or beyond this count are
/// displayed as the white out-of-range sentinel.
pub const PALETTE_SIZE: usize = 60;

/// The palette, shared by all viewports and guarded for read-mostly access.
pub type SharedPalette = Arc<RwLock<Palette>>;

/// A fixed-size ordered table of RGB triples indexed by material or body id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: default_table(),
        }
    }
}

impl Palette {
    /// Creates the default procedurally generated palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a default palette in the shared handle injected into viewports.
    #[must_use]
    pub fn new_shared() -> SharedPalette {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Returns the RGB triple for `id`, or `None` when the id is out of range.
    #[must_use]
    pub fn color(&self, id: u32) -> Option<[u8; 3]> {
        self.colors.get(id as usize).copied()
    }

    /// Sets the RGB triple for `id`. Out-of-range ids are rejected with a
    /// warning.
    pub fn set_color(&mut self, id: u32, rgb: [u8; 3]) {
        if let Some(entry) = self.colors.get_mut(id as usize) {
            *entry = rgb;
        } else {
            log::warn!("palette index {id} out of range, ignoring");
        }
    }

    /// Resets all entries to the default table.
    pub fn reset(&mut self) {
        self.colors = default_table();
    }

    /// Loads palette entries from a plain-text file, one `index r g b` line
    /// per entry.
    ///
    /// Malformed or out-of-range lines are skipped with a warning; the load
    /// always completes and entries not mentioned in the file keep their
    /// previous color.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| {
            GeoViewError::Palette(format!("cannot open '{}': {e}", path.display()))
        })?;

        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some((index, rgb)) if index < PALETTE_SIZE => {
                    self.colors[index] = rgb;
                }
                _ => {
                    log::warn!(
                        "skipping malformed palette line {} in '{}': '{}'",
                        lineno + 1,
                        path.display(),
                        line
                    );
                }
            }
        }
        Ok(())
    }

    /// Saves all 60 entries to a plain-text file in the `index r g b` format
    /// read back by [`Palette::load`].
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;
        for (index, rgb) in self.colors.iter().enumerate() {
            writeln!(file, "{index} {} {} {}", rgb[0], rgb[1], rgb[2])?;
        }
        Ok(())
    }
}

/// Parses one `index r g b` palette line.
fn parse_line(line: &str) -> Option<(usize, [u8; 3])> {
    let mut fields = line.split_whitespace();
    let index: usize = fields.next()?.parse().ok()?;
    let r: u8 = fields.next()?.parse().ok()?;
    let g: u8 = fields.next()?.parse().ok()?;
    let b: u8 = fields.next()?.parse().ok()?;
    // Trailing junk invalidates the line
    if fields.next().is_some() {
        return None;
    }
    Some((index, [r, g, b]))
}

/// Generates the default palette table.
///
/// Colors come in rows of 14: each row starts at a gray base of `100 * row`
/// (stored with u8 truncation) and walks seven ramp segments of two 50-unit
/// steps each through the RGB channels. Entries are stored only while the
/// following slot is still in range, which leaves the final slot black.
#[allow(clippy::cast_possible_truncation)]
fn default_table() -> [[u8; 3]; PALETTE_SIZE] {
    const BASE_INCREMENT_PER_ROW: u32 = 100;
    const BASE_STEPS: u32 = 2;
    const STEP_INCREMENT: u32 = BASE_INCREMENT_PER_ROW / BASE_STEPS;
    const COLORS_PER_ROW: usize = 7 * BASE_STEPS as usize;
    const N_ROWS: usize = 1 + PALETTE_SIZE / COLORS_PER_ROW;

    let mut table = [[0u8; 3]; PALETTE_SIZE];
    let mut slot = 0usize;

    let mut push = |table: &mut [[u8; 3]; PALETTE_SIZE], slot: &mut usize, rgb: [u32; 3]| {
        let index = *slot;
        *slot += 1;
        if *slot < PALETTE_SIZE {
            table[index] = [rgb[0] as u8, rgb[1] as u8, rgb[2] as u8];
        }
    };

    for row in 0..N_ROWS {
        let base = BASE_INCREMENT_PER_ROW * row as u32;
        let (mut r, mut g, mut b) = (base, base, base);

        // Row base entry
        table[slot] = [r as u8, g as u8, b as u8];
        slot += 1;

        // (channel, up?) ramp segments; the last one is a single step
        for _ in 0..BASE_STEPS {
            r += STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
        for _ in 0..BASE_STEPS {
            g += STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
        for _ in 0..BASE_STEPS {
            r -= STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
        for _ in 0..BASE_STEPS {
            b += STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
        for _ in 0..BASE_STEPS {
            g -= STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
        for _ in 0..BASE_STEPS {
            r += STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
        for _ in 0..BASE_STEPS - 1 {
            b -= STEP_INCREMENT;
            push(&mut table, &mut slot, [r, g, b]);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let palette = Palette::default();

        // Gray row bases at the start of each 14-color row
        assert_eq!(palette.color(0), Some([0, 0, 0]));
        assert_eq!(palette.color(14), Some([100, 100, 100]));
        assert_eq!(palette.color(28), Some([200, 200, 200]));

        // First ramp steps of row 0: red rises by 50 per step
        assert_eq!(palette.color(1), Some([50, 0, 0]));
        assert_eq!(palette.color(2), Some([100, 0, 0]));
        assert_eq!(palette.color(3), Some([100, 50, 0]));

        // Row 4 base 400 truncates to 144
        assert_eq!(palette.color(56), Some([144, 144, 144]));

        // Generator guard leaves the final slot black
        assert_eq!(palette.color(59), Some([0, 0, 0]));

        // Out of range
        assert_eq!(palette.color(60), None);
        assert_eq!(palette.color(1000), None);
    }

    #[test]
    fn test_set_color() {
        let mut palette = Palette::default();
        palette.set_color(5, [10, 20, 30]);
        assert_eq!(palette.color(5), Some([10, 20, 30]));

        // Out-of-range writes are rejected, nothing changes
        let before = palette.clone();
        palette.set_color(60, [1, 2, 3]);
        assert_eq!(palette, before);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("3 10 20 30"), Some((3, [10, 20, 30])));
        assert_eq!(parse_line("  3\t10 20 30 "), Some((3, [10, 20, 30])));
        assert_eq!(parse_line("3 10 20"), None);
        assert_eq!(parse_line("3 10 20 300"), None);
        assert_eq!(parse_line("3 10 20 30 40"), None);
        assert_eq!(parse_line("x 10 20 30"), None);
        assert_eq!(parse_line("3 10 -1 30"), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("geoview_palette_round_trip.txt");

        let mut palette = Palette::default();
        palette.set_color(0, [1, 2, 3]);
        palette.set_color(59, [250, 251, 252]);
        palette.save(&path).unwrap();

        let mut reloaded = Palette::default();
        reloaded.load(&path).unwrap();
        assert_eq!(reloaded, palette);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_skips_bad_lines() {
        let dir = std::env::temp_dir();
        let path = dir.join("geoview_palette_bad_lines.txt");
        std::fs::write(&path, "5 10 20 30\nnot a line\n99 1 2 3\n7 1 2\n6 7 8 9\n").unwrap();

        let mut palette = Palette::default();
        palette.load(&path).unwrap();
        assert_eq!(palette.color(5), Some([10, 20, 30]));
        assert_eq!(palette.color(6), Some([7, 8, 9]));
        // Untouched entry keeps its default
        assert_eq!(palette.color(7), Palette::default().color(7));

        std::fs::remove_file(&path).ok();
    }
}
