//! View modes, axes, and pan directions.

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Returns the two in-plane axes `(horizontal, vertical)` of the slice
    /// perpendicular to this axis.
    ///
    /// An X slice shows Y horizontally and Z vertically, a Y slice shows X/Z,
    /// a Z slice shows X/Y.
    #[must_use]
    pub fn plane_axes(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// The active view mode: one of three orthogonal 2D slice views or the
/// 3D perspective projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Perspective {
    /// Slice perpendicular to the X axis.
    #[default]
    X,
    /// Slice perpendicular to the Y axis.
    Y,
    /// Slice perpendicular to the Z axis.
    Z,
    /// 3D perspective projection.
    ThreeD,
}

impl Perspective {
    /// Returns the slice axis, or `None` for the 3D view.
    #[must_use]
    pub fn axis(self) -> Option<Axis> {
        match self {
            Perspective::X => Some(Axis::X),
            Perspective::Y => Some(Axis::Y),
            Perspective::Z => Some(Axis::Z),
            Perspective::ThreeD => None,
        }
    }

    /// Returns whether this is the 3D perspective view.
    #[must_use]
    pub fn is_3d(self) -> bool {
        self == Perspective::ThreeD
    }

    /// Converts from a u32 index (used in UI selectors) to `Perspective`.
    /// Order: 0=X, 1=Y, 2=Z, 3=3D
    #[must_use]
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Perspective::Y,
            2 => Perspective::Z,
            3 => Perspective::ThreeD,
            _ => Perspective::X,
        }
    }

    /// Converts to a u32 index (used in UI selectors).
    #[must_use]
    pub fn to_index(self) -> u32 {
        match self {
            Perspective::X => 0,
            Perspective::Y => 1,
            Perspective::Z => 2,
            Perspective::ThreeD => 3,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Perspective::X => "X",
            Perspective::Y => "Y",
            Perspective::Z => "Z",
            Perspective::ThreeD => "3D",
        }
    }
}

impl From<Axis> for Perspective {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Perspective::X,
            Axis::Y => Perspective::Y,
            Axis::Z => Perspective::Z,
        }
    }
}

/// Direction of an incremental pan render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Frame contents shift right; new column enters on the left.
    Left,
    /// Frame contents shift left; new column enters on the right.
    Right,
    /// Frame contents shift down; new row enters on top.
    Up,
    /// Frame contents shift up; new row enters on the bottom.
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for index in 0..4 {
            assert_eq!(Perspective::from_index(index).to_index(), index);
        }
        // Out of range falls back to X
        assert_eq!(Perspective::from_index(17), Perspective::X);
    }

    #[test]
    fn test_axis_of_perspective() {
        assert_eq!(Perspective::Y.axis(), Some(Axis::Y));
        assert_eq!(Perspective::ThreeD.axis(), None);
        assert!(Perspective::ThreeD.is_3d());
        assert!(!Perspective::Z.is_3d());
    }

    #[test]
    fn test_plane_axes() {
        assert_eq!(Axis::X.plane_axes(), (Axis::Y, Axis::Z));
        assert_eq!(Axis::Y.plane_axes(), (Axis::X, Axis::Z));
        assert_eq!(Axis::Z.plane_axes(), (Axis::X, Axis::Y));
    }
}
