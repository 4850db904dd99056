//! Input bindings: raw keys to logical navigation actions.
//!
//! Device bindings and navigation effects are decoupled: a [`Key`] resolves
//! through the rebindable [`KeyBindings`] table to one [`Action`], and the
//! viewport maps `(perspective, action)` to its effect. Nothing outside this
//! module knows which physical key triggered an action.

use std::collections::HashMap;

use geoview_core::Axis;

/// A logical key identifier, independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// A printable key; letters are matched case-insensitively.
    Char(char),
}

/// A logical navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the query point (2D) or look-at point (3D) up.
    PanUp,
    /// Move the query point (2D) or look-at point (3D) down.
    PanDown,
    /// Move the query point (2D) or look-at point (3D) left.
    PanLeft,
    /// Move the query point (2D) or look-at point (3D) right.
    PanRight,
    /// Pan in 2D; orbit the camera up (decrease theta) in 3D.
    OrbitUp,
    /// Pan in 2D; orbit the camera down (increase theta) in 3D.
    OrbitDown,
    /// Pan in 2D; orbit the camera left (increase phi) in 3D.
    OrbitLeft,
    /// Pan in 2D; orbit the camera right (decrease phi) in 3D.
    OrbitRight,
    /// Move along the view normal (2D) or shrink the orbit radius (3D).
    Forward,
    /// Move against the view normal (2D) or grow the orbit radius (3D).
    Backward,
    /// Shrink the 2D pixel size; request a global 3D zoom-in in 3D.
    ZoomIn,
    /// Grow the 2D pixel size; request a global 3D zoom-out in 3D.
    ZoomOut,
    /// Switch to the 2D slice view perpendicular to the axis.
    SetPerspective(Axis),
    /// Toggle between material and body coloring.
    ToggleView,
}

/// Rebindable key-to-action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Key, Action>,
}

impl Default for KeyBindings {
    /// The default layout: WASD pans, arrows pan/orbit, F/B move along the
    /// view normal, `+`/`-` zoom, X/Y/Z pick the slice axis, M toggles the
    /// material/body view.
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Key::ArrowUp, Action::OrbitUp);
        map.insert(Key::ArrowDown, Action::OrbitDown);
        map.insert(Key::ArrowLeft, Action::OrbitLeft);
        map.insert(Key::ArrowRight, Action::OrbitRight);
        map.insert(Key::Char('w'), Action::PanUp);
        map.insert(Key::Char('s'), Action::PanDown);
        map.insert(Key::Char('a'), Action::PanLeft);
        map.insert(Key::Char('d'), Action::PanRight);
        map.insert(Key::Char('f'), Action::Forward);
        map.insert(Key::Char('b'), Action::Backward);
        map.insert(Key::Char('+'), Action::ZoomIn);
        map.insert(Key::Char('-'), Action::ZoomOut);
        map.insert(Key::Char('x'), Action::SetPerspective(Axis::X));
        map.insert(Key::Char('y'), Action::SetPerspective(Axis::Y));
        map.insert(Key::Char('z'), Action::SetPerspective(Axis::Z));
        map.insert(Key::Char('m'), Action::ToggleView);
        Self { map }
    }
}

impl KeyBindings {
    /// Creates the default binding table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a key to its bound action, if any.
    #[must_use]
    pub fn action(&self, key: Key) -> Option<Action> {
        self.map.get(&normalize(key)).copied()
    }

    /// Binds a key to an action, replacing any previous binding of that key.
    pub fn bind(&mut self, key: Key, action: Action) {
        self.map.insert(normalize(key), action);
    }

    /// Removes the binding of a key.
    pub fn unbind(&mut self, key: Key) {
        self.map.remove(&normalize(key));
    }
}

/// Letter keys match regardless of case.
fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
