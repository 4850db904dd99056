//! Per-viewport navigation state: query point, zoom, and the 3D camera.
//!
//! The 3D camera is driven by spherical coordinates `(rho, theta, phi)`
//! around the query point; the Cartesian camera position and unit look
//! vector are derived values recomputed on every mutation that affects
//! camera geometry.

use glam::DVec3;

use crate::perspective::{Axis, Perspective};

/// Margin keeping `theta` away from the polar axis, where the look vector
/// becomes degenerate.
pub const THETA_MARGIN: f64 = 0.1;

/// Minimum orbit radius.
pub const MIN_RHO: f64 = 1.0;

/// Minimum 2D pixel size in cm.
pub const MIN_PIXEL_SIZE: f64 = 1e-5;

/// Navigation state for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    /// Query point: slice plane position in 2D views, look-at point in 3D.
    position: DVec3,
    /// Query point used by the previous render; pan direction and
    /// incremental renders are decided against it.
    last_position: DVec3,
    perspective: Perspective,
    /// 2D pixel size in cm.
    pixel_size: f64,
    /// 3D pixel size in cm (shared across viewports at the container level).
    pixel_size_3d: f64,
    /// Orbit radius of the 3D camera.
    rho: f64,
    /// Polar angle, kept within `[THETA_MARGIN, pi - THETA_MARGIN]`.
    theta: f64,
    /// Azimuthal angle, wrapped into `[0, 2*pi)`.
    phi: f64,
    /// Derived Cartesian camera position.
    camera: DVec3,
    /// Derived unit look direction from camera to query point.
    look: DVec3,
    /// Fixed roll angle.
    omega: f64,
    /// Azimuth of the previous 3D render, passed to the engine as an opaque
    /// incremental-render hint.
    last_render_phi: f32,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            last_position: DVec3::ZERO,
            perspective: Perspective::X,
            pixel_size: 0.1,
            pixel_size_3d: 0.1,
            rho: 10.0,
            theta: std::f64::consts::FRAC_PI_2,
            phi: 0.0,
            camera: DVec3::ZERO,
            look: DVec3::Z,
            omega: -std::f64::consts::FRAC_PI_2,
            last_render_phi: 0.0,
        }
    }
}

impl NavigationState {
    /// Creates the default navigation state (X slice through the origin).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current query point.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Returns the query point of the previous render.
    #[must_use]
    pub fn last_position(&self) -> DVec3 {
        self.last_position
    }

    /// Returns the active perspective.
    #[must_use]
    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Returns the 2D pixel size in cm.
    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Returns the 3D pixel size in cm.
    #[must_use]
    pub fn pixel_size_3d(&self) -> f64 {
        self.pixel_size_3d
    }

    /// Returns the orbit radius.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Returns the polar angle.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Returns the azimuthal angle.
    #[must_use]
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Returns the derived Cartesian camera position.
    #[must_use]
    pub fn camera(&self) -> DVec3 {
        self.camera
    }

    /// Returns the derived unit look direction.
    #[must_use]
    pub fn look(&self) -> DVec3 {
        self.look
    }

    /// Returns the fixed roll angle.
    #[must_use]
    pub fn roll(&self) -> f64 {
        self.omega
    }

    /// Returns the azimuth hint of the previous 3D render.
    #[must_use]
    pub fn last_render_phi(&self) -> f32 {
        self.last_render_phi
    }

    /// Sets one component of the query point. In the 3D view this moves the
    /// look-at point, so the derived camera is recomputed.
    pub fn set_position(&mut self, axis: Axis, value: f64) {
        set_component(&mut self.position, axis, value);
        if self.perspective.is_3d() {
            self.update_directions();
        }
    }

    /// Moves the query point along `axis` by `delta`.
    pub fn translate(&mut self, axis: Axis, delta: f64) {
        let current = component(self.position, axis);
        self.set_position(axis, current + delta);
    }

    /// Sets the orbit radius, floored at [`MIN_RHO`].
    pub fn set_rho(&mut self, rho: f64) {
        self.rho = rho.max(MIN_RHO);
        self.update_directions();
    }

    /// Sets the polar angle, clamped inside the polar margins.
    pub fn set_theta(&mut self, theta: f64) {
        self.theta = theta.clamp(THETA_MARGIN, std::f64::consts::PI - THETA_MARGIN);
        self.update_directions();
    }

    /// Sets the azimuthal angle, wrapped into `[0, 2*pi)`.
    pub fn set_phi(&mut self, phi: f64) {
        self.phi = phi.rem_euclid(std::f64::consts::TAU);
        self.update_directions();
    }

    /// Switches the active perspective. Entering the 3D view recomputes the
    /// derived camera; leaving it keeps the spherical values for re-entry.
    pub fn set_perspective(&mut self, perspective: Perspective) {
        self.perspective = perspective;
        if perspective.is_3d() {
            self.update_directions();
        }
    }

    /// Sets the 2D pixel size, floored at [`MIN_PIXEL_SIZE`].
    pub fn set_pixel_size(&mut self, pixel_size: f64) {
        self.pixel_size = pixel_size.max(MIN_PIXEL_SIZE);
    }

    /// Sets the 3D pixel size.
    pub fn set_pixel_size_3d(&mut self, pixel_size: f64) {
        self.pixel_size_3d = pixel_size.max(MIN_PIXEL_SIZE);
    }

    /// Shrinks the 2D pixel size by 10%, flooring at [`MIN_PIXEL_SIZE`].
    pub fn zoom_in(&mut self) {
        self.set_pixel_size(self.pixel_size * 0.9);
    }

    /// Grows the 2D pixel size by 10%.
    pub fn zoom_out(&mut self) {
        self.set_pixel_size(self.pixel_size * 1.1);
    }

    /// Recomputes the derived camera position and look direction from the
    /// spherical coordinates and query point:
    ///
    /// ```text
    /// camera = rho * (cos(phi) sin(theta), sin(phi) sin(theta), cos(theta))
    /// look   = normalize(position - camera)
    /// ```
    pub fn update_directions(&mut self) {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();

        self.camera = self.rho * DVec3::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta);

        // Degenerate only when the look-at point coincides with the camera;
        // keep the previous direction in that case.
        if let Some(look) = (self.position - self.camera).try_normalize() {
            self.look = look;
        }
    }

    /// Records that a render happened at the current query point. Subsequent
    /// pan decisions are made against this point.
    pub fn commit_render(&mut self) {
        self.last_position = self.position;
        if self.perspective.is_3d() {
            #[allow(clippy::cast_possible_truncation)]
            {
                self.last_render_phi = self.phi as f32;
            }
        }
    }
}

/// Reads one component of a vector by axis.
#[must_use]
pub fn component(v: DVec3, axis: Axis) -> f64 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

/// Writes one component of a vector by axis.
pub fn set_component(v: &mut DVec3, axis: Axis, value: f64) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_defaults() {
        let nav = NavigationState::default();
        assert_eq!(nav.position(), DVec3::ZERO);
        assert_eq!(nav.perspective(), Perspective::X);
        assert!((nav.rho() - 10.0).abs() < 1e-12);
        assert!((nav.theta() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(nav.look(), DVec3::Z);
        assert!((nav.roll() + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_camera_recompute() {
        let mut nav = NavigationState::default();
        nav.set_perspective(Perspective::ThreeD);

        // theta = pi/2, phi = 0 puts the camera on the +X axis
        assert!((nav.camera() - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-9);
        assert!((nav.look() - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-9);

        nav.set_phi(FRAC_PI_2);
        assert!((nav.camera() - DVec3::new(0.0, 10.0, 0.0)).length() < 1e-9);
        assert!((nav.look() - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_look_is_unit_length() {
        let mut nav = NavigationState::default();
        nav.set_perspective(Perspective::ThreeD);
        nav.set_position(Axis::X, 3.0);
        nav.set_position(Axis::Y, -2.0);
        nav.set_theta(0.7);
        assert!((nav.look().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_look_keeps_previous() {
        let mut nav = NavigationState::default();
        nav.set_perspective(Perspective::ThreeD);
        let before = nav.look();

        // Put the look-at point exactly on the camera
        let camera = nav.camera();
        nav.set_position(Axis::X, camera.x);
        nav.set_position(Axis::Y, camera.y);
        nav.set_position(Axis::Z, camera.z);
        assert_eq!(nav.look(), before);
    }

    #[test]
    fn test_commit_render() {
        let mut nav = NavigationState::default();
        nav.translate(Axis::Y, 5.0);
        assert_eq!(nav.last_position(), DVec3::ZERO);
        nav.commit_render();
        assert_eq!(nav.last_position(), DVec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_last_render_phi_updates_in_3d_only() {
        let mut nav = NavigationState::default();
        nav.set_phi(1.0);
        nav.commit_render();
        assert_eq!(nav.last_render_phi(), 0.0);

        nav.set_perspective(Perspective::ThreeD);
        nav.commit_render();
        assert!((f64::from(nav.last_render_phi()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_size_floor() {
        let mut nav = NavigationState::default();
        nav.set_pixel_size(0.1);
        for _ in 0..200 {
            nav.zoom_in();
        }
        assert!((nav.pixel_size() - MIN_PIXEL_SIZE).abs() < 1e-15);
        nav.zoom_out();
        assert!(nav.pixel_size() > MIN_PIXEL_SIZE);
    }

    proptest! {
        #[test]
        fn prop_theta_stays_clamped(theta in -100.0f64..100.0) {
            let mut nav = NavigationState::default();
            nav.set_theta(theta);
            prop_assert!(nav.theta() >= THETA_MARGIN);
            prop_assert!(nav.theta() <= PI - THETA_MARGIN);
        }

        #[test]
        fn prop_phi_stays_wrapped(phi in -100.0f64..100.0) {
            let mut nav = NavigationState::default();
            nav.set_phi(phi);
            prop_assert!(nav.phi() >= 0.0);
            prop_assert!(nav.phi() < TAU);
        }

        #[test]
        fn prop_rho_floored(rho in -100.0f64..100.0) {
            let mut nav = NavigationState::default();
            nav.set_rho(rho);
            prop_assert!(nav.rho() >= MIN_RHO);
        }
    }
}
