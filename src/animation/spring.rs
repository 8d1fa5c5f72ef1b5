use crate::foundation::core::Fps;

/// Physical spring parameters for a 0 -> 1 settle animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass of the moving body.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Damping coefficient.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Spring stiffness.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Clamp the value to the target instead of overshooting.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_mass() -> f64 {
    1.0
}

fn default_damping() -> f64 {
    15.0
}

fn default_stiffness() -> f64 {
    200.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            damping: default_damping(),
            stiffness: default_stiffness(),
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Spring value `frame` frames after release, starting at rest at 0 and settling on 1.
    ///
    /// Closed form of the damped oscillator; negative frames are still at rest.
    pub fn value_at(&self, frame: f64, fps: Fps) -> f64 {
        if !frame.is_finite() || frame <= 0.0 {
            return 0.0;
        }
        let t = fps.frames_f64_to_secs(frame);
        let m = self.mass.max(1e-6);
        let k = self.stiffness.max(1e-6);
        let c = self.damping.max(0.0);

        let omega0 = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());

        // Displacement from the target, x(0) = -1 and x'(0) = 0.
        let x = if (zeta - 1.0).abs() < 1e-9 {
            -(1.0 + omega0 * t) * (-omega0 * t).exp()
        } else if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega0 * t).exp();
            -decay * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            let c1 = r2 / (r1 - r2);
            let c2 = -r1 / (r1 - r2);
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        };

        let v = 1.0 + x;
        if self.overshoot_clamping {
            v.min(1.0)
        } else {
            v
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
