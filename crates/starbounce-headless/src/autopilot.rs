use starbounce_core::sim::DrivenInput;
use starbounce_sandbox::Sandbox;

/// Steer the platform's center toward the star's center, moving at most
/// `speed * dt` this frame.
pub fn steer(sandbox: &Sandbox, speed: f32, dt: f32) -> DrivenInput {
    let step = speed * dt;
    if !step.is_finite() || step <= 0.0 {
        return DrivenInput::default();
    }
    let gap = sandbox.star().aabb().center().x - sandbox.platform().aabb().center().x;
    DrivenInput::from_axes(gap / step, 0.0, speed, dt)
}
