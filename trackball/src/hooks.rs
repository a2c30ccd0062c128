//! User hooks into the trackball behavior
use crate::event::KeyEvent;
use crate::report::PointerReport;

/// Override points for keymaps built on top of the trackball.
///
/// Every method has a pass-through default, implement only what you need.
///
/// # Example
/// ```rust
/// struct ReverseWheel;
///
/// impl TrackballHooks for ReverseWheel {
///     fn pointing_task(&mut self, mut report: PointerReport) -> PointerReport {
///         report.v = -report.v;
///         report
///     }
/// }
/// ```
pub trait TrackballHooks {
    /// Called for every decoded wheel step, return `false` to swallow it.
    fn encoder_update(&mut self, _index: u8, _clockwise: bool) -> bool {
        true
    }

    /// Last chance to modify the report before it's returned to the pointing device task.
    fn pointing_task(&mut self, report: PointerReport) -> PointerReport {
        report
    }

    /// Called for every key event, return `false` to stop the trackball from handling it.
    fn process_record(&mut self, _event: &KeyEvent) -> bool {
        true
    }

    fn pre_init(&mut self) {}

    fn post_init(&mut self) {}

    /// Called after the persisted config has been reset to defaults.
    fn eeconfig_init(&mut self) {}
}

/// Hooks that change nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl TrackballHooks for DefaultHooks {}
