//! Pointer report passed through the trackball pipeline on every tick.
use usbd_hid::descriptor::MouseReport;

/// Per-tick pointer report, as handed over by the pointing device task.
///
/// Motion is kept at sensor resolution (`i16`), scroll at HID resolution (`i8`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerReport {
    pub buttons: u8,
    pub x: i16,
    pub y: i16,
    /// Vertical scroll
    pub v: i8,
    /// Horizontal scroll
    pub h: i8,
}

impl PointerReport {
    /// A report carrying only a vertical scroll delta.
    pub fn scroll(v: i8) -> Self {
        Self {
            v,
            ..Default::default()
        }
    }

    /// Add to the scroll axes, saturating at the HID limits.
    ///
    /// Returns the `(h, v)` amounts that were actually added.
    pub fn add_scroll(&mut self, h: i32, v: i32) -> (i32, i32) {
        let new_h = (self.h as i32).saturating_add(h).clamp(i8::MIN as i32, i8::MAX as i32);
        let new_v = (self.v as i32).saturating_add(v).clamp(i8::MIN as i32, i8::MAX as i32);
        let added = (new_h - self.h as i32, new_v - self.v as i32);
        self.h = new_h as i8;
        self.v = new_v as i8;
        added
    }
}

impl From<PointerReport> for MouseReport {
    fn from(report: PointerReport) -> Self {
        MouseReport {
            buttons: report.buttons,
            x: report.x.clamp(i8::MIN as i16, i8::MAX as i16) as i8,
            y: report.y.clamp(i8::MIN as i16, i8::MAX as i16) as i8,
            wheel: report.v,
            pan: report.h,
        }
    }
}
