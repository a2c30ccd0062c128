//! Drag-scroll: pointer motion redirected into scroll output
use crate::config::DragScrollConfig;
use crate::report::PointerReport;

/// Accumulates ball motion and converts it into scroll units.
///
/// The remainder of each division is kept, so motion smaller than a denominator is delayed, never
/// dropped. Scroll that doesn't fit into the report's `i8` range stays accumulated as well and is
/// sent on the following ticks. Unless the report saturated, `|acc| < denominator` holds on both
/// axes after every conversion.
#[derive(Clone, Debug)]
pub struct DragScroll {
    config: DragScrollConfig,
    accumulated_x: i32,
    accumulated_y: i32,
}

impl DragScroll {
    pub fn new(config: DragScrollConfig) -> Self {
        Self {
            config,
            accumulated_x: 0,
            accumulated_y: 0,
        }
    }

    /// Convert the motion of `report` into scroll, the report's x/y are always consumed.
    pub fn convert(&mut self, mut report: PointerReport) -> PointerReport {
        let mut x = report.x as i32;
        let mut y = report.y as i32;

        // If one direction is much more than the other, remove the other one.
        // Signed comparison, the second check sees the result of the first.
        let mult = self.config.rubberband_mult as i32;
        if x > y * mult {
            y = 0;
        }
        if y > x * mult {
            x = 0;
        }

        self.accumulated_x = self.accumulated_x.saturating_add(x);
        if self.config.invert {
            self.accumulated_y = self.accumulated_y.saturating_add(y);
        } else {
            self.accumulated_y = self.accumulated_y.saturating_sub(y);
        }

        // Divide the total movement by the denominators to control the speed
        let denominator_x = self.config.denominator_x.get() as i32;
        let denominator_y = self.config.denominator_y.get() as i32;
        let div_x = self.accumulated_x / denominator_x;
        let div_y = self.accumulated_y / denominator_y;

        // Only drain what made it into the report
        let (emitted_x, emitted_y) = report.add_scroll(div_x, div_y);
        self.accumulated_x -= emitted_x * denominator_x;
        self.accumulated_y -= emitted_y * denominator_y;

        report.x = 0;
        report.y = 0;
        report
    }

    /// Current `(x, y)` remainders
    pub fn accumulated(&self) -> (i32, i32) {
        (self.accumulated_x, self.accumulated_y)
    }

    pub fn config(&self) -> &DragScrollConfig {
        &self.config
    }
}
