//! DPI and drag-scroll mode, with the DPI choice persisted across power cycles
use embedded_storage::Storage;

use crate::config::{DpiConfig, DragScrollCpi, DragScrollMode};
use crate::storage::{ConfigStore, TrackballEeconfig};

pub struct TrackballState<S: Storage> {
    dpi: DpiConfig,
    drag_scroll_mode: DragScrollMode,
    drag_scroll_cpi: DragScrollCpi,
    eeconfig: TrackballEeconfig,
    store: ConfigStore<S>,
    is_drag_scroll: bool,
}

impl<S: Storage> TrackballState<S> {
    /// `dpi` must have passed [`crate::config::TrackballConfig::validate`].
    pub fn new(
        dpi: DpiConfig,
        drag_scroll_mode: DragScrollMode,
        drag_scroll_cpi: DragScrollCpi,
        store: ConfigStore<S>,
    ) -> Self {
        let eeconfig = TrackballEeconfig::new().with_dpi_config(dpi.default_index);
        Self {
            dpi,
            drag_scroll_mode,
            drag_scroll_cpi,
            eeconfig,
            store,
            is_drag_scroll: false,
        }
    }

    /// Read the persisted config, reinitialize it if it's unreadable or out of range.
    ///
    /// Returns `true` when the config had to be reinitialized.
    pub fn load_or_init(&mut self) -> bool {
        match self.store.read() {
            Ok(eeconfig) if (eeconfig.dpi_config() as usize) < self.dpi.options.len() => {
                debug!("Loaded trackball config, dpi index: {}", eeconfig.dpi_config());
                self.eeconfig = eeconfig;
                false
            }
            Ok(eeconfig) => {
                warn!(
                    "Persisted dpi index {} is out of range, reinitializing",
                    eeconfig.dpi_config()
                );
                self.init_config();
                true
            }
            Err(e) => {
                warn!("Failed to read trackball config: {:?}, reinitializing", e);
                self.init_config();
                true
            }
        }
    }

    /// Reset to the default DPI and persist it.
    pub fn init_config(&mut self) {
        self.eeconfig = TrackballEeconfig::new().with_dpi_config(self.dpi.default_index);
        self.persist();
    }

    /// Step to the next DPI table entry and persist it, returns the new DPI.
    pub fn cycle_dpi(&mut self) -> u16 {
        let next = (self.dpi_index() as usize + 1) % self.dpi.options.len();
        self.eeconfig.set_dpi_config(next as u8);
        self.persist();
        self.current_dpi()
    }

    /// Update drag-scroll from a key edge, returns `true` if the mode changed.
    pub fn update_drag_scroll(&mut self, pressed: bool) -> bool {
        let next = match self.drag_scroll_mode {
            DragScrollMode::Momentary => pressed,
            DragScrollMode::Latching if pressed => !self.is_drag_scroll,
            DragScrollMode::Latching => self.is_drag_scroll,
        };
        let changed = next != self.is_drag_scroll;
        self.is_drag_scroll = next;
        changed
    }

    /// CPI that should be applied to the sensor in the current mode.
    pub fn effective_cpi(&self) -> u16 {
        let dpi = self.current_dpi();
        if !self.is_drag_scroll {
            return dpi;
        }
        match self.drag_scroll_cpi {
            DragScrollCpi::Fixed(cpi) => cpi,
            DragScrollCpi::Scaled(multiplier) => (dpi as f32 * multiplier) as u16,
        }
    }

    pub fn dpi_index(&self) -> u8 {
        self.eeconfig.dpi_config()
    }

    /// The DPI table entry currently selected
    pub fn current_dpi(&self) -> u16 {
        self.dpi.options[self.dpi_index() as usize]
    }

    pub fn is_drag_scroll(&self) -> bool {
        self.is_drag_scroll
    }

    pub fn eeconfig(&self) -> TrackballEeconfig {
        self.eeconfig
    }

    pub fn store(&mut self) -> &mut ConfigStore<S> {
        &mut self.store
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.write(self.eeconfig) {
            error!("Failed to save trackball config: {:?}", e);
        }
    }
}
