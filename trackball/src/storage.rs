//! Persisted trackball configuration
use bitfield_struct::bitfield;
use byteorder::{ByteOrder, LittleEndian};
use embedded_storage::Storage;

/// Trackball configuration word which is saved in the storage.
///
/// A blank storage reads back as all ones, which decodes to an out of range DPI index.
#[bitfield(u32, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(PartialEq, Eq)]
pub struct TrackballEeconfig {
    /// Index into the DPI table
    #[bits(8)]
    pub dpi_config: u8,
    #[bits(24)]
    _reserved: u32,
}

/// Errors of the config storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    Read,
    Write,
}

/// Reads and writes [`TrackballEeconfig`] at a fixed offset of any `embedded-storage` device.
pub struct ConfigStore<S: Storage> {
    storage: S,
    offset: u32,
}

impl<S: Storage> ConfigStore<S> {
    const SIZE: usize = 4;

    pub fn new(storage: S, offset: u32) -> Self {
        Self { storage, offset }
    }

    pub fn read(&mut self) -> Result<TrackballEeconfig, StorageError> {
        let mut buf = [0u8; Self::SIZE];
        self.storage
            .read(self.offset, &mut buf)
            .map_err(|_| StorageError::Read)?;
        Ok(TrackballEeconfig::from_bits(LittleEndian::read_u32(&buf)))
    }

    pub fn write(&mut self, config: TrackballEeconfig) -> Result<(), StorageError> {
        let mut buf = [0u8; Self::SIZE];
        LittleEndian::write_u32(&mut buf, config.into_bits());
        self.storage
            .write(self.offset, &buf)
            .map_err(|_| StorageError::Write)
    }

    /// Returns a reference to the underlying storage.
    pub fn storage(&mut self) -> &mut S {
        &mut self.storage
    }
}
