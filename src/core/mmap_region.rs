//! Memory-Mapped File Region untuk TLV Buffer
//!
//! Supplier region yang persisten: data di-mmap langsung ke virtual memory,
//! `TlvBuffer` menulis ke sana tanpa tahu bahwa di belakangnya ada file.
//!
//! Layout file:
//! ┌──────────────────────────────────────────────────────────┐
//! │ magic u64 LE │ capacity u32 LE │ occupied u32 LE (16 B)  │
//! ├──────────────────────────────────────────────────────────┤
//! │ data region (capacity bytes)                             │
//! └──────────────────────────────────────────────────────────┘

use memmap2::{MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::error::RegionError;

const MAGIC: u64 = 0x3130_4655_4256_4C54; // "TLVBUF01" little-endian
const HEADER_SIZE: usize = 16;

const MAGIC_RANGE: std::ops::Range<usize> = 0..8;
const CAPACITY_RANGE: std::ops::Range<usize> = 8..12;
const OCCUPIED_RANGE: std::ops::Range<usize> = 12..16;

/// Mmap-backed region untuk journal yang harus bertahan restart
pub struct MmapRegion {
    mmap: MmapMut,
    capacity: usize,
}

impl MmapRegion {
    /// Membuat atau membuka region file-backed
    ///
    /// # Arguments
    /// * `path` - Path ke file storage
    /// * `capacity` - Kapasitas data region dalam bytes
    ///
    /// # Panics
    /// Panic jika `capacity == 0`
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self, RegionError> {
        assert!(capacity > 0, "Capacity must be non-zero");
        if u32::try_from(capacity).is_err() {
            return Err(RegionError::CapacityTooLarge { capacity });
        }

        let path = path.as_ref();
        let total_size = HEADER_SIZE + capacity;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let existing = file.metadata()?.len();
        let fresh = existing == 0;

        if fresh {
            file.set_len(total_size as u64)?;
        } else if existing < HEADER_SIZE as u64 {
            return Err(RegionError::BadMagic { found: 0 });
        }

        // SAFETY: File dibuka read/write dan ukurannya minimal header;
        // region ini satu-satunya mapping milik proses ini.
        let mmap = unsafe { MmapOptions::new().map_mut(&file)? };

        let mut region = Self { mmap, capacity };

        if fresh {
            region.mmap[MAGIC_RANGE].copy_from_slice(&MAGIC.to_le_bytes());
            region.mmap[CAPACITY_RANGE].copy_from_slice(&(capacity as u32).to_le_bytes());
            region.write_occupied(0);
            debug!(path = %path.display(), capacity, "initialized TLV region");
            return Ok(region);
        }

        region.validate(existing)?;
        debug!(
            path = %path.display(),
            capacity,
            occupied = region.occupied(),
            "reopened TLV region"
        );

        Ok(region)
    }

    fn validate(&self, file_len: u64) -> Result<(), RegionError> {
        let found = u64::from_le_bytes(read_array(&self.mmap[MAGIC_RANGE]));
        if found != MAGIC {
            return Err(RegionError::BadMagic { found });
        }

        let stored = u32::from_le_bytes(read_array(&self.mmap[CAPACITY_RANGE])) as usize;
        if stored != self.capacity {
            return Err(RegionError::CapacityMismatch {
                stored,
                requested: self.capacity,
            });
        }

        let data_len = (file_len as usize).saturating_sub(HEADER_SIZE);
        if data_len < self.capacity {
            return Err(RegionError::CapacityMismatch {
                stored: data_len,
                requested: self.capacity,
            });
        }

        let occupied = self.occupied();
        if occupied >= self.capacity {
            return Err(RegionError::CorruptHeader {
                occupied,
                capacity: self.capacity,
            });
        }

        Ok(())
    }

    /// Kapasitas data region (tanpa header)
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Write cursor terakhir yang di-`commit`
    #[inline(always)]
    pub fn occupied(&self) -> usize {
        u32::from_le_bytes(read_array(&self.mmap[OCCUPIED_RANGE])) as usize
    }

    /// Data region, read-only
    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        &self.mmap[HEADER_SIZE..HEADER_SIZE + self.capacity]
    }

    /// Data region untuk di-bind ke `TlvBuffer`
    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.mmap[HEADER_SIZE..HEADER_SIZE + self.capacity]
    }

    /// Catat write cursor supaya bisa di-restore setelah reopen.
    ///
    /// # Panics
    /// Panic jika `occupied >= capacity`
    pub fn commit(&mut self, occupied: usize) {
        assert!(
            occupied < self.capacity,
            "occupied ({}) must be below capacity ({})",
            occupied,
            self.capacity
        );
        self.write_occupied(occupied);
        debug!(occupied, "committed TLV region cursor");
    }

    /// Sync mapping ke disk
    pub fn flush(&self) -> Result<(), RegionError> {
        self.mmap.flush()?;
        Ok(())
    }

    fn write_occupied(&mut self, occupied: usize) {
        self.mmap[OCCUPIED_RANGE].copy_from_slice(&(occupied as u32).to_le_bytes());
    }
}

fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}
