//! Core module: TLV FIFO Buffer dengan region milik caller
//!
//! Prinsip desain:
//! - No-Allocation: Region disediakan caller, buffer hanya memegang cursor
//! - Zero-Copy: Pop mengembalikan view ke payload di region
//! - Persistence (opsional): Region bisa berasal dari file mmap

mod mmap_region;
mod tlv_buffer;

pub use mmap_region::MmapRegion;
pub use tlv_buffer::{Drain, TlvBuffer};
