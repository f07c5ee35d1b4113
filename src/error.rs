//! Error types untuk TLV buffer dan mapped region.
//!
//! Kondisi recoverable (penuh, kosong, korup) dikembalikan sebagai `Result`.
//! Misuse (region kosong, cursor mustahil) tetap panic lewat `assert!`.

use std::io;
use thiserror::Error;

/// Error dari encode/decode TLV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TlvError {
    /// Push tidak muat: buffer state tidak berubah.
    #[error("Buffer full: need {needed} bytes, {available} free")]
    Full {
        /// Ukuran record ter-encode (header + payload).
        needed: usize,
        /// Byte bebas saat push dicoba.
        available: usize,
    },

    /// Pop tanpa header utuh yang tersisa.
    #[error("Buffer empty")]
    Empty,

    /// Length byte menunjuk melewati data yang terisi.
    #[error("Corrupt record: declared {declared} payload bytes, {remaining} remaining")]
    Corrupt {
        /// Panjang payload menurut length byte.
        declared: usize,
        /// Byte terisi setelah header.
        remaining: usize,
    },

    /// Stream eksternal berakhir di tengah header.
    #[error("Truncated header: {remaining} trailing bytes")]
    Truncated {
        /// Sisa byte yang tidak cukup untuk satu header.
        remaining: usize,
    },

    /// Payload lebih dari 255 bytes tidak bisa di-encode.
    #[error("Payload too large: {len} bytes (max 255)")]
    PayloadTooLarge {
        /// Panjang payload yang ditolak.
        len: usize,
    },

    /// Tujuan copy lebih kecil dari payload.
    #[error("Destination too small: need {needed} bytes, have {available}")]
    DestinationTooSmall {
        /// Panjang payload.
        needed: usize,
        /// Panjang slice tujuan.
        available: usize,
    },
}

/// Error dari file-backed region.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Underlying I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// The source I/O error.
        #[from]
        source: io::Error,
    },

    /// File ada tapi header bukan milik tlvbuf.
    #[error("Bad magic: {found:#018x}")]
    BadMagic {
        /// Magic yang ditemukan di file.
        found: u64,
    },

    /// File dibuka ulang dengan kapasitas berbeda.
    #[error("Capacity mismatch: file has {stored} bytes, requested {requested}")]
    CapacityMismatch {
        /// Kapasitas tercatat di header.
        stored: usize,
        /// Kapasitas yang diminta caller.
        requested: usize,
    },

    /// Kapasitas tidak muat di field header 32-bit.
    #[error("Capacity too large: {capacity} bytes")]
    CapacityTooLarge {
        /// Kapasitas yang diminta.
        capacity: usize,
    },

    /// Cursor tercatat tidak konsisten dengan kapasitas.
    #[error("Corrupt header: occupied {occupied} >= capacity {capacity}")]
    CorruptHeader {
        /// Write cursor tercatat.
        occupied: usize,
        /// Kapasitas region.
        capacity: usize,
    },
}
