//! TLV Record Format
//!
//! Layout per record:
//! ┌───────────┬──────────────┬──────────────────────────┐
//! │ tag (1B)  │ length (1B)  │ payload (length bytes)   │
//! └───────────┴──────────────┴──────────────────────────┘
//!
//! Record ditulis back-to-back tanpa padding dan tanpa trailer.
//! Payload di-copy apa adanya, tidak ada transform endianness.

use crate::error::TlvError;

/// Ukuran header: satu byte tag + satu byte length
pub const HEADER_SIZE: usize = 2;
/// Length byte hanya 8-bit
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;
/// Ukuran record terbesar yang bisa di-encode
pub const MAX_RECORD_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_LEN;

/// Record View: tag, length, dan referensi ke payload.
///
/// Tidak pernah memiliki byte payload. Saat push, payload dipinjam dari
/// caller dan di-copy ke buffer. Saat pop, payload dipinjam dari buffer
/// dan hanya valid sampai operasi mutasi berikutnya.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    tag: u8,
    len: u8,
    payload: &'a [u8],
}

impl<'a> Entry<'a> {
    /// Membungkus tag dan payload menjadi record.
    ///
    /// Length diambil dari panjang slice, jadi selalu konsisten dengan
    /// jumlah byte yang ditulis.
    #[inline(always)]
    pub fn new(tag: u8, payload: &'a [u8]) -> Result<Self, TlvError> {
        let len = u8::try_from(payload.len())
            .map_err(|_| TlvError::PayloadTooLarge { len: payload.len() })?;
        Ok(Self { tag, len, payload })
    }

    /// Caller harus sudah memastikan `payload.len() <= 255`.
    #[inline(always)]
    pub(crate) fn from_parts(tag: u8, payload: &'a [u8]) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD_LEN);
        Self {
            tag,
            len: payload.len() as u8,
            payload,
        }
    }

    #[inline(always)]
    pub fn tag(&self) -> u8 {
        self.tag
    }

    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Total ukuran ter-encode (header + payload)
    #[inline(always)]
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.len as usize
    }

    /// Copy payload keluar dari buffer sebelum buffer dimutasi lagi.
    ///
    /// Returns jumlah byte yang di-copy.
    pub fn copy_to(&self, dst: &mut [u8]) -> Result<usize, TlvError> {
        let needed = self.payload.len();
        if dst.len() < needed {
            return Err(TlvError::DestinationTooSmall {
                needed,
                available: dst.len(),
            });
        }
        dst[..needed].copy_from_slice(self.payload);
        Ok(needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(HEADER_SIZE, 2);
        assert_eq!(MAX_RECORD_SIZE, 257);
    }

    #[test]
    fn test_entry_len_follows_payload() {
        let entry = Entry::new(7, &[1, 2, 3]).unwrap();
        assert_eq!(entry.tag(), 7);
        assert_eq!(entry.len(), 3);
        assert_eq!(entry.encoded_len(), 5);
        assert_eq!(entry.payload(), &[1, 2, 3]);
    }

    #[test]
    fn test_entry_max_payload() {
        let payload = [0xAAu8; MAX_PAYLOAD_LEN];
        let entry = Entry::new(1, &payload).unwrap();
        assert_eq!(entry.len(), 255);

        let too_big = [0u8; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            Entry::new(1, &too_big),
            Err(TlvError::PayloadTooLarge { len: 256 })
        );
    }

    #[test]
    fn test_zero_length_entry() {
        let entry = Entry::new(3, &[]).unwrap();
        assert!(entry.is_empty());
        assert_eq!(entry.encoded_len(), HEADER_SIZE);
    }

    #[test]
    fn test_copy_to() {
        let entry = Entry::new(0, &[50, 50, 100, 100]).unwrap();

        let mut out = [0u8; 8];
        assert_eq!(entry.copy_to(&mut out), Ok(4));
        assert_eq!(&out[..4], &[50, 50, 100, 100]);

        let mut small = [0u8; 2];
        assert_eq!(
            entry.copy_to(&mut small),
            Err(TlvError::DestinationTooSmall {
                needed: 4,
                available: 2
            })
        );
        assert_eq!(small, [0, 0]);
    }
}
