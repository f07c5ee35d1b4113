//! Zero-Allocation Encoder/Decoder
//!
//! Encode langsung ke slice milik caller, decode langsung dari slice
//! (payload dikembalikan sebagai view, tanpa copy).

use super::entry::{Entry, HEADER_SIZE};
use crate::error::TlvError;

/// Tulis satu record ke `dst`.
///
/// `dst` harus persis sepanjang `entry.encoded_len()`.
#[inline(always)]
pub(crate) fn encode_record(dst: &mut [u8], entry: &Entry<'_>) {
    debug_assert_eq!(dst.len(), entry.encoded_len());

    dst[0] = entry.tag();
    dst[1] = entry.len();
    dst[HEADER_SIZE..].copy_from_slice(entry.payload());
}

/// Baca satu record dari `window` mulai di `pos`.
///
/// `window` adalah byte terisi saja; length byte yang menunjuk melewati
/// akhir window dilaporkan sebagai `Corrupt`, bukan dipercaya.
/// Returns record dan posisi awal record berikutnya.
#[inline(always)]
pub(crate) fn decode_record(window: &[u8], pos: usize) -> Result<(Entry<'_>, usize), TlvError> {
    let remaining = window.len().saturating_sub(pos);
    if remaining < HEADER_SIZE {
        return Err(TlvError::Empty);
    }

    let tag = window[pos];
    let declared = window[pos + 1] as usize;

    let payload_start = pos + HEADER_SIZE;
    let available = window.len() - payload_start;
    if declared > available {
        return Err(TlvError::Corrupt {
            declared,
            remaining: available,
        });
    }

    let payload_end = payload_start + declared;
    let entry = Entry::from_parts(tag, &window[payload_start..payload_end]);

    Ok((entry, payload_end))
}

/// Streaming decoder untuk byte stream yang sudah selesai
/// (misalnya yang dikirim transport ke sisi lain).
///
/// Berhenti setelah error pertama.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    bytes: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Records<'a> {
    /// Membuat decoder dari buffer
    #[inline(always)]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::starting_at(bytes, 0)
    }

    #[inline(always)]
    pub(crate) fn starting_at(bytes: &'a [u8], pos: usize) -> Self {
        Self {
            bytes,
            pos,
            done: false,
        }
    }

    /// Offset record berikutnya
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Remaining bytes
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Entry<'a>, TlvError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let remaining = self.remaining();
        if remaining == 0 {
            return None;
        }
        if remaining < HEADER_SIZE {
            self.done = true;
            return Some(Err(TlvError::Truncated { remaining }));
        }

        match decode_record(self.bytes, self.pos) {
            Ok((entry, next)) => {
                self.pos = next;
                Some(Ok(entry))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
