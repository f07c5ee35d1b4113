//! Fixed-Capacity TLV FIFO Buffer
//!
//! Region dimiliki caller, buffer hanya menyimpan dua cursor:
//! - `tail`: byte bebas pertama, naik saat push
//! - `head`: byte berikutnya yang dibaca, naik saat pop
//!
//! Invariant: `head <= tail < capacity`. Byte `[0, tail)` selalu berisi
//! rangkaian record yang valid, jadi `reset_head` bisa replay semuanya.
//! Tidak ada alokasi, tidak ada locking, tidak ada logging.

use crate::error::TlvError;
use crate::protocol::{decode_record, encode_record, Entry, Records};

/// TLV FIFO di atas region `&mut [u8]` milik caller.
///
/// Single-owner, tidak thread-safe: bungkus dengan satu `Mutex` jika ada
/// beberapa producer/consumer.
#[derive(Debug)]
pub struct TlvBuffer<'a> {
    mem: &'a mut [u8],
    head: usize,
    tail: usize,
}

impl<'a> TlvBuffer<'a> {
    /// Bind buffer ke region; kedua cursor mulai dari nol.
    ///
    /// # Panics
    /// Panic jika region kosong
    pub fn new(mem: &'a mut [u8]) -> Self {
        assert!(!mem.is_empty(), "TLV region must not be empty");

        Self {
            mem,
            head: 0,
            tail: 0,
        }
    }

    /// Bind ulang ke region yang sudah berisi `occupied` byte ter-encode,
    /// misalnya file mmap yang dibuka lagi. Head mulai dari nol.
    ///
    /// Isi region tidak divalidasi di sini; record korup terdeteksi saat pop.
    ///
    /// # Panics
    /// Panic jika region kosong atau `occupied >= capacity`
    pub fn with_occupied(mem: &'a mut [u8], occupied: usize) -> Self {
        let mut buf = Self::new(mem);
        assert!(
            occupied < buf.mem.len(),
            "occupied ({}) must be below capacity ({})",
            occupied,
            buf.mem.len()
        );
        buf.tail = occupied;
        buf
    }

    /// Push(FIFO) satu record.
    ///
    /// Berhasil hanya jika `tail + entry_size < capacity` (strict): byte
    /// terakhir region tidak pernah disentuh oleh tail yang penuh. Ini
    /// menjaga kompatibilitas dengan producer lain format ini.
    /// Jika gagal, state tidak berubah.
    #[inline(always)]
    pub fn push(&mut self, entry: Entry<'_>) -> Result<(), TlvError> {
        let needed = entry.encoded_len();

        let new_tail = match self.tail.checked_add(needed) {
            Some(new_tail) if new_tail < self.mem.len() => new_tail,
            _ => {
                return Err(TlvError::Full {
                    needed,
                    available: self.free(),
                })
            }
        };

        encode_record(&mut self.mem[self.tail..new_tail], &entry);
        self.tail = new_tail;

        Ok(())
    }

    /// Shortcut untuk `push(Entry::new(tag, payload)?)`
    #[inline(always)]
    pub fn push_raw(&mut self, tag: u8, payload: &[u8]) -> Result<(), TlvError> {
        self.push(Entry::new(tag, payload)?)
    }

    /// Pop(FIFO) record berikutnya dari head.
    ///
    /// Payload adalah view ke region (zero-copy) dan meminjam buffer,
    /// jadi tidak bisa dipakai setelah operasi mutasi berikutnya.
    /// Length byte yang melewati tail menghasilkan `Corrupt` dan head tidak
    /// bergerak.
    #[inline(always)]
    pub fn pop(&mut self) -> Result<Entry<'_>, TlvError> {
        let window = &self.mem[..self.tail];
        let (entry, next) = decode_record(window, self.head)?;
        self.head = next;

        Ok(entry)
    }

    /// Pop semua record yang tersisa.
    ///
    /// Head ikut maju untuk setiap record yang di-yield. Iterator berhenti
    /// saat buffer habis atau setelah error pertama.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain {
            records: Records::starting_at(&self.mem[..self.tail], self.head),
            head: &mut self.head,
        }
    }

    /// Head kembali ke nol; record yang sudah di-pop bisa di-pop lagi.
    #[inline(always)]
    pub fn reset_head(&mut self) {
        self.head = 0;
    }

    /// Kosongkan buffer. Byte tidak di-nol-kan, hanya dilupakan.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Alias untuk `reset`
    #[inline(always)]
    pub fn flush(&mut self) {
        self.reset();
    }

    /// Byte terisi (`tail`). Pop tidak mengubah nilai ini.
    #[inline(always)]
    pub fn occupied(&self) -> usize {
        self.tail
    }

    /// `capacity - tail`
    #[inline(always)]
    pub fn free(&self) -> usize {
        self.mem.len() - self.tail
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.mem.len()
    }

    /// Byte yang belum di-pop (`tail - head`)
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.tail - self.head
    }

    #[inline(always)]
    pub fn read_position(&self) -> usize {
        self.head
    }

    /// Tidak ada header utuh yang tersisa untuk di-pop
    #[inline(always)]
    pub fn is_drained(&self) -> bool {
        self.remaining() < crate::protocol::HEADER_SIZE
    }

    /// Stream ter-encode `[0, tail)` untuk diserahkan ke transport
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mem[..self.tail]
    }

    /// Bagian stream yang belum di-pop `[head, tail)`
    #[inline(always)]
    pub fn unread_bytes(&self) -> &[u8] {
        &self.mem[self.head..self.tail]
    }
}

/// Iterator dari [`TlvBuffer::drain`]
#[derive(Debug)]
pub struct Drain<'b> {
    records: Records<'b>,
    head: &'b mut usize,
}

impl<'b> Iterator for Drain<'b> {
    type Item = Result<Entry<'b>, TlvError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.records.next();
        *self.head = self.records.position();
        item
    }
}
