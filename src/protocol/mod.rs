//! Protocol Layer: TLV Binary Encoding
//!
//! Prinsip desain:
//! - Self-describing: setiap record membawa tag dan length sendiri
//! - Fixed-size header: 2 bytes, tanpa variable-width length
//! - No allocation: Encode/decode langsung ke/dari slice caller

mod codec;
mod entry;

pub(crate) use codec::{decode_record, encode_record};
pub use codec::Records;
pub use entry::{Entry, HEADER_SIZE, MAX_PAYLOAD_LEN, MAX_RECORD_SIZE};
