//! tlvbuf - Allocation-Free TLV Codec
//!
//! Arsitektur:
//! - Record View: `Entry` (tag, length, payload view)
//! - FIFO Buffer: `TlvBuffer` di atas `&mut [u8]` milik caller
//! - Wire format: `tag(1) length(1) payload(length)`, back-to-back
//!
//! ```
//! use tlvbuf::{Entry, TlvBuffer};
//!
//! let mut mem = [0u8; 80];
//! let mut buf = TlvBuffer::new(&mut mem);
//!
//! buf.push(Entry::new(5, &[137]).unwrap()).unwrap();
//! assert_eq!(buf.occupied(), 3);
//!
//! let entry = buf.pop().unwrap();
//! assert_eq!((entry.tag(), entry.payload()), (5, &[137u8][..]));
//! ```

pub mod core;
pub mod error;
pub mod protocol;

pub use crate::core::{MmapRegion, TlvBuffer};
pub use crate::error::{RegionError, TlvError};
pub use crate::protocol::{Entry, Records, HEADER_SIZE, MAX_PAYLOAD_LEN};
