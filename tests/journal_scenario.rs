//! Journal scenario: tiga log entry bertipe berbeda di region 80 bytes.
//!
//! Usage:
//!   cargo test --test journal_scenario

use tlvbuf::{Entry, Records, TlvBuffer, TlvError, HEADER_SIZE};

const TAG_BOUNDS: u8 = 0;
const TAG_LABEL: u8 = 1;
const TAG_BRIGHTNESS: u8 = 5;

/// Label entry (matches tlv_journal demo)
struct LabelEntry<'a> {
    timestamp: u32,
    value: u16,
    text: &'a str,
}

impl LabelEntry<'_> {
    fn encode<'b>(&self, out: &'b mut [u8]) -> &'b [u8] {
        let text = self.text.as_bytes();
        out[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        out[4..6].copy_from_slice(&self.value.to_le_bytes());
        out[6..6 + text.len()].copy_from_slice(text);
        &out[..6 + text.len()]
    }
}

#[test]
fn test_three_entry_journal() {
    let mut mem = [0u8; 80];
    let mut buf = TlvBuffer::new(&mut mem);

    let mut label_bytes = [0u8; 32];
    let label = LabelEntry {
        timestamp: 999,
        value: 1337,
        text: "my log entry",
    }
    .encode(&mut label_bytes);

    let brightness = [137u8];
    let bounds = [50u8, 50, 100, 100];

    buf.push(Entry::new(TAG_BRIGHTNESS, &brightness).unwrap()).unwrap();
    buf.push(Entry::new(TAG_BOUNDS, &bounds).unwrap()).unwrap();
    buf.push(Entry::new(TAG_LABEL, label).unwrap()).unwrap();

    let expected_size = (HEADER_SIZE + 1) + (HEADER_SIZE + 4) + (HEADER_SIZE + label.len());
    assert_eq!(buf.occupied(), expected_size);
    assert_eq!(buf.free(), 80 - expected_size);

    let first = buf.pop().unwrap();
    assert_eq!((first.tag(), first.len(), first.payload()), (TAG_BRIGHTNESS, 1, &brightness[..]));

    let second = buf.pop().unwrap();
    assert_eq!((second.tag(), second.len(), second.payload()), (TAG_BOUNDS, 4, &bounds[..]));

    let third = buf.pop().unwrap();
    assert_eq!(third.tag(), TAG_LABEL);
    let mut copy = [0u8; 64];
    let n = third.copy_to(&mut copy).unwrap();
    assert_eq!(u32::from_le_bytes([copy[0], copy[1], copy[2], copy[3]]), 999);
    assert_eq!(u16::from_le_bytes([copy[4], copy[5]]), 1337);
    assert_eq!(&copy[6..n], b"my log entry");

    assert_eq!(buf.pop(), Err(TlvError::Empty));
    assert_eq!(buf.occupied(), expected_size);

    buf.reset();
    assert_eq!(buf.occupied(), 0);
    assert_eq!(buf.free(), 80);
}

#[test]
fn test_transport_side_decodes_stream() {
    let mut mem = [0u8; 80];
    let mut buf = TlvBuffer::new(&mut mem);

    buf.push_raw(TAG_BRIGHTNESS, &[137]).unwrap();
    buf.push_raw(TAG_BOUNDS, &[50, 50, 100, 100]).unwrap();

    // Transport memindahkan stream ke tempat lain
    let shipped = buf.as_bytes().to_vec();

    let tags: Vec<u8> = Records::new(&shipped)
        .map(|r| r.map(|e| e.tag()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tags, vec![TAG_BRIGHTNESS, TAG_BOUNDS]);
}

#[test]
fn test_full_journal_drops_entry() {
    let mut mem = [0u8; 80];
    let mut buf = TlvBuffer::new(&mut mem);

    let chunk = [0x55u8; 30];
    buf.push_raw(TAG_LABEL, &chunk).unwrap();
    buf.push_raw(TAG_LABEL, &chunk).unwrap();
    assert_eq!(buf.occupied(), 64);

    // 64 + 2 + 14 == 80: strict boundary menolak
    assert!(matches!(
        buf.push_raw(TAG_LABEL, &chunk[..14]),
        Err(TlvError::Full { needed: 16, available: 16 })
    ));
    buf.push_raw(TAG_LABEL, &chunk[..13]).unwrap();
    assert_eq!(buf.occupied(), 79);
}
