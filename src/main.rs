//! tlv_journal - Demo journal di atas TLV buffer
//!
//! Push beberapa log entry bertipe berbeda, lalu pop dan tampilkan.
//! Region bisa array biasa atau file mmap (`--storage`).
//!
//! Usage:
//!   cargo run --release --bin tlv_journal -- [OPTIONS]

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tlvbuf::{Entry, MmapRegion, RegionError, TlvBuffer, TlvError};

/// Journal configuration
#[derive(Debug, Parser)]
#[command(name = "tlv_journal", about = "TLV journal demo")]
struct JournalConfig {
    /// Region capacity in bytes
    #[arg(short, long, default_value_t = 80)]
    capacity: usize,

    /// Back the region with a memory-mapped file
    #[arg(short, long)]
    storage: Option<String>,

    /// Reset head and pop every record a second time
    #[arg(short, long)]
    replay: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Tipe log entry di journal
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JournalTag {
    /// Kotak `x, y, w, h`
    Bounds = 0,
    /// Label teks + nilai u16 + timestamp u32
    Label = 1,
    /// Satu byte level
    Brightness = 5,
}

impl JournalTag {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Bounds),
            1 => Some(Self::Label),
            5 => Some(Self::Brightness),
            _ => None,
        }
    }
}

const LABEL_FIXED: usize = 6;

/// Encode label entry: timestamp u32 LE, value u16 LE, lalu teks
fn encode_label<'a>(out: &'a mut [u8], timestamp: u32, value: u16, text: &str) -> &'a [u8] {
    let text = &text.as_bytes()[..text.len().min(out.len() - LABEL_FIXED)];
    out[0..4].copy_from_slice(&timestamp.to_le_bytes());
    out[4..6].copy_from_slice(&value.to_le_bytes());
    out[LABEL_FIXED..LABEL_FIXED + text.len()].copy_from_slice(text);
    &out[..LABEL_FIXED + text.len()]
}

fn describe(entry: &Entry<'_>) {
    let payload = entry.payload();
    match JournalTag::from_u8(entry.tag()) {
        Some(JournalTag::Brightness) if payload.len() == 1 => {
            info!("Brightness entry: {}", payload[0]);
        }
        Some(JournalTag::Bounds) if payload.len() == 4 => {
            info!(
                "Bounds entry: x={} y={} w={} h={}",
                payload[0], payload[1], payload[2], payload[3]
            );
        }
        Some(JournalTag::Label) if payload.len() >= LABEL_FIXED => {
            let mut copy = [0u8; tlvbuf::MAX_PAYLOAD_LEN];
            let n = match entry.copy_to(&mut copy) {
                Ok(n) => n,
                Err(e) => {
                    warn!("Cannot copy label: {}", e);
                    return;
                }
            };
            let timestamp = u32::from_le_bytes([copy[0], copy[1], copy[2], copy[3]]);
            let value = u16::from_le_bytes([copy[4], copy[5]]);
            let text = String::from_utf8_lossy(&copy[LABEL_FIXED..n]);
            info!("[{}] {}: {}", timestamp, text, value);
        }
        _ => warn!(
            tag = entry.tag(),
            len = entry.len(),
            "Unknown or malformed entry"
        ),
    }
}

fn push_or_warn(buf: &mut TlvBuffer<'_>, tag: JournalTag, payload: &[u8]) {
    match buf.push_raw(tag as u8, payload) {
        Ok(()) => debug!(?tag, len = payload.len(), occupied = buf.occupied(), "pushed"),
        Err(e) => warn!(?tag, "Dropped entry: {}", e),
    }
}

fn pop_all(buf: &mut TlvBuffer<'_>) {
    loop {
        match buf.pop() {
            Ok(entry) => describe(&entry),
            Err(TlvError::Empty) => {
                info!("nah, no more entries");
                break;
            }
            Err(e) => {
                warn!("Journal stopped: {}", e);
                break;
            }
        }
    }
}

fn run_journal(buf: &mut TlvBuffer<'_>, config: &JournalConfig) {
    if buf.occupied() > 0 {
        info!(occupied = buf.occupied(), "Restored journal, replaying stored entries");
        pop_all(buf);
    }

    push_or_warn(buf, JournalTag::Brightness, &[137]);
    push_or_warn(buf, JournalTag::Bounds, &[50, 50, 100, 100]);

    let mut label = [0u8; 64];
    let label = encode_label(&mut label, 999, 1337, "my log entry");
    push_or_warn(buf, JournalTag::Label, label);

    info!(
        occupied = buf.occupied(),
        free = buf.free(),
        capacity = buf.capacity(),
        "Journal filled"
    );

    pop_all(buf);

    if config.replay {
        info!("Replaying from head");
        buf.reset_head();
        pop_all(buf);
    }
}

fn run(config: JournalConfig) -> Result<(), RegionError> {
    match &config.storage {
        Some(path) => {
            let mut region = MmapRegion::open(path, config.capacity)?;
            let occupied = region.occupied();
            info!("💾 Storage: {} ({} bytes, {} used)", path, config.capacity, occupied);

            let written = {
                let mut buf = TlvBuffer::with_occupied(region.data_mut(), occupied);
                run_journal(&mut buf, &config);
                buf.occupied()
            };

            region.commit(written);
            region.flush()?;
        }
        None => {
            let mut mem = vec![0u8; config.capacity];
            let mut buf = TlvBuffer::new(&mut mem);
            run_journal(&mut buf, &config);
        }
    }

    Ok(())
}

fn main() {
    let config = JournalConfig::parse();

    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if config.capacity == 0 {
        eprintln!("❌ Capacity must be non-zero");
        std::process::exit(2);
    }

    if let Err(e) = run(config) {
        eprintln!("❌ Journal error: {}", e);
        std::process::exit(1);
    }
}
