//! Identifier generation for markers and entries.
//!
//! Identifiers come from the operating system's random source. When that source is
//! unavailable a clock-seeded generator takes over: ids stay collision-improbable for a
//! local session but are no longer cryptographically unpredictable.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::{Builder, Uuid};

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);
static FALLBACK_WARNING: Once = Once::new();

/// Generate a new version-4 identifier.
pub fn generate_id() -> Uuid {
    let mut bytes = [0u8; 16];
    match getrandom::fill(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes).into_uuid(),
        Err(err) => {
            FALLBACK_WARNING.call_once(|| {
                tracing::warn!(
                    "OS random source unavailable ({}); using clock-seeded identifiers",
                    err
                );
            });
            fallback_id()
        }
    }
}

/// Clock-seeded identifier, mixed with a process-wide counter so that two calls within the
/// same clock tick still diverge.
fn fallback_id() -> Uuid {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let sequence = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let seed = nanos ^ sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}
