//! Integration tests for the directional replay cache.
//!
//! These drive the cache the way the transmit loop and the access-point
//! listener do: record frames, then validate patterns reported by receivers.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use leap_cache::{CacheConfig, DirectionalReplayCache, Validation};
use leap_codec::{AccessPoint, BitStream, HardwarePinMap};

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

fn cache(dim: usize) -> DirectionalReplayCache {
    DirectionalReplayCache::new(dim, HardwarePinMap::row_major(dim).unwrap()).unwrap()
}

/// The eight-bit stream whose binary value is `n`.
fn byte_stream(n: u8) -> BitStream {
    BitStream::from_bytes(&[n])
}

fn random_stream(rng: &mut StdRng, len: usize) -> BitStream {
    (0..len).map(|_| rng.gen_bool(0.5)).collect()
}

// ─────────────────────────────────────────────
// FIFO bound
// ─────────────────────────────────────────────

#[test]
fn eleventh_record_evicts_the_first() {
    let c = cache(2);
    let streams: Vec<BitStream> = (1..=11).map(byte_stream).collect();
    for bits in &streams {
        c.record_and_encode(bits, AccessPoint::Ap0).unwrap();
    }

    let history = c.history();
    assert_eq!(history.len(), 10);
    // AP0 slot of each entry is the stream itself.
    let kept: Vec<&BitStream> = history.iter().map(|e| e.slot(AccessPoint::Ap0)).collect();
    let expected: Vec<&BitStream> = streams[1..].iter().collect();
    assert_eq!(kept, expected);
    assert!(history.iter().all(|e| e.slot(AccessPoint::Ap0) != &streams[0]));
    // Fingerprints keep the weight of their stream; none of the kept ones has
    // eight set bits.
    let absent: BitStream = "11111111".parse().unwrap();
    assert_eq!(c.validate(&absent), Validation::NotFound);
    assert_eq!(c.validate(&streams[1]), Validation::Matched(AccessPoint::Ap0));
}

#[test]
fn history_never_exceeds_capacity() {
    let mut rng = StdRng::seed_from_u64(11);
    let c = cache(4);
    for n in 1..=25 {
        c.record_and_encode(&random_stream(&mut rng, 64), AccessPoint::Ap3).unwrap();
        assert_eq!(c.len(), n.min(10));
    }
}

#[test]
fn custom_capacity_is_honoured() {
    let config = CacheConfig {
        history_capacity: 3,
        ..CacheConfig::default()
    };
    let c = DirectionalReplayCache::with_config(2, HardwarePinMap::row_major(2).unwrap(), &config)
        .unwrap();
    for n in 0..5u8 {
        c.record_and_encode(&byte_stream(n), AccessPoint::Ap0).unwrap();
    }
    let kept: Vec<BitStream> = c
        .history()
        .iter()
        .map(|e| e.slot(AccessPoint::Ap0).clone())
        .collect();
    assert_eq!(kept, vec![byte_stream(2), byte_stream(3), byte_stream(4)]);
}

// ─────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────

#[test]
fn each_access_point_validates_its_own_fingerprint() {
    let mut rng = StdRng::seed_from_u64(7);
    let c = cache(4);
    let bits = random_stream(&mut rng, 64);
    c.record_and_encode(&bits, AccessPoint::Ap2).unwrap();

    for ap in AccessPoint::ALL {
        let reported = c.codec().fingerprint(&bits, ap).unwrap();
        assert_eq!(c.validate(&reported), Validation::Matched(ap), "{ap}");
    }
}

#[test]
fn unseen_pattern_is_not_found() {
    let mut rng = StdRng::seed_from_u64(8);
    let c = cache(4);
    for _ in 0..5 {
        c.record_and_encode(&random_stream(&mut rng, 64), AccessPoint::Ap1).unwrap();
    }
    // Fingerprints keep the weight of their stream; no seeded stream is all ones.
    let all_ones: BitStream = (0..64).map(|_| true).collect();
    assert_eq!(c.validate(&all_ones), Validation::NotFound);
    assert_eq!(c.validate(&BitStream::zeros(3)), Validation::NotFound);
}

#[test]
fn targeted_ap2_frame_decodes_to_a_stable_fingerprint() {
    let c = DirectionalReplayCache::new(2, HardwarePinMap::leap_layered(2).unwrap()).unwrap();
    let bits: BitStream = "10100101".parse().unwrap();

    let wires = c.record_and_encode(&bits, AccessPoint::Ap2).unwrap();
    let frame = c.codec().frame_from_hardware(&wires).unwrap();
    let seen = c.codec().decode(&frame);
    assert_ne!(seen, bits);
    assert_eq!(&seen, c.history()[0].slot(AccessPoint::Ap2));
    assert_eq!(c.validate(&seen), Validation::Matched(AccessPoint::Ap2));

    let wires_again = c.record_and_encode(&bits, AccessPoint::Ap2).unwrap();
    assert_eq!(wires_again, wires);
    let seen_again = c.codec().decode(&c.codec().frame_from_hardware(&wires_again).unwrap());
    assert_eq!(seen_again, seen);
}

// ─────────────────────────────────────────────
// Concurrency
// ─────────────────────────────────────────────

#[test]
fn validators_run_alongside_the_writer() {
    let c = Arc::new(cache(4));
    let mut rng = StdRng::seed_from_u64(99);
    let anchor = random_stream(&mut rng, 64);
    c.record_and_encode(&anchor, AccessPoint::Ap1).unwrap();
    let anchor_ap1 = c.codec().fingerprint(&anchor, AccessPoint::Ap1).unwrap();

    std::thread::scope(|s| {
        let writer = Arc::clone(&c);
        s.spawn(move || {
            let mut rng = StdRng::seed_from_u64(100);
            // Stay below capacity so the anchor entry survives.
            for _ in 0..8 {
                writer
                    .record_and_encode(&random_stream(&mut rng, 64), AccessPoint::Ap0)
                    .unwrap();
            }
        });
        for _ in 0..4 {
            let reader = Arc::clone(&c);
            let key = anchor_ap1.clone();
            s.spawn(move || {
                for _ in 0..50 {
                    assert!(reader.len() <= reader.capacity());
                    assert_eq!(reader.validate(&key), Validation::Matched(AccessPoint::Ap1));
                }
            });
        }
    });

    assert_eq!(c.len(), 9);
}
