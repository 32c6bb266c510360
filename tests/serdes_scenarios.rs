//! Encode/decode scenarios over a real cyclic buffer
//!
//! Usage:
//!   cargo test --test serdes_scenarios

use std::mem::size_of;
use std::sync::{Arc, Barrier};
use std::thread;

use argring::core::{ByteBuffer, ByteRange, CyclicBuffer, Reserve};
use argring::protocol::{FormatDescriptor, Serdes, Signature, Visitor};
use proptest::prelude::*;

/// Visitor yang mencatat setiap panggilan
#[derive(Debug, Default, PartialEq)]
struct Recorder {
    calls: Vec<Call>,
}

#[derive(Debug, PartialEq)]
enum Call {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Visitor for Recorder {
    fn visit_i32(&mut self, value: i32) {
        self.calls.push(Call::I32(value));
    }

    fn visit_i64(&mut self, value: i64) {
        self.calls.push(Call::I64(value));
    }

    fn visit_u32(&mut self, value: u32) {
        self.calls.push(Call::U32(value));
    }

    fn visit_u64(&mut self, value: u64) {
        self.calls.push(Call::U64(value));
    }

    fn visit_f32(&mut self, value: f32) {
        self.calls.push(Call::F32(value));
    }

    fn visit_f64(&mut self, value: f64) {
        self.calls.push(Call::F64(value));
    }

    fn visit_bool(&mut self, value: bool) {
        self.calls.push(Call::Bool(value));
    }
}

fn encode<S: Signature>(buffer: &mut CyclicBuffer, args: S) -> ByteRange {
    let range = buffer.reserve(Serdes::required_size(&args)).unwrap();
    Serdes::encode(buffer, range, args);
    range
}

fn decode<S: Signature>(buffer: &CyclicBuffer, range: ByteRange, index: usize) -> Vec<Call> {
    let mut recorder = Recorder::default();
    Serdes::<S>::instance().decode_at(buffer, range, index, &mut recorder);
    recorder.calls
}

#[test]
fn scenario_a_integer_and_float() {
    let mut buffer = CyclicBuffer::new(64).unwrap();
    let args = (42i32, 2.5f32);

    assert_eq!(
        Serdes::required_size(&args),
        size_of::<i32>() + size_of::<f32>()
    );

    let range = encode(&mut buffer, args);
    assert_eq!(range.length, 8);

    assert_eq!(decode::<(i32, f32)>(&buffer, range, 0), vec![Call::I32(42)]);
    assert_eq!(decode::<(i32, f32)>(&buffer, range, 1), vec![Call::F32(2.5)]);
    assert!(decode::<(i32, f32)>(&buffer, range, 2).is_empty());
}

#[test]
fn scenario_b_truncated_range() {
    let mut buffer = CyclicBuffer::new(64).unwrap();
    let range = encode(&mut buffer, (42i32, 2.5f32));

    // Simulasi overwrite parsial: hanya integer yang tersisa
    let truncated = range.truncate(size_of::<i32>());

    assert_eq!(
        decode::<(i32, f32)>(&buffer, truncated, 0),
        vec![Call::I32(42)]
    );
    assert!(decode::<(i32, f32)>(&buffer, truncated, 1).is_empty());
}

#[test]
fn scenario_c_empty_signature() {
    let mut buffer = CyclicBuffer::new(64).unwrap();
    let range = encode(&mut buffer, ());

    assert_eq!(Serdes::required_size(&()), 0);
    assert_eq!(Serdes::<()>::instance().argument_count(), 0);

    for index in 0..4 {
        assert!(decode::<()>(&buffer, range, index).is_empty());
    }
}

#[test]
fn scenario_d_multi_step_skip() {
    let mut buffer = CyclicBuffer::new(64).unwrap();
    let range = encode(&mut buffer, (1i32, 2i32, 3.5f32));

    assert_eq!(
        decode::<(i32, i32, f32)>(&buffer, range, 2),
        vec![Call::F32(3.5)]
    );
    assert_eq!(
        decode::<(i32, i32, f32)>(&buffer, range, 1),
        vec![Call::I32(2)]
    );
}

#[test]
fn test_zero_length_range_never_dispatches() {
    let mut buffer = CyclicBuffer::new(64).unwrap();
    let range = encode(&mut buffer, (7u64, true));
    let empty = ByteRange::empty(range.begin);

    for index in 0..3 {
        assert!(decode::<(u64, bool)>(&buffer, empty, index).is_empty());
    }
}

#[test]
fn test_short_range_never_reaches_later_index() {
    let mut buffer = CyclicBuffer::new(64).unwrap();
    let range = encode(&mut buffer, (1u64, 2u64, 3u64));

    // Cukup untuk dua argumen pertama saja, kurang satu byte untuk yang ketiga
    let short = range.truncate(23);

    assert_eq!(decode::<(u64, u64, u64)>(&buffer, short, 0), vec![Call::U64(1)]);
    assert_eq!(decode::<(u64, u64, u64)>(&buffer, short, 1), vec![Call::U64(2)]);
    assert!(decode::<(u64, u64, u64)>(&buffer, short, 2).is_empty());
}

/// Buffer yang gagal keras jika dibaca di luar range yang diberikan
struct StrictBuffer {
    inner: CyclicBuffer,
}

impl ByteBuffer for StrictBuffer {
    fn write(&mut self, src: &[u8], range: ByteRange) -> ByteRange {
        self.inner.write(src, range)
    }

    fn read(&self, range: ByteRange, dst: &mut [u8]) -> usize {
        assert!(
            dst.len() <= range.length,
            "read of {} bytes past range {:?}",
            dst.len(),
            range
        );
        self.inner.read(range, dst)
    }
}

#[test]
fn test_decode_never_reads_past_range() {
    let mut strict = StrictBuffer {
        inner: CyclicBuffer::new(64).unwrap(),
    };
    let args = (9i64, 1.5f64);
    let range = strict.inner.reserve(Serdes::required_size(&args)).unwrap();
    Serdes::encode(&mut strict, range, args);

    let format = Serdes::<(i64, f64)>::instance();
    for length in 0..=range.length {
        for index in 0..3 {
            let mut recorder = Recorder::default();
            format.decode_at(&strict, range.truncate(length), index, &mut recorder);
            assert!(recorder.calls.len() <= 1);
        }
    }
}

#[test]
fn test_record_straddling_wraparound() {
    let mut buffer = CyclicBuffer::new(16).unwrap();
    buffer.reserve(10).unwrap();

    let range = encode(&mut buffer, (0x0102_0304u32, -1i64));
    assert_eq!(range.begin & 15, 10);

    assert_eq!(
        decode::<(u32, i64)>(&buffer, range, 0),
        vec![Call::U32(0x0102_0304)]
    );
    assert_eq!(decode::<(u32, i64)>(&buffer, range, 1), vec![Call::I64(-1)]);
}

#[test]
fn test_descriptor_identity() {
    let a = Serdes::<(i32, f32)>::instance();
    let b = Serdes::<(i32, f32)>::instance();
    let c = Serdes::<(f32, i32)>::instance();
    let d = Serdes::<(i32,)>::instance();

    assert!(a.same_format(b));
    assert!(!a.same_format(c));
    assert!(!a.same_format(d));
}

#[test]
fn test_descriptor_identity_across_threads() {
    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                Serdes::<(u32, u64, bool, f64)>::instance() as *const _ as usize
            })
        })
        .collect();

    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
}

proptest! {
    #[test]
    fn prop_every_index_round_trips(a in any::<i32>(), b in any::<u64>(), c in any::<bool>(), d in -1.0e6f64..1.0e6) {
        let mut buffer = CyclicBuffer::new(128).unwrap();
        let range = encode(&mut buffer, (a, b, c, d));

        prop_assert_eq!(decode::<(i32, u64, bool, f64)>(&buffer, range, 0), vec![Call::I32(a)]);
        prop_assert_eq!(decode::<(i32, u64, bool, f64)>(&buffer, range, 1), vec![Call::U64(b)]);
        prop_assert_eq!(decode::<(i32, u64, bool, f64)>(&buffer, range, 2), vec![Call::Bool(c)]);
        prop_assert_eq!(decode::<(i32, u64, bool, f64)>(&buffer, range, 3), vec![Call::F64(d)]);
        prop_assert!(decode::<(i32, u64, bool, f64)>(&buffer, range, 4).is_empty());
    }

    #[test]
    fn prop_truncation_only_hides_unavailable_args(length in 0usize..=21) {
        let mut buffer = CyclicBuffer::new(64).unwrap();
        let range = encode(&mut buffer, (5i64, 6u32, 7.0f64, true));
        let truncated = range.truncate(length);

        // Offset akhir kumulatif: 8, 12, 20, 21
        let ends = [8usize, 12, 20, 21];
        for (index, end) in ends.iter().enumerate() {
            let calls = decode::<(i64, u32, f64, bool)>(&buffer, truncated, index);
            prop_assert_eq!(calls.len(), usize::from(length >= *end));
        }
    }
}
