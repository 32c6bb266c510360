//! argring - Positional Typed Argument Records
//!
//! Arsitektur:
//! - Zero-Copy: Argumen ditulis raw langsung ke cyclic byte buffer
//! - Fixed-Capacity: Handle record di ring queue, storage menimpa data tertua
//! - No-Allocation: Tidak ada alokasi per record di hot path
//! - Loss-Tolerant: Record yang tertimpa di-decode sebagai "tidak ada"
//!
//! ```
//! use argring::core::{CyclicBuffer, Reserve};
//! use argring::protocol::{FormatDescriptor, Serdes, Value};
//!
//! let mut buffer = CyclicBuffer::new(1024).unwrap();
//! let args = (42i32, 2.5f32);
//!
//! let range = buffer.reserve(Serdes::required_size(&args)).unwrap();
//! Serdes::encode(&mut buffer, range, args);
//!
//! let format = Serdes::<(i32, f32)>::instance();
//! let mut value: Option<Value> = None;
//! format.decode_at(&buffer, range, 1, &mut value);
//! assert_eq!(value, Some(Value::F32(2.5)));
//! ```

pub mod core;
pub mod protocol;
pub mod record;
