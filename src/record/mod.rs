//! Record log: producer me-record argumen, consumer decode belakangan.
//!
//! Menggabungkan cyclic byte storage, serdes, dan record queue sesuai alur:
//! size -> reserve -> encode -> simpan (descriptor, range) -> decode per posisi.

mod record_log;

pub use record_log::{Record, RecordLog, RecordView};
