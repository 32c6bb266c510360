//! Protocol Layer: positional typed argument records
//!
//! Prinsip desain:
//! - Flat Binary: Argumen ditulis raw, berurutan, tanpa header
//! - Static Layout: Ukuran dan kind setiap posisi diketahui compile-time
//! - No allocation: Encode/decode langsung ke/dari buffer

mod descriptor;
mod error;
mod kind;
mod serdes;
mod signature;
mod value;
mod visitor;

pub use descriptor::{Descriptor, FormatDescriptor};
pub use error::{SerdesError, SerdesResult};
pub use kind::{Arg, ArgKind, ArgSlot, MAX_ARG_SIZE};
pub use serdes::Serdes;
pub use signature::Signature;
pub use value::Value;
pub use visitor::Visitor;
