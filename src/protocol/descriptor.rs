//! Format Descriptor: handle type-erased per signature.
//!
//! Satu [`Descriptor`] per layout, dibuat lazy saat pertama dipakai dan
//! tidak pernah dihancurkan. Alamatnya dipakai sebagai format tag murah
//! yang disimpan di samping setiap record.

use std::collections::HashMap;
use std::fmt;
use std::ptr;
use std::sync::OnceLock;

use parking_lot::RwLock;

use super::kind::{ArgSlot, MAX_ARG_SIZE};
use super::visitor::Visitor;
use crate::core::{ByteBuffer, ByteRange};

/// Kontrak descriptor yang dilihat consumer
pub trait FormatDescriptor: Send + Sync {
    /// Jumlah argumen di signature
    fn argument_count(&self) -> usize;

    /// Decode argumen ke-`index` dari record di `range`.
    ///
    /// No-op jika `index` di luar signature, atau byte yang tersedia tidak
    /// cukup untuk mencapai dan membaca argumen tersebut. Tidak pernah
    /// membaca di luar `range`.
    ///
    /// `range` sebaiknya sudah lewat [`Reserve::validate`](crate::core::Reserve::validate);
    /// jika buffer menyalin lebih sedikit dari ukuran argumen, visitor
    /// tidak dipanggil.
    fn decode_at(
        &self,
        buffer: &dyn ByteBuffer,
        range: ByteRange,
        index: usize,
        visitor: &mut dyn Visitor,
    );
}

/// Descriptor konkret untuk satu layout
pub struct Descriptor {
    layout: &'static [ArgSlot],
    encoded_size: usize,
}

impl Descriptor {
    fn new(layout: &'static [ArgSlot]) -> Self {
        Self {
            layout,
            encoded_size: layout.iter().map(|slot| slot.size).sum(),
        }
    }

    pub fn layout(&self) -> &'static [ArgSlot] {
        self.layout
    }

    /// Ukuran record lengkap dalam bytes
    pub fn encoded_size(&self) -> usize {
        self.encoded_size
    }

    /// Identitas format: true jika keduanya singleton yang sama
    #[inline(always)]
    pub fn same_format(&self, other: &Descriptor) -> bool {
        ptr::eq(self, other)
    }
}

impl FormatDescriptor for Descriptor {
    #[inline(always)]
    fn argument_count(&self) -> usize {
        self.layout.len()
    }

    fn decode_at(
        &self,
        buffer: &dyn ByteBuffer,
        range: ByteRange,
        index: usize,
        visitor: &mut dyn Visitor,
    ) {
        if index >= self.argument_count() {
            return;
        }

        let mut remaining = range;
        for (position, slot) in self.layout.iter().enumerate() {
            if remaining.is_empty() {
                return;
            }

            if position == index {
                if slot.size <= remaining.length {
                    let mut scratch = [0u8; MAX_ARG_SIZE];
                    let bytes = &mut scratch[..slot.size];
                    if buffer.read(remaining, bytes) == slot.size {
                        slot.kind.dispatch(bytes, visitor);
                    }
                }
                return;
            }

            remaining = remaining.advance(slot.size);
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("addr", &(self as *const Self))
            .field("layout", &self.layout)
            .finish()
    }
}

type Registry = RwLock<HashMap<&'static [ArgSlot], &'static Descriptor>>;

// Tidak pernah di-teardown; entry immutable setelah insert
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Singleton descriptor untuk `layout`.
///
/// Panggilan berulang dengan layout yang sama mengembalikan instance yang
/// sama, dari thread mana pun.
pub(crate) fn descriptor_for(layout: &'static [ArgSlot]) -> &'static Descriptor {
    let registry = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(&descriptor) = registry.read().get(layout) {
        return descriptor;
    }

    let mut map = registry.write();
    *map.entry(layout).or_insert_with(|| {
        log::debug!("registering record format {:?}", layout);
        let leaked: &'static Descriptor = Box::leak(Box::new(Descriptor::new(layout)));
        leaked
    })
}
