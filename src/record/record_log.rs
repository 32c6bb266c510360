use crate::core::{ByteBuffer, ByteRange, RecordQueue, Reserve};
use crate::protocol::{Descriptor, FormatDescriptor, Serdes, Signature, Value, Visitor};

/// Handle satu encoded record: format tag + lokasi byte
#[derive(Debug, Clone, Copy)]
pub struct Record {
    pub descriptor: &'static Descriptor,
    pub range: ByteRange,
}

/// Log record di atas cyclic byte storage `B`, dengan antrian `N` handle
///
/// Storage dan antrian sama-sama menimpa data tertua saat penuh. Record
/// yang byte-nya sudah tertimpa tetap bisa di-pop, tapi decode-nya no-op
/// dan ia dihitung di [`overwritten`](Self::overwritten).
pub struct RecordLog<B, const N: usize> {
    buffer: B,
    queue: RecordQueue<Record, N>,
    dropped: u64,
    overwritten: u64,
}

impl<B: ByteBuffer + Reserve, const N: usize> RecordLog<B, N> {
    pub fn new(buffer: B) -> Self {
        Self {
            buffer,
            queue: RecordQueue::new(),
            dropped: 0,
            overwritten: 0,
        }
    }

    /// Encode `args` sebagai record baru.
    ///
    /// Returns `None` jika record lebih besar dari kapasitas storage.
    pub fn record<S: Signature>(&mut self, args: S) -> Option<Record> {
        let size = Serdes::required_size(&args);

        let Some(range) = self.buffer.reserve(size) else {
            self.dropped += 1;
            log::debug!("record of {} bytes exceeds storage capacity, dropped", size);
            return None;
        };

        Serdes::encode(&mut self.buffer, range, args);

        let record = Record {
            descriptor: Serdes::<S>::instance(),
            range,
        };

        if let Some(evicted) = self.queue.push_evicting(record) {
            self.dropped += 1;
            log::debug!(
                "record queue full, evicted record at {}",
                evicted.range.begin
            );
        }

        Some(record)
    }

    /// Pop record tertua
    ///
    /// Record yang byte-nya sudah (sebagian) tertimpa storage tetap
    /// dikembalikan, dan dihitung di `overwritten`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<RecordView<'_, B>> {
        let record = self.queue.pop()?;

        let available = self.buffer.validate(record.range);
        if available.length < record.descriptor.encoded_size() {
            self.overwritten += 1;
            log::debug!(
                "record at {} overwritten before decode ({} of {} bytes left)",
                record.range.begin,
                available.length,
                record.descriptor.encoded_size()
            );
        }

        Some(self.view(record))
    }

    /// View decode untuk record yang handle-nya disimpan caller
    pub fn view(&self, record: Record) -> RecordView<'_, B> {
        RecordView {
            buffer: &self.buffer,
            record,
        }
    }

    /// Jumlah record yang dibuang (terlalu besar atau queue penuh)
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Jumlah record yang di-pop setelah byte-nya tertimpa storage
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }

    /// Jumlah record yang menunggu di queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Lepas storage, membuang handle yang masih di queue
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

/// Akses decode ke satu record
pub struct RecordView<'a, B> {
    buffer: &'a B,
    record: Record,
}

impl<'a, B: ByteBuffer + Reserve> RecordView<'a, B> {
    pub fn record(&self) -> Record {
        self.record
    }

    pub fn argument_count(&self) -> usize {
        self.record.descriptor.argument_count()
    }

    /// Bagian record yang masih valid di storage
    pub fn available(&self) -> ByteRange {
        self.buffer.validate(self.record.range)
    }

    /// True jika semua byte record masih tersedia
    pub fn is_intact(&self) -> bool {
        self.available().length >= self.record.descriptor.encoded_size()
    }

    /// Decode argumen ke-`index` ke `visitor`; no-op jika tidak tersedia
    pub fn arg(&self, index: usize, visitor: &mut dyn Visitor) {
        self.record
            .descriptor
            .decode_at(self.buffer, self.available(), index, visitor);
    }

    pub fn value(&self, index: usize) -> Option<Value> {
        let mut value: Option<Value> = None;
        self.arg(index, &mut value);
        value
    }

    /// Semua argumen, `None` untuk posisi yang sudah tidak tersedia
    pub fn values(&self) -> impl Iterator<Item = Option<Value>> + 'a {
        let view = *self;
        (0..self.argument_count()).map(move |index| view.value(index))
    }
}

impl<B> Clone for RecordView<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for RecordView<'_, B> {}
