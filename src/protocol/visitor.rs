/// Value Kind Dispatcher
///
/// Diimplementasikan oleh consumer. Setiap decode yang berhasil memanggil
/// tepat satu method, sesuai kind argumen di posisi yang diminta.
pub trait Visitor {
    fn visit_i32(&mut self, value: i32);
    fn visit_i64(&mut self, value: i64);
    fn visit_u32(&mut self, value: u32);
    fn visit_u64(&mut self, value: u64);
    fn visit_f32(&mut self, value: f32);
    fn visit_f64(&mut self, value: f64);
    fn visit_bool(&mut self, value: bool);
}
