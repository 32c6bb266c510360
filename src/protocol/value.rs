//! Nilai hasil decode dalam bentuk enum, untuk consumer yang tidak butuh
//! visitor sendiri.

use std::fmt;

use super::kind::ArgKind;
use super::visitor::Visitor;

/// Satu argumen yang sudah di-decode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> ArgKind {
        match self {
            Value::I32(_) => ArgKind::I32,
            Value::I64(_) => ArgKind::I64,
            Value::U32(_) => ArgKind::U32,
            Value::U64(_) => ArgKind::U64,
            Value::F32(_) => ArgKind::F32,
            Value::F64(_) => ArgKind::F64,
            Value::Bool(_) => ArgKind::Bool,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Menyimpan nilai terakhir yang dikunjungi
impl Visitor for Option<Value> {
    fn visit_i32(&mut self, value: i32) {
        *self = Some(Value::I32(value));
    }

    fn visit_i64(&mut self, value: i64) {
        *self = Some(Value::I64(value));
    }

    fn visit_u32(&mut self, value: u32) {
        *self = Some(Value::U32(value));
    }

    fn visit_u64(&mut self, value: u64) {
        *self = Some(Value::U64(value));
    }

    fn visit_f32(&mut self, value: f32) {
        *self = Some(Value::F32(value));
    }

    fn visit_f64(&mut self, value: f64) {
        *self = Some(Value::F64(value));
    }

    fn visit_bool(&mut self, value: bool) {
        *self = Some(Value::Bool(value));
    }
}
