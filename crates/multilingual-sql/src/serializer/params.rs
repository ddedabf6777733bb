use super::{Flavor, Formatter, ToSql};

use multilingual_core::stmt::Value;

/// Collects the values bound to a statement's placeholders.
pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// 1-based position of a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        use std::fmt::Write;

        match f.serializer.flavor {
            Flavor::Mysql => f.dst.push('?'),
            Flavor::Postgresql => write!(f.dst, "${}", self.0).unwrap(),
            Flavor::Sqlite => write!(f.dst, "?{}", self.0).unwrap(),
        }
    }
}
