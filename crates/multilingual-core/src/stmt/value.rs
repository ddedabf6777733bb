use super::Type;
use crate::{err, Result};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_option_string(self) -> Result<Option<String>> {
        match self {
            Self::Null => Ok(None),
            Self::String(v) => Ok(Some(v)),
            _ => Err(err!("cannot convert {self:?} to String")),
        }
    }

    /// Converts a value read back from a store into the field's type.
    ///
    /// Stores without a native boolean hand back integers.
    pub fn cast(self, ty: Type) -> Result<Value> {
        Ok(match (self, ty) {
            (Value::Null, _) => Value::Null,
            (Value::I64(v), Type::Bool) => Value::Bool(v != 0),
            (v @ Value::Bool(_), Type::Bool) => v,
            (v @ Value::I64(_), Type::I64) => v,
            (v @ Value::String(_), Type::String) => v,
            (Value::String(v), Type::I64) => Value::I64(
                v.parse()
                    .map_err(|_| err!("cannot convert {v:?} to I64"))?,
            ),
            (v, ty) => return Err(err!("cannot convert {v:?} to {ty:?}")),
        })
    }

    /// Returns `true` if the value can be stored in a column of type `ty`.
    pub fn is_a(&self, ty: Type) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::Bool(_), Type::Bool)
                | (Value::I64(_), Type::I64)
                | (Value::String(_), Type::String)
        )
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}
