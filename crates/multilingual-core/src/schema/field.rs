use crate::stmt::Type;

/// A column of an owner model or of a translation model.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Field {
        Field {
            name: name.into(),
            ty,
            nullable: false,
            unique: false,
            primary_key: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Field {
        Field::new(name, Type::String)
    }

    pub fn i64(name: impl Into<String>) -> Field {
        Field::new(name, Type::I64)
    }

    pub fn bool(name: impl Into<String>) -> Field {
        Field::new(name, Type::Bool)
    }

    pub fn nullable(mut self) -> Field {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Field {
        self.unique = true;
        self
    }

    pub(crate) fn primary_key(name: &str) -> Field {
        Field {
            primary_key: true,
            ..Field::i64(name)
        }
    }
}
