use super::{Flavor, Formatter, Params, ToSql};

use multilingual_core::stmt::Type;

impl ToSql for Type {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let ty = match (self, f.serializer.flavor) {
            (Type::Bool, _) => "BOOLEAN",
            (Type::I64, Flavor::Sqlite) => "INTEGER",
            (Type::I64, _) => "BIGINT",
            (Type::String, Flavor::Mysql) => "VARCHAR(255)",
            (Type::String, _) => "TEXT",
        };

        f.dst.push_str(ty);
    }
}
