use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use multilingual_core::stmt::{
    ColumnDef, CreateTable, Delete, Direction, ForeignKey, Insert, Join, JoinOp,
    OrderByExpr, Select, Statement, Update,
};

impl ToSql for &Statement {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &CreateTable {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let unique = self
            .unique
            .iter()
            .map(|columns| (", UNIQUE (", (Comma(columns.iter().map(Ident)), ")")));

        fmt!(
            f,
            "CREATE TABLE IF NOT EXISTS ",
            Ident(&self.table),
            " (",
            Comma(&self.columns),
            Delimited(unique, ""),
            Delimited(self.foreign_keys.iter().map(|fk| (", ", fk)), ""),
            ")",
        );
    }
}

impl ToSql for &ColumnDef {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(&self.name), " ");

        if self.primary_key {
            let pk = if f.serializer.is_sqlite() {
                "INTEGER PRIMARY KEY AUTOINCREMENT"
            } else if f.serializer.is_mysql() {
                "BIGINT AUTO_INCREMENT PRIMARY KEY"
            } else {
                "BIGSERIAL PRIMARY KEY"
            };
            fmt!(f, pk);
            return;
        }

        fmt!(f, self.ty);

        if self.not_null {
            fmt!(f, " NOT NULL");
        }

        if self.unique {
            fmt!(f, " UNIQUE");
        }
    }
}

impl ToSql for &ForeignKey {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(
            f,
            "FOREIGN KEY (",
            Ident(&self.column),
            ") REFERENCES ",
            Ident(&self.references),
            " (",
            Ident(&self.referenced_column),
            ") ON DELETE CASCADE",
        );
    }
}

impl ToSql for &Delete {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let filter = self.filter.as_ref().map(|expr| (" WHERE ", expr));
        fmt!(f, "DELETE FROM ", Ident(&self.table), filter);
    }
}

impl ToSql for &Insert {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "INSERT INTO ", Ident(&self.table));

        if self.columns.is_empty() {
            if f.serializer.is_mysql() {
                fmt!(f, " () VALUES ()");
            } else {
                fmt!(f, " DEFAULT VALUES");
            }
        } else {
            fmt!(
                f,
                " (",
                Comma(self.columns.iter().map(Ident)),
                ") VALUES (",
                Comma(&self.values),
                ")",
            );
        }

        // SQLite and MySQL report the generated key out of band
        if !f.serializer.is_sqlite() && !f.serializer.is_mysql() {
            let returning = self.returning.as_ref().map(|column| (" RETURNING ", Ident(column)));
            fmt!(f, returning);
        }
    }
}

impl ToSql for &Select {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let alias = (self.alias != self.table).then(|| (" AS ", Ident(&self.alias)));
        let filter = self.filter.as_ref().map(|expr| (" WHERE ", expr));
        let order_by = (!self.order_by.is_empty()).then(|| (" ORDER BY ", Comma(&self.order_by)));
        let limit = self.limit.map(|limit| (" LIMIT ", limit));

        fmt!(
            f,
            "SELECT ",
            Comma(&self.returning),
            " FROM ",
            Ident(&self.table),
            alias,
            Delimited(self.joins.iter().map(|join| (" ", join)), ""),
            filter,
            order_by,
            limit,
        );
    }
}

impl ToSql for &Join {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match &self.constraint {
            JoinOp::Left(expr) => {
                fmt!(
                    f,
                    "LEFT JOIN ",
                    Ident(&self.table),
                    " AS ",
                    Ident(&self.alias),
                    " ON ",
                    expr,
                );
            }
        }
    }
}

impl ToSql for &OrderByExpr {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };
        fmt!(f, &self.expr, direction);
    }
}

impl ToSql for &Update {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let assignments = self
            .assignments
            .iter()
            .map(|(column, value)| (Ident(column), (" = ", value)));

        fmt!(
            f,
            "UPDATE ",
            Ident(&self.table),
            " SET ",
            Comma(assignments),
            " WHERE ",
            &self.filter,
        );
    }
}
