//! A small statement IR.
//!
//! Column references name a table alias and a column, so a translated field
//! reference can be pointed at a language-specific join of the translation
//! table. Drivers turn statements into their own query language.

mod create_table;
pub use create_table::{ColumnDef, CreateTable, ForeignKey};

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{BinaryOp, Expr};

mod expr_column;
pub use expr_column::ExprColumn;

mod insert;
pub use insert::Insert;

mod join;
pub use join::{Join, JoinOp};

mod order_by;
pub use order_by::{Direction, OrderByExpr};

mod select;
pub use select::{Select, SelectItem};

mod ty;
pub use ty::Type;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

#[derive(Debug, Clone)]
pub enum Statement {
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Query(Select),
    Update(Update),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Query(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Statement::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Statement::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Statement::Delete(_))
    }

    /// The table the statement reads from or writes to.
    pub fn table(&self) -> &str {
        match self {
            Statement::CreateTable(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Query(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
        }
    }
}

macro_rules! impl_from_stmt {
    ( $( $variant:ident($ty:ty), )* ) => {
        $(
            impl From<$ty> for Statement {
                fn from(value: $ty) -> Self {
                    Statement::$variant(value)
                }
            }
        )*
    };
}

impl_from_stmt! {
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Query(Select),
    Update(Update),
}
