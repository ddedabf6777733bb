mod value;
pub(crate) use value::Value;

use multilingual_core::{
    async_trait,
    driver::{Operation, Response, Transaction},
    stmt::{self, Statement},
    Driver, Error, Result,
};
use multilingual_sql as sql;
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn multilingual_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Self::init(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Self::init(connection)
    }

    fn init(connection: RusqliteConnection) -> Result<Self> {
        // Translation rows cascade with their owner
        connection
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(Error::driver)?;
        Ok(Self { connection })
    }

    fn transaction(&mut self, op: Transaction) -> Result<Response> {
        let sql = match op {
            Transaction::Start => "BEGIN",
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        };

        tracing::trace!(sql, "sqlite transaction");
        self.connection.execute(sql, []).map_err(Error::driver)?;
        Ok(Response::count(0))
    }
}

#[async_trait]
impl multilingual_core::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let stmt = match op {
            Operation::Statement(stmt) => stmt,
            Operation::Transaction(op) => return self.transaction(op),
        };

        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = sql::Serializer::sqlite().serialize(&stmt, &mut params);

        tracing::trace!(sql = %sql_str, params = ?params, "sqlite exec");

        let mut prepared = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(Error::driver)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let width = match &stmt {
            Statement::Query(select) => select.returning.len(),
            Statement::Insert(insert) => {
                prepared
                    .execute(rusqlite::params_from_iter(params.iter()))
                    .map_err(sqlite_error)?;

                return Ok(match insert.returning {
                    Some(_) => Response::values(vec![vec![stmt::Value::I64(
                        self.connection.last_insert_rowid(),
                    )]]),
                    None => Response::count(1),
                });
            }
            _ => {
                let count = prepared
                    .execute(rusqlite::params_from_iter(params.iter()))
                    .map_err(sqlite_error)?;

                return Ok(Response::count(count as _));
            }
        };

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(sqlite_error)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(sqlite_error)? {
            let mut items = Vec::with_capacity(width);

            for index in 0..width {
                items.push(Value::from_sql(row, index)?.into_inner());
            }

            ret.push(items);
        }

        Ok(Response::values(ret))
    }
}

fn sqlite_error(err: rusqlite::Error) -> Error {
    match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => Error::constraint_violation(err),
        _ => Error::driver(err),
    }
}
