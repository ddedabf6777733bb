mod response;
pub use response::{Response, Rows};

mod operation;
pub use operation::{Operation, Transaction};

use crate::{async_trait, Result};

use std::{borrow::Cow, fmt::Debug};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL, for logging.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// One connection to the store. Operations issued on it run sequentially.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
