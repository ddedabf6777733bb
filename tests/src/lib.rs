#[macro_use]
mod macros;

pub use exec_log::ExecLog;

pub use logging_driver::{DriverOp, LoggingDriver};

pub mod setup;
pub use setup::DbTest;
