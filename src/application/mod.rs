// Application layer: the expense tracker service sitting between the
// ledger and any client (the interactive menu, tests).

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
