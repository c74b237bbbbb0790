pub mod api;
pub mod board;
pub mod config;
pub mod view;

pub use api::{ClientError, HttpTaskApi, Operation, TaskApi};
pub use board::TaskBoard;
pub use config::ClientConfig;
