// tasktrack - single-user task tracker persisted as one JSON file

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod ops;
pub mod render;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::{Result, TaskError};
pub use filter::ListFilter;
pub use models::{Priority, Task};
pub use ops::{NewTask, Outcome, TaskManager, TaskRef};
pub use store::{TaskCollection, TaskStore};
