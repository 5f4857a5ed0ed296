mod config;
mod filter;
mod ids;
mod task;

pub use self::config::{ClientConfig, ConfigError, ConfigOverrides};
pub use self::filter::Filter;
pub use self::ids::{TaskId, UserId};
pub use self::task::{Task, TaskPatch, normalize_title};
