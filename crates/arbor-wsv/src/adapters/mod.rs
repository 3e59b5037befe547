//! SQLite adapters for the WSV ports

mod sqlite_command;
mod sqlite_query;

pub use sqlite_command::SqliteWsvCommand;
pub use sqlite_query::SqliteWsvQuery;
