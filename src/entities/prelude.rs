pub use super::watch_logs::Entity as WatchLogs;
