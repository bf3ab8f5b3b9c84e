pub mod form;
pub mod record;

pub use form::RecordForm;
pub use record::{NewRecord, RawRecord, ValidationError, WatchRecord};
