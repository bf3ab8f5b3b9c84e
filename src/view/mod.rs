//! Client-side derived views over the record list.

pub mod filter;
pub mod insights;
pub mod session;
pub mod state;

pub use filter::{Choice, DateRange, FilterState, ViewMode};
pub use insights::Insights;
pub use session::Session;
pub use state::{FormState, ViewAction, ViewState};
