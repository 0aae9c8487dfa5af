//! Value types shared by the task, project, and assignment contexts.
//!
//! Tasks and projects carry the same kind of human-entered text, the same
//! soft-deletion rules, and the same calendar-day filters, so those rules
//! live here once instead of being duplicated per aggregate.

mod calendar;
mod error;
mod scope;
mod slug;
mod text;

pub use calendar::{Calendar, CalendarError, DayWindow};
pub use error::ErrorKind;
pub use scope::DeletionScope;
pub use slug::Slug;
pub use text::{RecordDescription, RecordName, TextFieldError};
