pub mod budget;
pub mod catalog;
pub mod height;
pub mod schedule;
pub mod schema;
pub mod steps;
pub mod summary;
pub mod voice;
pub mod wizard;

pub use crate::domain::model::{Draft, Field, LineItem, Notice};
pub use crate::domain::ports::{EmailDelivery, SummarySender, Transcriber};
pub use crate::utils::error::Result;
