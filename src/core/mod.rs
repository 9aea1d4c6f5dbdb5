pub mod aggregator;
pub mod fetcher;
pub mod normalizer;

pub use crate::domain::model::{AggregateContent, ContentKind, EndpointDescriptor, RawContentBatch};
pub use crate::domain::ports::{ContentSource, Storage};
pub use crate::utils::error::Result;
