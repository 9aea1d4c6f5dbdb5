pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliArgs, LocalStorage, OutputTarget};

pub use crate::config::ContentConfig;
pub use crate::core::{
    aggregator::{build_aggregate, ContentAggregator},
    fetcher::HttpContentSource,
    normalizer::Normalizer,
};
pub use crate::domain::model::{
    AccommodationImage, AggregateContent, ContentKind, EndpointDescriptor, FacilitySlide,
    HeroSlide, PackageSlide,
};
pub use crate::utils::error::{ContentError, Result};
