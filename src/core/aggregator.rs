use crate::config::ContentConfig;
use crate::core::fetcher::HttpContentSource;
use crate::core::normalizer::Normalizer;
use crate::domain::model::{AggregateContent, ContentKind, EndpointDescriptor};
use crate::domain::ports::ContentSource;

pub struct ContentAggregator<S: ContentSource> {
    source: S,
    endpoints: Vec<EndpointDescriptor>,
    normalizer: Normalizer,
}

impl<S: ContentSource> ContentAggregator<S> {
    pub fn new(source: S, endpoints: Vec<EndpointDescriptor>, normalizer: Normalizer) -> Self {
        Self {
            source,
            endpoints,
            normalizer,
        }
    }

    /// 抓取並整理全部內容。此函式不會失敗：任何錯誤都只會讓對應區塊變成空的。
    pub async fn run(&self) -> AggregateContent {
        let batches = match self.source.fetch_all(&self.endpoints).await {
            Ok(batches) => batches,
            Err(e) => {
                tracing::error!(
                    "❌ Content source failed as a whole, rendering with empty content: {}",
                    e
                );
                return AggregateContent::default();
            }
        };

        // 每種內容寫入自己的欄位，與請求完成順序無關
        let mut content = AggregateContent::default();
        for batch in &batches {
            match batch.kind {
                ContentKind::HeroSlides => {
                    content.hero_slides = self.normalizer.normalize(batch);
                }
                ContentKind::PackageSlides => {
                    content.package_slides = self.normalizer.normalize(batch);
                }
                ContentKind::AccommodationImages => {
                    content.accommodation_images = self.normalizer.normalize(batch);
                }
                ContentKind::FacilitiesSlides => {
                    content.facilities_slides = self.normalizer.normalize(batch);
                }
            }
        }

        for kind in ContentKind::ALL {
            tracing::info!("📊 {}: {} items", kind, content.len_of(kind));
        }

        content
    }
}

/// 依配置建立 HTTP 來源並執行彙整；來源無法建立時回傳全空的結果。
pub async fn build_aggregate(config: &ContentConfig) -> AggregateContent {
    let source = match HttpContentSource::new(config) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(
                "❌ Cannot initialise content source ({:?}): {}",
                e.category(),
                e
            );
            return AggregateContent::default();
        }
    };

    ContentAggregator::new(
        source,
        config.endpoints.clone(),
        Normalizer::from_config(config),
    )
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawContentBatch;
    use crate::utils::error::{ContentError, FetchError, Result};
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingSource;

    #[async_trait]
    impl ContentSource for FailingSource {
        async fn fetch_all(&self, _endpoints: &[EndpointDescriptor]) -> Result<Vec<RawContentBatch>> {
            Err(ContentError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "backend unreachable",
            )))
        }
    }

    /// Answers in reverse descriptor order to show slots do not depend on arrival order
    struct ReversedSource;

    #[async_trait]
    impl ContentSource for ReversedSource {
        async fn fetch_all(&self, endpoints: &[EndpointDescriptor]) -> Result<Vec<RawContentBatch>> {
            Ok(endpoints
                .iter()
                .rev()
                .map(|endpoint| match endpoint.kind {
                    ContentKind::PackageSlides => RawContentBatch::failed(
                        endpoint.kind,
                        FetchError::Status {
                            url: endpoint.path.clone(),
                            status: 500,
                        },
                    ),
                    kind => RawContentBatch::body(
                        kind,
                        json!({ "data": [{
                            "id": 1,
                            "title": kind.as_str(),
                            "Description": kind.as_str(),
                            "description": kind.as_str(),
                            "img_url": "https://x/a.jpg"
                        }] }),
                    ),
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_source_failure_falls_back_to_empty_aggregate() {
        let aggregator = ContentAggregator::new(
            FailingSource,
            EndpointDescriptor::defaults(),
            Normalizer::default(),
        );

        let content = aggregator.run().await;

        assert_eq!(content, AggregateContent::default());
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_each_kind_lands_in_its_own_slot() {
        let aggregator = ContentAggregator::new(
            ReversedSource,
            EndpointDescriptor::defaults(),
            Normalizer::default(),
        );

        let content = aggregator.run().await;

        assert_eq!(content.hero_slides[0].description, "hero-slides");
        assert!(content.package_slides.is_empty());
        assert_eq!(content.accommodation_images[0].title, "accommodation-images");
        assert_eq!(content.facilities_slides[0].title, "facilities-slides");
        assert_eq!(content.facilities_slides[0].description, "facilities-slides");
    }

    #[tokio::test]
    async fn test_unconfigured_kinds_stay_empty() {
        let aggregator = ContentAggregator::new(
            ReversedSource,
            vec![EndpointDescriptor::new(
                ContentKind::HeroSlides,
                "/api/hero-slides",
            )],
            Normalizer::default(),
        );

        let content = aggregator.run().await;

        assert_eq!(content.hero_slides.len(), 1);
        assert!(content.package_slides.is_empty());
        assert!(content.accommodation_images.is_empty());
        assert!(content.facilities_slides.is_empty());
    }

    #[tokio::test]
    async fn test_build_aggregate_with_invalid_base_url_returns_empty() {
        let mut config = ContentConfig::default();
        config.backend.base_url = "::not-a-url::".to_string();

        let content = build_aggregate(&config).await;

        assert_eq!(content, AggregateContent::default());
    }
}
