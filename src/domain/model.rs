use crate::utils::error::FetchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 頁面上可顯示的內容類別，每一種對應一個後端端點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    HeroSlides,
    PackageSlides,
    AccommodationImages,
    FacilitiesSlides,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::HeroSlides,
        ContentKind::PackageSlides,
        ContentKind::AccommodationImages,
        ContentKind::FacilitiesSlides,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::HeroSlides => "hero-slides",
            ContentKind::PackageSlides => "package-slides",
            ContentKind::AccommodationImages => "accommodation-images",
            ContentKind::FacilitiesSlides => "facilities-slides",
        }
    }

    /// 預設的後端路徑
    pub fn default_path(&self) -> String {
        format!("/api/{}", self.as_str())
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub kind: ContentKind,
    pub path: String,
}

impl EndpointDescriptor {
    pub fn new(kind: ContentKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn defaults() -> Vec<EndpointDescriptor> {
        ContentKind::ALL
            .iter()
            .map(|kind| EndpointDescriptor::new(*kind, kind.default_path()))
            .collect()
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Body(serde_json::Value),
    Failed(FetchError),
}

/// 單一端點的抓取結果，只在彙整過程中存在
#[derive(Debug)]
pub struct RawContentBatch {
    pub kind: ContentKind,
    pub outcome: FetchOutcome,
}

impl RawContentBatch {
    pub fn body(kind: ContentKind, body: serde_json::Value) -> Self {
        Self {
            kind,
            outcome: FetchOutcome::Body(body),
        }
    }

    pub fn failed(kind: ContentKind, error: FetchError) -> Self {
        Self {
            kind,
            outcome: FetchOutcome::Failed(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: i64,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSlide {
    pub id: i64,
    pub title: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationImage {
    pub id: i64,
    pub title: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySlide {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

/// 交給頁面渲染層的彙整結果，四個序列永遠存在（可能為空）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateContent {
    pub hero_slides: Vec<HeroSlide>,
    pub package_slides: Vec<PackageSlide>,
    pub accommodation_images: Vec<AccommodationImage>,
    pub facilities_slides: Vec<FacilitySlide>,
}

impl AggregateContent {
    pub fn len_of(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::HeroSlides => self.hero_slides.len(),
            ContentKind::PackageSlides => self.package_slides.len(),
            ContentKind::AccommodationImages => self.accommodation_images.len(),
            ContentKind::FacilitiesSlides => self.facilities_slides.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        ContentKind::ALL.iter().all(|kind| self.len_of(*kind) == 0)
    }
}
