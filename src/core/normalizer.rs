use crate::config::ContentConfig;
use crate::domain::model::{
    AccommodationImage, FacilitySlide, FetchOutcome, HeroSlide, PackageSlide, RawContentBatch,
};
use crate::utils::error::RecordRejection;
use serde_json::{Map, Value};
use url::Url;

type FieldResult<T> = std::result::Result<T, RecordRejection>;

/// 後端單筆紀錄的唯讀視圖，提供各欄位的型別檢查
pub struct BackendRecord<'a> {
    fields: &'a Map<String, Value>,
    allowed_image_hosts: Option<&'a [String]>,
}

impl<'a> BackendRecord<'a> {
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    pub fn id(&self) -> FieldResult<i64> {
        self.present("id")
            .ok_or(RecordRejection::MissingField("id"))?
            .as_i64()
            .ok_or(RecordRejection::WrongType {
                field: "id",
                expected: "integer",
            })
    }

    /// 文字欄位缺少或為 null 時視為空字串
    pub fn text(&self, field: &'static str) -> FieldResult<String> {
        match self.present(field) {
            None => Ok(String::new()),
            Some(Value::String(text)) => Ok(text.clone()),
            Some(_) => Err(RecordRejection::WrongType {
                field,
                expected: "string",
            }),
        }
    }

    pub fn image_url(&self) -> FieldResult<String> {
        let raw = self
            .present("img_url")
            .ok_or(RecordRejection::MissingField("img_url"))?
            .as_str()
            .ok_or(RecordRejection::WrongType {
                field: "img_url",
                expected: "string",
            })?;

        let url = Url::parse(raw).map_err(|_| RecordRejection::InvalidImageUrl(raw.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RecordRejection::InvalidImageUrl(raw.to_string()));
        }

        if let Some(hosts) = self.allowed_image_hosts {
            let host = url.host_str().unwrap_or_default();
            if !hosts.iter().any(|allowed| allowed.eq_ignore_ascii_case(host)) {
                return Err(RecordRejection::DisallowedImageHost(host.to_string()));
            }
        }

        Ok(raw.to_string())
    }
}

/// 可由後端紀錄轉換而來的 view-model
pub trait ViewModel: Sized {
    fn from_record(record: &BackendRecord<'_>) -> FieldResult<Self>;
}

impl ViewModel for HeroSlide {
    fn from_record(record: &BackendRecord<'_>) -> FieldResult<Self> {
        Ok(HeroSlide {
            id: record.id()?,
            description: record.text("Description")?,
            image_url: record.image_url()?,
        })
    }
}

impl ViewModel for PackageSlide {
    fn from_record(record: &BackendRecord<'_>) -> FieldResult<Self> {
        Ok(PackageSlide {
            id: record.id()?,
            title: record.text("title")?,
            image_url: record.image_url()?,
        })
    }
}

impl ViewModel for AccommodationImage {
    fn from_record(record: &BackendRecord<'_>) -> FieldResult<Self> {
        Ok(AccommodationImage {
            id: record.id()?,
            title: record.text("title")?,
            image_url: record.image_url()?,
        })
    }
}

impl ViewModel for FacilitySlide {
    fn from_record(record: &BackendRecord<'_>) -> FieldResult<Self> {
        Ok(FacilitySlide {
            id: record.id()?,
            title: record.text("title")?,
            description: record.text("description")?,
            image_url: record.image_url()?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    allowed_image_hosts: Option<Vec<String>>,
}

impl Normalizer {
    pub fn new(allowed_image_hosts: Option<Vec<String>>) -> Self {
        Self {
            allowed_image_hosts,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.allowed_image_hosts().map(<[String]>::to_vec))
    }

    /// 將一個 batch 轉成 view-model 序列。
    ///
    /// 抓取失敗或缺少 `data` 陣列時回傳空序列；個別格式不符的紀錄會被略過，
    /// 其餘紀錄維持原本順序。
    pub fn normalize<T: ViewModel>(&self, batch: &RawContentBatch) -> Vec<T> {
        let body = match &batch.outcome {
            FetchOutcome::Body(body) => body,
            FetchOutcome::Failed(_) => {
                tracing::debug!("{} degraded to empty after fetch failure", batch.kind);
                return Vec::new();
            }
        };

        let Some(items) = body.get("data").and_then(Value::as_array) else {
            tracing::warn!(
                "⚠️ {} response has no top-level 'data' array, section will be empty",
                batch.kind
            );
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match self.convert::<T>(item) {
                Ok(view_model) => Some(view_model),
                Err(reason) => {
                    tracing::warn!("🗑️ Dropping {} record #{}: {}", batch.kind, index, reason);
                    None
                }
            })
            .collect()
    }

    fn convert<T: ViewModel>(&self, item: &Value) -> FieldResult<T> {
        let fields = item.as_object().ok_or(RecordRejection::NotAnObject)?;
        T::from_record(&BackendRecord {
            fields,
            allowed_image_hosts: self.allowed_image_hosts.as_deref(),
        })
    }
}
