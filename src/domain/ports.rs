use crate::domain::model::{EndpointDescriptor, RawContentBatch};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 內容來源：每個端點回傳一個 `RawContentBatch`，順序與輸入相同。
///
/// 單一端點的失敗要包在 batch 裡；只有整體無法執行時才回傳 `Err`。
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_all(&self, endpoints: &[EndpointDescriptor]) -> Result<Vec<RawContentBatch>>;
}
