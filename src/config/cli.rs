use crate::config::content_config::ContentConfig;
use crate::domain::model::AggregateContent;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "landing-content")]
#[command(about = "Fetch landing page content from the CMS and write render-ready JSON")]
pub struct CliArgs {
    /// Path to a TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override backend.base_url
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override backend.timeout_seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Override output.path ("-" writes to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<ContentConfig> {
        let mut config = match &self.config {
            Some(path) => ContentConfig::from_file(path)?,
            None => ContentConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.backend.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.backend.timeout_seconds = timeout;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }

        Ok(config)
    }
}

/// 彙整結果的輸出位置，`-` 代表 stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    pub fn from_path(path: &str) -> Self {
        if path == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(path.to_string())
        }
    }

    pub async fn write<S: Storage, W: Write>(
        &self,
        content: &AggregateContent,
        storage: &S,
        stdout: &mut W,
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(content)?;

        match self {
            OutputTarget::Stdout => {
                writeln!(stdout, "{}", json)?;
                stdout.flush()?;
            }
            OutputTarget::File(path) => {
                storage.write_file(path, json.as_bytes()).await?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(Path::new(path));

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
