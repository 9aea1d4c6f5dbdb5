use crate::domain::model::EndpointDescriptor;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://simplotel-hablis-backend.onrender.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_OUTPUT_PATH: &str = "./content.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub backend: BackendConfig,
    pub endpoints: Vec<EndpointDescriptor>,
    pub images: ImageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// 每個請求都會帶上的查詢參數，例如 `populate=*`
    pub query: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub allowed_hosts: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            endpoints: EndpointDescriptor::defaults(),
            images: ImageConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        let mut query = BTreeMap::new();
        query.insert("populate".to_string(), "*".to_string());
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            query,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl ContentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，未填的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CMS_BASE_URL})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContentError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_seconds)
    }

    pub fn allowed_image_hosts(&self) -> Option<&[String]> {
        self.images.allowed_hosts.as_deref()
    }
}

impl Validate for ContentConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_base_url("backend.base_url", &self.backend.base_url)?;
        validation::validate_range(
            "backend.timeout_seconds",
            self.backend.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;

        for endpoint in &self.endpoints {
            validation::validate_endpoint_path(
                &format!("endpoints.{}.path", endpoint.kind),
                &endpoint.path,
            )?;
        }
        validation::validate_unique("endpoints.kind", self.endpoints.iter().map(|e| e.kind))?;

        for host in self.allowed_image_hosts().unwrap_or_default() {
            validation::validate_host("images.allowed_hosts", host)?;
        }

        validation::validate_output_target("output.path", &self.output.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ContentKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ContentConfig::from_toml_str("").unwrap();

        assert_eq!(config, ContentConfig::default());
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.backend.query.get("populate").unwrap(), "*");
        assert_eq!(config.endpoints.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[backend]
base_url = "http://localhost:1337"
timeout_seconds = 3

[backend.query]
populate = "*"
locale = "en"

[[endpoints]]
kind = "hero-slides"
path = "/api/hero-slides"

[[endpoints]]
kind = "facilities-slides"
path = "/api/facilities"

[images]
allowed_hosts = ["cdn.example.com"]

[output]
path = "./build/content.json"
"#;

        let config = ContentConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.backend.base_url, "http://localhost:1337");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.backend.query.len(), 2);
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[1].kind, ContentKind::FacilitiesSlides);
        assert_eq!(config.endpoints[1].path, "/api/facilities");
        assert_eq!(
            config.allowed_image_hosts(),
            Some(&["cdn.example.com".to_string()][..])
        );
        assert_eq!(config.output.path, "./build/content.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LANDING_TEST_CMS_URL", "https://cms.test.com");

        let toml_content = r#"
[backend]
base_url = "${LANDING_TEST_CMS_URL}"
"#;

        let config = ContentConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend.base_url, "https://cms.test.com");

        std::env::remove_var("LANDING_TEST_CMS_URL");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let toml_content = r#"
[[endpoints]]
kind = "blog-posts"
path = "/api/blog-posts"
"#;
        assert!(ContentConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ContentConfig::default();
        config.backend.base_url = "invalid-url".to_string();
        assert!(config.validate().is_err());

        let mut config = ContentConfig::default();
        config.backend.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = ContentConfig::default();
        config
            .endpoints
            .push(EndpointDescriptor::new(ContentKind::HeroSlides, "/api/other"));
        assert!(config.validate().is_err());

        let mut config = ContentConfig::default();
        config.endpoints[0].path = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ContentConfig::default();
        config.backend.timeout_seconds = MAX_TIMEOUT_SECONDS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_misplaced_url_parts() {
        let mut config = ContentConfig::default();
        config.backend.base_url = "https://cms.example.com/strapi".to_string();
        assert!(config.validate().is_ok());

        config.backend.base_url = "https://cms.example.com/strapi?populate=*".to_string();
        assert!(config.validate().is_err());

        let mut config = ContentConfig::default();
        config.endpoints[1].path = "https://other.example.com/api/package-slides".to_string();
        assert!(config.validate().is_err());

        let mut config = ContentConfig::default();
        config.images.allowed_hosts = Some(vec!["https://cdn.example.com".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[backend]
base_url = "https://cms.example.com"

[output]
path = "-"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ContentConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend.base_url, "https://cms.example.com");
        assert_eq!(config.output.path, "-");
        assert_eq!(config.endpoints.len(), 4);
    }
}
