use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub lists: ListsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Полный адрес API. Пусто - тот же хост, что у страницы, на порту `port`.
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
    pub path_prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListsConfig {
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub search_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8000
path_prefix = "/api"

[lists]
page_size = 5
max_visible_pages = 5
search_debounce_ms = 300

[logging]
level = "debug"
"#;

pub fn parse_config(source: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(source)
}

/// Load the embedded configuration
pub fn load_config() -> Result<AppConfig, toml::de::Error> {
    parse_config(DEFAULT_CONFIG)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                port: 8000,
                path_prefix: "/api".to_string(),
            },
            lists: ListsConfig {
                page_size: 5,
                max_visible_pages: 5,
                search_debounce_ms: 300,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> log::Level {
        self.logging.level.parse().unwrap_or(log::Level::Debug)
    }
}

impl ApiConfig {
    /// Базовый адрес для заданного протокола и хоста страницы
    pub fn base_for(&self, protocol: &str, hostname: &str) -> String {
        let explicit = self.base_url.trim();
        if !explicit.is_empty() {
            return explicit.trim_end_matches('/').to_string();
        }
        format!(
            "{}//{}:{}{}",
            protocol,
            hostname,
            self.port,
            self.path_prefix.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config();
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn test_base_from_page_location() {
        let config = AppConfig::default();
        assert_eq!(
            config.api.base_for("https:", "admin.example.com"),
            "https://admin.example.com:8000/api"
        );
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = parse_config(
            r#"
            [api]
            base_url = "http://13.51.13.251:8000/api/"
            port = 1
            path_prefix = "/ignored"
            [lists]
            page_size = 10
            max_visible_pages = 7
            search_debounce_ms = 0
            [logging]
            level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_for("http:", "localhost"), "http://13.51.13.251:8000/api");
        assert_eq!(config.lists.page_size, 10);
        assert_eq!(config.log_level(), log::Level::Warn);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(parse_config("[api]\nport = 1\npath_prefix = \"\"").is_err());
    }
}
