use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub api_token: String,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            api_token: "dev-token".into(),
            page_size: 10,
        }
    }
}

/// Defaults, overridden by `console.toml`, overridden by environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("api_token") {
                settings.api_token = v.clone();
            }
            if let Some(v) = file_cfg.get("page_size") {
                if let Ok(n) = v.parse() {
                    settings.page_size = n;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("ADMIN_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("ADMIN_API_TOKEN") {
        settings.api_token = v;
    }
    if let Ok(v) = std::env::var("ADMIN_PAGE_SIZE") {
        if let Ok(n) = v.parse() {
            settings.page_size = n;
        }
    }

    settings
}
