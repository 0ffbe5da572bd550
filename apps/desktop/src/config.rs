use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".into(),
        }
    }
}

pub fn load_settings(cli_server_url: Option<String>) -> Settings {
    let file = fs::read_to_string("catalog.toml").ok();
    settings_from_sources(file.as_deref(), |key| std::env::var(key).ok(), cli_server_url)
}

/// Defaults, then `catalog.toml`, then environment, then the command line.
fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    cli_server_url: Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
        }
    }

    if let Some(v) = env("CATALOG_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = cli_server_url {
        settings.server_url = v;
    }

    settings
}
