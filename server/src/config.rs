use std::path::PathBuf;

use sehha_shared::MapConfig;
use sehha_shared::map_config::DEFAULT_STYLE_URL;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";

pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

/// Map widget settings handed to the browser. A missing token still yields a config
/// that the client reports as unusable.
pub fn map_config() -> MapConfig {
    let access_token = std::env::var("MAPBOX_ACCESS_TOKEN")
        .map(|value| value.trim().to_string())
        .unwrap_or_default();
    let style_url = std::env::var("MAP_STYLE_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_STYLE_URL.to_string());
    MapConfig {
        access_token,
        style_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_port_defaults_and_rejects_garbage() {
        temp_env::with_var_unset("SERVER_PORT", || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some("8088"), || {
            assert_eq!(server_port(), 8088);
        });
        temp_env::with_var("SERVER_PORT", Some("0"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some("http"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
    }

    #[test]
    fn static_dir_ignores_blank_override() {
        temp_env::with_var("STATIC_DIR", Some("  "), || {
            assert_eq!(static_dir(), PathBuf::from(DEFAULT_STATIC_DIR));
        });
        temp_env::with_var("STATIC_DIR", Some("/srv/sehha"), || {
            assert_eq!(static_dir(), PathBuf::from("/srv/sehha"));
        });
    }

    #[test]
    fn map_config_reads_token_and_style() {
        temp_env::with_vars(
            [
                ("MAPBOX_ACCESS_TOKEN", Some(" pk.abc ")),
                ("MAP_STYLE_URL", Some("mapbox://styles/mapbox/dark-v11")),
            ],
            || {
                let config = map_config();
                assert_eq!(config.access_token, "pk.abc");
                assert_eq!(config.style_url, "mapbox://styles/mapbox/dark-v11");
                assert!(config.is_usable());
            },
        );
    }

    #[test]
    fn map_config_without_token_is_unusable() {
        temp_env::with_vars_unset(["MAPBOX_ACCESS_TOKEN", "MAP_STYLE_URL"], || {
            let config = map_config();
            assert!(!config.is_usable());
            assert_eq!(config.style_url, DEFAULT_STYLE_URL);
        });
    }
}
