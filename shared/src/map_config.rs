use serde::{Deserialize, Serialize};

pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/light-v11";

/// Settings the browser needs to create the hosted map widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_style_url")]
    pub style_url: String,
}

fn default_style_url() -> String {
    DEFAULT_STYLE_URL.to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style_url: default_style_url(),
        }
    }
}

impl MapConfig {
    pub fn is_usable(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_STYLE_URL, MapConfig};

    #[test]
    fn wire_format_is_camel_case() {
        let config = MapConfig {
            access_token: "pk.test".to_string(),
            style_url: "mapbox://styles/example".to_string(),
        };
        let json = serde_json::to_value(&config).expect("serialize config");
        assert_eq!(json["accessToken"], "pk.test");
        assert_eq!(json["styleUrl"], "mapbox://styles/example");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: MapConfig = serde_json::from_str("{}").expect("parse empty config");
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.style_url, DEFAULT_STYLE_URL);
        assert!(!config.is_usable());
    }

    #[test]
    fn blank_token_is_not_usable() {
        let config = MapConfig {
            access_token: "   ".to_string(),
            ..MapConfig::default()
        };
        assert!(!config.is_usable());
    }
}
