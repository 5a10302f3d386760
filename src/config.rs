use serde::{Deserialize, Serialize};

/// Window and clear settings shared by the demo binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub clear_color: [f32; 4],
}

impl WindowConfig {
    pub fn with_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "SnowWindow".to_string(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn test_with_title() {
        let config = WindowConfig::with_title("Snow");
        assert_eq!(config.title, "Snow");
        assert_eq!(config.width, 800);
    }
}
