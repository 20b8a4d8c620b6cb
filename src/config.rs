//! Adapter configuration.

use crate::types::Resolution;

/// Fixed setup parameters for an [`Adapter`](crate::Adapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Logical framebuffer size; the window adds decoration insets to it.
    pub resolution: Resolution,
    /// Initial screen position of the window.
    pub window_position: (i32, i32),
    /// Title drawn and advertised until the engine sets one.
    pub default_title: String,
    /// Icon name advertised to panels.
    pub icon_name: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::DOOMGENERIC,
            window_position: (300, 300),
            default_title: "Doom".to_string(),
            icon_name: "doom".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Set the logical framebuffer size.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Resolution::new(width, height);
        self
    }

    /// Set the initial screen position.
    pub fn with_window_position(mut self, x: i32, y: i32) -> Self {
        self.window_position = (x, y);
        self
    }

    /// Set the title used until the engine sets one.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the advertised icon name.
    pub fn with_icon_name(mut self, icon: impl Into<String>) -> Self {
        self.icon_name = icon.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AdapterConfig::default();
        assert_eq!(c.resolution, Resolution::new(640, 400));
        assert_eq!(c.window_position, (300, 300));
        assert_eq!(c.default_title, "Doom");
        assert_eq!(c.icon_name, "doom");
    }

    #[test]
    fn test_builders() {
        let c = AdapterConfig::default()
            .with_resolution(320, 200)
            .with_window_position(0, 10)
            .with_default_title("Heretic")
            .with_icon_name("heretic");
        assert_eq!(c.resolution, Resolution::new(320, 200));
        assert_eq!(c.window_position, (0, 10));
        assert_eq!(c.default_title, "Heretic");
        assert_eq!(c.icon_name, "heretic");
    }
}
