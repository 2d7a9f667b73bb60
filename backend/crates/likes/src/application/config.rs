//! Application Configuration

/// Likes application configuration
#[derive(Debug, Clone)]
pub struct LikesConfig {
    /// Page size when the request does not specify one
    pub default_page_size: u32,
    /// Hard cap on requested page sizes
    pub max_page_size: u32,
}

impl Default for LikesConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl LikesConfig {
    /// Resolve a requested page size against default and cap
    pub fn clamp_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(0) | None => self.default_page_size,
            Some(size) => size.min(self.max_page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_size() {
        let config = LikesConfig::default();
        assert_eq!(config.clamp_size(None), 20);
        assert_eq!(config.clamp_size(Some(0)), 20);
        assert_eq!(config.clamp_size(Some(50)), 50);
        assert_eq!(config.clamp_size(Some(5000)), 100);
    }
}
