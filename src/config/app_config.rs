use std::path::Path;

/// Application configuration containing the crate-wide defaults
///
/// This struct centralizes configuration values to make them easier to
/// manage and provides a foundation for future configuration file support.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// File extensions treated as images when scanning folders
    pub image_extensions: Vec<&'static str>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_extensions: vec!["png", "jpg", "jpeg"],
        }
    }
}

impl AppConfig {
    /// Check whether a path points at a supported image file
    pub fn is_image_file(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.image_extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}
