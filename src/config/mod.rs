mod app_config;
mod settings;

pub use app_config::AppConfig;
pub use settings::Settings;
