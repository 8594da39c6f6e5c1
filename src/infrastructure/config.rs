use serde::Deserialize;

use crate::infrastructure::flat_file_repository::DEFAULT_LOOKUP_DISTANCE_DAYS;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub directory: String,
    #[serde(default = "default_lookup_distance")]
    pub max_lookup_distance_days: f64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: default_data_dir(),
            max_lookup_distance_days: default_lookup_distance(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_data_dir() -> String {
    "Data".to_string()
}

fn default_lookup_distance() -> f64 {
    DEFAULT_LOOKUP_DISTANCE_DAYS
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[data]\ndirectory = \"/var/log/greenhouse\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let parsed: ServiceConfig = settings.try_deserialize().unwrap();

        assert_eq!(parsed.data.directory, "/var/log/greenhouse");
        assert_eq!(parsed.data.max_lookup_distance_days, DEFAULT_LOOKUP_DISTANCE_DAYS);
        assert_eq!(parsed.server.listen, "0.0.0.0:8000");
    }
}
