use serde::{Deserialize, Serialize};

/// Output encoding for the encoded message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Hex dump, one line per `hex_line_width` bytes
    Hex,
    /// Raw wire bytes
    Binary,
}

/// Configuration structure loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Largest message the output buffer accepts, in bytes
    #[serde(default = "default_buffer_limit")]
    pub buffer_limit: usize,

    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Bytes per hex line, 0 for a single line
    #[serde(default = "default_hex_line_width")]
    pub hex_line_width: usize,
}

fn default_buffer_limit() -> usize {
    dhcp_wire::buffer::DEFAULT_LIMIT
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Hex
}

fn default_hex_line_width() -> usize {
    16
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_limit: default_buffer_limit(),
            output_format: default_output_format(),
            hex_line_width: default_hex_line_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = serde_yaml::from_str("output_format: binary\n").unwrap();
        assert_eq!(config.output_format, OutputFormat::Binary);
        assert_eq!(config.buffer_limit, 1500);
        assert_eq!(config.hex_line_width, 16);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("dhcp-encode-config-{}.yaml", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let config = Config {
            buffer_limit: 576,
            output_format: OutputFormat::Binary,
            hex_line_width: 0,
        };
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.buffer_limit, 576);
        assert_eq!(loaded.output_format, OutputFormat::Binary);
        assert_eq!(loaded.hex_line_width, 0);
    }
}
