use clap::{Parser, ValueEnum};
use climate_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_API_PORT, DEFAULT_DATASET_PATH,
    DEFAULT_RECENT_DAYS,
};
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use serde::Deserialize;
use std::{env, sync::Arc};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::db::{CsvLoader, DatasetLoader, SqliteLoader};

/// Where the observations are read from at startup.
#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// SQLite file with `measurement` and `station` tables
    #[default]
    Sqlite,
    /// Directory holding `hawaii_measurements.csv` and `hawaii_stations.csv`
    Csv,
}

#[derive(Parser, Clone, Debug, Deserialize, Default)]
#[command(
    author,
    version,
    about = "Climate App - read-only API over historical station observations"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMATE_API_CONFIG, ./climate.toml,
    /// $XDG_CONFIG_HOME/climate-api/climate.toml, /etc/climate-api/climate.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMATE_API_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "CLIMATE_API_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLIMATE_API_PORT")]
    pub port: Option<String>,

    /// Public URL used in links on the landing page
    #[arg(short, long, env = "CLIMATE_API_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Kind of dataset to load
    #[arg(short, long, value_enum, env = "CLIMATE_API_SOURCE")]
    pub source: Option<DataSource>,

    /// SQLite file, or directory of CSV files when --source csv
    #[arg(long, env = "CLIMATE_API_DATASET")]
    #[serde(alias = "data_dir")]
    pub dataset: Option<String>,

    /// Length in days of the "recent" window used by /precipitation and /tobs
    #[arg(long, env = "CLIMATE_API_RECENT_DAYS")]
    pub recent_days: Option<u32>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
    }

    pub fn remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host(), self.port()))
    }

    pub fn source(&self) -> DataSource {
        self.source.unwrap_or_default()
    }

    pub fn dataset(&self) -> String {
        self.dataset.clone().unwrap_or_else(|| match self.source() {
            DataSource::Sqlite => DEFAULT_DATASET_PATH.to_string(),
            DataSource::Csv => "./Resources".to_string(),
        })
    }

    pub fn recent_days(&self) -> u32 {
        self.recent_days.unwrap_or(DEFAULT_RECENT_DAYS)
    }

    pub fn loader(&self) -> Arc<dyn DatasetLoader> {
        match self.source() {
            DataSource::Sqlite => Arc::new(SqliteLoader::new(self.dataset())),
            DataSource::Csv => Arc::new(CsvLoader::new(self.dataset())),
        }
    }

    /// Fill every unset value from `file_config`.
    pub fn or(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            domain: self.domain.or(file_config.domain),
            port: self.port.or(file_config.port),
            remote_url: self.remote_url.or(file_config.remote_url),
            source: self.source.or(file_config.source),
            dataset: self.dataset.or(file_config.dataset),
            recent_days: self.recent_days.or(file_config.recent_days),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMATE_API_CONFIG", "climate.toml")
    };

    // logger is not up yet, so problems go to stderr
    let file_config: Cli = match load_config(&source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ignoring config file {}: {}", source, e);
            Cli::default()
        }
    };

    // CLI args override file config (env vars are handled by clap)
    cli_args.or(file_config)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| "-".to_string());
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_sqlite_dataset() {
        let cli = Cli::default();
        assert_eq!(cli.host(), "127.0.0.1");
        assert_eq!(cli.port(), "5000");
        assert_eq!(cli.remote_url(), "http://127.0.0.1:5000");
        assert_eq!(cli.source(), DataSource::Sqlite);
        assert_eq!(cli.dataset(), DEFAULT_DATASET_PATH);
        assert_eq!(cli.recent_days(), 365);
        assert!(cli.loader().source().starts_with("sqlite:"));
    }

    #[test]
    fn csv_source_defaults_to_resources_directory() {
        let cli = Cli {
            source: Some(DataSource::Csv),
            ..Cli::default()
        };
        assert_eq!(cli.dataset(), "./Resources");
        assert_eq!(cli.loader().source(), "csv:./Resources");
    }

    #[test]
    fn cli_values_win_over_file_values() {
        let args = Cli {
            port: Some("8080".to_string()),
            ..Cli::default()
        };
        let file: Cli = toml::from_str(
            r#"
            port = "9000"
            host = "0.0.0.0"
            source = "csv"
            data_dir = "/srv/climate"
            recent_days = 30
            "#,
        )
        .unwrap();

        let merged = args.or(file);
        assert_eq!(merged.port(), "8080");
        assert_eq!(merged.host(), "0.0.0.0");
        assert_eq!(merged.source(), DataSource::Csv);
        assert_eq!(merged.dataset(), "/srv/climate");
        assert_eq!(merged.recent_days(), 30);
    }

    #[test]
    fn negative_or_oversized_window_is_rejected() {
        for arg in ["--recent-days=-5", "--recent-days=9223372036854775807"] {
            assert!(Cli::try_parse_from(["climate", arg]).is_err(), "{}", arg);
        }
        assert!(toml::from_str::<Cli>("recent_days = -5").is_err());

        let cli = Cli::try_parse_from(["climate", "--recent-days=0"]).unwrap();
        assert_eq!(cli.recent_days(), 0);
    }

    #[test]
    fn log_level_falls_back_to_info() {
        let cli = Cli {
            level: Some("DEBUG".to_string()),
            ..Cli::default()
        };
        assert_eq!(get_log_level(&cli), LevelFilter::Debug);

        let cli = Cli {
            level: Some("loud".to_string()),
            ..Cli::default()
        };
        assert_eq!(get_log_level(&cli), LevelFilter::Info);
    }
}
