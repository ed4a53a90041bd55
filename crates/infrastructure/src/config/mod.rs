//! Runtime configuration

mod settings;

pub use settings::{
    CONFIG_ERROR_EXIT_CODE, DEFAULT_READY_TIMEOUT_MS, OutputFormat, RawSettings, Settings,
    SettingsError,
};
