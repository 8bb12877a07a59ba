pub mod config;
pub mod error;

pub use config::{
    ImportedConfig, MAX_IMPORT_FILE_SIZE, PREVIEW_ROWS, VARIABLE_COLUMN, check_file_size,
    read_config, read_config_path,
};
pub use error::{ImportError, Result};
