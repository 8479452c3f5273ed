pub mod config;
pub mod errors;
pub mod export;
pub mod obj;
pub mod stl;

pub use config::{
    load_config, load_config_file, save_config, save_config_file, JointConfig, LimitSettings,
    FORMAT_NAME, FORMAT_VERSION,
};
pub use errors::{ConfigError, ExportError};
pub use export::{export_part, ExportedPart};
pub use obj::write_obj;
pub use stl::{write_ascii_stl, write_binary_stl};
