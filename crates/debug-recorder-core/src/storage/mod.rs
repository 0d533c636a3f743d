mod log_dir;
mod path_setting;
mod sentinel;

pub use {
    log_dir::{LOG_DIR_TIMESTAMP_FORMAT, LogDirNamer, create_log_dir},
    path_setting::{PathSetting, TomlPathSetting},
    sentinel::{SENTINEL_FILE_NAME, SentinelLocation, SentinelTrigger, resolve_sentinel_dir},
};
