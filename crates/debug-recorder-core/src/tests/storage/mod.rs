mod log_dir;
mod path_setting;
