pub const DEFAULT_BASELINE: u64 = 100;

// config files
pub const COMMENT_PREFIX: char = '#';
pub const BASELINE_LINE_PREFIX: &str = "--baseline=";
pub const FIELD_DELIMITER: char = ',';

// origin labels used in configuration errors
pub const BASELINE_ARG_ORIGIN: &str = "--baseline";
pub const SAMPLING_ARG_ORIGIN: &str = "sampling argument";
