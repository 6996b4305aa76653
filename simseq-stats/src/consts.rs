pub const TALLY_CMD: &str = "tally";
pub const LENPICK_CMD: &str = "lenpick";

pub const DEFAULT_DELIMITER: char = ',';
pub const TAB_ESCAPE: &str = "\\t";
