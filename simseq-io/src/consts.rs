pub const FASTA_HEADER_PREFIX: u8 = b'>';
pub const REFERENCE_EXTENSION: &str = "fa";
