use std::io::{self, Write};

use seq_io::fasta::{Record, RefRecord};

use crate::consts::FASTA_HEADER_PREFIX;

///
/// Identifier of a record: the first whitespace-delimited token of its
/// header. Headers that are not valid UTF-8 yield `None`.
///
pub fn record_id<'a>(record: &'a RefRecord) -> Option<&'a str> {
    let head = std::str::from_utf8(record.head()).ok()?;
    head.split_whitespace().next()
}

/// Write the record with its header verbatim and its sequence on one line.
pub fn write_single_line<W: Write>(record: &RefRecord, writer: &mut W) -> io::Result<()> {
    writer.write_all(&[FASTA_HEADER_PREFIX])?;
    writer.write_all(record.head())?;
    writer.write_all(b"\n")?;
    for seq_line in record.seq_lines() {
        writer.write_all(seq_line)?;
    }
    writer.write_all(b"\n")
}
