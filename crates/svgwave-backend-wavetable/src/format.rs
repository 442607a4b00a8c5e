//! Text record output.
//!
//! A block is one `<index><delimiter><value>` record per sample, in index
//! order, followed by an empty record. Written out line by line this leaves
//! a blank line after every block, which separates consecutive curves.

use std::io::{self, Write};

use svgwave_spec::Delimiter;

/// Formats normalized samples as delimited index/value records.
#[derive(Debug, Clone, Default)]
pub struct RecordFormatter {
    delimiter: Delimiter,
}

impl RecordFormatter {
    /// Creates a formatter with the given delimiter.
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    /// The resolved delimiter.
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// Formats a single record.
    pub fn record(&self, index: usize, value: i16) -> String {
        format!("{}{}{}", index, self.delimiter, value)
    }

    /// Returns the records of one block, ending with the empty record.
    pub fn records(&self, samples: &[i16]) -> Vec<String> {
        let mut out: Vec<String> = samples
            .iter()
            .enumerate()
            .map(|(i, &v)| self.record(i, v))
            .collect();
        out.push(String::new());
        out
    }

    /// Writes one block, one record per line.
    pub fn write_block<W: Write>(&self, writer: &mut W, samples: &[i16]) -> io::Result<()> {
        for (i, &v) in samples.iter().enumerate() {
            writeln!(writer, "{}{}{}", i, self.delimiter, v)?;
        }
        writeln!(writer)
    }

    /// Renders one block to a string.
    pub fn to_text(&self, samples: &[i16]) -> String {
        let mut buf = Vec::new();
        self.write_block(&mut buf, samples)
            .expect("writing to Vec should not fail");
        String::from_utf8_lossy(&buf).into_owned()
    }
}
