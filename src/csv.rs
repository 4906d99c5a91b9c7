//! Line-oriented CSV support for the results and fixture feeds. The feeds are
//! plain comma-separated exports without quoting or embedded commas, so a full
//! CSV dialect is deliberately not attempted.

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use rustc_hash::FxHashMap;

pub struct CsvReader {
    lines: Lines<BufReader<File>>,
}
impl CsvReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        let lines = BufReader::new(file).lines();
        Ok(Self { lines })
    }
}

impl Iterator for CsvReader {
    type Item = Result<Vec<String>, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .next()
            .map(|line| line.map(|line| split_row(&line)))
    }
}

pub fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

pub struct CsvWriter {
    writer: BufWriter<File>,
}
impl CsvWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }

    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut first = true;
        for datum in record.into_iter() {
            if !first {
                self.writer.write_all(b",")?;
            }
            first = false;
            self.writer.write_all(datum.as_ref().as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }
}

/// Column lookup by header name. Feeds carry extra columns in unpredictable
/// positions; consumers locate the ones they need and ignore the rest.
#[derive(Debug)]
pub struct Header {
    index: FxHashMap<String, usize>,
}
impl Header {
    pub fn parse(cells: &[String]) -> Self {
        let mut index = FxHashMap::default();
        for (position, cell) in cells.iter().enumerate() {
            // first occurrence wins if a feed repeats a column
            index.entry(cell.trim().to_string()).or_insert(position);
        }
        Self { index }
    }

    pub fn locate(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
