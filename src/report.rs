//! Plain-text result output

use crate::algorithms::SortAlgorithm;
use crate::batch::Checkpoint;
use crate::ordering::SortKey;
use crate::shape::Shape;
use std::io::{self, Write};
use std::time::Duration;

/// Writes shapes, checkpoints and summaries for one metric
pub struct Reporter<W: Write> {
    out: W,
    key: SortKey,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, key: SortKey) -> Self {
        Self { out, key }
    }

    /// One line per shape, in the given order
    pub fn shapes(&mut self, shapes: &[Shape]) -> io::Result<()> {
        for shape in shapes {
            writeln!(self.out, "{}", shape.display(self.key))?;
        }
        Ok(())
    }

    pub fn checkpoint(&mut self, checkpoint: &Checkpoint) -> io::Result<()> {
        writeln!(
            self.out,
            "Checkpoint {} ({} records): {}",
            checkpoint.index,
            checkpoint.count,
            checkpoint.top.display(self.key)
        )
    }

    /// First, last and second-last elements of a sorted sequence
    pub fn summary(&mut self, sorted: &[Shape]) -> io::Result<()> {
        let second_last = sorted.len().checked_sub(2).map(|i| &sorted[i]);
        for (label, shape) in [
            ("First", sorted.first()),
            ("Last", sorted.last()),
            ("Second-last", second_last),
        ] {
            if let Some(shape) = shape {
                writeln!(self.out, "{label} element: {}", shape.display(self.key))?;
            }
        }
        writeln!(self.out, "Sorted {} shapes", sorted.len())
    }

    pub fn timing(&mut self, algorithm: SortAlgorithm, elapsed: Duration) -> io::Result<()> {
        writeln!(
            self.out,
            "{} run time was: {} milliseconds",
            algorithm.flag().to_ascii_uppercase(),
            elapsed.as_millis()
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
