//! Chunked batch processing for large shape files
//!
//! Records are folded into two pieces of state: a chunk buffer that is sorted and
//! summarized every `chunk_size` records, and an accumulator holding every record
//! for one final global sort. Chunk checkpoints are a reporting device only; the
//! global result never reuses the chunk sorts.

use crate::algorithms::SortAlgorithm;
use crate::error::{ShapeResult, ShapeSortError};
use crate::ordering::{SortKey, SortOrder};
use crate::shape::Shape;

/// Default number of records per chunk
pub const CHUNK_SIZE: usize = 1000;

/// Representative element reported after sorting one chunk
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    /// 1-based chunk number
    pub index: usize,
    /// Records consumed so far, including this chunk
    pub count: usize,
    /// First element of the sorted chunk
    pub top: Shape,
}

/// Result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub checkpoints: Vec<Checkpoint>,
    /// Every record, sorted once as a whole
    pub sorted: Vec<Shape>,
}

impl BatchReport {
    pub fn first(&self) -> Option<&Shape> {
        self.sorted.first()
    }

    pub fn last(&self) -> Option<&Shape> {
        self.sorted.last()
    }

    pub fn second_last(&self) -> Option<&Shape> {
        self.sorted.len().checked_sub(2).map(|i| &self.sorted[i])
    }
}

/// Fold state carried across records
#[derive(Default)]
struct BatchState {
    chunk: Vec<Shape>,
    all: Vec<Shape>,
    checkpoints: Vec<Checkpoint>,
}

/// Chunked sort pipeline
#[derive(Debug, Clone, Copy)]
pub struct BatchPipeline {
    algorithm: SortAlgorithm,
    key: SortKey,
    order: SortOrder,
    chunk_size: usize,
}

impl BatchPipeline {
    pub fn new(
        algorithm: SortAlgorithm,
        key: SortKey,
        order: SortOrder,
        chunk_size: usize,
    ) -> ShapeResult<Self> {
        if chunk_size == 0 {
            return Err(ShapeSortError::invalid_config("chunk size must be positive"));
        }
        Ok(Self {
            algorithm,
            key,
            order,
            chunk_size,
        })
    }

    /// Sort `shapes` in place with the configured algorithm and ordering
    pub fn sort(&self, shapes: &mut [Shape]) {
        self.algorithm
            .sort_by(shapes, self.key.comparator(self.order));
    }

    /// Consume `records`, calling `on_checkpoint` as each chunk is summarized.
    ///
    /// The first record error aborts the run; checkpoints already emitted stay emitted.
    pub fn run<I, F>(&self, records: I, mut on_checkpoint: F) -> ShapeResult<BatchReport>
    where
        I: IntoIterator<Item = ShapeResult<Shape>>,
        F: FnMut(&Checkpoint) -> ShapeResult<()>,
    {
        let mut state = BatchState {
            chunk: Vec::with_capacity(self.chunk_size),
            ..Default::default()
        };

        for record in records {
            let shape = record?;
            state.chunk.push(shape);
            state.all.push(shape);
            if state.chunk.len() == self.chunk_size {
                self.checkpoint(&mut state, &mut on_checkpoint)?;
            }
        }
        if !state.chunk.is_empty() {
            self.checkpoint(&mut state, &mut on_checkpoint)?;
        }

        log::info!(
            "sorting all {} records with {} sort",
            state.all.len(),
            self.algorithm
        );
        self.sort(&mut state.all);

        Ok(BatchReport {
            total: state.all.len(),
            checkpoints: state.checkpoints,
            sorted: state.all,
        })
    }

    fn checkpoint<F>(&self, state: &mut BatchState, on_checkpoint: &mut F) -> ShapeResult<()>
    where
        F: FnMut(&Checkpoint) -> ShapeResult<()>,
    {
        self.sort(&mut state.chunk);
        let checkpoint = Checkpoint {
            index: state.checkpoints.len() + 1,
            count: state.all.len(),
            top: state.chunk[0],
        };
        log::debug!(
            "chunk {} sorted ({} records, {} total)",
            checkpoint.index,
            state.chunk.len(),
            checkpoint.count
        );
        state.chunk.clear();

        on_checkpoint(&checkpoint)?;
        state.checkpoints.push(checkpoint);
        Ok(())
    }
}
