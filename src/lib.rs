//! Sort geometric solids read from a shape file
//!
//! A shape file lists cylinders, cones, pyramids and prisms. This crate parses them,
//! ranks them by height, base area or volume, and sorts them with one of six classical
//! comparison sorts. Large files can be processed in fixed-size chunks that report a
//! checkpoint each, followed by one global sort.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

pub mod shape;
pub mod ordering;
pub mod algorithms;
pub mod batch;
pub mod input;
pub mod report;

// Re-export commonly used types
pub use algorithms::SortAlgorithm;
pub use config::{RunConfig, RunConfigBuilder, RunMode};
pub use error::{ShapeResult, ShapeSortError};
pub use ordering::{SortKey, SortOrder};
pub use shape::{Shape, ShapeKind};

use batch::BatchPipeline;
use input::ShapeFile;
use report::Reporter;
use std::io::Write;
use std::time::{Duration, Instant};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const IO_FAILURE: i32 = 2;

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: RunMode,
    pub total: usize,
    pub elapsed: Duration,
}

/// Read, sort and report the shapes named by `config`, writing results to `out`
pub fn run<W: Write>(config: &RunConfig, out: W) -> ShapeResult<RunSummary> {
    config.validate()?;
    let start = Instant::now();

    let file = ShapeFile::open(&config.input)?;
    let mode = config.effective_mode(file.len() as u64);
    log::info!(
        "{}: {} mode, {} sort by {}",
        file.path().display(),
        mode,
        config.algorithm,
        config.key
    );

    let mut reporter = Reporter::new(out, config.key);
    let total = match mode {
        RunMode::Batch => sort_in_batches(config, &file, &mut reporter)?,
        RunMode::Full | RunMode::Auto => sort_full(config, &file, &mut reporter)?,
    };

    if let Some(declared) = file.declared_count() {
        if declared != total {
            log::warn!("header declares {declared} shapes but {total} were read");
        }
    } else {
        log::debug!("no record count on the first line");
    }

    let elapsed = start.elapsed();
    reporter.timing(config.algorithm, elapsed)?;
    reporter.flush()?;

    Ok(RunSummary {
        mode,
        total,
        elapsed,
    })
}

fn sort_full<W: Write>(
    config: &RunConfig,
    file: &ShapeFile,
    reporter: &mut Reporter<W>,
) -> ShapeResult<usize> {
    let mut shapes = file.read_all()?;
    let cmp = config.key.comparator(config.order);
    config.algorithm.sort_by(&mut shapes, cmp);
    debug_assert!(algorithms::is_sorted_by(&shapes, cmp));

    reporter.shapes(&shapes)?;
    reporter.summary(&shapes)?;
    Ok(shapes.len())
}

fn sort_in_batches<W: Write>(
    config: &RunConfig,
    file: &ShapeFile,
    reporter: &mut Reporter<W>,
) -> ShapeResult<usize> {
    let pipeline = BatchPipeline::new(config.algorithm, config.key, config.order, config.chunk_size)?;
    let report = pipeline.run(file.records(), |checkpoint| {
        reporter.checkpoint(checkpoint)?;
        Ok(())
    })?;

    reporter.summary(&report.sorted)?;
    Ok(report.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("shapes.txt");
        fs::write(&path, contents).expect("Failed to write test input");
        path
    }

    fn run_to_string(config: &RunConfig) -> ShapeResult<(RunSummary, String)> {
        let mut out = Vec::new();
        let summary = run(config, &mut out)?;
        Ok((summary, String::from_utf8(out).expect("Output is not UTF-8")))
    }

    #[test]
    fn test_full_mode_by_height() -> ShapeResult<()> {
        let dir = TempDir::new()?;
        let input = write_input(&dir, "3\nCylinder 2 3\nCone 4 1\nSquarePrism 1 5\n");
        let config = RunConfigBuilder::new()
            .input(input)
            .key(SortKey::Height)
            .algorithm(SortAlgorithm::Bubble)
            .order(SortOrder::Ascending)
            .build()?;

        let (summary, text) = run_to_string(&config)?;
        assert_eq!(summary.mode, RunMode::Full);
        assert_eq!(summary.total, 3);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[..3],
            [
                "SquarePrism [Height=1.0]",
                "Cylinder [Height=2.0]",
                "Cone [Height=4.0]"
            ]
        );
        assert_eq!(lines[3], "First element: SquarePrism [Height=1.0]");
        assert!(lines[lines.len() - 1].starts_with("B run time was: "));
        Ok(())
    }

    #[test]
    fn test_auto_mode_switches_to_batch_for_large_files() -> ShapeResult<()> {
        let dir = TempDir::new()?;
        let mut contents = String::from("5\n");
        for h in [5, 3, 4, 1, 2] {
            contents.push_str(&format!("Pyramid {h} 2\n"));
        }
        let input = write_input(&dir, &contents);
        let config = RunConfig::new()
            .with_input(input)
            .with_key(SortKey::Height)
            .with_chunk_size(2)
            .with_batch_threshold(10);

        let (summary, text) = run_to_string(&config)?;
        assert_eq!(summary.mode, RunMode::Batch);
        assert_eq!(summary.total, 5);

        let checkpoints: Vec<&str> = text.lines().filter(|l| l.starts_with("Checkpoint")).collect();
        assert_eq!(
            checkpoints,
            vec![
                "Checkpoint 1 (2 records): Pyramid [Height=5.0]",
                "Checkpoint 2 (4 records): Pyramid [Height=4.0]",
                "Checkpoint 3 (5 records): Pyramid [Height=2.0]",
            ]
        );
        assert!(text.contains("First element: Pyramid [Height=5.0]\n"));
        assert!(text.contains("Last element: Pyramid [Height=1.0]\n"));
        assert!(text.contains("Second-last element: Pyramid [Height=2.0]\n"));
        assert!(text.contains("H run time was: "));
        Ok(())
    }

    #[test]
    fn test_unknown_kind_aborts_run() -> ShapeResult<()> {
        let dir = TempDir::new()?;
        let input = write_input(&dir, "2\nCone 1 1\nSphere 1 1\n");

        for mode in [RunMode::Full, RunMode::Batch] {
            let config = RunConfig::new().with_input(&input).with_mode(mode);
            let err = run(&config, Vec::new()).expect_err("Sphere should be rejected");
            assert!(matches!(
                err,
                ShapeSortError::UnknownShapeKind { line: Some(3), .. }
            ));
            assert_eq!(err.exit_code(), EXIT_FAILURE);
        }
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let config = RunConfig::new().with_input("/definitely/not/here/shapes.txt");
        let err = run(&config, Vec::new()).expect_err("missing file should fail");
        assert!(matches!(err, ShapeSortError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), IO_FAILURE);
    }

    #[test]
    fn test_header_only_file() -> ShapeResult<()> {
        let dir = TempDir::new()?;
        let input = write_input(&dir, "0\n");
        let (summary, text) = run_to_string(&RunConfig::new().with_input(input))?;
        assert_eq!(summary.total, 0);
        assert!(text.starts_with("Sorted 0 shapes\n"));
        Ok(())
    }
}
