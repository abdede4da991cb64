//! Benchmark runner
//!
//! For each configuration: build the four representations from one fixture,
//! time `iterations` summation passes over each, then check every grand
//! total against the analytic value before anything is reported.

use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::boxed::{boxed_from_fixture, sum_boxed, BoxedList};
use crate::buffer::{
    direct_from_fixture, heap_from_fixture, sum_sequential, DirectBuffer, HeapBuffer,
};
use crate::config::{RunConfig, SizeConfig};
use crate::error::{BenchError, Result};
use crate::fixture::Fixture;
use crate::report::Report;
use crate::view::{sum_offsets, OffsetView};

/// Storage/access strategy under measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `Vec<Box<Element>>`, tag dispatch per element
    Boxed,
    /// Heap byte buffer, sequential cursor reads
    Heap,
    /// Native-region byte buffer, sequential cursor reads
    Direct,
    /// Heap byte buffer, explicit offset reads
    HeapOffsetView,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Boxed,
        Strategy::Heap,
        Strategy::Direct,
        Strategy::HeapOffsetView,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Boxed => "Boxed",
            Strategy::Heap => "Heap",
            Strategy::Direct => "Direct",
            Strategy::HeapOffsetView => "Heap Offset View",
        }
    }
}

/// Result of timing one strategy on one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub strategy: Strategy,
    /// Sum over all passes
    pub total: f64,
    pub per_iter_ns: f64,
    /// `"<longs>/<doubles>"`
    pub size: String,
}

/// The four equivalent representations of one fixture
pub struct Representations {
    pub fixture: Fixture,
    pub boxed: BoxedList,
    pub heap: HeapBuffer,
    pub direct: DirectBuffer,
}

impl Representations {
    pub fn build(fixture: Fixture) -> Result<Self> {
        let bytes = fixture.capacity_bytes()?;
        let boxed = boxed_from_fixture(&fixture)?;
        let heap = heap_from_fixture(&fixture)?;
        let direct = direct_from_fixture(&fixture)?;
        debug!(
            longs = fixture.longs_count,
            doubles = fixture.doubles_count,
            bytes,
            "built representations"
        );
        Ok(Self {
            fixture,
            boxed,
            heap,
            direct,
        })
    }

    /// One pass over `strategy`'s representation, cursor reset first
    pub fn sum_once(&mut self, strategy: Strategy) -> Result<f64> {
        let Fixture {
            longs_count,
            doubles_count,
        } = self.fixture;
        match strategy {
            Strategy::Boxed => Ok(sum_boxed(&self.boxed)),
            Strategy::Heap => {
                self.heap.rewind();
                sum_sequential(&mut self.heap, longs_count, doubles_count)
            }
            Strategy::Direct => {
                self.direct.rewind();
                sum_sequential(&mut self.direct, longs_count, doubles_count)
            }
            Strategy::HeapOffsetView => sum_offsets(
                OffsetView::new(self.heap.readable()),
                0,
                self.fixture.doubles_offset(),
                longs_count,
                doubles_count,
            ),
        }
    }

    /// Time `iterations` passes of `strategy`, returning grand total and
    /// elapsed wall-clock time
    ///
    /// Each strategy gets its own monomorphized loop so the measured region
    /// contains no dispatch on the strategy itself.
    pub fn time(&mut self, strategy: Strategy, iterations: u64) -> Result<(f64, Duration)> {
        let Fixture {
            longs_count,
            doubles_count,
        } = self.fixture;
        match strategy {
            Strategy::Boxed => {
                let list = &self.boxed;
                timed(iterations, || Ok(sum_boxed(black_box(list))))
            }
            Strategy::Heap => {
                let heap = &mut self.heap;
                timed(iterations, || {
                    heap.rewind();
                    sum_sequential(black_box(&mut *heap), longs_count, doubles_count)
                })
            }
            Strategy::Direct => {
                let direct = &mut self.direct;
                timed(iterations, || {
                    direct.rewind();
                    sum_sequential(black_box(&mut *direct), longs_count, doubles_count)
                })
            }
            Strategy::HeapOffsetView => {
                let view = OffsetView::new(self.heap.readable());
                let double_base = self.fixture.doubles_offset();
                timed(iterations, || {
                    sum_offsets(black_box(view), 0, double_base, longs_count, doubles_count)
                })
            }
        }
    }
}

#[inline(always)]
fn timed<F>(iterations: u64, mut pass: F) -> Result<(f64, Duration)>
where
    F: FnMut() -> Result<f64>,
{
    let mut total = 0.0;
    let start = Instant::now();
    for _ in 0..iterations {
        total += pass()?;
    }
    let elapsed = start.elapsed();
    Ok((black_box(total), elapsed))
}

/// Fail with the strategy's label if `actual` is outside `tolerance` of `expected`
pub fn verify(strategy: Strategy, expected: f64, actual: f64, tolerance: f64) -> Result<()> {
    if (expected - actual).abs() <= tolerance {
        return Ok(());
    }
    error!(method = strategy.label(), expected, actual, "sum mismatch");
    Err(BenchError::Mismatch {
        label: strategy.label(),
        expected,
        actual,
    })
}

/// Build, time and verify one configuration
///
/// All four strategies are timed before any is checked; the first
/// mismatch in [`Strategy::ALL`] order is returned.
pub fn run_configuration(config: &SizeConfig, tolerance: f64) -> Result<Vec<Measurement>> {
    if config.iterations == 0 {
        return Err(BenchError::InvalidConfig("iterations must be at least 1".to_string()));
    }

    let fixture = config.fixture();
    let mut reps = Representations::build(fixture)?;
    let size = fixture.descriptor();

    let mut measurements = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        let (total, elapsed) = reps.time(strategy, config.iterations)?;
        measurements.push(Measurement {
            strategy,
            total,
            per_iter_ns: elapsed.as_nanos() as f64 / config.iterations as f64,
            size: size.clone(),
        });
    }

    let expected_total = fixture.expected_sum() * config.iterations as f64;
    for m in &measurements {
        verify(m.strategy, expected_total, m.total, tolerance)?;
    }

    info!(
        size = %size,
        iterations = config.iterations,
        expected_total,
        "configuration verified"
    );
    Ok(measurements)
}

/// Run every configuration in order, writing the report as each one passes
///
/// Stops at the first failing configuration; rows already written stay.
pub fn run_all<W: Write>(config: &RunConfig, report: &mut Report<W>) -> Result<Vec<Measurement>> {
    config.validate()?;
    report.header()?;

    let mut all = Vec::with_capacity(config.configurations.len() * Strategy::ALL.len());
    for size in &config.configurations {
        let rows = run_configuration(size, config.tolerance)?;
        report.configuration(&rows)?;
        all.extend(rows);
    }
    Ok(all)
}

/// [`run_all`] with the report on stdout
pub fn run_to_stdout(config: &RunConfig) -> Result<Vec<Measurement>> {
    let stdout = std::io::stdout();
    let mut report = Report::new(stdout.lock());
    run_all(config, &mut report)
}
