//! # bufbench
//!
//! Correctness-gated micro-benchmark: the same mixed integer/float data is
//! stored four ways and summed repeatedly.
//!
//! - boxed tagged elements (`Vec<Box<Element>>`)
//! - heap byte buffer read through a cursor
//! - native-region byte buffer read through a cursor
//! - heap byte buffer read at explicit offsets
//!
//! ```rust
//! use bufbench::{run_configuration, SizeConfig};
//!
//! let rows = run_configuration(&SizeConfig::new(2, 2, 1_000), 1e-6).unwrap();
//! for m in &rows {
//!     assert_eq!(m.total, 7_000.0);
//! }
//! ```

pub mod boxed;
pub mod buffer;
pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod native;
pub mod report;
pub mod runner;
pub mod view;

pub use boxed::{BoxedList, Element};
pub use buffer::{ByteBuffer, DirectBuffer, HeapBuffer};
pub use config::{RunConfig, SizeConfig};
pub use error::{BenchError, Result};
pub use fixture::{expected_sum, Fixture};
pub use logging::init_logging;
pub use native::NativeRegion;
pub use report::Report;
pub use runner::{run_all, run_configuration, run_to_stdout, Measurement, Strategy};
pub use view::OffsetView;
