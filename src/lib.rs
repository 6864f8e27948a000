//! Partitioning Around Medoids (Kaufman & Rousseeuw) over a chunked dataset.
//!
//! The BUILD phase greedily picks `k` medoids and the SWAP phase refines them
//! by local search. Every candidate medoid, and every `(medoid, candidate)`
//! swap, is scored by one map/reduce pass over the chunks of a [`Frame`],
//! driven by an [`Executor`]. Per-row nearest / second-nearest bookkeeping
//! lives in a [`Ledger`] whose buffers are exchanged, never copied.
//!
//! ```
//! use dpam::{DissimilarityMeasure, Pam, PamParams};
//!
//! let data = vec![
//!     vec![1.0, 1.0],
//!     vec![1.2, 0.9],
//!     vec![0.9, 1.1],
//!     vec![8.0, 8.0],
//!     vec![8.1, 7.9],
//!     vec![7.9, 8.2],
//! ];
//! let params = PamParams::builder()
//!     .k(2)
//!     .dissimilarity_measure(DissimilarityMeasure::Euclidean)
//!     .build();
//! let model = Pam::new(params).fit_rows(&data).unwrap();
//! assert_eq!(model.medoid_rows().len(), 2);
//! ```

use std::fmt::Debug;

pub trait Float: num_traits::Float + Debug + Send + Sync + 'static {}

impl Float for f64 {}
impl Float for f32 {}

pub mod algorithms;
pub mod error;
pub mod executor;
pub mod frame;
pub mod ledger;
pub mod measure;
pub mod model;
pub mod params;

pub use crate::algorithms::Pam;
pub use crate::error::{PamError, Result};
pub use crate::executor::{Executor, Parallel, Serial};
pub use crate::frame::{Chunk, Frame};
pub use crate::ledger::{Ledger, Record};
pub use crate::measure::DissimilarityMeasure;
pub use crate::model::{ModelSummary, PamModel};
pub use crate::params::{PamParams, PamParamsBuilder};
