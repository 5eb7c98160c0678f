//! Backend adapters. Each one translates a standard-form problem into a
//! solver crate's native call and maps the outcome back to a [`Solution`].
//!
//! Adapters are compiled in by cargo feature, one per backend.
//!
//! [`Solution`]: lpsolvers_types::Solution

mod backend;
#[cfg(any(feature = "clarabel", feature = "osqp"))]
mod csc;
#[cfg(any(
    feature = "clarabel",
    feature = "osqp",
    feature = "microlp",
    feature = "good_lp",
    feature = "highs"
))]
mod settings;

#[cfg(feature = "clarabel")]
mod clarabel_backend;
#[cfg(feature = "good_lp")]
mod good_lp_backend;
#[cfg(feature = "highs")]
mod highs_backend;
#[cfg(feature = "microlp")]
mod microlp_backend;
#[cfg(feature = "osqp")]
mod osqp_backend;

pub use backend::SolverBackend;
#[cfg(feature = "clarabel")]
pub use clarabel_backend::ClarabelSolver;
#[cfg(feature = "good_lp")]
pub use good_lp_backend::GoodLpSolver;
#[cfg(feature = "highs")]
pub use highs_backend::HighsSolver;
#[cfg(feature = "microlp")]
pub use microlp_backend::MicrolpSolver;
#[cfg(feature = "osqp")]
pub use osqp_backend::OsqpSolver;
