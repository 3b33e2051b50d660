pub mod assumptions;
pub mod calculator;
pub mod overhead;
pub mod profile;
pub mod recommendations;
pub mod session;

pub use calculator::{compute, compute_with, run_projection, ProjectionResult};
pub use profile::{FirmProfile, ProfileField};
pub use recommendations::{classify, Recommendation};
