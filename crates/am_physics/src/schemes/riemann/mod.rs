// crates/am_physics/src/schemes/riemann/mod.rs

//! 黎曼求解器
//!
//! - [`Hlle`]: 双波近似，稳健默认
//! - [`Rusanov`]: 局部 Lax-Friedrichs，最耗散兜底

pub mod hlle;
pub mod rusanov;
pub mod traits;

pub use hlle::Hlle;
pub use rusanov::Rusanov;
pub use traits::{physical_flux, RiemannError, RiemannSolver, SolverCapabilities};
