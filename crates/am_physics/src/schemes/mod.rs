// crates/am_physics/src/schemes/mod.rs

//! 数值格式
//!
//! 目前只含黎曼求解器子模块。

pub mod riemann;

pub use riemann::{Hlle, RiemannError, RiemannSolver, Rusanov, SolverCapabilities};
