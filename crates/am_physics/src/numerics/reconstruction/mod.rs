// crates/am_physics/src/numerics/reconstruction/mod.rs

//! 界面重构
//!
//! 把一条线上的原始状态重构为每个面的左/右界面状态。
//!
//! - [`PiecewiseConstant`]: 分片常数（一阶）
//! - [`PiecewiseLinear`]: 单调中心限制的分片线性（二阶）

pub mod pcm;
pub mod plm;
pub mod traits;

pub use pcm::PiecewiseConstant;
pub use plm::PiecewiseLinear;
pub use traits::Reconstruction;
