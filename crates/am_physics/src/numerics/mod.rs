// crates/am_physics/src/numerics/mod.rs

//! 数值工具
//!
//! 目前只含界面重构子模块。

pub mod reconstruction;
