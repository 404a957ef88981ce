// crates/am_physics/src/numerics/reconstruction/traits.rs

//! 重构 trait 定义
//!
//! 重构器作用于一条线上的原始状态，产出面的左/右界面状态。
//! 面 `f` 位于单元 `f-1` 与 `f` 之间；`wl[f]` 是左侧单元在该面
//! 的外推值，`wr[f]` 是右侧单元的外推值。

use crate::state::Prim1D;

/// 界面重构 trait
pub trait Reconstruction: Send + Sync {
    /// 重构器名称
    fn name(&self) -> &'static str;

    /// 单侧模板半宽
    ///
    /// 分片常数为 1，分片线性为 2。决定扫掠可用范围向内收缩的
    /// 层数。
    fn stencil_width(&self) -> usize;

    /// 重构一条线
    ///
    /// # 参数
    /// - `w`: 线上的原始状态，须在 `[lo - stencil_width,
    ///   hi + stencil_width]` 上有效
    /// - `lo` / `hi`: 需要完整左右状态的面范围为 `[lo, hi + 1]`
    /// - `wl` / `wr`: 输出缓冲，按面索引写入
    fn reconstruct(&self, w: &[Prim1D], lo: usize, hi: usize, wl: &mut [Prim1D], wr: &mut [Prim1D]);
}
