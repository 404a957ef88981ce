// crates/am_grid/src/smr.rs

//! 静态网格细化的邻居链接与边界寄存器
//!
//! 细化边界两侧的块以不同分辨率计算同一物理面上的通量。为保证
//! 跨层级守恒，每个块在校正步结束后把共享面上的全步通量（磁流体
//! 还有包络该面的两族边电动势）写入按 (邻居, 面方位) 键控的
//! 寄存器，交由外部的协调步消费。本层只负责寄存器的形状与归属，
//! 不做任何数值变换。
//!
//! # 寄存器形状
//!
//! 通量补片按面的横向范围分配，索引为面内局部二维坐标
//! `[高轴, 低轴]`。沿横向轴 t 的边电动势在另一横向轴上比单元
//! 补片多一层（边比面多一排）。

use crate::field::FieldConfig;
use am_foundation::{AmResult, Array2, IndexRange, Real};
use serde::{Deserialize, Serialize};

// ============================================================================
// 面方位
// ============================================================================

/// 块的六个面方位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockFace {
    /// x1 负向面
    X1Lo,
    /// x1 正向面
    X1Hi,
    /// x2 负向面
    X2Lo,
    /// x2 正向面
    X2Hi,
    /// x3 负向面
    X3Lo,
    /// x3 正向面
    X3Hi,
}

impl BlockFace {
    /// 面的法向轴（0, 1, 2）
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Self::X1Lo | Self::X1Hi => 0,
            Self::X2Lo | Self::X2Hi => 1,
            Self::X3Lo | Self::X3Hi => 2,
        }
    }

    /// 是否为正向面
    #[inline]
    pub fn is_upper(self) -> bool {
        matches!(self, Self::X1Hi | Self::X2Hi | Self::X3Hi)
    }

    /// 面内的两个横向轴（低轴, 高轴）
    #[inline]
    pub fn transverse(self) -> (usize, usize) {
        match self.axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }
}

// ============================================================================
// 链接与寄存器
// ============================================================================

/// 链接种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// 邻居是更细层级的子块（其边界位于本块内部）
    Child,
    /// 邻居是更粗层级的父块（本块边界落在其某个面上）
    Parent,
}

/// 细化边界链接
///
/// 描述本块与一个异层级邻居共享的面窗口，并持有该窗口的寄存器。
#[derive(Debug)]
pub struct SmrLink {
    /// 链接种类
    pub kind: LinkKind,
    /// 共享面方位（以本块视角）
    pub face: BlockFace,
    /// 邻居块编号
    pub neighbor_id: usize,
    /// 重叠窗口（本块索引空间中的单元范围，按轴）
    pub window: [IndexRange; 3],
    /// 本面寄存器
    pub reg: FluxRegister,
}

impl SmrLink {
    /// 创建链接并分配寄存器
    pub fn new(
        cfg: &FieldConfig,
        kind: LinkKind,
        face: BlockFace,
        neighbor_id: usize,
        window: [IndexRange; 3],
    ) -> AmResult<Self> {
        let reg = FluxRegister::new(cfg, face, &window)?;
        Ok(Self {
            kind,
            face,
            neighbor_id,
            window,
            reg,
        })
    }

    /// 共享面上的面索引（本块索引空间）
    #[inline]
    pub fn face_index(&self) -> usize {
        let d = self.face.axis();
        if self.face.is_upper() {
            self.window[d].hi + 1
        } else {
            self.window[d].lo
        }
    }
}

/// 边界通量/电动势寄存器
///
/// 全部补片按 `[高横向轴, 低横向轴]` 索引。动量分量存全局方位
/// （m1、m2、m3），不携带扫掠方向的置换。
#[derive(Debug)]
pub struct FluxRegister {
    /// 密度通量
    pub d: Array2<Real>,
    /// m1 通量
    pub m1: Array2<Real>,
    /// m2 通量
    pub m2: Array2<Real>,
    /// m3 通量
    pub m3: Array2<Real>,
    /// 能量通量（绝热状态方程）
    pub e: Option<Array2<Real>>,
    /// 单元中心磁场通量，全局方位，法向分量恒为零（磁流体）
    pub b: Option<[Array2<Real>; 3]>,
    /// 被动标量通量
    pub s: Vec<Array2<Real>>,
    /// 包络该面的两族边电动势 `[低横向轴的电动势, 高横向轴的电动势]`（磁流体）
    ///
    /// 沿横向轴 t 的电动势在另一横向轴方向比单元补片多一层。
    pub emf: Option<[Array2<Real>; 2]>,
}

impl FluxRegister {
    /// 按面方位与窗口分配寄存器
    pub fn new(cfg: &FieldConfig, face: BlockFace, window: &[IndexRange; 3]) -> AmResult<Self> {
        cfg.validate()?;
        let (t_lo, t_hi) = face.transverse();
        let n_lo = window[t_lo].len();
        let n_hi = window[t_hi].len();

        let e = cfg.adiabatic.then(|| Array2::zeros(n_hi, n_lo));
        let b = cfg.mhd.then(|| {
            [
                Array2::zeros(n_hi, n_lo),
                Array2::zeros(n_hi, n_lo),
                Array2::zeros(n_hi, n_lo),
            ]
        });
        // 沿低横向轴的电动势: 高轴方向多一层; 沿高横向轴的: 低轴方向多一层
        let emf = cfg
            .mhd
            .then(|| [Array2::zeros(n_hi + 1, n_lo), Array2::zeros(n_hi, n_lo + 1)]);
        let s = (0..cfg.n_scalars).map(|_| Array2::zeros(n_hi, n_lo)).collect();

        Ok(Self {
            d: Array2::zeros(n_hi, n_lo),
            m1: Array2::zeros(n_hi, n_lo),
            m2: Array2::zeros(n_hi, n_lo),
            m3: Array2::zeros(n_hi, n_lo),
            e,
            b,
            s,
            emf,
        })
    }

    /// 单元补片维度 `[高轴, 低轴]`
    #[inline]
    pub fn patch_dims(&self) -> [usize; 2] {
        self.d.dims()
    }

    /// 按全局轴取动量通量补片的可变引用
    #[inline]
    pub fn momentum_mut(&mut self, axis: usize) -> &mut Array2<Real> {
        match axis {
            0 => &mut self.m1,
            1 => &mut self.m2,
            _ => &mut self.m3,
        }
    }

    /// 按全局轴取动量通量补片
    #[inline]
    pub fn momentum(&self, axis: usize) -> &Array2<Real> {
        match axis {
            0 => &self.m1,
            1 => &self.m2,
            _ => &self.m3,
        }
    }
}
