// crates/am_physics/src/integrator/workspace.rs

//! 积分器工作区
//!
//! 一次推进所需的全部临时数组：半步守恒态与半步面磁场、三个
//! 方向的面通量与左右界面状态、角点与单元中心电动势、多维耗散
//! 系数、一维线缓冲。按网格层级中最大块的含 ghost 尺寸一次性
//! 分配，生命周期与层级一致；推进小于最大尺寸的块时只使用数组
//! 的低角部分。
//!
//! 工作区在一次推进期间被执行块独占，不与任何并发推进共享。
//! 分配失败是初始化期的致命错误。

use crate::state::{Cons1D, Prim1D};
use am_foundation::{AmError, AmResult, Array3, IndexRange, Real};
use am_grid::{ConservedField, FaceField, FieldConfig, MeshBlock};

/// 一维线缓冲
///
/// 在三个方向与所有网格线之间复用，长度为最大线长。
#[derive(Debug)]
pub struct LineBuffers {
    /// 线上的守恒状态
    pub u1d: Vec<Cons1D>,
    /// 左界面守恒状态
    pub ul: Vec<Cons1D>,
    /// 右界面守恒状态
    pub ur: Vec<Cons1D>,
    /// 线上的原始状态
    pub w1d: Vec<Prim1D>,
    /// 左界面原始状态
    pub wl: Vec<Prim1D>,
    /// 右界面原始状态
    pub wr: Vec<Prim1D>,
    /// 线上的单元中心法向磁场
    pub bxc: Vec<Real>,
}

impl LineBuffers {
    fn new(nmax: usize) -> Self {
        Self {
            u1d: vec![Cons1D::default(); nmax],
            ul: vec![Cons1D::default(); nmax],
            ur: vec![Cons1D::default(); nmax],
            w1d: vec![Prim1D::default(); nmax],
            wl: vec![Prim1D::default(); nmax],
            wr: vec![Prim1D::default(); nmax],
            bxc: vec![0.0; nmax],
        }
    }
}

/// 电动势缓冲
///
/// 三个边方向的角点电动势与对应阶段的单元中心参考电动势。
#[derive(Debug)]
pub struct EmfBuffers {
    /// 沿 x1 边的角点电动势
    pub e1: Array3<Real>,
    /// 沿 x2 边的角点电动势
    pub e2: Array3<Real>,
    /// 沿 x3 边的角点电动势
    pub e3: Array3<Real>,
    /// 单元中心电动势 (x1 分量)
    pub e1_cc: Array3<Real>,
    /// 单元中心电动势 (x2 分量)
    pub e2_cc: Array3<Real>,
    /// 单元中心电动势 (x3 分量)
    pub e3_cc: Array3<Real>,
}

impl EmfBuffers {
    fn new(n3: usize, n2: usize, n1: usize) -> AmResult<Self> {
        Ok(Self {
            e1: Array3::try_zeros(n3, n2, n1, "角点电动势 e1")?,
            e2: Array3::try_zeros(n3, n2, n1, "角点电动势 e2")?,
            e3: Array3::try_zeros(n3, n2, n1, "角点电动势 e3")?,
            e1_cc: Array3::try_zeros(n3, n2, n1, "单元中心电动势 e1")?,
            e2_cc: Array3::try_zeros(n3, n2, n1, "单元中心电动势 e2")?,
            e3_cc: Array3::try_zeros(n3, n2, n1, "单元中心电动势 e3")?,
        })
    }

    /// 按边方向取角点电动势
    #[inline]
    pub fn component(&self, axis: usize) -> &Array3<Real> {
        match axis {
            0 => &self.e1,
            1 => &self.e2,
            _ => &self.e3,
        }
    }
}

/// 积分器工作区
#[derive(Debug)]
pub struct IntegratorWorkspace {
    field_cfg: FieldConfig,
    dims: [usize; 3],
    /// 半步守恒态
    pub uhalf: ConservedField,
    /// 半步面磁场（磁流体）
    pub bhalf: Option<FaceField>,
    /// 三个方向的面通量，按置换分量存放
    pub flux: [Array3<Cons1D>; 3],
    /// 三个方向的左界面原始状态
    pub wl_face: [Array3<Prim1D>; 3],
    /// 三个方向的右界面原始状态
    pub wr_face: [Array3<Prim1D>; 3],
    /// 电动势缓冲（磁流体）
    pub emf: Option<EmfBuffers>,
    /// 多维耗散系数（启用 H 修正时）
    pub eta: Option<[Array3<Real>; 3]>,
    /// 一维线缓冲
    pub line: LineBuffers,
}

impl IntegratorWorkspace {
    /// 按给定的含 ghost 维度 `[n3, n2, n1]` 分配工作区
    pub fn new(field_cfg: FieldConfig, h_correction: bool, dims: [usize; 3]) -> AmResult<Self> {
        field_cfg.validate()?;
        let [n3, n2, n1] = dims;
        if n3 == 0 || n2 == 0 || n1 == 0 {
            return Err(AmError::config("工作区维度必须为正"));
        }
        let nmax = n1.max(n2).max(n3);

        let flux_arr = |what| Array3::try_filled(n3, n2, n1, Cons1D::default(), what);
        let prim_arr = |what| Array3::try_filled(n3, n2, n1, Prim1D::default(), what);

        let bhalf = if field_cfg.mhd {
            Some(FaceField::new(n3, n2, n1)?)
        } else {
            None
        };
        let emf = if field_cfg.mhd {
            Some(EmfBuffers::new(n3, n2, n1)?)
        } else {
            None
        };
        let eta = if h_correction {
            Some([
                Array3::try_zeros(n3, n2, n1, "耗散系数 eta1")?,
                Array3::try_zeros(n3, n2, n1, "耗散系数 eta2")?,
                Array3::try_zeros(n3, n2, n1, "耗散系数 eta3")?,
            ])
        } else {
            None
        };

        Ok(Self {
            field_cfg,
            dims,
            uhalf: ConservedField::new(field_cfg, n3, n2, n1)?,
            bhalf,
            flux: [
                flux_arr("x1 面通量")?,
                flux_arr("x2 面通量")?,
                flux_arr("x3 面通量")?,
            ],
            wl_face: [
                prim_arr("x1 左界面状态")?,
                prim_arr("x2 左界面状态")?,
                prim_arr("x3 左界面状态")?,
            ],
            wr_face: [
                prim_arr("x1 右界面状态")?,
                prim_arr("x2 右界面状态")?,
                prim_arr("x3 右界面状态")?,
            ],
            emf,
            eta,
            line: LineBuffers::new(nmax),
        })
    }

    /// 扫描块集合，按最大含 ghost 尺寸分配工作区
    ///
    /// 在任何推进之前调用一次，之后维度不可变。
    pub fn for_blocks(
        field_cfg: FieldConfig,
        h_correction: bool,
        blocks: &[MeshBlock],
    ) -> AmResult<Self> {
        if blocks.is_empty() {
            return Err(AmError::config("块集合为空，无法确定工作区尺寸"));
        }
        let mut dims = [0usize; 3];
        for blk in blocks {
            let d = blk.dims();
            for a in 0..3 {
                dims[a] = dims[a].max(d[a]);
            }
        }
        Self::new(field_cfg, h_correction, dims)
    }

    /// 工作区维度
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// 场配置
    #[inline]
    pub fn field_cfg(&self) -> FieldConfig {
        self.field_cfg
    }

    /// 是否分配了多维耗散缓冲
    #[inline]
    pub fn has_h_correction(&self) -> bool {
        self.eta.is_some()
    }

    /// 工作区能否容纳给定块
    pub fn can_hold(&self, blk: &MeshBlock) -> bool {
        let d = blk.dims();
        (0..3).all(|a| d[a] <= self.dims[a]) && blk.u.cfg() == self.field_cfg
    }

    /// 某轴的最大线范围
    #[inline]
    pub fn line_range(&self, axis: usize) -> IndexRange {
        let n = match axis {
            0 => self.dims[2],
            1 => self.dims[1],
            _ => self.dims[0],
        };
        IndexRange::new(0, n - 1)
    }
}
