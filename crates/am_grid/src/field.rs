// crates/am_grid/src/field.rs

//! 单元中心守恒场与面心磁场
//!
//! 守恒场采用 SoA (Structure of Arrays) 布局，每个分量一块连续
//! 三维数组：
//!
//! ```text
//! d:  [d_0,  d_1,  d_2,  ...]
//! m1: [m1_0, m1_1, m1_2, ...]
//! ...
//! ```
//!
//! 物理变体（磁场有无、能量方程有无、被动标量个数）是运行时配置，
//! 由 [`FieldConfig`] 在构造时一次性确定，对应分量按需分配。
//!
//! # 不变量
//!
//! - 密度与（可压缩状态方程下的）压强必须保持为正，违反视为致命
//!   数值故障，由物理层在阶段边界检查
//! - 面心磁场的离散散度（六个面值的带面积权符号和）在初始化为零后
//!   恒为零，由约束输运更新维持

use am_foundation::{AmError, AmResult, Array3, Real};
use serde::{Deserialize, Serialize};

/// 被动标量的最大容量
///
/// 一维线状态采用定长数组以保持 `Copy`，实际参与运算的个数
/// 由 [`FieldConfig::n_scalars`] 决定。
pub const MAX_SCALARS: usize = 4;

// ============================================================================
// 物理变体配置
// ============================================================================

/// 场布局配置
///
/// 运行时物理变体开关，构造后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// 是否演化磁场
    pub mhd: bool,
    /// 是否携带总能量（绝热状态方程）；等温状态方程下为 false
    pub adiabatic: bool,
    /// 被动标量个数
    pub n_scalars: usize,
}

impl FieldConfig {
    /// 绝热磁流体配置
    pub const fn adiabatic_mhd() -> Self {
        Self {
            mhd: true,
            adiabatic: true,
            n_scalars: 0,
        }
    }

    /// 绝热纯流体配置
    pub const fn adiabatic_hydro() -> Self {
        Self {
            mhd: false,
            adiabatic: true,
            n_scalars: 0,
        }
    }

    /// 校验配置
    pub fn validate(&self) -> AmResult<()> {
        if self.n_scalars > MAX_SCALARS {
            return Err(AmError::config(format!(
                "被动标量个数 {} 超出容量 {}",
                self.n_scalars, MAX_SCALARS
            )));
        }
        Ok(())
    }
}

// ============================================================================
// 守恒场
// ============================================================================

/// 单元中心守恒场
///
/// 密度、三个动量分量、总能量（可选）、单元中心磁场（可选）
/// 与被动标量，全部含 ghost 层。
#[derive(Debug, Clone)]
pub struct ConservedField {
    cfg: FieldConfig,
    /// 密度
    pub d: Array3<Real>,
    /// x1 动量
    pub m1: Array3<Real>,
    /// x2 动量
    pub m2: Array3<Real>,
    /// x3 动量
    pub m3: Array3<Real>,
    /// 总能量（仅绝热状态方程）
    pub e: Option<Array3<Real>>,
    /// 单元中心磁场（仅磁流体）
    pub bc: Option<[Array3<Real>; 3]>,
    /// 被动标量（守恒形式，密度加权）
    pub s: Vec<Array3<Real>>,
}

impl ConservedField {
    /// 创建零初始化守恒场，维度 `(n3, n2, n1)`
    pub fn new(cfg: FieldConfig, n3: usize, n2: usize, n1: usize) -> AmResult<Self> {
        cfg.validate()?;
        let zeros = |what| Array3::try_zeros(n3, n2, n1, what);
        let e = if cfg.adiabatic {
            Some(zeros("守恒场能量")?)
        } else {
            None
        };
        let bc = if cfg.mhd {
            Some([
                zeros("单元中心磁场 b1")?,
                zeros("单元中心磁场 b2")?,
                zeros("单元中心磁场 b3")?,
            ])
        } else {
            None
        };
        let mut s = Vec::with_capacity(cfg.n_scalars);
        for _ in 0..cfg.n_scalars {
            s.push(zeros("被动标量")?);
        }
        Ok(Self {
            cfg,
            d: zeros("守恒场密度")?,
            m1: zeros("守恒场动量 m1")?,
            m2: zeros("守恒场动量 m2")?,
            m3: zeros("守恒场动量 m3")?,
            e,
            bc,
            s,
        })
    }

    /// 场配置
    #[inline]
    pub fn cfg(&self) -> FieldConfig {
        self.cfg
    }

    /// 数组维度 `[n3, n2, n1]`
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.d.dims()
    }

    /// 按方向取动量分量（0 为 m1，1 为 m2，2 为 m3）
    #[inline]
    pub fn momentum(&self, axis: usize) -> &Array3<Real> {
        match axis {
            0 => &self.m1,
            1 => &self.m2,
            _ => &self.m3,
        }
    }

    /// 按方向取动量分量的可变引用
    #[inline]
    pub fn momentum_mut(&mut self, axis: usize) -> &mut Array3<Real> {
        match axis {
            0 => &mut self.m1,
            1 => &mut self.m2,
            _ => &mut self.m3,
        }
    }

    /// 按方向取单元中心磁场分量
    #[inline]
    pub fn bcc(&self, axis: usize) -> Option<&Array3<Real>> {
        self.bc.as_ref().map(|b| &b[axis])
    }

    /// 将 `src` 的全部分量逐单元拷贝到本场的同位置
    ///
    /// 本场的维度允许大于 `src`（工作区按层级最大块尺寸分配），
    /// 只覆盖 `src` 覆盖的箱体。
    pub fn copy_box_from(&mut self, src: &ConservedField) {
        let [n3, n2, n1] = src.dims();
        debug_assert_eq!(self.cfg, src.cfg);
        for k in 0..n3 {
            for j in 0..n2 {
                for i in 0..n1 {
                    let c = [k, j, i];
                    self.d[c] = src.d[c];
                    self.m1[c] = src.m1[c];
                    self.m2[c] = src.m2[c];
                    self.m3[c] = src.m3[c];
                }
            }
        }
        if let (Some(dst), Some(se)) = (self.e.as_mut(), src.e.as_ref()) {
            copy_box(dst, se);
        }
        if let (Some(dst), Some(sb)) = (self.bc.as_mut(), src.bc.as_ref()) {
            for a in 0..3 {
                copy_box(&mut dst[a], &sb[a]);
            }
        }
        for (dst, s) in self.s.iter_mut().zip(src.s.iter()) {
            copy_box(dst, s);
        }
    }
}

fn copy_box(dst: &mut Array3<Real>, src: &Array3<Real>) {
    let [n3, n2, n1] = src.dims();
    for k in 0..n3 {
        for j in 0..n2 {
            for i in 0..n1 {
                dst[[k, j, i]] = src[[k, j, i]];
            }
        }
    }
}

// ============================================================================
// 面心磁场
// ============================================================================

/// 面心磁场
///
/// `b1[[k, j, i]]` 为单元 `(k, j, i)` 的 x1 负向面上的法向磁场，
/// b2、b3 同理。三块数组与单元中心数组同尺寸，最高面索引
/// `hi + 1` 落在数组内部。
#[derive(Debug, Clone)]
pub struct FaceField {
    /// x1 面磁场
    pub b1: Array3<Real>,
    /// x2 面磁场
    pub b2: Array3<Real>,
    /// x3 面磁场
    pub b3: Array3<Real>,
}

impl FaceField {
    /// 创建零初始化面心磁场
    pub fn new(n3: usize, n2: usize, n1: usize) -> AmResult<Self> {
        Ok(Self {
            b1: Array3::try_zeros(n3, n2, n1, "面心磁场 b1")?,
            b2: Array3::try_zeros(n3, n2, n1, "面心磁场 b2")?,
            b3: Array3::try_zeros(n3, n2, n1, "面心磁场 b3")?,
        })
    }

    /// 按方向取面磁场分量
    #[inline]
    pub fn component(&self, axis: usize) -> &Array3<Real> {
        match axis {
            0 => &self.b1,
            1 => &self.b2,
            _ => &self.b3,
        }
    }

    /// 按方向取面磁场分量的可变引用
    #[inline]
    pub fn component_mut(&mut self, axis: usize) -> &mut Array3<Real> {
        match axis {
            0 => &mut self.b1,
            1 => &mut self.b2,
            _ => &mut self.b3,
        }
    }

    /// 逐元素拷贝另一面场（维度允许大于 `src`）
    pub fn copy_box_from(&mut self, src: &FaceField) {
        copy_box(&mut self.b1, &src.b1);
        copy_box(&mut self.b2, &src.b2);
        copy_box(&mut self.b3, &src.b3);
    }
}
