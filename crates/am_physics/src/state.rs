// crates/am_physics/src/state.rs

//! 一维线状态
//!
//! 扫掠把一条网格线上的单元装载为 [`Cons1D`] / [`Prim1D`]，
//! 分量按扫掠方向置换（mx 恒为法向动量，by、bz 为两个切向
//! 磁场）。数值通量与线状态同型，也用 [`Cons1D`] 表示。
//!
//! 被动标量采用定长容量以保持 `Copy`，实际个数由场配置给出；
//! 未使用的槽位恒为零，参与线性运算无副作用。

use am_foundation::Real;
use am_grid::MAX_SCALARS;
use std::ops::{Add, Mul, Sub};

// ============================================================================
// 守恒线状态
// ============================================================================

/// 单元的一维守恒状态（置换后分量）
///
/// 也用作数值通量向量：`by`、`bz` 分量即两个切向磁场的通量，
/// 与边电动势只差符号约定。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cons1D {
    /// 密度
    pub d: Real,
    /// 法向动量
    pub mx: Real,
    /// 第一切向动量
    pub my: Real,
    /// 第二切向动量
    pub mz: Real,
    /// 总能量（等温状态方程下恒为零）
    pub e: Real,
    /// 第一切向磁场
    pub by: Real,
    /// 第二切向磁场
    pub bz: Real,
    /// 被动标量（守恒形式）
    pub s: [Real; MAX_SCALARS],
}

impl Cons1D {
    /// 全部分量是否有限
    pub fn is_finite(&self) -> bool {
        self.d.is_finite()
            && self.mx.is_finite()
            && self.my.is_finite()
            && self.mz.is_finite()
            && self.e.is_finite()
            && self.by.is_finite()
            && self.bz.is_finite()
            && self.s.iter().all(|x| x.is_finite())
    }
}

impl Add for Cons1D {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = self.s[n] + rhs.s[n];
        }
        Self {
            d: self.d + rhs.d,
            mx: self.mx + rhs.mx,
            my: self.my + rhs.my,
            mz: self.mz + rhs.mz,
            e: self.e + rhs.e,
            by: self.by + rhs.by,
            bz: self.bz + rhs.bz,
            s,
        }
    }
}

impl Sub for Cons1D {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = self.s[n] - rhs.s[n];
        }
        Self {
            d: self.d - rhs.d,
            mx: self.mx - rhs.mx,
            my: self.my - rhs.my,
            mz: self.mz - rhs.mz,
            e: self.e - rhs.e,
            by: self.by - rhs.by,
            bz: self.bz - rhs.bz,
            s,
        }
    }
}

impl Mul<Real> for Cons1D {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Real) -> Self {
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = self.s[n] * rhs;
        }
        Self {
            d: self.d * rhs,
            mx: self.mx * rhs,
            my: self.my * rhs,
            mz: self.mz * rhs,
            e: self.e * rhs,
            by: self.by * rhs,
            bz: self.bz * rhs,
            s,
        }
    }
}

// ============================================================================
// 原始线状态
// ============================================================================

/// 单元的一维原始状态（置换后分量）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Prim1D {
    /// 密度
    pub d: Real,
    /// 法向速度
    pub vx: Real,
    /// 第一切向速度
    pub vy: Real,
    /// 第二切向速度
    pub vz: Real,
    /// 气体压强（等温状态方程下为 cs²·d）
    pub p: Real,
    /// 第一切向磁场
    pub by: Real,
    /// 第二切向磁场
    pub bz: Real,
    /// 被动标量（比浓度）
    pub s: [Real; MAX_SCALARS],
}

impl Prim1D {
    /// 对三个状态逐分量应用 `f`，用于斜率计算
    #[inline]
    pub fn map3(wm: &Self, w0: &Self, wp: &Self, f: impl Fn(Real, Real, Real) -> Real) -> Self {
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = f(wm.s[n], w0.s[n], wp.s[n]);
        }
        Self {
            d: f(wm.d, w0.d, wp.d),
            vx: f(wm.vx, w0.vx, wp.vx),
            vy: f(wm.vy, w0.vy, wp.vy),
            vz: f(wm.vz, w0.vz, wp.vz),
            p: f(wm.p, w0.p, wp.p),
            by: f(wm.by, w0.by, wp.by),
            bz: f(wm.bz, w0.bz, wp.bz),
            s,
        }
    }

    /// 对两个状态逐分量应用 `f`
    #[inline]
    pub fn map2(a: &Self, b: &Self, f: impl Fn(Real, Real) -> Real) -> Self {
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = f(a.s[n], b.s[n]);
        }
        Self {
            d: f(a.d, b.d),
            vx: f(a.vx, b.vx),
            vy: f(a.vy, b.vy),
            vz: f(a.vz, b.vz),
            p: f(a.p, b.p),
            by: f(a.by, b.by),
            bz: f(a.bz, b.bz),
            s,
        }
    }
}
