// crates/am_physics/src/eos.rs

//! 状态方程与变量转换
//!
//! 守恒/原始一维线状态的互转、快磁声速与状态有效性检查。
//! 支持两种闭合:
//!
//! - **绝热** (γ 律): 携带总能量方程，压强由能量扣除动能与磁能得到
//! - **等温**: 无能量方程，压强恒为 cs²·ρ
//!
//! 转换本身不做钳位或修复；出现负密度/负压强由调用方通过
//! [`EquationOfState::validate_prim`] 上报为携带阶段名的致命数值
//! 故障。

use crate::state::{Cons1D, Prim1D};
use am_foundation::{AmError, AmResult, Real};
use am_grid::MAX_SCALARS;
use serde::{Deserialize, Serialize};

/// 状态方程
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EquationOfState {
    /// 绝热 γ 律
    Adiabatic {
        /// 绝热指数 γ
        gamma: Real,
    },
    /// 等温
    Isothermal {
        /// 等温声速 [速度]
        cs: Real,
    },
}

impl EquationOfState {
    /// 是否携带能量方程
    #[inline]
    pub fn is_adiabatic(&self) -> bool {
        matches!(self, Self::Adiabatic { .. })
    }

    /// 校验参数
    pub fn validate(&self) -> AmResult<()> {
        match self {
            Self::Adiabatic { gamma } => {
                if *gamma <= 1.0 {
                    return Err(AmError::config(format!("绝热指数必须大于 1, 得到 {}", gamma)));
                }
            }
            Self::Isothermal { cs } => {
                if *cs <= 0.0 {
                    return Err(AmError::config(format!("等温声速必须为正, 得到 {}", cs)));
                }
            }
        }
        Ok(())
    }

    /// 守恒转原始（一维线状态）
    ///
    /// `bx` 为面法向磁场；磁能用 `bx` 而非单元中心法向分量扣除。
    #[inline]
    pub fn cons_to_prim(&self, u: &Cons1D, bx: Real) -> Prim1D {
        let di = 1.0 / u.d;
        let vx = u.mx * di;
        let vy = u.my * di;
        let vz = u.mz * di;
        let p = match self {
            Self::Adiabatic { gamma } => {
                let ke = 0.5 * u.d * (vx * vx + vy * vy + vz * vz);
                let me = 0.5 * (bx * bx + u.by * u.by + u.bz * u.bz);
                (gamma - 1.0) * (u.e - ke - me)
            }
            Self::Isothermal { cs } => cs * cs * u.d,
        };
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = u.s[n] * di;
        }
        Prim1D {
            d: u.d,
            vx,
            vy,
            vz,
            p,
            by: u.by,
            bz: u.bz,
            s,
        }
    }

    /// 原始转守恒（一维线状态）
    #[inline]
    pub fn prim_to_cons(&self, w: &Prim1D, bx: Real) -> Cons1D {
        let e = match self {
            Self::Adiabatic { gamma } => {
                let ke = 0.5 * w.d * (w.vx * w.vx + w.vy * w.vy + w.vz * w.vz);
                let me = 0.5 * (bx * bx + w.by * w.by + w.bz * w.bz);
                w.p / (gamma - 1.0) + ke + me
            }
            Self::Isothermal { .. } => 0.0,
        };
        let mut s = [0.0; MAX_SCALARS];
        for n in 0..MAX_SCALARS {
            s[n] = w.s[n] * w.d;
        }
        Cons1D {
            d: w.d,
            mx: w.d * w.vx,
            my: w.d * w.vy,
            mz: w.d * w.vz,
            e,
            by: w.by,
            bz: w.bz,
            s,
        }
    }

    /// 原始状态有效性检查
    ///
    /// 负密度或（绝热下）非正压强即无效，返回描述信息供调用方
    /// 包装为阶段错误。不做任何修复。
    pub fn validate_prim(&self, w: &Prim1D) -> Result<(), String> {
        if !(w.d > 0.0) || !w.d.is_finite() {
            return Err(format!("非物理密度 d={:e}", w.d));
        }
        if self.is_adiabatic() && (!(w.p > 0.0) || !w.p.is_finite()) {
            return Err(format!("非物理压强 p={:e}", w.p));
        }
        Ok(())
    }

    /// 声速平方
    #[inline]
    pub fn sound_speed_sq(&self, w: &Prim1D) -> Real {
        match self {
            Self::Adiabatic { gamma } => gamma * w.p / w.d,
            Self::Isothermal { cs } => cs * cs,
        }
    }

    /// 快磁声速
    ///
    /// `bx` 为传播方向的磁场分量。纯流体下（磁场分量全零）退化为
    /// 声速。
    #[inline]
    pub fn cfast(&self, w: &Prim1D, bx: Real) -> Real {
        let asq = self.sound_speed_sq(w);
        let vaxsq = bx * bx / w.d;
        let ctsq = (w.by * w.by + w.bz * w.bz) / w.d;
        let qsq = vaxsq + ctsq + asq;
        let tmp = vaxsq + ctsq - asq;
        (0.5 * (qsq + (tmp * tmp + 4.0 * asq * ctsq).sqrt())).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: Real = 5.0 / 3.0;

    fn eos() -> EquationOfState {
        EquationOfState::Adiabatic { gamma: GAMMA }
    }

    #[test]
    fn test_round_trip_adiabatic_mhd() {
        let w = Prim1D {
            d: 1.3,
            vx: 0.4,
            vy: -0.2,
            vz: 0.1,
            p: 0.7,
            by: 0.5,
            bz: -0.3,
            s: [0.2, 0.0, 0.0, 0.0],
        };
        let bx = 0.75;
        let u = eos().prim_to_cons(&w, bx);
        let w2 = eos().cons_to_prim(&u, bx);
        assert!((w2.d - w.d).abs() < 1e-14);
        assert!((w2.vx - w.vx).abs() < 1e-14);
        assert!((w2.p - w.p).abs() < 1e-13);
        assert!((w2.s[0] - w.s[0]).abs() < 1e-14);
    }

    #[test]
    fn test_isothermal_pressure() {
        let eos = EquationOfState::Isothermal { cs: 2.0 };
        let u = Cons1D {
            d: 3.0,
            ..Cons1D::default()
        };
        let w = eos.cons_to_prim(&u, 0.0);
        assert!((w.p - 12.0).abs() < 1e-14);
        // 等温转回守恒不携带能量
        assert_eq!(eos.prim_to_cons(&w, 0.0).e, 0.0);
    }

    #[test]
    fn test_cfast_hydro_limit() {
        // 无磁场时退化为绝热声速 sqrt(γ p / ρ)
        let w = Prim1D {
            d: 1.0,
            p: 1.0,
            ..Prim1D::default()
        };
        let cf = eos().cfast(&w, 0.0);
        assert!((cf - GAMMA.sqrt()).abs() < 1e-14);
    }

    #[test]
    fn test_cfast_exceeds_alfven_and_sound() {
        let w = Prim1D {
            d: 1.0,
            p: 0.5,
            by: 1.0,
            bz: 0.5,
            ..Prim1D::default()
        };
        let bx = 0.8;
        let cf = eos().cfast(&w, bx);
        let a = (GAMMA * w.p / w.d).sqrt();
        let va = (bx * bx / w.d).sqrt();
        assert!(cf >= a);
        assert!(cf >= va);
    }

    #[test]
    fn test_validate_prim_rejects_negative() {
        let mut w = Prim1D {
            d: 1.0,
            p: 1.0,
            ..Prim1D::default()
        };
        assert!(eos().validate_prim(&w).is_ok());
        w.p = -1e-9;
        assert!(eos().validate_prim(&w).is_err());
        w.p = 1.0;
        w.d = 0.0;
        assert!(eos().validate_prim(&w).is_err());
    }

    #[test]
    fn test_eos_validate() {
        assert!(EquationOfState::Adiabatic { gamma: 1.0 }.validate().is_err());
        assert!(EquationOfState::Isothermal { cs: 0.0 }.validate().is_err());
        assert!(eos().validate().is_ok());
    }
}
