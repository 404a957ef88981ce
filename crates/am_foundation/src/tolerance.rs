// crates/am_foundation/src/tolerance.rs

//! 数值容差常量
//!
//! 集中定义舍入误差级别的比较容差，校验逻辑与测试共用同一组常量。

use crate::Real;

/// 舍入误差容差（单次运算级别）
pub const ROUND_OFF: Real = 1.0e-12;

/// 守恒量全域求和的相对漂移容差
///
/// 对 10^3 量级的单元数，逐单元更新的舍入累积不应超过该值。
pub const CONSERVATION_REL: Real = 1.0e-11;

/// 判零阈值（通量、质量通量符号判断等）
pub const FLUX_EPS: Real = 1.0e-14;

/// 相对误差比较
///
/// 对接近零的参考值退化为绝对误差比较。
#[inline]
pub fn approx_eq_rel(a: Real, b: Real, rel_tol: Real) -> bool {
    let scale = a.abs().max(b.abs());
    if scale < ROUND_OFF {
        (a - b).abs() < rel_tol
    } else {
        (a - b).abs() <= rel_tol * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_rel() {
        assert!(approx_eq_rel(1.0, 1.0 + 1.0e-13, 1.0e-12));
        assert!(!approx_eq_rel(1.0, 1.001, 1.0e-12));
        // 接近零时退化为绝对比较
        assert!(approx_eq_rel(0.0, 1.0e-15, 1.0e-12));
    }
}
