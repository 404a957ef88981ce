// crates/am_physics/src/types.rs

//! 方向置换描述子与积分器配置
//!
//! 三个坐标方向的扫掠共享同一套循环体，方向差异全部收敛到
//! [`Permutation`] 描述子：法向与两个切向分量的循环映射。
//! 通量函数的符号约定依赖该映射，严禁改动：
//!
//! ```text
//! x1 扫掠: (mx, my, mz) = (m1, m2, m3),  (by, bz) = (b2, b3)
//! x2 扫掠: (mx, my, mz) = (m2, m3, m1),  (by, bz) = (b3, b1)
//! x3 扫掠: (mx, my, mz) = (m3, m1, m2),  (by, bz) = (b1, b2)
//! ```

use crate::gravity::SelfGravityParams;
use crate::state::Cons1D;
use am_foundation::{AmError, AmResult};
use am_grid::ConservedField;
use serde::{Deserialize, Serialize};

// ============================================================================
// 扫掠方向
// ============================================================================

/// 坐标方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// x1 方向
    X1,
    /// x2 方向
    X2,
    /// x3 方向
    X3,
}

impl Direction {
    /// 全部方向，按扫掠顺序
    pub const ALL: [Direction; 3] = [Direction::X1, Direction::X2, Direction::X3];

    /// 方向对应的轴编号
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Self::X1 => 0,
            Self::X2 => 1,
            Self::X3 => 2,
        }
    }

    /// 方向的置换描述子
    #[inline]
    pub fn perm(self) -> Permutation {
        Permutation::of_axis(self.axis())
    }

    /// 阶段名后缀（错误信息用）
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Self::X1 => "x1",
            Self::X2 => "x2",
            Self::X3 => "x3",
        }
    }
}

// ============================================================================
// 置换描述子
// ============================================================================

/// 扫掠方向的分量置换
///
/// `n` 为法向轴，`t1`、`t2` 为循环次序的两个切向轴。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation {
    /// 法向轴
    pub n: usize,
    /// 第一切向轴
    pub t1: usize,
    /// 第二切向轴
    pub t2: usize,
}

impl Permutation {
    /// 按法向轴构造循环置换
    #[inline]
    pub fn of_axis(axis: usize) -> Self {
        match axis {
            0 => Self { n: 0, t1: 1, t2: 2 },
            1 => Self { n: 1, t1: 2, t2: 0 },
            _ => Self { n: 2, t1: 0, t2: 1 },
        }
    }

    /// 线外两个循环轴（先高轴后低轴）
    ///
    /// 扫掠的外层循环先沿高编号轴 `a`，再沿低编号轴 `b`。
    #[inline]
    pub fn outer_axes(&self) -> (usize, usize) {
        match self.n {
            0 => (2, 1),
            1 => (2, 0),
            _ => (1, 0),
        }
    }

    /// 由外层坐标 `(a, b)` 与线坐标 `l` 组装数组下标 `[k, j, i]`
    #[inline]
    pub fn cell(&self, a: usize, b: usize, l: usize) -> [usize; 3] {
        match self.n {
            0 => [a, b, l],
            1 => [a, l, b],
            _ => [l, a, b],
        }
    }

    /// 按置换从守恒场取出一维线状态
    #[inline]
    pub fn gather_cons(&self, u: &ConservedField, c: [usize; 3], n_scalars: usize) -> Cons1D {
        let mut q = Cons1D {
            d: u.d[c],
            mx: u.momentum(self.n)[c],
            my: u.momentum(self.t1)[c],
            mz: u.momentum(self.t2)[c],
            ..Cons1D::default()
        };
        if let Some(e) = u.e.as_ref() {
            q.e = e[c];
        }
        if let Some(bc) = u.bc.as_ref() {
            q.by = bc[self.t1][c];
            q.bz = bc[self.t2][c];
        }
        for n in 0..n_scalars {
            q.s[n] = u.s[n][c];
        }
        q
    }
}

// ============================================================================
// 积分器配置
// ============================================================================

/// 积分器运行时配置
///
/// 构造后一次性读取，推进过程中不可变。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    /// 是否启用多维耗散（H 修正）
    pub h_correction: bool,
    /// 自引力耦合参数；None 表示关闭
    pub self_gravity: Option<SelfGravityParams>,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            h_correction: false,
            self_gravity: None,
        }
    }
}

impl IntegratorConfig {
    /// 校验配置
    pub fn validate(&self) -> AmResult<()> {
        if let Some(sg) = &self.self_gravity {
            if sg.four_pi_g <= 0.0 {
                return Err(AmError::config("自引力常数 4πG 必须为正"));
            }
            if sg.mean_rho < 0.0 {
                return Err(AmError::config("自引力平均密度不能为负"));
            }
        }
        Ok(())
    }
}
