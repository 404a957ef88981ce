// crates/am_physics/src/gravity.rs

//! 引力势接口
//!
//! 静态引力势以策略对象注入积分器，配置期确定，推进期只读。
//! 自引力势场由外部泊松求解器写入网格块的单元中心势数组，
//! 本层只消费其采样值；耦合常数由 [`SelfGravityParams`] 携带。

use am_foundation::Real;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 静态引力势
///
/// 实现必须是纯函数：同一位置恒返回同一势值。
pub trait StaticPotential: Send + Sync {
    /// 势函数 φ(x)
    fn phi(&self, pos: DVec3) -> Real;
}

/// 线性势（均匀引力场）
///
/// φ = g · x，对应的加速度为 -g。
#[derive(Debug, Clone, Copy)]
pub struct LinearPotential {
    /// 势的梯度向量 g
    pub grad: DVec3,
}

impl StaticPotential for LinearPotential {
    fn phi(&self, pos: DVec3) -> Real {
        self.grad.dot(pos)
    }
}

/// 软化点质量势
#[derive(Debug, Clone, Copy)]
pub struct PointMassPotential {
    /// 引力参数 GM
    pub gm: Real,
    /// 质心位置
    pub center: DVec3,
    /// 软化长度 [长度]
    pub softening: Real,
}

impl StaticPotential for PointMassPotential {
    fn phi(&self, pos: DVec3) -> Real {
        let r2 = (pos - self.center).length_squared() + self.softening * self.softening;
        -self.gm / r2.sqrt()
    }
}

/// 自引力耦合参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfGravityParams {
    /// 4πG
    pub four_pi_g: Real,
    /// 平均密度（Jeans swindle 的背景项；周期域取域平均）
    pub mean_rho: Real,
}
