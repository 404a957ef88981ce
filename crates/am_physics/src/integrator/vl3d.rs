// crates/am_physics/src/integrator/vl3d.rs

//! 方向非分裂 van Leer 预报-校正推进
//!
//! [`VlIntegrator3d`] 持有注入的策略对象（黎曼求解器、重构器、
//! 静态引力势）与运行时配置，`advance` 把一个网格块推进一个
//! 时间步:
//!
//! 1. 预报: 三方向一阶通量 → 角点电动势 → CT 半步面磁场 →
//!    半步守恒更新 → 半步引力源项；持久状态不被触碰
//! 2. 校正: 从半步状态二阶重构 → 多维耗散系数 → 全通量 →
//!    角点电动势 → CT 全步面磁场 → 全步引力源项 → 通量散度
//!    提交 → 单元中心磁场平均
//! 3. 细化边界寄存器填充
//!
//! 预报必须完整结束后校正才开始；三个方向扫掠彼此独立，但
//! 角点电动势需要全部三个方向的通量。提交后对内部区做一次
//! 物理有效性检查，违例以携带阶段名的致命错误上报，绝不静默
//! 修复。

use super::workspace::IntegratorWorkspace;
use super::{emf, hcorr, smr, sources, sweep, Bounds};
use crate::eos::EquationOfState;
use crate::gravity::StaticPotential;
use crate::numerics::reconstruction::Reconstruction;
use crate::schemes::riemann::RiemannSolver;
use crate::state::Cons1D;
use crate::types::{Direction, IntegratorConfig, Permutation};
use am_foundation::{AmError, AmResult, Array3, IndexRange, Real};
use am_grid::{ConservedField, FieldConfig, MeshBlock};
use std::sync::Arc;
use tracing::debug;

/// 非分裂 van Leer 积分器
pub struct VlIntegrator3d {
    field_cfg: FieldConfig,
    eos: EquationOfState,
    cfg: IntegratorConfig,
    riemann: Box<dyn RiemannSolver>,
    recon: Box<dyn Reconstruction>,
    static_pot: Option<Arc<dyn StaticPotential>>,
}

impl VlIntegrator3d {
    /// 创建积分器
    ///
    /// 配置在此一次性校验，推进期间不再改变。
    pub fn new(
        field_cfg: FieldConfig,
        eos: EquationOfState,
        cfg: IntegratorConfig,
        riemann: Box<dyn RiemannSolver>,
        recon: Box<dyn Reconstruction>,
    ) -> AmResult<Self> {
        field_cfg.validate()?;
        eos.validate()?;
        cfg.validate()?;
        if eos.is_adiabatic() != field_cfg.adiabatic {
            return Err(AmError::config("状态方程与场布局的能量方程开关不一致"));
        }
        Ok(Self {
            field_cfg,
            eos,
            cfg,
            riemann,
            recon,
            static_pot: None,
        })
    }

    /// 注入静态引力势
    pub fn with_static_potential(mut self, pot: Arc<dyn StaticPotential>) -> Self {
        self.static_pot = Some(pot);
        self
    }

    /// 场配置
    #[inline]
    pub fn field_config(&self) -> FieldConfig {
        self.field_cfg
    }

    /// 状态方程
    #[inline]
    pub fn eos(&self) -> EquationOfState {
        self.eos
    }

    /// 积分器配置
    #[inline]
    pub fn config(&self) -> IntegratorConfig {
        self.cfg
    }

    /// 块所需的最小 ghost 层数
    #[inline]
    pub fn required_nghost(&self) -> usize {
        self.recon.stencil_width() + 2
    }

    /// 把一个块推进一个时间步
    ///
    /// `ws` 在本次调用期间被独占；持久状态只在校正步末尾被覆盖，
    /// 任何失败都使持久状态保持调用前的值（提交前的错误）或以
    /// 致命错误上报（提交后检查发现非物理状态）。
    pub fn advance(
        &self,
        blk: &mut MeshBlock,
        ws: &mut IntegratorWorkspace,
        dt: Real,
    ) -> AmResult<()> {
        self.check_inputs(blk, ws, dt)?;

        let b = Bounds::new(blk, self.recon.stencil_width());
        let qh = [
            0.5 * dt / blk.dx[0],
            0.5 * dt / blk.dx[1],
            0.5 * dt / blk.dx[2],
        ];
        let qf = [dt / blk.dx[0], dt / blk.dx[1], dt / blk.dx[2]];
        let geom = sources::BlockGeom {
            dx: blk.dx,
            origin: blk.origin,
            nghost: blk.nghost(),
        };

        // ==================== 预报步 ====================

        ws.uhalf.copy_box_from(&blk.u);

        for dir in Direction::ALL {
            let d = dir.axis();
            sweep::first_order_fluxes(
                dir,
                &blk.u,
                blk.bface.as_ref(),
                ws.bhalf.as_mut(),
                &mut ws.flux[d],
                &mut ws.line,
                &self.eos,
                self.riemann.as_ref(),
                &b,
            )?;
        }

        if let Some(emfb) = ws.emf.as_mut() {
            emf::cell_centered_emfs(&blk.u, emfb, &b.full);
            emf::corner_emf1(emfb, &ws.flux[1], &ws.flux[2], &b);
            emf::corner_emf2(emfb, &ws.flux[0], &ws.flux[2], &b);
            emf::corner_emf3(emfb, &ws.flux[0], &ws.flux[1], &b);
            if let Some(bh) = ws.bhalf.as_mut() {
                emf::ct_update(bh, emfb, qh, &b.full);
                emf::average_bcc(&mut ws.uhalf, bh, &b.full_shrunk(1));
            }
        }

        flux_divergence_update(&mut ws.uhalf, &ws.flux, qh, &b.full_shrunk(1));

        if let Some(pot) = self.static_pot.as_deref() {
            sources::apply_static_gravity(
                &mut ws.uhalf,
                &blk.u.d,
                &ws.flux,
                &geom,
                pot,
                qh,
                &b.full_shrunk(1),
            );
        }
        if self.cfg.self_gravity.is_some() {
            if let Some(phi) = blk.phi.as_ref() {
                sources::apply_self_gravity_half(
                    &mut ws.uhalf,
                    &blk.u.d,
                    phi,
                    &ws.flux,
                    qh,
                    &b.full_shrunk(1),
                );
            }
        }

        // ==================== 校正步 ====================

        for dir in Direction::ALL {
            let d = dir.axis();
            sweep::reconstruct_faces(
                dir,
                &ws.uhalf,
                &mut ws.wl_face[d],
                &mut ws.wr_face[d],
                &mut ws.line,
                &self.eos,
                self.recon.as_ref(),
                &b,
            )?;
        }

        if self.cfg.h_correction {
            if let Some(eta) = ws.eta.as_mut() {
                hcorr::compute_eta(eta, &ws.wl_face, &ws.wr_face, ws.bhalf.as_ref(), &self.eos, &b);
            }
        }
        let eta_ref = if self.cfg.h_correction {
            ws.eta.as_ref()
        } else {
            None
        };

        for dir in Direction::ALL {
            let d = dir.axis();
            sweep::corrected_fluxes(
                dir,
                &mut ws.flux[d],
                &ws.wl_face[d],
                &ws.wr_face[d],
                ws.bhalf.as_ref(),
                eta_ref,
                &self.eos,
                self.riemann.as_ref(),
                &b,
            )?;
        }

        if let Some(emfb) = ws.emf.as_mut() {
            emf::cell_centered_emfs(&ws.uhalf, emfb, &b.ord);
            emf::corner_emf1(emfb, &ws.flux[1], &ws.flux[2], &b);
            emf::corner_emf2(emfb, &ws.flux[0], &ws.flux[2], &b);
            emf::corner_emf3(emfb, &ws.flux[0], &ws.flux[1], &b);
            if let Some(bf) = blk.bface.as_mut() {
                emf::ct_update(bf, emfb, qf, &b.ord);
            }
        }

        let commit = b.ord_shrunk(1);

        if let Some(pot) = self.static_pot.as_deref() {
            sources::apply_static_gravity(
                &mut blk.u,
                &ws.uhalf.d,
                &ws.flux,
                &geom,
                pot,
                qf,
                &commit,
            );
        }
        if let Some(params) = self.cfg.self_gravity.as_ref() {
            if let Some(phi) = blk.phi.as_ref() {
                sources::apply_self_gravity_full(
                    &mut blk.u,
                    phi,
                    &ws.flux,
                    params,
                    qf,
                    geom.dx,
                    &commit,
                );
            }
            if let Some(mf) = blk.mass_flux.as_mut() {
                sources::save_mass_fluxes(mf, &ws.flux, &b.interior);
            }
        }

        flux_divergence_update(&mut blk.u, &ws.flux, qf, &commit);

        if let Some(bf) = blk.bface.as_ref() {
            emf::average_bcc(&mut blk.u, bf, &commit);
        }

        self.check_committed(&blk.u, &b)?;

        // ==================== 细化边界寄存器 ====================

        smr::fill_registers(&mut blk.links, &ws.flux, ws.emf.as_ref(), &self.field_cfg);

        debug!(
            block = blk.id,
            dt,
            solver = self.riemann.name(),
            recon = self.recon.name(),
            "时间步推进完成"
        );
        Ok(())
    }

    /// 推进前的输入检查
    fn check_inputs(
        &self,
        blk: &MeshBlock,
        ws: &IntegratorWorkspace,
        dt: Real,
    ) -> AmResult<()> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(AmError::invalid_input(format!("无效时间步 dt={:e}", dt)));
        }
        if blk.u.cfg() != self.field_cfg {
            return Err(AmError::config("块的场布局与积分器配置不一致"));
        }
        if !ws.can_hold(blk) {
            return Err(AmError::config("工作区尺寸或配置无法容纳该块"));
        }
        if blk.nghost() < self.required_nghost() {
            return Err(AmError::config(format!(
                "ghost 层数不足: 需要 {}, 实有 {}",
                self.required_nghost(),
                blk.nghost()
            )));
        }
        if self.cfg.h_correction && !ws.has_h_correction() {
            return Err(AmError::config("启用 H 修正但工作区未分配耗散缓冲"));
        }
        if self.cfg.self_gravity.is_some() && blk.phi.is_none() {
            return Err(AmError::config("启用自引力但块未携带势场"));
        }
        Ok(())
    }

    /// 提交后的物理有效性检查
    fn check_committed(&self, u: &ConservedField, b: &Bounds) -> AmResult<()> {
        let p = Permutation::of_axis(0);
        let n_scalars = self.field_cfg.n_scalars;
        for k in b.interior[2].range() {
            for j in b.interior[1].range() {
                for i in b.interior[0].range() {
                    let c = [k, j, i];
                    let q = p.gather_cons(u, c, n_scalars);
                    let bn = u.bcc(0).map_or(0.0, |arr| arr[c]);
                    let w = self.eos.cons_to_prim(&q, bn);
                    self.eos.validate_prim(&w).map_err(|m| {
                        AmError::numerical(
                            "corrector-commit",
                            format!("单元 (i={}, j={}, k={}): {}", i, j, k, m),
                        )
                    })?;
                }
            }
        }
        Ok(())
    }
}

/// 三方向通量散度更新
///
/// 同一套循环体按置换描述子处理三个方向，动量/磁场分量映射
/// 随方向循环。不触碰单元中心磁场（其更新只来自 CT 面平均）。
fn flux_divergence_update(
    u: &mut ConservedField,
    flux: &[Array3<Cons1D>; 3],
    q: [Real; 3],
    r: &[IndexRange; 3],
) {
    let n_scalars = u.cfg().n_scalars;
    let has_e = u.e.is_some();
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                for axis in 0..3 {
                    let p = Permutation::of_axis(axis);
                    let cp = match axis {
                        0 => [k, j, i + 1],
                        1 => [k, j + 1, i],
                        _ => [k + 1, j, i],
                    };
                    let fh = flux[axis][cp];
                    let fl = flux[axis][c];
                    u.d[c] -= q[axis] * (fh.d - fl.d);
                    u.momentum_mut(p.n)[c] -= q[axis] * (fh.mx - fl.mx);
                    u.momentum_mut(p.t1)[c] -= q[axis] * (fh.my - fl.my);
                    u.momentum_mut(p.t2)[c] -= q[axis] * (fh.mz - fl.mz);
                    if has_e {
                        if let Some(e) = u.e.as_mut() {
                            e[c] -= q[axis] * (fh.e - fl.e);
                        }
                    }
                    for n in 0..n_scalars {
                        u.s[n][c] -= q[axis] * (fh.s[n] - fl.s[n]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::reconstruction::PiecewiseLinear;
    use crate::schemes::riemann::Hlle;

    fn integrator(field_cfg: FieldConfig, eos: EquationOfState) -> AmResult<VlIntegrator3d> {
        VlIntegrator3d::new(
            field_cfg,
            eos,
            IntegratorConfig::default(),
            Box::new(Hlle::new(eos)),
            Box::new(PiecewiseLinear::new()),
        )
    }

    #[test]
    fn test_eos_layout_mismatch_rejected() {
        let r = integrator(
            FieldConfig::adiabatic_mhd(),
            EquationOfState::Isothermal { cs: 1.0 },
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_required_nghost() {
        let integ = integrator(
            FieldConfig::adiabatic_mhd(),
            EquationOfState::Adiabatic { gamma: 5.0 / 3.0 },
        )
        .unwrap();
        // 线性重构模板半宽 2，外加一层更新与一层提交收缩
        assert_eq!(integ.required_nghost(), 4);
    }

    #[test]
    fn test_invalid_dt_rejected() {
        use glam::DVec3;
        let eos = EquationOfState::Adiabatic { gamma: 5.0 / 3.0 };
        let cfg = FieldConfig::adiabatic_hydro();
        let integ = integrator(cfg, eos).unwrap();
        let mut blk = MeshBlock::new(cfg, [4, 4, 4], 4, [0.1; 3], DVec3::ZERO).unwrap();
        let mut ws =
            IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
        assert!(integ.advance(&mut blk, &mut ws, 0.0).is_err());
        assert!(integ.advance(&mut blk, &mut ws, Real::NAN).is_err());
    }
}
