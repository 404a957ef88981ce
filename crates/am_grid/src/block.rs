// crates/am_grid/src/block.rs

//! 网格块
//!
//! 一个 [`MeshBlock`] 持有块的几何元数据与全部持久物理状态：
//! 单元中心守恒场、面心磁场（磁流体）、自引力势场（可选）以及
//! 细化边界寄存器链接。积分器以 `&mut MeshBlock` 推进一个时间步，
//! 仅在校正步末尾原地覆盖持久状态。

use crate::field::{ConservedField, FaceField, FieldConfig};
use crate::smr::SmrLink;
use am_foundation::{AmError, AmResult, Array3, IndexRange, Real};
use glam::DVec3;

/// 结构网格块
#[derive(Debug)]
pub struct MeshBlock {
    /// 块编号（网格层级内唯一）
    pub id: usize,
    /// 细化层级（0 为根层）
    pub level: u32,
    nx: [usize; 3],
    nghost: usize,
    /// 各方向格距 [长度]
    pub dx: [Real; 3],
    /// 内部区下角点的物理坐标
    pub origin: DVec3,
    /// 单元中心守恒场
    pub u: ConservedField,
    /// 面心磁场（磁流体）
    pub bface: Option<FaceField>,
    /// 自引力势场（单元中心采样，含 ghost）
    pub phi: Option<Array3<Real>>,
    /// 校正步质量通量快照（自引力通量修正消费，按方向）
    pub mass_flux: Option<[Array3<Real>; 3]>,
    /// 细化边界链接
    pub links: Vec<SmrLink>,
}

impl MeshBlock {
    /// 创建网格块
    ///
    /// # 参数
    /// - `cfg`: 场布局配置
    /// - `nx`: 各方向内部格数
    /// - `nghost`: ghost 层数
    /// - `dx`: 各方向格距
    /// - `origin`: 内部区下角点物理坐标
    pub fn new(
        cfg: FieldConfig,
        nx: [usize; 3],
        nghost: usize,
        dx: [Real; 3],
        origin: DVec3,
    ) -> AmResult<Self> {
        cfg.validate()?;
        if nx.iter().any(|&n| n == 0) {
            return Err(AmError::config("每个方向至少需要一个内部单元"));
        }
        if nghost < 2 {
            return Err(AmError::config("ghost 层数至少为 2"));
        }
        if dx.iter().any(|&h| h <= 0.0) {
            return Err(AmError::config("格距必须为正"));
        }
        let n1 = nx[0] + 2 * nghost;
        let n2 = nx[1] + 2 * nghost;
        let n3 = nx[2] + 2 * nghost;
        let u = ConservedField::new(cfg, n3, n2, n1)?;
        let bface = if cfg.mhd {
            Some(FaceField::new(n3, n2, n1)?)
        } else {
            None
        };
        Ok(Self {
            id: 0,
            level: 0,
            nx,
            nghost,
            dx,
            origin,
            u,
            bface,
            phi: None,
            mass_flux: None,
            links: Vec::new(),
        })
    }

    /// 启用自引力耦合：分配势场与质量通量快照数组
    pub fn with_self_gravity(mut self) -> AmResult<Self> {
        let [n3, n2, n1] = self.dims();
        self.phi = Some(Array3::try_zeros(n3, n2, n1, "自引力势场")?);
        self.mass_flux = Some([
            Array3::try_zeros(n3, n2, n1, "x1 质量通量快照")?,
            Array3::try_zeros(n3, n2, n1, "x2 质量通量快照")?,
            Array3::try_zeros(n3, n2, n1, "x3 质量通量快照")?,
        ]);
        Ok(self)
    }

    /// 各方向内部格数
    #[inline]
    pub fn nx(&self, axis: usize) -> usize {
        self.nx[axis]
    }

    /// ghost 层数
    #[inline]
    pub fn nghost(&self) -> usize {
        self.nghost
    }

    /// 各方向总格数（含 ghost）
    #[inline]
    pub fn nt(&self, axis: usize) -> usize {
        self.nx[axis] + 2 * self.nghost
    }

    /// 数组维度 `[n3, n2, n1]`
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        [self.nt(2), self.nt(1), self.nt(0)]
    }

    /// 某方向的内部单元范围
    #[inline]
    pub fn interior(&self, axis: usize) -> IndexRange {
        IndexRange::new(self.nghost, self.nghost + self.nx[axis] - 1)
    }

    /// 某方向的全部单元范围（含 ghost）
    #[inline]
    pub fn full(&self, axis: usize) -> IndexRange {
        IndexRange::new(0, self.nt(axis) - 1)
    }

    /// 单元中心物理坐标
    ///
    /// 参数为各轴单元下标 `(i, j, k)`（含 ghost 偏移的数组下标）。
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        let ng = self.nghost as Real;
        DVec3::new(
            self.origin.x + (i as Real - ng + 0.5) * self.dx[0],
            self.origin.y + (j as Real - ng + 0.5) * self.dx[1],
            self.origin.z + (k as Real - ng + 0.5) * self.dx[2],
        )
    }

    /// 追加一个细化边界链接
    pub fn add_link(&mut self, link: SmrLink) {
        self.links.push(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> MeshBlock {
        MeshBlock::new(
            FieldConfig::adiabatic_mhd(),
            [8, 4, 4],
            4,
            [0.1, 0.2, 0.2],
            DVec3::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn test_block_extents() {
        let b = block();
        assert_eq!(b.nt(0), 16);
        assert_eq!(b.nt(1), 12);
        assert_eq!(b.dims(), [12, 12, 16]);
        assert_eq!(b.interior(0), IndexRange::new(4, 11));
        assert_eq!(b.full(0), IndexRange::new(0, 15));
    }

    #[test]
    fn test_cell_center() {
        let b = block();
        // 第一个内部单元的中心在 origin + dx/2
        let c = b.cell_center(4, 4, 4);
        assert!((c.x - 0.05).abs() < 1e-14);
        assert!((c.y - 0.1).abs() < 1e-14);
        // ghost 单元中心在域外
        let g = b.cell_center(3, 4, 4);
        assert!(g.x < 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let r = MeshBlock::new(
            FieldConfig::adiabatic_hydro(),
            [0, 4, 4],
            4,
            [0.1; 3],
            DVec3::ZERO,
        );
        assert!(r.is_err());

        let r = MeshBlock::new(
            FieldConfig::adiabatic_hydro(),
            [4, 4, 4],
            1,
            [0.1; 3],
            DVec3::ZERO,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_self_gravity_allocation() {
        let b = block().with_self_gravity().unwrap();
        assert!(b.phi.is_some());
        assert!(b.mass_flux.is_some());
    }
}
