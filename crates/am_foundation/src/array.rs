// crates/am_foundation/src/array.rs

//! 连续内存数组容器
//!
//! 提供求解器全部网格量使用的二维/三维数组。所有维度遵循
//! `(n3, n2, n1)` 排列，即最内层下标沿 x1 方向连续，
//! 索引写作 `a[[k, j, i]]`。
//!
//! # 设计目标
//!
//! - **单一所有权**: 容器独占其数据，没有别名和手工配对的 alloc/free
//! - **显式失败**: `try_zeros` 把分配失败映射为 [`AmError::Allocation`]，
//!   供初始化阶段显式中止
//! - **零开销索引**: release 模式下仅做一次乘加偏移计算
//!
//! # 示例
//!
//! ```
//! use am_foundation::array::Array3;
//!
//! let mut flux: Array3<f64> = Array3::zeros(2, 3, 4);
//! flux[[1, 2, 3]] = 0.5;
//! assert_eq!(flux.dims(), [2, 3, 4]);
//! ```

use crate::error::{AmError, AmResult};
use bytemuck::Zeroable;
use std::ops::{Index, IndexMut};

// ============================================================================
// 三维数组
// ============================================================================

/// 三维连续数组，维度 `(n3, n2, n1)`，索引 `[k, j, i]`
#[derive(Debug, Clone, PartialEq)]
pub struct Array3<T> {
    dims: [usize; 3],
    data: Vec<T>,
}

impl<T> Array3<T> {
    /// 各方向维度 `[n3, n2, n1]`
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// 元素总数
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 底层切片
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 底层可变切片
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, k: usize, j: usize, i: usize) -> usize {
        debug_assert!(
            k < self.dims[0] && j < self.dims[1] && i < self.dims[2],
            "索引越界: [{},{},{}] dims={:?}",
            k,
            j,
            i,
            self.dims
        );
        (k * self.dims[1] + j) * self.dims[2] + i
    }
}

impl<T: Copy> Array3<T> {
    /// 创建以 `value` 填满的数组
    pub fn filled(n3: usize, n2: usize, n1: usize, value: T) -> Self {
        Self {
            dims: [n3, n2, n1],
            data: vec![value; n3 * n2 * n1],
        }
    }

    /// 可失败版本的 [`Array3::filled`]
    pub fn try_filled(n3: usize, n2: usize, n1: usize, value: T, what: &'static str) -> AmResult<Self> {
        let len = n3 * n2 * n1;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| AmError::Allocation {
            what,
            bytes: len * std::mem::size_of::<T>(),
        })?;
        data.resize(len, value);
        Ok(Self {
            dims: [n3, n2, n1],
            data,
        })
    }

    /// 全部填充为 `value`
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }
}

impl<T: Zeroable + Copy> Array3<T> {
    /// 创建零初始化数组
    pub fn zeros(n3: usize, n2: usize, n1: usize) -> Self {
        Self::filled(n3, n2, n1, T::zeroed())
    }

    /// 可失败版本的 [`Array3::zeros`]
    pub fn try_zeros(n3: usize, n2: usize, n1: usize, what: &'static str) -> AmResult<Self> {
        Self::try_filled(n3, n2, n1, T::zeroed(), what)
    }
}

impl<T> Index<[usize; 3]> for Array3<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: [usize; 3]) -> &T {
        let off = self.offset(idx[0], idx[1], idx[2]);
        &self.data[off]
    }
}

impl<T> IndexMut<[usize; 3]> for Array3<T> {
    #[inline]
    fn index_mut(&mut self, idx: [usize; 3]) -> &mut T {
        let off = self.offset(idx[0], idx[1], idx[2]);
        &mut self.data[off]
    }
}

// ============================================================================
// 二维数组
// ============================================================================

/// 二维连续数组，维度 `(n2, n1)`，索引 `[j, i]`
///
/// 用于细化边界上的通量/电动势寄存器补片。
#[derive(Debug, Clone, PartialEq)]
pub struct Array2<T> {
    dims: [usize; 2],
    data: Vec<T>,
}

impl<T> Array2<T> {
    /// 各方向维度 `[n2, n1]`
    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    /// 元素总数
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 底层切片
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, j: usize, i: usize) -> usize {
        debug_assert!(
            j < self.dims[0] && i < self.dims[1],
            "索引越界: [{},{}] dims={:?}",
            j,
            i,
            self.dims
        );
        j * self.dims[1] + i
    }
}

impl<T: Copy> Array2<T> {
    /// 创建以 `value` 填满的数组
    pub fn filled(n2: usize, n1: usize, value: T) -> Self {
        Self {
            dims: [n2, n1],
            data: vec![value; n2 * n1],
        }
    }

    /// 全部填充为 `value`
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }
}

impl<T: Zeroable + Copy> Array2<T> {
    /// 创建零初始化数组
    pub fn zeros(n2: usize, n1: usize) -> Self {
        Self::filled(n2, n1, T::zeroed())
    }
}

impl<T> Index<[usize; 2]> for Array2<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: [usize; 2]) -> &T {
        let off = self.offset(idx[0], idx[1]);
        &self.data[off]
    }
}

impl<T> IndexMut<[usize; 2]> for Array2<T> {
    #[inline]
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut T {
        let off = self.offset(idx[0], idx[1]);
        &mut self.data[off]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array3_layout() {
        let mut a: Array3<f64> = Array3::zeros(2, 3, 4);
        assert_eq!(a.dims(), [2, 3, 4]);
        assert_eq!(a.len(), 24);

        a[[1, 2, 3]] = 7.0;
        // 最内层下标沿 n1 连续
        assert_eq!(a.as_slice()[(1 * 3 + 2) * 4 + 3], 7.0);
    }

    #[test]
    fn test_array3_fill() {
        let mut a: Array3<f64> = Array3::zeros(2, 2, 2);
        a.fill(1.5);
        assert!(a.as_slice().iter().all(|&x| x == 1.5));
    }

    #[test]
    fn test_array3_try_zeros_ok() {
        let a = Array3::<f64>::try_zeros(4, 4, 4, "测试缓冲区").unwrap();
        assert_eq!(a.len(), 64);
        assert!(a.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_array2_layout() {
        let mut a: Array2<f64> = Array2::zeros(3, 5);
        a[[2, 4]] = -1.0;
        assert_eq!(a.as_slice()[2 * 5 + 4], -1.0);
        assert_eq!(a.dims(), [3, 5]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_array3_out_of_bounds() {
        let a: Array3<f64> = Array3::zeros(2, 2, 2);
        let _ = a[[2, 0, 0]];
    }
}
