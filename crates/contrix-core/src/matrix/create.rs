//! Matrix constructors analogous to `np.zeros`, `np.ones`, `np.eye`.

use super::Matrix;

impl Matrix {
    /// Create a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 0.0)
    }

    /// Create a matrix filled with ones.
    ///
    /// ```
    /// # use contrix_core::Matrix;
    /// let m = Matrix::ones(1, 3);
    /// assert_eq!(m.as_slice(), &[1.0, 1.0, 1.0]);
    /// ```
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 1.0)
    }

    /// Create a matrix filled with a constant value.
    pub fn full(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }
}
