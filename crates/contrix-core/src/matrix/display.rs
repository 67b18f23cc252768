//! `Display` formatting for [`Matrix`].

use core::fmt;

use super::Matrix;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return write!(f, "matrix([], shape={}x{})", self.rows, self.cols);
        }

        let precision = f.precision();
        writeln!(f, "matrix([")?;
        for (r, row) in self.iter_rows().enumerate() {
            write!(f, "  [")?;
            for (c, v) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                match precision {
                    Some(p) => write!(f, "{v:.p$}")?,
                    None => write!(f, "{v}")?,
                }
            }
            if r + 1 < self.rows {
                writeln!(f, "],")?;
            } else {
                writeln!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}
