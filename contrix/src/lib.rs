//! # Contrix
//!
//! Planned contrasts for categorical factors: rule checking, encoding
//! matrices and contrast estimates, built on a small dense linear algebra
//! core.
//!
//! One `use contrix::prelude::*;` brings in the matrix type and the contrast
//! builder.
//!
//! ```
//! use contrix::prelude::*;
//!
//! let alcohol = Factor::new("alcohol", ["None", "2 Pints", "4 Pints"]).unwrap();
//! let basis = ContrastBuilder::default()
//!     .build_from_inverse(alcohol.levels(), &families::helmert(&alcohol))
//!     .unwrap();
//! assert_eq!(basis.matrix().shape(), (3, 2));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | `Matrix`, LU decomposition, Gram–Schmidt |
//! | `contrast` *(default)* | Contrast validation, encodings, planned comparisons |

pub use contrix_core as core;

#[cfg(feature = "contrast")]
pub use contrix_contrast as contrast;

/// Glob-import convenience: `use contrix::prelude::*;`
pub mod prelude {
    pub use contrix_core::prelude::*;

    #[cfg(feature = "contrast")]
    pub use contrix_contrast::prelude::*;
}
