pub mod strided;

pub use strided::{copy_strided, copy_strided_rows};
