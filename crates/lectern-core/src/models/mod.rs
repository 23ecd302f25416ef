pub mod material;
pub mod result;

pub use material::{Material, MaterialType};
pub use result::RetrievalResult;
