pub mod shapes;
pub mod source;

#[cfg(test)]
mod tests;

pub use shapes::{shape_for, Bump, MatrixRole, RowShape};
pub use source::{synthesize, MatrixSource, ProvidedMatrices, SyntheticSource};
