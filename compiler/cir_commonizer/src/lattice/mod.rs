//! Scalar commonizers over small lattices.

mod modality;
mod visibility;

pub use modality::commonize_modality;
pub use visibility::{
    equalize_visibility, lower_visibility, EqualizingVisibility, LoweringVisibility,
    VisibilityFact,
};

#[cfg(test)]
mod tests;
