mod persistence;

pub use persistence::{load_formulation, save_formulation, Formulation};
