//! Institution data structures and CSV loading

mod data;
pub mod loader;

pub use data::{Institution, InstitutionType};
pub use loader::{load_institutions, load_institutions_from_reader};
