pub mod accuracy;
pub mod assemble;
pub mod kpi;
pub mod response;
pub mod svd;


pub use accuracy::{accuracy, band_errors, measured_reference};
pub use assemble::{compute_tpa, compute_tpa_with};
pub use kpi::kpis;
pub use response::{contributions, path_energies, response};
pub use svd::{analyze, analyze_rows, classify, condition_number, singular_values, truncation_level};
