pub mod guards;
pub mod metrics;


pub use guards::reject_if_ill_conditioned;
pub use metrics::{render_text, TpaMetrics};
