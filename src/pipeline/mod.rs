mod categorise;
mod review;
mod transform;

pub use categorise::{categorise, CONTRACTOR_FIELD, TITLE_FIELD};
pub use review::{no_category_values, start_with_no_category};
pub use transform::transform;
