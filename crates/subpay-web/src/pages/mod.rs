//! Page Components

mod plans;
mod result;

pub use plans::PlansPage;
pub use result::ResultPage;
