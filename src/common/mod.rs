pub mod response;
pub mod view;

pub use response::{ErrorResponse, ErrorResult};
pub use view::View;
