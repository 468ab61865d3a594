// Each controller owns its routes and exposes them through `router()`,
// merged into the application by `app::build_app`.

pub mod api_exception;
pub mod api_exception_v2;
pub mod error_page;

pub use api_exception::ApiExceptionController;
pub use api_exception_v2::ApiExceptionV2Controller;
pub use error_page::ErrorPageController;
pub use validation_test::ValidationTestController;
