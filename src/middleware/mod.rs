pub mod access;
pub mod response;

pub use access::require_bearer;
pub use response::{ApiResponse, ApiResult};
