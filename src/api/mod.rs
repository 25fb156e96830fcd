//! Public entry points: response shaping, route handlers and the C ABI.

pub mod ffi;
pub mod handlers;
pub mod response;

pub use response::{ApiResponse, ResponseBody};
