pub mod fluent_request;
pub mod request_common;
