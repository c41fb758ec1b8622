//! Request and response documents for the processing flow.

mod request;
mod response;

pub use request::ProcessRequest;
pub use response::{ProcessResponse, STATUS_PROCESSED};
