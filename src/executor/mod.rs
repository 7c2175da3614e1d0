mod dispatch;
mod response;

pub use response::{QueryResponse, post_process};
