mod client;
mod types;

pub use client::{HttpPoemApi, PoemApi};
pub use types::{ErrorBody, HttpReply, PoemLength, PoemRequest, PoemResponse, PoemStyle};
