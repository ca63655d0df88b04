#![allow(dead_code)]

pub mod mocks;
pub mod test_utils;

pub use mocks::MockPoemApi;
pub use test_utils::*;
