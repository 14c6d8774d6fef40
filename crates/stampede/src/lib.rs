#![doc = include_str!("../README.md")]

mod error;
mod payload;
mod rand;
mod thread_random;

pub use crate::error::*;
pub use crate::payload::*;
pub use crate::rand::*;
pub use crate::thread_random::*;
