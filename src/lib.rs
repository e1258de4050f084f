// src/lib.rs

#![no_std] // Specify no_std at the crate root

pub mod checksum;
pub mod command;
pub mod error;
pub mod frame;
pub mod receiver;

// Re-export key types for convenience
pub use command::{BaudRate, Command, SentenceOutput, SentenceRate};
pub use error::PmtkError;
pub use frame::{SentenceBody, SentenceString};
pub use receiver::SentenceReceiver;
