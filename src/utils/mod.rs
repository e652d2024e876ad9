// src/utils/mod.rs

pub mod collate;
pub mod error;
pub mod logger;
pub mod path;
