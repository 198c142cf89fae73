// src/lib.rs

pub mod cache;
pub mod cli;
pub mod constants;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod output;
