#![no_std]

mod contract;
mod controller;
mod events;
mod factory;
mod history;
pub mod msg;
pub mod storage;

pub use contract::*;
