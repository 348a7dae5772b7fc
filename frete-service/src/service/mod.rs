//! 服务装配模块

pub mod wire;

pub use wire::{ApplicationContext, initialize};
