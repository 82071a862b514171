//! The BlueZ radio

mod adapter;
mod characteristic;
mod device;
mod error;
mod service;

pub use adapter::BluerRadio;
pub use device::{BluerConnection, BluerDevice};
