pub mod transaction_controller;

pub use transaction_controller::{configure, redirect_to_index};
