pub mod return_controller;

pub use return_controller::configure;
