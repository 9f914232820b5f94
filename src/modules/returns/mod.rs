pub mod controllers;
pub mod models;
pub mod services;

pub use models::{ReturnForm, ReturnFormPage, TextPlacement};
pub use services::{ReturnFormRenderer, ReturnFormService};
