pub mod seed;

pub use seed::{seed_demo_company, DEMO_COMPANY};
