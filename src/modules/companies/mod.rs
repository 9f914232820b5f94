pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Company, NewPackage, Package};
pub use repositories::{CompanyRepository, SqliteCompanyRepository};
pub use services::seed_demo_company;
