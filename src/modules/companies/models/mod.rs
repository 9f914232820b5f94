mod company;

pub use company::{Company, CompanyRow, NewPackage, Package, PackageRow};
