use rust_decimal::Decimal;
use tracing::info;

use crate::core::Result;
use crate::modules::companies::models::{Company, NewPackage};
use crate::modules::companies::repositories::CompanyRepository;

/// Name of the store created by the demo seed
pub const DEMO_COMPANY: &str = "My Store";

/// Create "My Store" (20% VAT) with two packages unless it already exists.
///
/// Returns the company either way; packages are only added on first creation.
pub async fn seed_demo_company(repo: &dyn CompanyRepository) -> Result<Company> {
    if let Some(existing) = repo.find_by_name(DEMO_COMPANY).await? {
        info!(company_id = existing.id, "Demo company already present");
        return Ok(existing);
    }

    let company = repo.create_company(DEMO_COMPANY, Decimal::new(200, 1)).await?;

    let packages = [
        NewPackage::new("Package 1", Decimal::new(1000, 2), 5)?,
        NewPackage::new("Package 2", Decimal::new(2000, 2), 3)?,
    ];
    for package in &packages {
        repo.add_package(company.id, package).await?;
    }

    info!(
        company_id = company.id,
        packages = packages.len(),
        "Seeded demo company"
    );

    Ok(company)
}
