//! Packages a DJ offers on their dashboard.
//!
//! The list is stored whole under `paquetes/{uid}`. A DJ who never saved
//! packages sees the three defaults.

use log::{info, warn};
use shared::Package;
use std::sync::Arc;

use crate::domain::models::PackageError;
use crate::storage::records::{PackageRecord, PACKAGES, PACKAGES_FIELD};
use crate::storage::traits::single_field;
use crate::storage::DocumentStore;

fn package(icon: &str, title: &str, price: &str) -> Package {
    Package {
        icon: Some(icon.to_string()),
        title: title.to_string(),
        price: price.to_string(),
    }
}

/// Packages shown before a DJ saves their own
pub fn default_packages() -> Vec<Package> {
    vec![
        package("🎵", "Standard Wedding Package", "$1,200"),
        package("🎧", "Club Night", "$800"),
        package("🏢", "Corporate Event", "$1,500"),
    ]
}

/// Placeholder appended by "add package"
pub fn new_package() -> Package {
    package("🎉", "New Package", "$0")
}

#[derive(Clone)]
pub struct PackageService {
    store: Arc<dyn DocumentStore>,
}

impl PackageService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn packages(&self, uid: &str) -> Result<Vec<Package>, PackageError> {
        let stored = match self.store.get_document(PACKAGES, uid).await? {
            Some(document) => document.field::<Vec<PackageRecord>>(PACKAGES_FIELD)?,
            None => None,
        };
        match stored {
            Some(records) if !records.is_empty() => Ok(records.into_iter().map(Package::from).collect()),
            _ => Ok(default_packages()),
        }
    }

    /// Append a package, the placeholder when none is given
    pub async fn add_package(&self, uid: &str, package: Option<Package>) -> Result<Vec<Package>, PackageError> {
        let package = package.unwrap_or_else(new_package);
        validate(&package)?;
        info!("Adding package '{}' for {}", package.title, uid);

        let mut packages = self.packages(uid).await?;
        packages.push(package);
        self.save(uid, &packages).await?;
        Ok(packages)
    }

    pub async fn update_package(
        &self,
        uid: &str,
        index: usize,
        package: Package,
    ) -> Result<Vec<Package>, PackageError> {
        validate(&package)?;
        info!("Updating package {} for {}", index, uid);

        let mut packages = self.packages(uid).await?;
        let slot = packages.get_mut(index).ok_or_else(|| {
            warn!("Package {} not found for {}", index, uid);
            PackageError::NotFound(index)
        })?;
        *slot = package;
        self.save(uid, &packages).await?;
        Ok(packages)
    }

    pub async fn remove_package(&self, uid: &str, index: usize) -> Result<Vec<Package>, PackageError> {
        info!("Removing package {} for {}", index, uid);

        let mut packages = self.packages(uid).await?;
        if index >= packages.len() {
            warn!("Package {} not found for {}", index, uid);
            return Err(PackageError::NotFound(index));
        }
        packages.remove(index);
        self.save(uid, &packages).await?;
        Ok(packages)
    }

    async fn save(&self, uid: &str, packages: &[Package]) -> Result<(), PackageError> {
        let records: Vec<PackageRecord> = packages.iter().cloned().map(PackageRecord::from).collect();
        let fields = single_field(PACKAGES_FIELD, &records)?;
        self.store.set_document(PACKAGES, uid, fields, false).await?;
        Ok(())
    }
}

fn validate(package: &Package) -> Result<(), PackageError> {
    if package.title.trim().is_empty() {
        return Err(PackageError::EmptyTitle);
    }
    Ok(())
}
