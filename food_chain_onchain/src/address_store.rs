use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ChainError;

/// Flat contract-name -> address map, read-modify-written with merge
/// semantics: recording "A" then "B" leaves both in the file, last writer
/// wins per key. No locking; one writer at a time is assumed.
pub struct AddressBook {
    path: PathBuf,
}

impl AddressBook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, contract_name: &str, address: &str) -> Result<(), ChainError> {
        let mut book: BTreeMap<String, String> = read_or_fresh(&self.path);
        book.insert(contract_name.to_owned(), address.to_owned());
        write_pretty(&self.path, &book)?;
        info!(
            "saved address of {contract_name} to {path}: {address}",
            path = self.path.display()
        );
        Ok(())
    }

    pub fn entries(&self) -> Result<BTreeMap<String, String>, ChainError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ChainError::StoreIo {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Everything a deployment run may want to record about one contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentRecord {
    pub address: String,
    pub abi: serde_json::Value,
    pub deployed_at: DateTime<Utc>,
    pub network: String,
}

/// Rich variant of [`AddressBook`]: contract name -> full deployment record,
/// same merge semantics.
pub struct DeploymentRegistry {
    path: PathBuf,
}

impl DeploymentRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, contract_name: &str, record: DeploymentRecord) -> Result<(), ChainError> {
        let mut registry: BTreeMap<String, DeploymentRecord> = read_or_fresh(&self.path);
        let address = record.address.clone();
        registry.insert(contract_name.to_owned(), record);
        write_pretty(&self.path, &registry)?;
        info!(
            "saved deployment record of {contract_name} to {path}: {address}",
            path = self.path.display()
        );
        Ok(())
    }

    pub fn entries(&self) -> Result<BTreeMap<String, DeploymentRecord>, ChainError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ChainError::StoreIo {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Existing content is merged into; an absent or unreadable file just means
/// starting from an empty map, with a warning when content was there but
/// unparseable.
fn read_or_fresh<T: DeserializeOwned + Default>(path: &Path) -> T {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return T::default(),
    };
    match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(
                "could not parse existing {path}, starting a fresh map: {e}",
                path = path.display()
            );
            T::default()
        }
    }
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), ChainError> {
    // 2-space indentation, matching what every other tool in the project
    // writes and expects.
    let encoded = serde_json::to_string_pretty(value)?;
    fs::write(path, encoded).map_err(|source| ChainError::StoreIo {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_two_contracts_keeps_both() {
        let dir = tempfile::tempdir().unwrap();
        let book = AddressBook::new(dir.path().join("contract_address.json"));

        book.record("CompanyRegistry", "0x5FbDB2315678afecb367f032d93F642f64180aa3")
            .unwrap();
        book.record("TokenExchange", "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9")
            .unwrap();

        let entries = book.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries["CompanyRegistry"],
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(
            entries["TokenExchange"],
            "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"
        );
    }

    #[test]
    fn rewriting_a_contract_overwrites_its_entry() {
        let dir = tempfile::tempdir().unwrap();
        let book = AddressBook::new(dir.path().join("contract_address.json"));

        book.record("CompanyRegistry", "0x01").unwrap();
        book.record("CompanyRegistry", "0x02").unwrap();

        let entries = book.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["CompanyRegistry"], "0x02");
    }

    #[test]
    fn unparseable_existing_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract_address.json");
        fs::write(&path, "{{ not json").unwrap();

        let book = AddressBook::new(&path);
        book.record("CompanyRegistry", "0x01").unwrap();

        let entries = book.entries().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn output_is_two_space_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract_address.json");
        AddressBook::new(&path).record("A", "0x01").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"A\""));
    }

    #[test]
    fn deployment_records_merge_like_the_flat_book() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DeploymentRegistry::new(dir.path().join("contract_addresses.json"));

        let record = |addr: &str| DeploymentRecord {
            address: addr.to_owned(),
            abi: serde_json::json!([{ "type": "function", "name": "isRegistered" }]),
            deployed_at: Utc::now(),
            network: "localhost".to_owned(),
        };

        registry.record("CompanyRegistry", record("0x01")).unwrap();
        registry.record("TokenExchange", record("0x02")).unwrap();

        let entries = registry.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["CompanyRegistry"].address, "0x01");
        assert_eq!(entries["TokenExchange"].network, "localhost");
        assert!(entries["TokenExchange"].abi.is_array());
    }
}
