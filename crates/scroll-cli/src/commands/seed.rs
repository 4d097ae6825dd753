//! Sample data
//!
//! Seeds the `hello` collection with six employees, then reads the whole
//! collection back and prints it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scroll_core::Driver;

use crate::output::Output;

/// Collection the sample employees are written to
pub const SAMPLE_COLLECTION: &str = "hello";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub company: String,
    pub address: Address,
}

impl User {
    fn employee(name: &str, company: &str) -> Self {
        Self {
            name: name.to_string(),
            age: 23,
            contact: "1234567890".to_string(),
            company: company.to_string(),
            address: Address {
                city: "Continental".to_string(),
                state: "New York City".to_string(),
                country: "USA".to_string(),
                pincode: 10001,
            },
        }
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        User::employee("John", "Google"),
        User::employee("Aurello", "Microsoft"),
        User::employee("Helen", "Snive"),
        User::employee("Winston", "Apple"),
        User::employee("Charon", "Meta"),
        User::employee("Marcus", "Dominate"),
    ]
}

/// Write the sample users, keyed by name, and return what reads back
pub fn seed(db: &Driver) -> Result<Vec<User>> {
    for user in sample_users() {
        db.write(SAMPLE_COLLECTION, &user.name, &user)
            .with_context(|| format!("Failed to write sample user {}", user.name))?;
    }

    db.read_all_as(SAMPLE_COLLECTION)
        .context("Failed to read back sample users")
}

pub fn run(db: &Driver, output: &Output) -> Result<()> {
    let users = seed(db)?;

    output.success(&format!(
        "Seeded {} users into '{}'",
        users.len(),
        SAMPLE_COLLECTION
    ));

    if output.is_quiet() {
        return Ok(());
    }

    let records = db.read_all(SAMPLE_COLLECTION)?;
    output.print_records(SAMPLE_COLLECTION, &records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scroll_core::Options;
    use tempfile::TempDir;

    #[test]
    fn test_seed_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let db = Driver::open(temp_dir.path(), Options::default()).unwrap();

        let mut users = seed(&db).unwrap();
        let mut expected = sample_users();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(users, expected);

        assert!(temp_dir.path().join("hello").join("Marcus.json").exists());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db = Driver::open(temp_dir.path(), Options::default()).unwrap();

        seed(&db).unwrap();
        let users = seed(&db).unwrap();
        assert_eq!(users.len(), 6);
    }

    #[test]
    fn test_field_names_on_disk() {
        let json = serde_json::to_value(User::employee("John", "Google")).unwrap();
        assert_eq!(json["Name"], "John");
        assert_eq!(json["Age"], 23);
        assert_eq!(json["Address"]["Pincode"], 10001);
    }
}
