//! Table schema and seed data.
//!
//! This module defines the statements used against the `Accounts` table.
//! Every statement that carries caller input is parameterized.

use ledger_rpc_core::{Credit, NewAccount};

/// Name of the single ledger table.
pub const TABLE: &str = "Accounts";

/// SQL statements for the MySQL/MariaDB backend.
pub mod sql {
    /// Cheap read that fails when the table is absent.
    pub const PROBE: &str = "SELECT 1 FROM Accounts LIMIT 1";

    /// Create the table. `Name` uses a binary collation so lookups and the
    /// unique constraint compare names exactly.
    pub const CREATE_TABLE: &str = "CREATE TABLE Accounts(\
        Id INT PRIMARY KEY AUTO_INCREMENT, \
        Name VARCHAR(50) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL UNIQUE, \
        Address VARCHAR(255) NOT NULL, \
        Credit INT UNSIGNED NOT NULL DEFAULT 0)";

    /// Every row, in the store's natural scan order.
    pub const SELECT_ALL: &str = "SELECT Id, Name, Address, Credit FROM Accounts";

    /// One row by exact name.
    pub const SELECT_BY_NAME: &str =
        "SELECT Id, Name, Address, Credit FROM Accounts WHERE Name = ?";

    /// Credit of one row by exact name.
    pub const SELECT_CREDIT: &str = "SELECT Credit FROM Accounts WHERE Name = ?";

    /// Insert a row; `Id` is assigned by the store.
    pub const INSERT: &str = "INSERT INTO Accounts(Name, Address, Credit) VALUES(?, ?, ?)";

    /// Delete one row by exact name.
    pub const DELETE_BY_NAME: &str = "DELETE FROM Accounts WHERE Name = ?";

    /// Overwrite the credit of one row by exact name.
    pub const UPDATE_CREDIT: &str = "UPDATE Accounts SET Credit = ? WHERE Name = ?";
}

/// Example rows inserted when the table is created.
pub const SEED_ACCOUNTS: [(&str, &str, u32); 5] = [
    ("Customer1", "Street 1, City1", 25_000),
    ("Customer2", "Street 2, City2", 13_500),
    ("Customer3", "Street 3, City3", 1_255_000),
    ("Customer4", "Street 4, City4", 8_450),
    ("Customer5", "Street 5, City5", 56_720),
];

/// Seed rows as insertable records.
#[must_use]
pub fn seed_accounts() -> Vec<NewAccount> {
    SEED_ACCOUNTS
        .iter()
        .map(|(name, address, credit)| NewAccount::trusted(*name, *address, Credit::new(*credit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_rows_match_reference_data() {
        let seeds = seed_accounts();
        assert_eq!(seeds.len(), 5);
        assert_eq!(seeds[0].name, "Customer1");
        assert_eq!(seeds[2].credit, Credit::new(1_255_000));
        assert_eq!(seeds[4].address, "Street 5, City5");
    }

    #[test]
    fn statements_are_parameterized() {
        for statement in [
            sql::SELECT_BY_NAME,
            sql::SELECT_CREDIT,
            sql::INSERT,
            sql::DELETE_BY_NAME,
            sql::UPDATE_CREDIT,
        ] {
            assert!(statement.contains('?'), "{statement}");
            assert!(!statement.contains('\''), "{statement}");
        }
    }
}
