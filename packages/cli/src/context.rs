//! Store handles for the data directory.

use std::path::Path;

use till_records::{Product, Transaction, User};
use till_store::RecordStore;

pub const PRODUCTS_FILE: &str = "products.txt";
pub const USERS_FILE: &str = "users.txt";
pub const TRANSACTIONS_FILE: &str = "transactions.txt";

/// Explicit handles on the three data resources.
///
/// Passed to every operation instead of living in process-wide statics, so
/// tests (and anything else) can point a context at any directory.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub products: RecordStore<Product>,
    pub users: RecordStore<User>,
    pub transactions: RecordStore<Transaction>,
}

impl StoreContext {
    /// Handles into `data_dir`; nothing is opened or created yet, the files
    /// come into being on first write.
    pub fn open(data_dir: &Path) -> Self {
        StoreContext {
            products: RecordStore::new(data_dir.join(PRODUCTS_FILE)),
            users: RecordStore::new(data_dir.join(USERS_FILE)),
            transactions: RecordStore::new(data_dir.join(TRANSACTIONS_FILE)),
        }
    }
}
