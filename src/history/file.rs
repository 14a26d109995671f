//! Order history persisted as a JSON array in a single file.

use super::{HistoryError, OrderHistoryStore};
use crate::order::Order;
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// JSON-file backed history.
///
/// The file is read once by [`load`](OrderHistoryStore::load) and rewritten
/// whole on every append. The write goes to a sibling temp file first and
/// is renamed into place.
#[derive(Debug)]
pub struct FileOrderHistory {
    path: PathBuf,
    orders: RwLock<Vec<Order>>,
}

impl FileOrderHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            orders: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Order>, HistoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| HistoryError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, orders: &[Order]) -> Result<(), HistoryError> {
        let json = serde_json::to_vec_pretty(orders)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|source| HistoryError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

impl OrderHistoryStore for FileOrderHistory {
    fn load(&self) -> Vec<Order> {
        let orders = match self.read() {
            Ok(orders) => {
                debug!(path = %self.path.display(), count = orders.len(), "order history loaded");
                orders
            }
            Err(err) => {
                warn!(error = %err, "order history unreadable, starting empty");
                Vec::new()
            }
        };
        *self.orders.write() = orders.clone();
        orders
    }

    fn append(&self, order: Order) {
        let snapshot = {
            let mut orders = self.orders.write();
            orders.insert(0, order);
            orders.clone()
        };

        match self.write(&snapshot) {
            Ok(()) => info!(path = %self.path.display(), count = snapshot.len(), "order history saved"),
            Err(err) => warn!(error = %err, "order history not saved"),
        }
    }

    fn list(&self) -> Vec<Order> {
        self.orders.read().clone()
    }
}
