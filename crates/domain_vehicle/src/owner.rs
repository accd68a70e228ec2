//! Car owners

use serde::{Deserialize, Serialize};

use core_kernel::OwnerId;

/// A person owning one or more cars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub email: Option<String>,
}

impl Owner {
    pub fn new(id: OwnerId, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
        }
    }
}
