//! Business logic services

pub mod catalog;

use std::sync::Arc;

use crate::repository::{MirrorStore, PrimaryStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given stores. No mirror means single-store mode.
    pub fn new(primary: Arc<dyn PrimaryStore>, mirror: Option<Arc<dyn MirrorStore>>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(primary, mirror),
        }
    }
}
