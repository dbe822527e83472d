// crates/infra/src/project.rs
use std::sync::{Arc, PoisonError, RwLock};

use year_range_filter_ports::layers::{FeatureLayer, LayerRegistry};
use year_range_filter_shared_kernel::{ApplicationError, ApplicationResult, LayerId};

/// Layer collection with a single active selection, held in memory.
#[derive(Default)]
pub struct MemoryProject {
    layers: Vec<Arc<dyn FeatureLayer>>,
    active: RwLock<Option<LayerId>>,
}

impl MemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer; the first layer added becomes active.
    pub fn add_layer(&mut self, layer: Arc<dyn FeatureLayer>) -> LayerId {
        let id = layer.id();
        self.layers.push(layer);
        let active = self.active.get_mut().unwrap_or_else(PoisonError::into_inner);
        if active.is_none() {
            *active = Some(id.clone());
        }
        id
    }

    pub fn set_active(&self, id: &LayerId) -> ApplicationResult<()> {
        if self.layer(id).is_none() {
            return Err(ApplicationError::LayerNotFound { name: id.to_string() });
        }
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(id.clone());
        Ok(())
    }
}

impl LayerRegistry for MemoryProject {
    fn active_layer(&self) -> Option<Arc<dyn FeatureLayer>> {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        active.as_ref().and_then(|id| self.layer(id))
    }

    fn layer(&self, id: &LayerId) -> Option<Arc<dyn FeatureLayer>> {
        self.layers.iter().find(|layer| &layer.id() == id).cloned()
    }

    fn layers(&self) -> Vec<Arc<dyn FeatureLayer>> {
        self.layers.clone()
    }
}
