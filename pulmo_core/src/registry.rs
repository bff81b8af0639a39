//! Registry of loaded disease models.
//!
//! Each model's descriptor and capability set are read once at registration
//! and cached alongside it, so per-segment dispatch never re-queries them.

use crate::models::{ArterialCompromise, VenousCompromise};
use crate::{Capabilities, DiseaseModel, Error, Identity, ParameterSpec, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Cached default registry - built once and reused across all operations
static DEFAULT_REGISTRY: Lazy<ModelRegistry> = Lazy::new(build_default_registry);

/// Get a reference to the cached registry of built-in models
pub fn default_registry() -> &'static ModelRegistry {
    &DEFAULT_REGISTRY
}

/// Builds a registry holding the built-in PAH and PVOD models
///
/// **Note**: prefer `default_registry()` unless you need to register more
/// models on top of the built-ins.
pub fn build_default_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.insert(RegisteredModel::new(Arc::new(ArterialCompromise)).read_only());
    registry.insert(RegisteredModel::new(Arc::new(VenousCompromise)).read_only());
    registry
}

/// A model with its descriptor captured at load time
#[derive(Clone)]
pub struct RegisteredModel {
    model: Arc<dyn DiseaseModel>,
    identity: Identity,
    parameters: Vec<ParameterSpec>,
    capabilities: Capabilities,
    read_only: bool,
}

impl RegisteredModel {
    pub fn new(model: Arc<dyn DiseaseModel>) -> Self {
        let identity = model.name();
        let parameters = model.parameters();
        let capabilities = model.capabilities();
        let read_only = model.is_read_only();

        tracing::debug!(
            "Loaded disease model '{}' with {} parameter(s), capabilities {:?}",
            identity,
            parameters.len(),
            capabilities.kinds().collect::<Vec<_>>()
        );

        Self {
            model,
            identity,
            parameters,
            capabilities,
            read_only,
        }
    }

    /// Mark this model as one the registry refuses to remove
    fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn model(&self) -> &dyn DiseaseModel {
        self.model.as_ref()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn label(&self) -> &str {
        self.identity.label()
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// True for built-ins and models that declare themselves read-only
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Position of a parameter by short name
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.short_name == name)
    }

    fn descriptor(&self) -> ModelDescriptor<'_> {
        ModelDescriptor {
            name: self.label(),
            description: self.identity.description(),
            parameters: &self.parameters,
            capabilities: self.capabilities,
            read_only: self.read_only,
        }
    }
}

impl std::fmt::Debug for RegisteredModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredModel")
            .field("identity", &self.identity)
            .field("parameters", &self.parameters)
            .field("capabilities", &self.capabilities)
            .field("read_only", &self.read_only)
            .finish()
    }
}

/// Serialized view of a model for host display
#[derive(Serialize)]
struct ModelDescriptor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    parameters: &'a [ParameterSpec],
    capabilities: Capabilities,
    read_only: bool,
}

/// Ordered set of registered models
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: Vec<Arc<RegisteredModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, rejecting an empty or duplicate short name
    pub fn register<M: DiseaseModel + 'static>(&mut self, model: M) -> Result<Arc<RegisteredModel>> {
        let registered = RegisteredModel::new(Arc::new(model));

        if registered.label().trim().is_empty() {
            return Err(Error::Registry("Disease model has empty name".into()));
        }
        if self.get(registered.label()).is_some() {
            return Err(Error::Registry(format!(
                "Disease model '{}' is already registered",
                registered.label()
            )));
        }

        tracing::info!("Registered disease model '{}'", registered.label());
        Ok(self.insert(registered))
    }

    fn insert(&mut self, registered: RegisteredModel) -> Arc<RegisteredModel> {
        let registered = Arc::new(registered);
        self.models.push(Arc::clone(&registered));
        registered
    }

    /// Unregister a model by short name, ignoring case
    ///
    /// Read-only models stay put. Diseases already bound to the removed model
    /// keep working since they hold their own reference.
    pub fn remove(&mut self, name: &str) -> Result<Arc<RegisteredModel>> {
        let index = self
            .models
            .iter()
            .position(|m| m.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownModel(name.to_string()))?;

        if self.models[index].is_read_only() {
            return Err(Error::Registry(format!(
                "Disease model '{}' is read-only and cannot be removed",
                self.models[index].label()
            )));
        }

        let removed = self.models.remove(index);
        tracing::info!("Removed disease model '{}'", removed.label());
        Ok(removed)
    }

    /// Look up a model by short name, ignoring case
    pub fn get(&self, name: &str) -> Option<Arc<RegisteredModel>> {
        self.models
            .iter()
            .find(|m| m.label().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Look up a model by short name, failing if absent
    pub fn require(&self, name: &str) -> Result<Arc<RegisteredModel>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.label()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RegisteredModel>> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Parameter schema of every model as pretty-printed JSON
    pub fn schema_json(&self) -> Result<String> {
        let descriptors: Vec<_> = self.models.iter().map(|m| m.descriptor()).collect();
        Ok(serde_json::to_string_pretty(&descriptors)?)
    }

    /// Validate registered descriptors
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_models = HashSet::new();

        for model in &self.models {
            let name = model.label();
            if name.trim().is_empty() {
                errors.push("Disease model has empty name".to_string());
            }
            if !seen_models.insert(name.to_ascii_lowercase()) {
                errors.push(format!("Duplicate disease model name '{}'", name));
            }

            let mut seen_params = HashSet::new();
            for param in model.parameters() {
                if param.short_name.trim().is_empty() {
                    errors.push(format!("Model '{}' has a parameter with empty name", name));
                }
                if !seen_params.insert(param.short_name.as_str()) {
                    errors.push(format!(
                        "Model '{}': duplicate parameter '{}'",
                        name, param.short_name
                    ));
                }

                let Some(text) = param.range.as_deref() else {
                    continue;
                };
                match crate::Range::parse(text) {
                    Ok(range) => {
                        if let Some(default) = param.default_value {
                            if !range.includes(default) {
                                errors.push(format!(
                                    "Model '{}': default {} of '{}' outside range {}",
                                    name, default, param.short_name, text
                                ));
                            }
                        }
                    }
                    Err(e) => {
                        errors.push(format!(
                            "Model '{}': parameter '{}': {}",
                            name, param.short_name, e
                        ));
                    }
                }
            }
        }

        errors
    }
}
