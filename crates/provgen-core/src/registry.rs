use crate::schema::{ParamSpec, Schema};
use crate::types::ResourceType;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// The static table of resource types provgen can collect parameters for
/// and render without asking any external service.
///
/// Built once at startup and passed by reference into the resolver. There
/// is no process-wide instance; tests build their own.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<ResourceType, Schema>,
}

impl SchemaRegistry {
    /// Registry with the built-in Azure resource types.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.insert(ResourceType::new("resource group"), resource_group());
        registry.insert(ResourceType::new("virtual machine"), virtual_machine());
        registry.insert(ResourceType::new("storage account"), storage_account());
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource_type: ResourceType, schema: Schema) {
        self.schemas.insert(resource_type, schema);
    }

    pub fn resolve(&self, resource_type: &ResourceType) -> Option<&Schema> {
        self.schemas.get(resource_type)
    }

    pub fn contains(&self, resource_type: &ResourceType) -> bool {
        self.schemas.contains_key(resource_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate entries in stable (alphabetical) order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceType, &Schema)> {
        self.schemas.iter()
    }
}

// ---------------------------------------------------------------------------
// Built-in schemas
// ---------------------------------------------------------------------------

fn resource_group() -> Schema {
    Schema::new(vec![
        ParamSpec::required("name", "What would you like to name the resource group?"),
        ParamSpec::required(
            "location",
            "What Azure region should it be created in? (e.g., eastus, westus2)",
        ),
    ])
}

fn virtual_machine() -> Schema {
    Schema::new(vec![
        ParamSpec::required("name", "What would you like to name the virtual machine?"),
        ParamSpec::required(
            "os_image",
            "What OS image should it use? (e.g., UbuntuServer, WindowsServer)",
        ),
        ParamSpec::required(
            "size",
            "What size should the VM be? (e.g., Standard_B1s, Standard_DS1_v2)",
        ),
        ParamSpec::required(
            "location",
            "What Azure region should it be created in? (e.g., eastus, westus2)",
        ),
    ])
}

fn storage_account() -> Schema {
    Schema::new(vec![
        ParamSpec::required(
            "name",
            "What would you like to name the storage account? (must be globally unique)",
        ),
        ParamSpec::required(
            "resource_group_name",
            "What resource group should the storage account live in?",
        ),
        ParamSpec::required(
            "location",
            "What Azure region should it be created in? (e.g., eastus, westus2)",
        ),
        ParamSpec::required("account_tier", "What account tier? (e.g., Standard, Premium)"),
        ParamSpec::required(
            "account_replication_type",
            "What replication type? (e.g., LRS, GRS, RAGRS, ZRS)",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_the_three_azure_types() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(registry.len(), 3);
        for ty in ["resource group", "virtual machine", "storage account"] {
            assert!(registry.contains(&ResourceType::new(ty)), "missing {ty}");
        }
    }

    #[test]
    fn every_builtin_spec_is_required_with_a_prompt() {
        let registry = SchemaRegistry::builtin();
        for (ty, schema) in registry.iter() {
            assert!(!schema.is_empty(), "{ty} has no parameters");
            for spec in schema.params() {
                assert!(spec.required, "{ty}.{} is not required", spec.name);
                assert!(!spec.prompt.trim().is_empty(), "{ty}.{} has no prompt", spec.name);
            }
        }
    }

    #[test]
    fn resolution_is_normalization_aware() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.resolve(&ResourceType::new("  Resource  GROUP ")).is_some());
        assert!(registry.resolve(&ResourceType::new("quantum cluster")).is_none());
    }

    #[test]
    fn storage_account_names_its_resource_group() {
        let registry = SchemaRegistry::builtin();
        let schema = registry
            .resolve(&ResourceType::new("storage account"))
            .unwrap();
        assert!(schema.contains("resource_group_name"));
    }

    #[test]
    fn iteration_order_is_stable() {
        let registry = SchemaRegistry::builtin();
        let order: Vec<_> = registry.iter().map(|(ty, _)| ty.as_str()).collect();
        assert_eq!(order, vec!["resource group", "storage account", "virtual machine"]);
    }
}
