use crate::error::{ProvgenError, Result};
use crate::registry::SchemaRegistry;
use crate::schema::{ParamSpec, Schema};
use crate::service::{PlatformSchema, SchemaService};
use crate::types::ResourceType;

// ---------------------------------------------------------------------------
// Platform tags
// ---------------------------------------------------------------------------

/// Map a resource type onto its Azure resource-provider tag.
///
/// Deliberately broader than the static registry: a type listed here but
/// absent from the registry resolves through the service, which is how new
/// types become addressable before they earn a built-in schema.
pub fn platform_tag(resource_type: &ResourceType) -> Option<&'static str> {
    match resource_type.as_str() {
        "resource group" => Some("Microsoft.Resources/resourceGroups"),
        "virtual machine" => Some("Microsoft.Compute/virtualMachines"),
        "storage account" => Some("Microsoft.Storage/storageAccounts"),
        "aks cluster" => Some("Microsoft.ContainerService/managedClusters"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Platform-schema translation
// ---------------------------------------------------------------------------

const NAME_PROMPT: &str = "What would you like to name the resource?";
const LOCATION_PROMPT: &str =
    "What Azure region should it be created in? (e.g., eastus, westus2)";
const RESOURCE_GROUP_PROMPT: &str = "What resource group should it belong to?";

/// Outcome of mapping a platform property list onto parameter specs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub specs: Vec<ParamSpec>,
    /// Property names the mapping did not recognize. The mapping is lossy
    /// on purpose; keeping the dropped names makes the loss visible to
    /// callers instead of silent.
    pub dropped: Vec<String>,
}

/// Map service-described properties onto parameter specs. Only `name`,
/// `location` and `resourceGroup` are recognized; everything else lands in
/// `dropped`. Repeated properties keep their first occurrence.
pub fn translate(platform: &PlatformSchema) -> Translation {
    let mut translation = Translation::default();
    for property in &platform.properties {
        let spec = match property.name.as_str() {
            "name" => ParamSpec::required("name", NAME_PROMPT),
            "location" => ParamSpec::required("location", LOCATION_PROMPT),
            "resourceGroup" => ParamSpec::required("resource_group_name", RESOURCE_GROUP_PROMPT),
            other => {
                translation.dropped.push(other.to_string());
                continue;
            }
        };
        if !translation.specs.iter().any(|s| s.name == spec.name) {
            translation.specs.push(spec);
        }
    }
    translation
}

/// Parameters the service descriptions never expose but collection and
/// rendering depend on. Added after translation, skipping names the
/// service already provided.
fn supplement(resource_type: &ResourceType) -> Vec<ParamSpec> {
    match resource_type.as_str() {
        "virtual machine" => vec![
            ParamSpec::required(
                "os_image",
                "What OS image should it use? (e.g., UbuntuServer, WindowsServer)",
            ),
            ParamSpec::required(
                "size",
                "What size should the VM be? (e.g., Standard_B1s, Standard_DS1_v2)",
            ),
        ],
        "storage account" => vec![
            ParamSpec::required("account_tier", "What account tier? (e.g., Standard, Premium)"),
            ParamSpec::required(
                "account_replication_type",
                "What replication type? (e.g., LRS, GRS, RAGRS, ZRS)",
            ),
        ],
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// SchemaResolver
// ---------------------------------------------------------------------------

/// A schema plus what was lost obtaining it. Static resolutions never drop
/// anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub schema: Schema,
    pub dropped: Vec<String>,
}

/// Resolves resource types to schemas: static registry first, platform
/// description service as fallback.
pub struct SchemaResolver<'a> {
    registry: &'a SchemaRegistry,
    service: Option<SchemaService>,
}

impl<'a> SchemaResolver<'a> {
    /// Resolver with no dynamic fallback. Unknown types fail fast.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry, service: None }
    }

    pub fn with_service(registry: &'a SchemaRegistry, service: SchemaService) -> Self {
        Self { registry, service: Some(service) }
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }

    /// Resolve a schema for a resource type.
    ///
    /// Registry hits are returned verbatim. Otherwise the platform path is
    /// tried; any failure along it (no service configured, no provider tag,
    /// service call failed) collapses to `SchemaNotFound`, which callers
    /// treat as terminal for the generation attempt.
    pub fn resolve(&self, resource_type: &ResourceType) -> Result<ResolvedSchema> {
        if let Some(schema) = self.registry.resolve(resource_type) {
            return Ok(ResolvedSchema { schema: schema.clone(), dropped: Vec::new() });
        }

        let Some(service) = &self.service else {
            return Err(not_found(resource_type));
        };
        let Some(tag) = platform_tag(resource_type) else {
            return Err(not_found(resource_type));
        };
        let Ok(platform) = service.describe(tag) else {
            return Err(not_found(resource_type));
        };

        let Translation { mut specs, dropped } = translate(&platform);
        for extra in supplement(resource_type) {
            if !specs.iter().any(|s| s.name == extra.name) {
                specs.push(extra);
            }
        }

        Ok(ResolvedSchema { schema: Schema::new(specs), dropped })
    }
}

fn not_found(resource_type: &ResourceType) -> ProvgenError {
    ProvgenError::SchemaNotFound(resource_type.to_string())
}
