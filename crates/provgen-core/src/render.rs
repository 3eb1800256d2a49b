use crate::error::{ProvgenError, Result};
use crate::params::ParameterSet;
use crate::types::ResourceType;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Whether a rendering rule exists for the resource type.
///
/// Kept in sync with the static registry: everything the registry offers
/// must render for real. The converse does not hold; dynamically resolved
/// types may land in the placeholder fallback.
pub fn supports(resource_type: &ResourceType) -> bool {
    matches!(
        resource_type.as_str(),
        "resource group" | "virtual machine" | "storage account"
    )
}

/// Render Terraform for a resource type from collected parameters.
///
/// Rendering is pure and deterministic: the same inputs produce the same
/// bytes. A type without a rule yields the placeholder marker instead of an
/// error, so the gap surfaces in review rather than aborting the run. A
/// known type with a missing parameter is a hard error; no partially
/// substituted configuration ever escapes.
pub fn render(resource_type: &ResourceType, params: &ParameterSet) -> Result<String> {
    match resource_type.as_str() {
        "resource group" => Ok(resource_group(&ResourceGroupParams::from_set(params)?)),
        "virtual machine" => Ok(virtual_machine(&VirtualMachineParams::from_set(params)?)),
        "storage account" => Ok(storage_account(&StorageAccountParams::from_set(params)?)),
        _ => Ok(placeholder(resource_type)),
    }
}

/// Inert output for a resource type without a rendering rule. Written as a
/// visible marker so nothing downstream mistakes it for real configuration.
pub fn placeholder(resource_type: &ResourceType) -> String {
    format!(
        "# provgen: no rendering rule for resource type \"{resource_type}\"; nothing was generated.\n"
    )
}

fn require<'a>(params: &'a ParameterSet, resource_type: &str, name: &str) -> Result<&'a str> {
    params
        .get_str(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ProvgenError::MissingParameter {
            context: format!("resource type '{resource_type}'"),
            param: name.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Typed parameter records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroupParams {
    pub name: String,
    pub location: String,
}

impl ResourceGroupParams {
    pub fn from_set(params: &ParameterSet) -> Result<Self> {
        const TY: &str = "resource group";
        Ok(Self {
            name: require(params, TY, "name")?.to_string(),
            location: require(params, TY, "location")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachineParams {
    pub name: String,
    pub os_image: String,
    pub size: String,
    pub location: String,
}

impl VirtualMachineParams {
    pub fn from_set(params: &ParameterSet) -> Result<Self> {
        const TY: &str = "virtual machine";
        Ok(Self {
            name: require(params, TY, "name")?.to_string(),
            os_image: require(params, TY, "os_image")?.to_string(),
            size: require(params, TY, "size")?.to_string(),
            location: require(params, TY, "location")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccountParams {
    pub name: String,
    pub resource_group_name: String,
    pub location: String,
    pub account_tier: String,
    pub account_replication_type: String,
}

impl StorageAccountParams {
    pub fn from_set(params: &ParameterSet) -> Result<Self> {
        const TY: &str = "storage account";
        Ok(Self {
            name: require(params, TY, "name")?.to_string(),
            resource_group_name: require(params, TY, "resource_group_name")?.to_string(),
            location: require(params, TY, "location")?.to_string(),
            account_tier: require(params, TY, "account_tier")?.to_string(),
            account_replication_type: require(params, TY, "account_replication_type")?.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering rules
// ---------------------------------------------------------------------------

/// A single resource group carrying the collected name and location.
pub fn resource_group(p: &ResourceGroupParams) -> String {
    format!(
        r#"resource "azurerm_resource_group" "main" {{
  name     = "{name}"
  location = "{location}"
}}
"#,
        name = p.name,
        location = p.location,
    )
}

/// A Linux virtual machine with its supporting network.
///
/// Auxiliary resources are named after the primary (`<name>-vnet`,
/// `<name>-subnet`, `<name>-nic`) and wire themselves together through
/// Terraform references; the resource group name and location appear
/// literally exactly once each.
pub fn virtual_machine(p: &VirtualMachineParams) -> String {
    format!(
        r#"resource "azurerm_resource_group" "vm_rg" {{
  name     = "{name}-rg"
  location = "{location}"
}}

resource "azurerm_virtual_network" "vm_vnet" {{
  name                = "{name}-vnet"
  address_space       = ["10.0.0.0/16"]
  location            = azurerm_resource_group.vm_rg.location
  resource_group_name = azurerm_resource_group.vm_rg.name
}}

resource "azurerm_subnet" "vm_subnet" {{
  name                 = "{name}-subnet"
  resource_group_name  = azurerm_resource_group.vm_rg.name
  virtual_network_name = azurerm_virtual_network.vm_vnet.name
  address_prefixes     = ["10.0.1.0/24"]
}}

resource "azurerm_network_interface" "vm_nic" {{
  name                = "{name}-nic"
  location            = azurerm_resource_group.vm_rg.location
  resource_group_name = azurerm_resource_group.vm_rg.name

  ip_configuration {{
    name                          = "internal"
    subnet_id                     = azurerm_subnet.vm_subnet.id
    private_ip_address_allocation = "Dynamic"
  }}
}}

resource "azurerm_linux_virtual_machine" "main" {{
  name                  = "{name}"
  resource_group_name   = azurerm_resource_group.vm_rg.name
  location              = azurerm_resource_group.vm_rg.location
  size                  = "{size}"
  admin_username        = "azureuser"
  network_interface_ids = [azurerm_network_interface.vm_nic.id]

  os_disk {{
    caching              = "ReadWrite"
    storage_account_type = "Standard_LRS"
  }}

  source_image_reference {{
    publisher = "Canonical"
    offer     = "UbuntuServer"
    sku       = "{os_image}"
    version   = "latest"
  }}

  admin_ssh_key {{
    username   = "azureuser"
    public_key = file("~/.ssh/id_rsa.pub")
  }}
}}
"#,
        name = p.name,
        location = p.location,
        size = p.size,
        os_image = p.os_image,
    )
}

/// A storage account inside a resource group named by the caller. The
/// account references the group through Terraform attributes, so the group
/// name appears literally only in its own declaration.
pub fn storage_account(p: &StorageAccountParams) -> String {
    format!(
        r#"resource "azurerm_resource_group" "storage_rg" {{
  name     = "{resource_group_name}"
  location = "{location}"
}}

resource "azurerm_storage_account" "main" {{
  name                     = "{name}"
  resource_group_name      = azurerm_resource_group.storage_rg.name
  location                 = azurerm_resource_group.storage_rg.location
  account_tier             = "{account_tier}"
  account_replication_type = "{account_replication_type}"
}}
"#,
        resource_group_name = p.resource_group_name,
        location = p.location,
        name = p.name,
        account_tier = p.account_tier,
        account_replication_type = p.account_replication_type,
    )
}
