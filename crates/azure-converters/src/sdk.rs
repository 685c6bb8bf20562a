//! Azure Resource Manager payload types consumed by the converters.
//!
//! These mirror the ARM JSON returned by the compute and network providers.
//! Every field is optional on the wire, so every field carries
//! `#[serde(default)]`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ─── Scale sets ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineScaleSet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sku: Option<Sku>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub properties: Option<VmssProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VmssProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub virtual_machine_profile: Option<VmssVmProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VmssVmProfile {
    #[serde(default)]
    pub os_profile: Option<OsProfile>,
    #[serde(default)]
    pub storage_profile: Option<StorageProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Sku {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// Purchase plan. Present only for third-party marketplace images.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub promotion_code: Option<String>,
}

// ─── Scale-set instances ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineScaleSetVm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub properties: Option<VmssVmProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VmssVmProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub latest_model_applied: Option<bool>,
    #[serde(default)]
    pub os_profile: Option<OsProfile>,
    #[serde(default)]
    pub storage_profile: Option<StorageProfile>,
}

// ─── Profiles ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OsProfile {
    #[serde(default)]
    pub computer_name: Option<String>,
    #[serde(default)]
    pub computer_name_prefix: Option<String>,
    #[serde(default)]
    pub admin_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    #[serde(default)]
    pub image_reference: Option<ImageReference>,
    #[serde(default)]
    pub os_disk: Option<OsDisk>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OsDisk {
    #[serde(default)]
    pub os_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub disk_size_gb: Option<u32>,
}

/// Image reference: either a resource ID or marketplace coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub offer: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub exact_version: Option<String>,
    #[serde(default)]
    pub shared_gallery_image_id: Option<String>,
}

// ─── Networking ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Option<SubnetProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubnetProperties {
    #[serde(default)]
    pub address_prefix: Option<String>,
    #[serde(default)]
    pub address_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub provisioning_state: Option<String>,
}

// ─── Tests ──────────────────────────────────────────────────────────
