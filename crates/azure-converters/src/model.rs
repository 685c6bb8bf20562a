//! Internal records produced by the converters.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type Tags = HashMap<String, String>;

// ─── Provisioning state ─────────────────────────────────────────────

/// Lifecycle phase of an Azure resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProvisioningState {
    Creating,
    Deleting,
    Failed,
    Migrating,
    Succeeded,
    Updating,
    Canceled,
    Deleted,
    /// Any label ARM returns that is not listed above, kept verbatim.
    Other(String),
}

impl ProvisioningState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Creating => "Creating",
            Self::Deleting => "Deleting",
            Self::Failed => "Failed",
            Self::Migrating => "Migrating",
            Self::Succeeded => "Succeeded",
            Self::Updating => "Updating",
            Self::Canceled => "Canceled",
            Self::Deleted => "Deleted",
            Self::Other(s) => s,
        }
    }

    /// True once ARM will no longer change the resource on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Canceled | Self::Deleted
        )
    }
}

impl From<&str> for ProvisioningState {
    fn from(s: &str) -> Self {
        const KNOWN: [ProvisioningState; 8] = [
            ProvisioningState::Creating,
            ProvisioningState::Deleting,
            ProvisioningState::Failed,
            ProvisioningState::Migrating,
            ProvisioningState::Succeeded,
            ProvisioningState::Updating,
            ProvisioningState::Canceled,
            ProvisioningState::Deleted,
        ];
        KNOWN
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_else(|| Self::Other(s.to_string()))
    }
}

impl From<String> for ProvisioningState {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ProvisioningState> for String {
    fn from(s: ProvisioningState) -> String {
        match s {
            ProvisioningState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Images ─────────────────────────────────────────────────────────

/// An image reference resolved to exactly one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// The SDK image ID verbatim. Empty for marketplace images.
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub source: ImageSource,
}

impl Image {
    pub fn marketplace(&self) -> Option<&MarketplaceImage> {
        match &self.source {
            ImageSource::Marketplace(m) => Some(m),
            _ => None,
        }
    }

    pub fn compute_gallery(&self) -> Option<&ComputeGalleryImage> {
        match &self.source {
            ImageSource::ComputeGallery(g) => Some(g),
            _ => None,
        }
    }

    pub fn shared_gallery(&self) -> Option<&SharedGalleryImage> {
        match &self.source {
            ImageSource::SharedGallery(g) => Some(g),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSource {
    Marketplace(MarketplaceImage),
    ComputeGallery(ComputeGalleryImage),
    SharedGallery(SharedGalleryImage),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImagePlan {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceImage {
    #[serde(flatten)]
    pub plan: ImagePlan,
    pub version: String,
    /// Set when the image carries a purchase plan.
    #[serde(default)]
    pub third_party_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeGalleryImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    pub gallery: String,
    pub name: String,
    pub version: String,
}

/// Image published through a directly shared gallery. Not produced by
/// [`crate::image::sdk_image_to_image`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedGalleryImage {
    pub gallery: String,
    pub name: String,
    pub version: String,
}

// ─── Scale sets ─────────────────────────────────────────────────────

/// A scale set together with its instances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vmss {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<ProvisioningState>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: Tags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<VmssVm>,
    #[serde(default)]
    pub image: Option<Image>,
}

impl Vmss {
    pub fn instance(&self, instance_id: &str) -> Option<&VmssVm> {
        self.instances.iter().find(|i| i.instance_id == instance_id)
    }
}

/// One scale-set instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmssVm {
    pub id: String,
    pub instance_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<ProvisioningState>,
    #[serde(default)]
    pub availability_zone: String,
    #[serde(default)]
    pub latest_model_applied: bool,
    #[serde(default)]
    pub image: Option<Image>,
}

// ─── Tests ──────────────────────────────────────────────────────────
