//! # Azure Converters
//!
//! Translates Azure Resource Manager compute and network payloads into the
//! records used by the cluster-management layer. Nothing here talks to Azure;
//! callers hand in data they have already fetched.
//!
//! ## Features
//!
//! - **Scale sets** – scale set + instances → [`model::Vmss`]
//! - **Instances** – scale-set VM → [`model::VmssVm`]
//! - **Images** – marketplace and compute gallery references → [`model::Image`]
//! - **Resource IDs** – gallery image version ID parsing and validation
//! - **Subnets** – single or multiple address prefixes → `Vec<String>`

pub mod types;
pub mod sdk;
pub mod model;
pub mod resource_id;
pub mod image;
pub mod vmss;
pub mod subnets;

pub use image::sdk_image_to_image;
pub use resource_id::{parse_image_id, GalleryImageId, SharedGalleryImageId};
pub use subnets::get_subnet_addresses;
pub use types::{ConvertError, ConvertErrorKind, ConvertOptions, ConvertResult, ImageIdPolicy};
pub use vmss::{sdk_to_vmss, sdk_to_vmss_vm};
