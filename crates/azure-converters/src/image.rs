//! Image reference resolution – marketplace and compute gallery images.

use log::{debug, warn};

use crate::model::{ComputeGalleryImage, Image, ImagePlan, ImageSource, MarketplaceImage};
use crate::resource_id::GalleryImageId;
use crate::sdk::ImageReference;
use crate::types::{ConvertError, ConvertOptions, ConvertResult, ImageIdPolicy};

/// Convert an SDK image reference into an [`Image`].
///
/// A non-empty `id` is treated as a compute gallery image version; anything
/// else is a marketplace image. `third_party_image` is set by callers when the
/// owning resource carries a purchase plan.
///
/// An unparseable ID is logged and the gallery variant is returned with empty
/// fields, unless the options ask for [`ImageIdPolicy::Strict`].
pub fn sdk_image_to_image(
    opts: &ConvertOptions,
    image_ref: &ImageReference,
    third_party_image: bool,
) -> ConvertResult<Image> {
    let id = image_ref.id.clone().unwrap_or_default();

    let source = if !id.is_empty() {
        debug!("sdk_image_to_image → compute gallery {}", id);
        match GalleryImageId::parse(&id) {
            Ok(g) => ImageSource::ComputeGallery(ComputeGalleryImage {
                subscription_id: Some(g.subscription_id),
                resource_group: Some(g.resource_group),
                gallery: g.gallery,
                name: g.image,
                version: g.version,
            }),
            Err(e) => {
                lenient_or(opts, e)?;
                ImageSource::ComputeGallery(ComputeGalleryImage::default())
            }
        }
    } else {
        ImageSource::Marketplace(MarketplaceImage {
            plan: ImagePlan {
                publisher: image_ref.publisher.clone().unwrap_or_default(),
                offer: image_ref.offer.clone().unwrap_or_default(),
                sku: image_ref.sku.clone().unwrap_or_default(),
            },
            version: image_ref.version.clone().unwrap_or_default(),
            third_party_image,
        })
    };

    Ok(Image { id, source })
}

fn lenient_or(opts: &ConvertOptions, e: ConvertError) -> ConvertResult<()> {
    match opts.image_id_policy {
        ImageIdPolicy::Strict => Err(e),
        ImageIdPolicy::Lenient => {
            warn!("image ID not recognised, continuing with empty gallery fields: {}", e);
            Ok(())
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
