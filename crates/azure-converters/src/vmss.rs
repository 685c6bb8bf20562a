//! Virtual machine scale set conversion – scale sets and their instances.

use log::debug;

use crate::image::sdk_image_to_image;
use crate::model::{ProvisioningState, Vmss, VmssVm};
use crate::sdk::{VirtualMachineScaleSet, VirtualMachineScaleSetVm};
use crate::types::{ConvertOptions, ConvertResult};

/// Convert an SDK scale set and its instances into a [`Vmss`].
///
/// Absent optional blocks are skipped. The image is resolved only when the
/// whole `virtualMachineProfile.storageProfile.imageReference` chain exists.
pub fn sdk_to_vmss(
    opts: &ConvertOptions,
    sdk_vmss: &VirtualMachineScaleSet,
    sdk_instances: &[VirtualMachineScaleSetVm],
) -> ConvertResult<Vmss> {
    debug!(
        "sdk_to_vmss({}) → {} instance(s)",
        sdk_vmss.name,
        sdk_instances.len()
    );

    let mut vmss = Vmss {
        id: sdk_vmss.id.clone(),
        name: sdk_vmss.name.clone(),
        state: sdk_vmss
            .properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
            .map(ProvisioningState::from),
        ..Default::default()
    };

    if let Some(sku) = &sdk_vmss.sku {
        vmss.sku = sku.name.clone().unwrap_or_default();
        vmss.capacity = sku.capacity.unwrap_or_default();
    }

    if !sdk_vmss.zones.is_empty() {
        vmss.zones = sdk_vmss.zones.clone();
    }

    if !sdk_vmss.tags.is_empty() {
        vmss.tags = sdk_vmss.tags.clone();
    }

    vmss.instances = sdk_instances
        .iter()
        .map(|vm| sdk_to_vmss_vm(opts, vm))
        .collect::<ConvertResult<Vec<_>>>()?;

    if let Some(image_ref) = sdk_vmss
        .properties
        .as_ref()
        .and_then(|p| p.virtual_machine_profile.as_ref())
        .and_then(|vp| vp.storage_profile.as_ref())
        .and_then(|sp| sp.image_reference.as_ref())
    {
        vmss.image = Some(sdk_image_to_image(opts, image_ref, sdk_vmss.plan.is_some())?);
    }

    Ok(vmss)
}

/// Convert a single SDK scale-set instance into a [`VmssVm`].
///
/// An instance without a properties block only carries its identifiers.
/// Otherwise the state defaults to `Creating` until ARM reports one.
pub fn sdk_to_vmss_vm(
    opts: &ConvertOptions,
    sdk_instance: &VirtualMachineScaleSetVm,
) -> ConvertResult<VmssVm> {
    let mut instance = VmssVm {
        id: sdk_instance.id.clone(),
        instance_id: sdk_instance.instance_id.clone(),
        ..Default::default()
    };

    let Some(props) = &sdk_instance.properties else {
        return Ok(instance);
    };

    instance.state = Some(
        props
            .provisioning_state
            .as_deref()
            .map(ProvisioningState::from)
            .unwrap_or(ProvisioningState::Creating),
    );

    if let Some(name) = props.os_profile.as_ref().and_then(|o| o.computer_name.as_ref()) {
        instance.name = name.clone();
    }

    instance.latest_model_applied = props.latest_model_applied.unwrap_or(false);

    if let Some(image_ref) = props
        .storage_profile
        .as_ref()
        .and_then(|sp| sp.image_reference.as_ref())
    {
        instance.image = Some(sdk_image_to_image(
            opts,
            image_ref,
            sdk_instance.plan.is_some(),
        )?);
    }

    // an instance lives in at most one zone
    if let Some(zone) = sdk_instance.zones.first() {
        instance.availability_zone = zone.clone();
    }

    Ok(instance)
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::*;
    use crate::types::ConvertErrorKind;
    use std::collections::HashMap;

    const GALLERY_ID: &str = "/subscriptions/sub1/resourceGroups/img-rg/providers/Microsoft.Compute/galleries/gal/images/node/versions/0.1.0";

    fn make_vm(instance_id: &str, state: Option<&str>, zones: &[&str]) -> VirtualMachineScaleSetVm {
        VirtualMachineScaleSetVm {
            id: format!(
                "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachineScaleSets/pool/virtualMachines/{}",
                instance_id
            ),
            name: format!("pool_{}", instance_id),
            instance_id: instance_id.into(),
            zones: zones.iter().map(|z| z.to_string()).collect(),
            properties: Some(VmssVmProperties {
                provisioning_state: state.map(Into::into),
                latest_model_applied: Some(true),
                os_profile: Some(OsProfile {
                    computer_name: Some(format!("pool00000{}", instance_id)),
                    ..Default::default()
                }),
                storage_profile: Some(StorageProfile {
                    image_reference: Some(ImageReference {
                        id: Some(GALLERY_ID.into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        }
    }

    fn make_vmss() -> VirtualMachineScaleSet {
        VirtualMachineScaleSet {
            id: "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachineScaleSets/pool".into(),
            name: "pool".into(),
            location: "westeurope".into(),
            sku: Some(Sku {
                name: Some("Standard_D2s_v3".into()),
                tier: Some("Standard".into()),
                capacity: Some(2),
            }),
            plan: None,
            zones: vec!["1".into(), "2".into()],
            tags: HashMap::from([("cluster".to_string(), "dev".to_string())]),
            properties: Some(VmssProperties {
                provisioning_state: Some("Succeeded".into()),
                virtual_machine_profile: Some(VmssVmProfile {
                    storage_profile: Some(StorageProfile {
                        image_reference: Some(ImageReference {
                            publisher: Some("cncf-upstream".into()),
                            offer: Some("capi".into()),
                            sku: Some("ubuntu-2204-gen1".into()),
                            version: Some("latest".into()),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
            }),
        }
    }

    #[test]
    fn vmss_converts_all_fields() {
        let instances = vec![
            make_vm("0", Some("Succeeded"), &["1"]),
            make_vm("1", None, &["2"]),
        ];
        let vmss = sdk_to_vmss(&ConvertOptions::new(), &make_vmss(), &instances).unwrap();
        assert_eq!(vmss.name, "pool");
        assert_eq!(vmss.state, Some(ProvisioningState::Succeeded));
        assert_eq!(vmss.sku, "Standard_D2s_v3");
        assert_eq!(vmss.capacity, 2);
        assert_eq!(vmss.zones, vec!["1", "2"]);
        assert_eq!(vmss.tags.get("cluster").map(String::as_str), Some("dev"));
        assert_eq!(vmss.instances.len(), 2);
        assert_eq!(vmss.instances[1].instance_id, "1");

        let m = vmss.image.as_ref().unwrap().marketplace().unwrap();
        assert_eq!(m.plan.offer, "capi");
        assert!(!m.third_party_image);
    }

    #[test]
    fn vmss_plan_marks_third_party_image() {
        let mut sdk = make_vmss();
        sdk.plan = Some(Plan {
            name: Some("ubuntu-2204-gen1".into()),
            ..Default::default()
        });
        let vmss = sdk_to_vmss(&ConvertOptions::new(), &sdk, &[]).unwrap();
        assert!(vmss.image.unwrap().marketplace().unwrap().third_party_image);
    }

    #[test]
    fn vmss_empty_input_yields_empty_record() {
        let sdk = VirtualMachineScaleSet::default();
        let vmss = sdk_to_vmss(&ConvertOptions::new(), &sdk, &[]).unwrap();
        assert_eq!(vmss, Vmss::default());
    }

    #[test]
    fn vmss_missing_storage_profile_skips_image() {
        let mut sdk = make_vmss();
        if let Some(p) = sdk.properties.as_mut() {
            p.virtual_machine_profile = Some(VmssVmProfile::default());
        }
        let vmss = sdk_to_vmss(&ConvertOptions::new(), &sdk, &[]).unwrap();
        assert!(vmss.image.is_none());
        assert_eq!(vmss.state, Some(ProvisioningState::Succeeded));
    }

    #[test]
    fn vmss_sku_without_capacity() {
        let mut sdk = make_vmss();
        sdk.sku = Some(Sku {
            name: Some("Standard_B2s".into()),
            ..Default::default()
        });
        let vmss = sdk_to_vmss(&ConvertOptions::new(), &sdk, &[]).unwrap();
        assert_eq!(vmss.sku, "Standard_B2s");
        assert_eq!(vmss.capacity, 0);
    }

    #[test]
    fn vmss_instance_image_error_follows_policy() {
        let mut bad = make_vm("0", Some("Succeeded"), &[]);
        if let Some(p) = bad.properties.as_mut() {
            p.storage_profile = Some(StorageProfile {
                image_reference: Some(ImageReference {
                    id: Some("not-a-resource-id".into()),
                    ..Default::default()
                }),
                ..Default::default()
            });
        }
        let e = sdk_to_vmss(&ConvertOptions::strict(), &make_vmss(), &[bad.clone()]).unwrap_err();
        assert_eq!(e.kind, ConvertErrorKind::MissingLeadingSlash);

        let vmss = sdk_to_vmss(&ConvertOptions::default(), &make_vmss(), &[bad]).unwrap();
        assert!(vmss.instances[0].image.as_ref().unwrap().compute_gallery().is_some());
    }

    #[test]
    fn vmss_with_managed_image_keeps_instances() {
        let mut sdk = make_vmss();
        if let Some(image_ref) = sdk
            .properties
            .as_mut()
            .and_then(|p| p.virtual_machine_profile.as_mut())
            .and_then(|vp| vp.storage_profile.as_mut())
            .and_then(|sp| sp.image_reference.as_mut())
        {
            image_ref.id = Some(
                "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Compute/images/custom".into(),
            );
        }
        let instances = vec![make_vm("0", Some("Succeeded"), &["1"])];
        let vmss = sdk_to_vmss(&ConvertOptions::default(), &sdk, &instances).unwrap();
        assert_eq!(vmss.instances.len(), 1);
        assert_eq!(vmss.state, Some(ProvisioningState::Succeeded));
        let image = vmss.image.unwrap();
        assert!(image.id.ends_with("/images/custom"));
        assert!(image.compute_gallery().unwrap().gallery.is_empty());
    }

    #[test]
    fn vm_converts_all_fields() {
        let sdk = make_vm("3", Some("Updating"), &["2", "3"]);
        let vm = sdk_to_vmss_vm(&ConvertOptions::new(), &sdk).unwrap();
        assert!(vm.id.ends_with("/virtualMachines/3"));
        assert_eq!(vm.instance_id, "3");
        assert_eq!(vm.name, "pool000003");
        assert_eq!(vm.state, Some(ProvisioningState::Updating));
        assert_eq!(vm.availability_zone, "2");
        assert!(vm.latest_model_applied);
        let g = vm.image.as_ref().unwrap().compute_gallery().unwrap();
        assert_eq!(g.gallery, "gal");
        assert_eq!(g.name, "node");
        assert_eq!(g.version, "0.1.0");
    }

    #[test]
    fn vm_state_defaults_to_creating() {
        let vm = sdk_to_vmss_vm(&ConvertOptions::new(), &make_vm("0", None, &[])).unwrap();
        assert_eq!(vm.state, Some(ProvisioningState::Creating));
        assert!(vm.availability_zone.is_empty());
    }

    #[test]
    fn vm_without_properties_keeps_only_ids() {
        let sdk = VirtualMachineScaleSetVm {
            id: "/x/virtualMachines/9".into(),
            instance_id: "9".into(),
            zones: vec!["1".into()],
            ..Default::default()
        };
        let vm = sdk_to_vmss_vm(&ConvertOptions::new(), &sdk).unwrap();
        assert_eq!(vm.instance_id, "9");
        assert!(vm.state.is_none());
        assert!(vm.image.is_none());
        assert!(vm.availability_zone.is_empty());
    }

    #[test]
    fn vm_plan_marks_third_party_image() {
        let mut sdk = make_vm("0", None, &[]);
        sdk.plan = Some(Plan::default());
        if let Some(p) = sdk.properties.as_mut() {
            p.storage_profile = Some(StorageProfile {
                image_reference: Some(ImageReference {
                    publisher: Some("pub".into()),
                    ..Default::default()
                }),
                ..Default::default()
            });
        }
        let vm = sdk_to_vmss_vm(&ConvertOptions::new(), &sdk).unwrap();
        assert!(vm.image.unwrap().marketplace().unwrap().third_party_image);
    }
}
