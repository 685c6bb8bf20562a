//! Subnet address ranges.

use crate::sdk::Subnet;

/// Address prefixes of a subnet. ARM fills either the single `addressPrefix`
/// or the `addressPrefixes` list; the single prefix wins when both are set.
pub fn get_subnet_addresses(subnet: &Subnet) -> Vec<String> {
    match &subnet.properties {
        Some(p) => match (&p.address_prefix, &p.address_prefixes) {
            (Some(prefix), _) => vec![prefix.clone()],
            (None, Some(prefixes)) => prefixes.clone(),
            (None, None) => Vec::new(),
        },
        None => Vec::new(),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::SubnetProperties;

    fn subnet(prefix: Option<&str>, prefixes: Option<&[&str]>) -> Subnet {
        Subnet {
            name: "default".into(),
            properties: Some(SubnetProperties {
                address_prefix: prefix.map(Into::into),
                address_prefixes: prefixes.map(|p| p.iter().map(|s| s.to_string()).collect()),
                provisioning_state: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn no_properties() {
        assert!(get_subnet_addresses(&Subnet::default()).is_empty());
    }

    #[test]
    fn neither_field_set() {
        assert!(get_subnet_addresses(&subnet(None, None)).is_empty());
    }

    #[test]
    fn single_prefix() {
        assert_eq!(
            get_subnet_addresses(&subnet(Some("10.0.0.0/24"), None)),
            vec!["10.0.0.0/24"]
        );
    }

    #[test]
    fn multiple_prefixes_in_order() {
        assert_eq!(
            get_subnet_addresses(&subnet(None, Some(&["10.0.0.0/24", "10.0.1.0/24"]))),
            vec!["10.0.0.0/24", "10.0.1.0/24"]
        );
    }

    #[test]
    fn single_prefix_wins() {
        assert_eq!(
            get_subnet_addresses(&subnet(Some("10.1.0.0/16"), Some(&["10.0.0.0/24"]))),
            vec!["10.1.0.0/16"]
        );
    }
}
