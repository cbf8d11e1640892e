//! Canonical feature names and the effective-feature algebra.
//!
//! Features gate application areas per tenant. A tenant row carries the full
//! feature set the tenant has paid for; a membership row may carry a narrower
//! per-user grant, or `NULL` to inherit everything the tenant has.
//!
//! Use these constants instead of string literals so renames stay mechanical.

/// Order management area
pub const ORDERS: &str = "orders";
/// Customer directory area
pub const CUSTOMERS: &str = "customers";
/// Partner/supplier directory area
pub const PARTNERS: &str = "partners";
/// Cost tracking area
pub const COSTS: &str = "costs";
/// Inventory area
pub const INVENTORY: &str = "inventory";
/// Reporting area
pub const REPORTS: &str = "reports";
/// Tenant settings area
pub const SETTINGS: &str = "settings";

/// Every feature the platform knows about.
pub const ALL: &[&str] = &[
    ORDERS, CUSTOMERS, PARTNERS, COSTS, INVENTORY, REPORTS, SETTINGS,
];

/// Compute the feature set a member actually gets.
///
/// `member_features == None` means "inherit all tenant features"; otherwise
/// the result is the intersection, in tenant order. The result is always a
/// subset of `tenant_features` — a member grant naming a feature the tenant
/// does not have yields nothing for that feature.
pub fn effective_features(
    tenant_features: &[String],
    member_features: Option<&[String]>,
) -> Vec<String> {
    match member_features {
        None => tenant_features.to_vec(),
        Some(member) => tenant_features
            .iter()
            .filter(|f| member.contains(f))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_null_member_features_inherit_tenant() {
        let tenant = feats(&[ORDERS, COSTS]);
        assert_eq!(effective_features(&tenant, None), tenant);
    }

    #[test]
    fn test_intersection() {
        let tenant = feats(&[ORDERS, COSTS, INVENTORY]);
        let member = feats(&[COSTS, REPORTS]);
        assert_eq!(effective_features(&tenant, Some(&member)), feats(&[COSTS]));
    }

    #[test]
    fn test_member_feature_outside_tenant_yields_empty() {
        let tenant = feats(&[ORDERS, CUSTOMERS]);
        let member = feats(&[REPORTS]);
        assert!(effective_features(&tenant, Some(&member)).is_empty());
    }

    #[test]
    fn test_result_never_exceeds_tenant() {
        let tenant = feats(&[ORDERS]);
        let member = feats(&[ORDERS, CUSTOMERS, COSTS]);
        let effective = effective_features(&tenant, Some(&member));
        assert!(effective.len() <= tenant.len());
        assert_eq!(effective, feats(&[ORDERS]));
    }

    #[test]
    fn test_empty_member_grant_is_empty() {
        let tenant = feats(&[ORDERS, COSTS]);
        assert!(effective_features(&tenant, Some(&[])).is_empty());
    }
}
