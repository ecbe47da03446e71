//! Technology categories: the platform tiers the diagram groups and colors nodes by.

use super::icons::{IconDir, IconSource};
use super::table::{Id, Keyed};
use serde::Serialize;

/// Raw technology category as written in the catalog source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechDef {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: Option<&'static str>,
}

/// Technology category after load: icon resolved against the asset directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechCategory {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub type TechId = Id<TechCategory>;

impl Keyed for TechCategory {
    fn key(&self) -> &str {
        &self.key
    }
}

impl IconSource for TechDef {
    type Resolved = TechCategory;

    fn resolve_icon(&self, dir: &IconDir) -> TechCategory {
        TechCategory {
            key: self.key.to_string(),
            name: self.name.to_string(),
            icon: dir.resolve(self.icon),
            color: self.color.map(str::to_string),
        }
    }
}

const fn tech(
    key: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
) -> TechDef {
    TechDef {
        key,
        name,
        icon,
        color: Some(color),
    }
}

const NETWORK_GRAY: &str = "#5F5F5F";
const K8S_TEAL: &str = "#00758f";

/// Oracle Cloud Infrastructure tiers.
pub static TECH_TYPE: &[TechDef] = &[
    tech("OCI", "Oracle Cloud Infrastructure", "oci.png", "#f80000"),
    tech("NETWORK", "Networking", "cdn.svg", NETWORK_GRAY),
    tech("COMPUTE", "Compute", "compute.svg", NETWORK_GRAY),
    tech("OKE", "Oracle Container Engine", "k8s.png", K8S_TEAL),
];

/// Amazon Web Services tiers.
pub static AWS_TECH_TYPE: &[TechDef] = &[
    tech("AWS", "Amazon Web Services", "aws.png", "#ff9900"),
    tech("NETWORK", "Networking", "cdn.svg", NETWORK_GRAY),
    tech("COMPUTE", "Compute", "compute.svg", NETWORK_GRAY),
    tech(
        "EKS",
        "Amazon Elastic Kubernetes Service",
        "k8s.png",
        K8S_TEAL,
    ),
];
