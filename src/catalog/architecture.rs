//! Load-time resolution and validation of the architecture catalog.
//!
//! The descriptor modules ([`tech`](super::tech), [`service_type`](super::service_type),
//! [`services`](super::services), [`links`](super::links)) hold raw definitions that
//! refer to each other by short keys. An [`Architecture`] is what those definitions
//! become once loaded for one cloud variant:
//!
//! - icons of every technology category and service kind are joined onto the
//!   asset directory exactly once, through [`prefix_icons`];
//! - every `type`, `tech` and `basic` key of a service is resolved into a typed id
//!   of the matching table;
//! - every link endpoint is resolved into a [`ServiceId`] of the same cloud's
//!   services table.
//!
//! Any key that does not resolve fails the load with an error naming the table,
//! the entry and the missing key. Once loaded, an architecture is immutable.
//!
//! # Built-in catalogs
//!
//! [`oci()`] and [`aws()`] return the two built-in variants, loaded lazily on first
//! access against the default icon directory. Both share the single
//! [`service_types()`] table, so a service kind used by both clouds is the same
//! entry in each.
//!
//! # Views
//!
//! [`View::Full`] draws every node grouped by its `tech` category with the full
//! link list. [`View::Basic`] is only available where a basic link list exists
//! (OCI): it groups nodes by their `basic` category and draws the reduced links.

use super::icons::{prefix_icons, IconDir};
use super::links::{LinkDef, ServiceLink, AWS_SERVICE_LINKS, BASIC_SERVICE_LINKS, SERVICE_LINKS};
use super::service_type::{ServiceKind, SERVICE_TYPE};
use super::services::{ServiceDef, ServiceId, ServiceNode, AWS_SERVICES, SERVICES};
use super::table::Table;
use super::tech::{TechCategory, TechDef, TechId, AWS_TECH_TYPE, TECH_TYPE};
use crate::{log_debug, log_info, trace_trace};
use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Cloud variant of the reference architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    #[default]
    Oci,
    Aws,
}

impl Cloud {
    pub fn definition(self) -> &'static ArchitectureDef {
        match self {
            Cloud::Oci => &OCI_ARCHITECTURE,
            Cloud::Aws => &AWS_ARCHITECTURE,
        }
    }

    /// The lazily loaded built-in catalog for this cloud.
    pub fn builtin(self) -> &'static Architecture {
        match self {
            Cloud::Oci => oci(),
            Cloud::Aws => aws(),
        }
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cloud::Oci => write!(f, "OCI"),
            Cloud::Aws => write!(f, "AWS"),
        }
    }
}

/// Level of detail a diagram is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Full,
    Basic,
}

/// Raw definition of one cloud variant: the tables an [`Architecture`] loads from.
#[derive(Debug, Clone, Copy)]
pub struct ArchitectureDef {
    pub cloud: Cloud,
    pub tech_table: &'static str,
    pub tech: &'static [TechDef],
    pub services_table: &'static str,
    pub services: &'static [ServiceDef],
    pub links_table: &'static str,
    pub links: &'static [LinkDef],
    pub basic_links: Option<&'static [LinkDef]>,
}

const BASIC_LINKS_TABLE: &str = "BasicServiceLinks";

pub static OCI_ARCHITECTURE: ArchitectureDef = ArchitectureDef {
    cloud: Cloud::Oci,
    tech_table: "TechType",
    tech: TECH_TYPE,
    services_table: "Services",
    services: SERVICES,
    links_table: "ServiceLinks",
    links: SERVICE_LINKS,
    basic_links: Some(BASIC_SERVICE_LINKS),
};

pub static AWS_ARCHITECTURE: ArchitectureDef = ArchitectureDef {
    cloud: Cloud::Aws,
    tech_table: "AwsTechType",
    tech: AWS_TECH_TYPE,
    services_table: "AwsServices",
    services: AWS_SERVICES,
    links_table: "AwsServiceLinks",
    links: AWS_SERVICE_LINKS,
    basic_links: None,
};

/// Load the shared service kind table against `icon_dir`.
pub fn load_service_types(icon_dir: &IconDir) -> Result<Table<ServiceKind>> {
    let table = Table::from_entries("ServiceType", prefix_icons(SERVICE_TYPE, icon_dir))?;
    log_debug!("Loaded {} service types", table.len());
    Ok(table)
}

static SERVICE_TYPES: Lazy<Arc<Table<ServiceKind>>> = Lazy::new(|| {
    let table = load_service_types(&IconDir::default())
        .unwrap_or_else(|err| panic!("built-in ServiceType table is invalid: {err:#}"));
    Arc::new(table)
});

static OCI_CATALOG: Lazy<Architecture> = Lazy::new(|| init_builtin(Cloud::Oci));
static AWS_CATALOG: Lazy<Architecture> = Lazy::new(|| init_builtin(Cloud::Aws));

// Constant data only; the catalog tests load both variants so a bad key never ships.
fn init_builtin(cloud: Cloud) -> Architecture {
    Architecture::load(
        cloud.definition(),
        Arc::clone(&SERVICE_TYPES),
        &IconDir::default(),
    )
    .unwrap_or_else(|err| panic!("built-in {cloud} architecture is invalid: {err:#}"))
}

/// The shared `ServiceType` table with default icon paths.
pub fn service_types() -> &'static Table<ServiceKind> {
    &SERVICE_TYPES
}

/// `TechType` + `Services` + `ServiceLinks` + `BasicServiceLinks`.
pub fn oci() -> &'static Architecture {
    &OCI_CATALOG
}

/// `AwsTechType` + `AwsServices` + `AwsServiceLinks`.
pub fn aws() -> &'static Architecture {
    &AWS_CATALOG
}

/// One cloud variant of the reference architecture with every reference resolved.
#[derive(Debug, Clone)]
pub struct Architecture {
    cloud: Cloud,
    icon_dir: IconDir,
    service_types: Arc<Table<ServiceKind>>,
    tech: Table<TechCategory>,
    services: Table<ServiceNode>,
    links: Vec<ServiceLink>,
    basic_links: Option<Vec<ServiceLink>>,
}

impl Architecture {
    /// Resolve a raw definition into an architecture.
    ///
    /// `service_types` must have been loaded against the same `icon_dir`; service
    /// kind references resolve into it by key.
    ///
    /// # Errors
    ///
    /// Fails when a table repeats a key, when a service names an unknown service
    /// kind or technology category, or when a link names an unknown service.
    pub fn load(
        definition: &ArchitectureDef,
        service_types: Arc<Table<ServiceKind>>,
        icon_dir: &IconDir,
    ) -> Result<Self> {
        let tech = Table::from_entries(
            definition.tech_table,
            prefix_icons(definition.tech, icon_dir),
        )?;
        log_debug!(
            "Loaded {} {} categories for {}",
            tech.len(),
            definition.tech_table,
            definition.cloud
        );

        let nodes = definition
            .services
            .iter()
            .map(|service| resolve_service(definition, service, &tech, &service_types))
            .collect::<Result<Vec<_>>>()?;
        let services = Table::from_entries(definition.services_table, nodes)?;

        let links = resolve_links(definition.links_table, definition.links, &services)?;
        let basic_links = definition
            .basic_links
            .map(|basic| resolve_links(BASIC_LINKS_TABLE, basic, &services))
            .transpose()?;

        log_info!(
            "Loaded {} architecture: {} tech categories, {} services, {} links, {} basic links",
            definition.cloud,
            tech.len(),
            services.len(),
            links.len(),
            basic_links.as_ref().map_or(0, Vec::len)
        );

        Ok(Self {
            cloud: definition.cloud,
            icon_dir: icon_dir.clone(),
            service_types,
            tech,
            services,
            links,
            basic_links,
        })
    }

    /// Load a built-in cloud variant against a custom icon directory.
    pub fn load_builtin(cloud: Cloud, icon_dir: &IconDir) -> Result<Self> {
        let service_types = if *icon_dir == IconDir::default() {
            Arc::clone(&SERVICE_TYPES)
        } else {
            Arc::new(load_service_types(icon_dir)?)
        };
        Self::load(cloud.definition(), service_types, icon_dir)
            .with_context(|| format!("failed to load built-in {cloud} architecture"))
    }

    pub fn cloud(&self) -> Cloud {
        self.cloud
    }

    pub fn icon_dir(&self) -> &IconDir {
        &self.icon_dir
    }

    pub fn tech_types(&self) -> &Table<TechCategory> {
        &self.tech
    }

    pub fn service_types(&self) -> &Table<ServiceKind> {
        &self.service_types
    }

    pub fn services(&self) -> &Table<ServiceNode> {
        &self.services
    }

    pub fn tech(&self, key: &str) -> Option<&TechCategory> {
        self.tech.get(key)
    }

    pub fn service_type(&self, key: &str) -> Option<&ServiceKind> {
        self.service_types.get(key)
    }

    pub fn service(&self, key: &str) -> Option<&ServiceNode> {
        self.services.get(key)
    }

    pub fn service_id(&self, key: &str) -> Option<ServiceId> {
        self.services.id(key)
    }

    /// The node behind `id`.
    ///
    /// # Errors
    ///
    /// Fails when `id` was not issued by this architecture's services table.
    pub fn node(&self, id: ServiceId) -> Result<&ServiceNode> {
        self.services.by_id(id).ok_or_else(|| {
            anyhow!(
                "{:?} is not a service of the {} architecture",
                id,
                self.cloud
            )
        })
    }

    pub fn kind_of(&self, node: &ServiceNode) -> &ServiceKind {
        &self.service_types[node.service_type]
    }

    pub fn tech_of(&self, node: &ServiceNode) -> &TechCategory {
        &self.tech[node.tech]
    }

    pub fn basic_of(&self, node: &ServiceNode) -> Option<&TechCategory> {
        node.basic.map(|id| &self.tech[id])
    }

    pub fn has_basic_view(&self) -> bool {
        self.basic_links.is_some()
    }

    /// Links drawn in `view`.
    ///
    /// # Errors
    ///
    /// Fails for [`View::Basic`] when this cloud has no basic link list.
    pub fn links(&self, view: View) -> Result<&[ServiceLink]> {
        match view {
            View::Full => Ok(&self.links),
            View::Basic => self
                .basic_links
                .as_deref()
                .ok_or_else(|| anyhow!("{} architecture has no basic view", self.cloud)),
        }
    }

    /// Category a node is grouped under in `view`; `None` hides the node.
    pub fn grouping_id(&self, node: &ServiceNode, view: View) -> Option<TechId> {
        match view {
            View::Full => Some(node.tech),
            View::Basic => node.basic,
        }
    }

    pub fn grouping(&self, node: &ServiceNode, view: View) -> Option<&TechCategory> {
        self.grouping_id(node, view).map(|id| &self.tech[id])
    }

    pub fn outgoing(
        &self,
        view: View,
        id: ServiceId,
    ) -> Result<impl Iterator<Item = &ServiceLink> + '_> {
        self.node(id)?;
        Ok(self.links(view)?.iter().filter(move |link| link.source == id))
    }

    pub fn incoming(
        &self,
        view: View,
        id: ServiceId,
    ) -> Result<impl Iterator<Item = &ServiceLink> + '_> {
        self.node(id)?;
        Ok(self.links(view)?.iter().filter(move |link| link.target == id))
    }

    /// Every service reachable from `start` along the links of `view`, in
    /// breadth-first order. `start` itself is never included.
    pub fn downstream(&self, view: View, start: ServiceId) -> Result<Vec<ServiceId>> {
        let origin = self.node(start)?;
        let links = self.links(view)?;
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut reached = Vec::new();

        while let Some(current) = queue.pop_front() {
            for link in links.iter().filter(|link| link.source == current) {
                if visited.insert(link.target) {
                    reached.push(link.target);
                    queue.push_back(link.target);
                }
            }
        }

        trace_trace!(
            "{} services downstream of {} in {:?} view",
            reached.len(),
            origin.key,
            view
        );
        Ok(reached)
    }

    /// Re-check every invariant of a loaded architecture.
    ///
    /// Returns one message per problem; an empty list means the architecture is
    /// consistent. Checks referential integrity of services and links, that basic
    /// links only join nodes carrying a `basic` grouping, and that every icon
    /// carries the icon directory exactly once.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for kind in self.service_types.iter() {
            let icon = kind.icon.as_deref();
            self.check_icon(&mut errors, self.service_types.name(), &kind.key, icon);
        }
        for category in self.tech.iter() {
            let icon = category.icon.as_deref();
            self.check_icon(&mut errors, self.tech.name(), &category.key, icon);
        }

        for node in self.services.iter() {
            if !self.service_types.contains_id(node.service_type) {
                errors.push(format!(
                    "{} entry '{}' has a service type outside {}",
                    self.services.name(),
                    node.key,
                    self.service_types.name()
                ));
            }
            if !self.tech.contains_id(node.tech) {
                errors.push(format!(
                    "{} entry '{}' has a tech category outside {}",
                    self.services.name(),
                    node.key,
                    self.tech.name()
                ));
            }
            if let Some(basic) = node.basic {
                if !self.tech.contains_id(basic) {
                    errors.push(format!(
                        "{} entry '{}' has a basic grouping outside {}",
                        self.services.name(),
                        node.key,
                        self.tech.name()
                    ));
                }
            }
        }

        self.check_links(&mut errors, "full", &self.links, false);
        if let Some(basic_links) = &self.basic_links {
            self.check_links(&mut errors, "basic", basic_links, true);
        }

        errors
    }

    fn check_icon(&self, errors: &mut Vec<String>, table: &str, key: &str, icon: Option<&str>) {
        if let Some(path) = icon {
            if !self.icon_dir.is_prefixed_once(path) {
                errors.push(format!(
                    "{} entry '{}' icon '{}' does not carry '{}' exactly once",
                    table,
                    key,
                    path,
                    self.icon_dir.as_str()
                ));
            }
        }
    }

    fn check_links(
        &self,
        errors: &mut Vec<String>,
        view: &str,
        links: &[ServiceLink],
        require_basic: bool,
    ) {
        for (position, link) in links.iter().enumerate() {
            for endpoint in [link.source, link.target] {
                match self.services.by_id(endpoint) {
                    None => errors.push(format!(
                        "{} link #{} points outside {}",
                        view,
                        position,
                        self.services.name()
                    )),
                    Some(node) if require_basic && node.basic.is_none() => {
                        errors.push(format!(
                            "{} link #{} touches '{}' which has no basic grouping",
                            view, position, node.key
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }
}

fn resolve_service(
    definition: &ArchitectureDef,
    service: &ServiceDef,
    tech: &Table<TechCategory>,
    service_types: &Table<ServiceKind>,
) -> Result<ServiceNode> {
    let lookup_tech = |key: &str| {
        tech.id(key).ok_or_else(|| {
            anyhow!(
                "{} entry '{}' references unknown {} key '{}'",
                definition.services_table,
                service.key,
                tech.name(),
                key
            )
        })
    };

    let service_type = service_types.id(service.service_type).ok_or_else(|| {
        anyhow!(
            "{} entry '{}' references unknown {} key '{}'",
            definition.services_table,
            service.key,
            service_types.name(),
            service.service_type
        )
    })?;
    let tech_id = lookup_tech(service.tech)?;
    let basic = service.basic.map(&lookup_tech).transpose()?;

    trace_trace!(
        "Resolved {} -> type {}, tech {}, basic {:?}",
        service.key,
        service.service_type,
        service.tech,
        service.basic
    );

    Ok(ServiceNode {
        key: service.key.to_string(),
        name: service.name.to_string(),
        service_type,
        tech: tech_id,
        basic,
        desc: service.desc.to_string(),
    })
}

fn resolve_links(
    table: &str,
    links: &[LinkDef],
    services: &Table<ServiceNode>,
) -> Result<Vec<ServiceLink>> {
    links
        .iter()
        .enumerate()
        .map(|(position, link)| {
            let endpoint = |key: &str| {
                services.id(key).ok_or_else(|| {
                    anyhow!(
                        "{} #{} ({} -> {}) references unknown {} key '{}'",
                        table,
                        position,
                        link.source,
                        link.target,
                        services.name(),
                        key
                    )
                })
            };

            Ok(ServiceLink {
                source: endpoint(link.source)?,
                target: endpoint(link.target)?,
                line_style: link.line_style,
                edge_symbol: link.edge_symbol,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOUD: TechDef = TechDef {
        key: "CLOUD",
        name: "Cloud",
        icon: "cloud.png",
        color: None,
    };

    static TINY_TECH: &[TechDef] = &[CLOUD];

    static TINY_SERVICES: &[ServiceDef] = &[
        ServiceDef {
            key: "LB",
            name: "LB",
            service_type: "LB",
            tech: "CLOUD",
            basic: Some("CLOUD"),
            desc: "",
        },
        ServiceDef {
            key: "DB",
            name: "DB",
            service_type: "ATP",
            tech: "CLOUD",
            basic: None,
            desc: "",
        },
    ];

    static TINY_LINKS: &[LinkDef] = &[LinkDef {
        source: "LB",
        target: "DB",
        line_style: None,
        edge_symbol: None,
    }];

    static TYPO_LINKS: &[LinkDef] = &[LinkDef {
        source: "LB",
        target: "DATABASE",
        line_style: None,
        edge_symbol: None,
    }];

    const fn service(
        key: &'static str,
        service_type: &'static str,
        tech: &'static str,
        basic: Option<&'static str>,
    ) -> ServiceDef {
        ServiceDef {
            key,
            name: key,
            service_type,
            tech,
            basic,
            desc: "",
        }
    }

    static UNKNOWN_TYPE: &[ServiceDef] = &[service("LB", "LOADBALANCER", "CLOUD", None)];
    static UNKNOWN_TECH: &[ServiceDef] = &[service("LB", "LB", "CLUOD", None)];
    static UNKNOWN_BASIC: &[ServiceDef] = &[service("LB", "LB", "CLOUD", Some("EDGE"))];
    static DUPLICATE_SERVICES: &[ServiceDef] = &[
        service("LB", "LB", "CLOUD", None),
        service("DB", "ATP", "CLOUD", None),
        service("LB", "AWSLB", "CLOUD", None),
    ];

    fn tiny(links: &'static [LinkDef], basic_links: Option<&'static [LinkDef]>) -> ArchitectureDef {
        ArchitectureDef {
            cloud: Cloud::Oci,
            tech_table: "TinyTech",
            tech: TINY_TECH,
            services_table: "TinyServices",
            services: TINY_SERVICES,
            links_table: "TinyLinks",
            links,
            basic_links,
        }
    }

    fn load_error(services: &'static [ServiceDef]) -> String {
        let definition = ArchitectureDef {
            services,
            links: &[],
            ..tiny(TINY_LINKS, None)
        };
        Architecture::load(&definition, kinds(), &IconDir::default())
            .unwrap_err()
            .to_string()
    }

    fn kinds() -> Arc<Table<ServiceKind>> {
        Arc::new(load_service_types(&IconDir::default()).unwrap())
    }

    #[test]
    fn test_unknown_link_key_fails_load() {
        let err = Architecture::load(&tiny(TYPO_LINKS, None), kinds(), &IconDir::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "TinyLinks #0 (LB -> DATABASE) references unknown TinyServices key 'DATABASE'"
        );
    }

    #[test]
    fn test_unknown_service_type_key_fails_load() {
        assert_eq!(
            load_error(UNKNOWN_TYPE),
            "TinyServices entry 'LB' references unknown ServiceType key 'LOADBALANCER'"
        );
    }

    #[test]
    fn test_unknown_tech_key_fails_load() {
        assert_eq!(
            load_error(UNKNOWN_TECH),
            "TinyServices entry 'LB' references unknown TinyTech key 'CLUOD'"
        );
    }

    #[test]
    fn test_unknown_basic_key_fails_load() {
        assert_eq!(
            load_error(UNKNOWN_BASIC),
            "TinyServices entry 'LB' references unknown TinyTech key 'EDGE'"
        );
    }

    #[test]
    fn test_duplicate_service_key_fails_load() {
        assert_eq!(
            load_error(DUPLICATE_SERVICES),
            "TinyServices defines key 'LB' more than once"
        );
    }

    #[test]
    fn test_duplicate_tech_key_fails_load() {
        static DUPLICATE_TECH: &[TechDef] = &[CLOUD, CLOUD];
        let definition = ArchitectureDef {
            tech: DUPLICATE_TECH,
            ..tiny(TINY_LINKS, None)
        };
        let err = Architecture::load(&definition, kinds(), &IconDir::default()).unwrap_err();
        assert_eq!(err.to_string(), "TinyTech defines key 'CLOUD' more than once");
    }

    #[test]
    fn test_graph_queries_reject_ids_of_another_architecture() {
        let first = Architecture::load(&tiny(TINY_LINKS, None), kinds(), &IconDir::default())
            .unwrap();
        let second = Architecture::load(&tiny(TINY_LINKS, None), kinds(), &IconDir::default())
            .unwrap();
        let foreign = first.service_id("LB").unwrap();

        assert_ne!(second.service_id("LB"), Some(foreign));
        let err = second.downstream(View::Full, foreign).unwrap_err();
        assert!(err.to_string().ends_with("is not a service of the OCI architecture"));
        assert!(second.outgoing(View::Full, foreign).is_err());
        assert!(second.incoming(View::Full, foreign).is_err());
        assert_eq!(first.downstream(View::Full, foreign).unwrap().len(), 1);
    }

    #[test]
    fn test_basic_link_to_node_without_grouping_is_reported() {
        let architecture =
            Architecture::load(&tiny(TINY_LINKS, Some(TINY_LINKS)), kinds(), &IconDir::default())
                .unwrap();
        assert_eq!(
            architecture.validate(),
            vec!["basic link #0 touches 'DB' which has no basic grouping".to_string()]
        );
    }

    #[test]
    fn test_basic_view_missing_is_an_error() {
        let architecture =
            Architecture::load(&tiny(TINY_LINKS, None), kinds(), &IconDir::default()).unwrap();
        let err = architecture.links(View::Basic).unwrap_err();
        assert_eq!(err.to_string(), "OCI architecture has no basic view");
    }

    #[test]
    fn test_custom_icon_dir_flows_into_every_table() {
        let dir = IconDir::new("static/icons/");
        let architecture = Architecture::load_builtin(Cloud::Aws, &dir).unwrap();
        assert_eq!(
            architecture.tech("AWS").unwrap().icon.as_deref(),
            Some("static/icons/aws.png")
        );
        assert_eq!(
            architecture.service_type("RDS").unwrap().icon.as_deref(),
            Some("static/icons/rds.png")
        );
        assert!(architecture.validate().is_empty());
    }

    #[test]
    fn test_downstream_follows_links_breadth_first() {
        let architecture = oci();
        let start = architecture.service_id("SUBSCRIBE").unwrap();
        let reached: Vec<_> = architecture
            .downstream(View::Full, start)
            .unwrap()
            .into_iter()
            .map(|id| architecture.services()[id].key.as_str())
            .collect();
        assert_eq!(reached, vec!["EMAIL"]);
    }
}
