//! Renderer-facing export of an architecture view.
//!
//! A [`Diagram`] is the flattened graph document a diagram renderer consumes:
//! technology categories, nodes pointing at a category by position, and links
//! pointing at nodes by key. Rendering hints on links (`lineStyle`,
//! `edgeSymbol`) are passed through untouched.
//!
//! `categories` is always the whole technology table of the cloud, in table
//! order, whatever the view. It doubles as the renderer's legend, and a
//! category keeps the same position in the full and basic documents even when
//! no node of the view is grouped under it.

use super::architecture::{Architecture, Cloud, View};
use super::links::{EdgeSymbol, LineStyle};
use super::tech::TechCategory;
use crate::log_debug;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub cloud: Cloud,
    pub view: View,
    pub categories: Vec<DiagramCategory>,
    pub nodes: Vec<DiagramNode>,
    pub links: Vec<DiagramLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramCategory {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&TechCategory> for DiagramCategory {
    fn from(category: &TechCategory) -> Self {
        Self {
            key: category.key.clone(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    pub id: String,
    pub name: String,
    pub desc: String,
    /// Position in [`Diagram::categories`].
    pub category: usize,
    /// Display name of the service kind.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLink {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_symbol: Option<EdgeSymbol>,
}

impl Diagram {
    /// Flatten `view` of `architecture` into a diagram document.
    ///
    /// In the basic view only nodes carrying a `basic` grouping are emitted and
    /// they are placed under that grouping instead of their `tech` category.
    pub fn build(architecture: &Architecture, view: View) -> Result<Self> {
        let links = architecture.links(view)?;
        let services = architecture.services();

        let categories = architecture
            .tech_types()
            .iter()
            .map(DiagramCategory::from)
            .collect();

        let nodes = services
            .iter()
            .filter_map(|node| {
                let category = architecture.grouping_id(node, view)?;
                let kind = architecture.kind_of(node);
                Some(DiagramNode {
                    id: node.key.clone(),
                    name: node.name.clone(),
                    desc: node.desc.clone(),
                    category: category.index(),
                    kind: kind.name.clone(),
                    icon: kind.icon.clone(),
                    scale: kind.scale,
                })
            })
            .collect::<Vec<_>>();

        let links = links
            .iter()
            .map(|link| DiagramLink {
                source: services[link.source].key.clone(),
                target: services[link.target].key.clone(),
                line_style: link.line_style,
                edge_symbol: link.edge_symbol,
            })
            .collect::<Vec<_>>();

        log_debug!(
            "Built {} {:?} diagram with {} nodes and {} links",
            architecture.cloud(),
            view,
            nodes.len(),
            links.len()
        );

        Ok(Self {
            cloud: architecture.cloud(),
            view,
            categories,
            nodes,
            links,
        })
    }

    /// Categories at least one node of this view is grouped under.
    pub fn used_categories(&self) -> impl Iterator<Item = &DiagramCategory> + '_ {
        self.categories.iter().enumerate().filter_map(|(position, category)| {
            self.nodes
                .iter()
                .any(|node| node.category == position)
                .then_some(category)
        })
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize diagram to JSON")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize diagram to YAML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{aws, oci};

    #[test]
    fn test_full_view_places_nodes_under_tech() {
        let diagram = Diagram::build(oci(), View::Full).unwrap();
        let ingress = diagram.node("INGRESS").unwrap();
        assert_eq!(diagram.categories[ingress.category].key, "OKE");
        assert_eq!(ingress.kind, "Nginx");
        assert_eq!(diagram.nodes.len(), oci().services().len());
    }

    #[test]
    fn test_basic_view_uses_basic_grouping() {
        let diagram = Diagram::build(oci(), View::Basic).unwrap();
        let ids: Vec<_> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["BUCKET", "ATP", "LB", "STORE", "API", "CATALOG"]);

        let lb = diagram.node("LB").unwrap();
        assert_eq!(diagram.categories[lb.category].key, "OCI");
        let store = diagram.node("STORE").unwrap();
        assert_eq!(diagram.categories[store.category].key, "COMPUTE");
    }

    #[test]
    fn test_basic_view_keeps_full_category_legend() {
        let full = Diagram::build(oci(), View::Full).unwrap();
        let basic = Diagram::build(oci(), View::Basic).unwrap();
        assert_eq!(basic.categories, full.categories);

        let used: Vec<_> = basic.used_categories().map(|c| c.key.as_str()).collect();
        assert_eq!(used, vec!["OCI", "COMPUTE"]);
        let used: Vec<_> = full.used_categories().map(|c| c.key.as_str()).collect();
        assert_eq!(used, vec!["OCI", "NETWORK", "OKE"]);
    }

    #[test]
    fn test_aws_has_no_basic_diagram() {
        assert!(Diagram::build(aws(), View::Basic).is_err());
    }
}
