//! Directed edges between service nodes, with optional rendering hints.

use super::services::ServiceId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Dotted,
}

/// Stroke override for a link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    #[serde(rename = "type")]
    pub kind: LineType,
    pub curveness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Arrow,
}

/// Markers drawn at the source and target ends of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeSymbol(pub [Symbol; 2]);

/// Traffic that bypasses the WAF.
pub const INSECURE: LineStyle = LineStyle {
    kind: LineType::Dotted,
    curveness: 0.2,
};

/// Service both reads from and writes to the target.
pub const READ_WRITE: EdgeSymbol = EdgeSymbol([Symbol::Arrow, Symbol::Arrow]);

/// Raw link between two service keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkDef {
    pub source: &'static str,
    pub target: &'static str,
    pub line_style: Option<LineStyle>,
    pub edge_symbol: Option<EdgeSymbol>,
}

/// Link with both endpoints resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLink {
    pub source: ServiceId,
    pub target: ServiceId,
    pub line_style: Option<LineStyle>,
    pub edge_symbol: Option<EdgeSymbol>,
}

impl ServiceLink {
    pub fn is_insecure(&self) -> bool {
        matches!(
            self.line_style,
            Some(LineStyle {
                kind: LineType::Dotted,
                ..
            })
        )
    }

    pub fn is_read_write(&self) -> bool {
        self.edge_symbol == Some(READ_WRITE)
    }
}

const fn link(source: &'static str, target: &'static str) -> LinkDef {
    LinkDef {
        source,
        target,
        line_style: None,
        edge_symbol: None,
    }
}

impl LinkDef {
    const fn insecure(self) -> Self {
        Self {
            line_style: Some(INSECURE),
            ..self
        }
    }

    const fn read_write(self) -> Self {
        Self {
            edge_symbol: Some(READ_WRITE),
            ..self
        }
    }
}

/// Full OCI view.
pub static SERVICE_LINKS: &[LinkDef] = &[
    // edge
    link("DNS", "WAF"),
    link("DNS", "LB").insecure(),
    link("WAF", "LB"),
    link("LB", "INGRESS"),
    link("INGRESS", "EDGE_ROUTER"),
    link("EDGE_ROUTER", "STORE"),
    link("EDGE_ROUTER", "API"),
    link("EDGE_ROUTER", "ASSETS"),
    // api
    link("API", "SESSION"),
    link("API", "CART"),
    link("API", "CATALOG"),
    link("API", "USER"),
    link("API", "ORDERS"),
    // events
    link("API", "EVENTS"),
    link("EVENTS", "STREAMING"),
    // user
    link("USER", "ATP").read_write(),
    // catalog
    link("CATALOG", "ATP"),
    link("ASSETS", "BUCKET"),
    // cart
    link("CART", "ATP").read_write(),
    // orders
    link("ORDERS", "ATP").read_write(),
    link("ORDERS", "USER"),
    link("ORDERS", "CART"),
    link("ORDERS", "PAYMENT"),
    link("ORDERS", "NATS"),
    // fulfillment
    link("NATS", "FULFILLMENT"),
    link("NATS", "ORDERS"),
    link("FULFILLMENT", "NATS"),
    // gateway
    link("API", "APIGW"),
    link("APIGW", "SUBSCRIBE"),
    link("SUBSCRIBE", "EMAIL"),
];

/// Full AWS view.
pub static AWS_SERVICE_LINKS: &[LinkDef] = &[
    // edge
    link("DNS", "LB").insecure(),
    link("LB", "INGRESS"),
    link("INGRESS", "EDGE_ROUTER"),
    link("EDGE_ROUTER", "STORE"),
    link("EDGE_ROUTER", "API"),
    // ui
    link("STORE", "API"),
    // api
    link("API", "SESSION"),
    link("API", "CART"),
    link("API", "CATALOG"),
    link("API", "USER"),
    link("API", "ORDERS"),
    // events
    link("API", "EVENTS"),
    link("EVENTS", "MKS"),
    // user
    link("USER", "RDS").read_write(),
    // catalog
    link("CATALOG", "RDS"),
    // cart
    link("CART", "DOCDB").read_write(),
    // orders
    link("ORDERS", "RDS").read_write(),
    link("ORDERS", "USER"),
    link("ORDERS", "CART"),
    link("ORDERS", "PAYMENT"),
    link("ORDERS", "NATS"),
    // fulfillment
    link("NATS", "FULFILLMENT"),
    link("NATS", "ORDERS"),
    link("FULFILLMENT", "NATS"),
    // gateway
    link("API", "SUBSCRIBE"),
];

/// Reduced OCI view drawn in basic mode.
pub static BASIC_SERVICE_LINKS: &[LinkDef] = &[
    link("LB", "STORE"),
    link("LB", "API"),
    link("API", "CATALOG"),
    link("CATALOG", "ATP"),
    link("STORE", "BUCKET"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_dns_to_lb_is_insecure() {
        let insecure: Vec<_> = SERVICE_LINKS
            .iter()
            .filter(|l| l.line_style.is_some())
            .map(|l| (l.source, l.target))
            .collect();
        assert_eq!(insecure, vec![("DNS", "LB")]);
    }

    #[test]
    fn test_read_write_links_hit_databases() {
        let targets: Vec<_> = AWS_SERVICE_LINKS
            .iter()
            .filter(|l| l.edge_symbol == Some(READ_WRITE))
            .map(|l| l.target)
            .collect();
        assert_eq!(targets, vec!["RDS", "DOCDB", "RDS"]);
    }

    #[test]
    fn test_line_style_serializes_as_type() {
        let json = serde_json::to_value(INSECURE).unwrap();
        assert_eq!(json, serde_json::json!({"type": "dotted", "curveness": 0.2}));
    }
}
