//! Concrete architecture nodes for both cloud variants.
//!
//! Definitions refer to service kinds and technology categories by key. Keys
//! are resolved into typed ids when an [`Architecture`](super::Architecture)
//! loads, so a misspelled key fails the load instead of producing a dangling
//! node.

use super::service_type::ServiceTypeId;
use super::table::{Id, Keyed};
use super::tech::TechId;

/// Raw service node as written in the catalog source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceDef {
    pub key: &'static str,
    pub name: &'static str,
    pub service_type: &'static str,
    pub tech: &'static str,
    /// Alternate grouping used only by the basic view.
    pub basic: Option<&'static str>,
    pub desc: &'static str,
}

/// Service node with every reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceNode {
    pub key: String,
    pub name: String,
    pub service_type: ServiceTypeId,
    pub tech: TechId,
    pub basic: Option<TechId>,
    pub desc: String,
}

pub type ServiceId = Id<ServiceNode>;

impl Keyed for ServiceNode {
    fn key(&self) -> &str {
        &self.key
    }
}

const fn node(
    key: &'static str,
    name: &'static str,
    service_type: &'static str,
    tech: &'static str,
    desc: &'static str,
) -> ServiceDef {
    ServiceDef {
        key,
        name,
        service_type,
        tech,
        basic: None,
        desc,
    }
}

impl ServiceDef {
    const fn basic(self, grouping: &'static str) -> Self {
        Self {
            basic: Some(grouping),
            ..self
        }
    }
}

/// OCI deployment.
pub static SERVICES: &[ServiceDef] = &[
    // OCI services
    node(
        "BUCKET",
        "Bucket",
        "BUCKET",
        "OCI",
        "Internet scale storage for product media assets",
    )
    .basic("OCI"),
    node(
        "ATP",
        "ATP Database",
        "ATP",
        "OCI",
        "Data persistence, separated by service",
    )
    .basic("OCI"),
    node("STREAMING", "Stream", "STREAMING", "OCI", "Application level event records"),
    node("APIGW", "API Gateway", "APIGW", "OCI", "Application API gateway"),
    node("SUBSCRIBE", "Subscribe", "FN", "OCI", "Newsletter subscription serverless function"),
    node("EMAIL", "Email", "EMAIL", "OCI", "Managed email delivery SMTP configuration"),
    // edge
    node("DNS", "DNS", "DNS", "NETWORK", "Managed DNS Zone"),
    node("WAF", "WAF", "WAF", "NETWORK", "OWASP, DDoS, and access control management"),
    node("LB", "LB", "LB", "NETWORK", "Public application load balancer").basic("OCI"),
    // OKE services
    node("INGRESS", "Ingress", "NGINX", "OKE", "Kubernetes nginx ingress controller"),
    node(
        "EDGE_ROUTER",
        "Router",
        "TRAEFIK",
        "OKE",
        "Application level routing for exposed services",
    ),
    node(
        "STORE",
        "Storefront",
        "HTML5",
        "OKE",
        "Responsive HTML/CSS/JavaScript client",
    )
    .basic("COMPUTE"),
    node(
        "API",
        "REST API",
        "MICRONAUT",
        "OKE",
        "Session management and service gateway",
    )
    .basic("COMPUTE"),
    node("ASSETS", "Media", "NODE", "OKE", "Product media source, integrating with Object Storage"),
    node(
        "EVENTS",
        "Tracking",
        "MICRONAUT",
        "OKE",
        "Streaming message producer for application level events",
    ),
    node("SESSION", "Session DB", "REDIS", "OKE", "Client session management"),
    node("CATALOG", "Catalog", "MICRONAUT", "OKE", "Product catalog services").basic("COMPUTE"),
    node("CART", "Carts", "MICRONAUT", "OKE", "Shopping cart services"),
    node("ORDERS", "Orders", "MICRONAUT", "OKE", "Order management services"),
    node("FULFILLMENT", "Fulfillment", "MICRONAUT", "OKE", "Order fulfillment/processing service"),
    node("PAYMENT", "Payment", "MICRONAUT", "OKE", "Checkout payment verification"),
    node("USER", "Users", "MICRONAUT", "OKE", "Customer profile services"),
    node("NATS", "NATS", "NATS", "OKE", "Cloud native messaging service"),
];

/// AWS deployment. Object storage, API gateway, email, WAF and the media
/// service have no AWS counterpart yet.
pub static AWS_SERVICES: &[ServiceDef] = &[
    // AWS services
    node("RDS", "AWS RDS", "RDS", "AWS", "Data persistence, separated by service"),
    node("DOCDB", "AWS DocumentDb", "DOCDB", "AWS", "Persistence of carts"),
    node("MKS", "AWS MSK", "MKS", "AWS", "Application level event records"),
    node("SUBSCRIBE", "Subscribe", "AWSLAMBDA", "AWS", "Newsletter subscription lambda function"),
    // edge
    node("DNS", "DNS", "DNS", "NETWORK", "Managed DNS Zone"),
    node("LB", "LB", "AWSLB", "NETWORK", "Public application load balancer"),
    // EKS services
    node("INGRESS", "Ingress", "NGINX", "EKS", "Kubernetes nginx ingress controller"),
    node(
        "EDGE_ROUTER",
        "Router",
        "TRAEFIK",
        "EKS",
        "Application level routing for exposed services",
    ),
    node("STORE", "Storefront", "HTML5", "EKS", "Responsive HTML/CSS/JavaScript client"),
    node("API", "REST API", "MICRONAUT", "EKS", "Session management and service gateway"),
    node(
        "EVENTS",
        "Tracking",
        "MICRONAUT",
        "EKS",
        "Streaming message producer for application level events",
    ),
    node("SESSION", "Session DB", "REDIS", "EKS", "Client session management"),
    node("CATALOG", "Catalog", "MICRONAUT", "EKS", "Product catalog services"),
    node("CART", "Carts", "MICRONAUT", "EKS", "Shopping cart services"),
    node("ORDERS", "Orders", "MICRONAUT", "EKS", "Order management services"),
    node("FULFILLMENT", "Fulfillment", "MICRONAUT", "EKS", "Order fulfillment/processing service"),
    node("PAYMENT", "Payment", "MICRONAUT", "EKS", "Checkout payment verification"),
    node("USER", "Users", "MICRONAUT", "EKS", "Customer profile services"),
    node("NATS", "NATS", "NATS", "EKS", "Cloud native messaging service"),
];
