//! Service kinds: reusable icon and scale definitions shared by concrete nodes.
//!
//! A single table serves both cloud variants. OCI-only kinds (ATP, Streaming)
//! and AWS-only kinds (RDS, MSK, DocumentDB) sit next to the container
//! technologies both variants run on.

use super::icons::{IconDir, IconSource};
use super::table::{Id, Keyed};
use serde::Serialize;

/// Raw service kind as written in the catalog source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceTypeDef {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub scale: Option<f64>,
}

/// Service kind after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceKind {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

pub type ServiceTypeId = Id<ServiceKind>;

impl Keyed for ServiceKind {
    fn key(&self) -> &str {
        &self.key
    }
}

impl IconSource for ServiceTypeDef {
    type Resolved = ServiceKind;

    fn resolve_icon(&self, dir: &IconDir) -> ServiceKind {
        ServiceKind {
            key: self.key.to_string(),
            name: self.name.to_string(),
            icon: dir.resolve(self.icon),
            scale: self.scale,
        }
    }
}

const fn kind(key: &'static str, name: &'static str, icon: &'static str) -> ServiceTypeDef {
    ServiceTypeDef {
        key,
        name,
        icon,
        scale: None,
    }
}

const fn scaled(
    key: &'static str,
    name: &'static str,
    icon: &'static str,
    scale: f64,
) -> ServiceTypeDef {
    ServiceTypeDef {
        key,
        name,
        icon,
        scale: Some(scale),
    }
}

pub static SERVICE_TYPE: &[ServiceTypeDef] = &[
    // OCI
    scaled("ATP", "Oracle ATP", "atp.png", 1.2),
    kind("BUCKET", "Object Storage", "bucket.svg"),
    kind("STREAMING", "Streaming", "streaming.svg"),
    kind("EMAIL", "Email Delivery", "email.svg"),
    // edge/network
    kind("LB", "Load Balancer", "lb.svg"),
    scaled("AWSLB", "Elastic Load Balancer", "awslb.png", 1.2),
    kind("VCN", "Virtual Cloud Network", "vcn.svg"),
    kind("DNS", "DNS", "dns.svg"),
    kind("WAF", "Web Application Firewall", "waf.svg"),
    // cloud native
    kind("APIGW", "API Gateway", "apigw.svg"),
    kind("FN", "Function", "fn.png"),
    kind("AWSLAMBDA", "AWS Lambda Function", "awslambda.png"),
    kind("NATS", "NATS", "nats.png"),
    // AWS
    scaled("RDS", "AWS RDS (MySQL)", "rds.png", 1.4),
    scaled("MKS", "AWS MSK (Kafka)", "msk.png", 0.9),
    scaled("DOCDB", "AWS DocumentDB (Mongo compatible)", "docdb.png", 1.3),
    // container technologies
    scaled("JAVA", "Java", "java.png", 1.5),
    kind("HELIDON", "Helidon", "helidon.svg"),
    kind("NODE", "Node.js", "nodejs.png"),
    scaled("TYPESCRIPT", "TypeScript/Node.js", "ts.svg", 0.9),
    kind("REDIS", "Redis", "redis.png"),
    scaled("GO", "Go", "go.png", 1.8),
    kind("TRAEFIK", "Traefik", "traefik.svg"),
    kind("PYTHON", "Python", "python.svg"),
    kind("NGINX", "Nginx", "nginx.png"),
    kind("HTML5", "HTML5", "html5.png"),
    kind("MICRONAUT", "Micronaut", "micronaut.png"),
];
