//! The MuShop reference architecture catalog.
//!
//! Raw descriptor tables live in [`tech`], [`service_type`], [`services`] and
//! [`links`]; [`architecture`] resolves them into an [`Architecture`] per cloud
//! and [`diagram`] flattens a view of one for a renderer.

pub mod architecture;
pub mod diagram;
pub mod icons;
pub mod links;
pub mod service_type;
pub mod services;
pub mod table;
pub mod tech;

pub use architecture::{
    aws, load_service_types, oci, service_types, Architecture, ArchitectureDef, Cloud, View,
};
pub use diagram::{Diagram, DiagramCategory, DiagramLink, DiagramNode};
pub use icons::{prefix_icons, IconDir, IconSource, DEFAULT_ICON_DIR};
pub use links::{EdgeSymbol, LineStyle, LineType, ServiceLink, Symbol, INSECURE, READ_WRITE};
pub use service_type::{ServiceKind, ServiceTypeId};
pub use services::{ServiceId, ServiceNode};
pub use table::{Id, Keyed, Table};
pub use tech::{TechCategory, TechId};
