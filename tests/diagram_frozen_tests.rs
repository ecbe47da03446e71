//! Diagram Export Frozen Tests
//!
//! The diagram document is the contract with the renderer: field names, the
//! omission of absent hints, and the shape of `lineStyle` / `edgeSymbol` must not
//! drift. Inline `insta` snapshots pin the JSON for representative nodes and
//! links.

use insta::assert_json_snapshot;
use mushop_arch::catalog::{aws, oci, Diagram, DiagramLink, View};
use pretty_assertions::assert_eq;

fn link<'a>(diagram: &'a Diagram, source: &str, target: &str) -> &'a DiagramLink {
    diagram
        .links
        .iter()
        .find(|link| link.source == source && link.target == target)
        .unwrap()
}

#[test]
fn test_insecure_link_snapshot() {
    let diagram = Diagram::build(oci(), View::Full).unwrap();
    assert_json_snapshot!(link(&diagram, "DNS", "LB"), @r###"
    {
      "source": "DNS",
      "target": "LB",
      "lineStyle": {
        "type": "dotted",
        "curveness": 0.2
      }
    }
    "###);
}

#[test]
fn test_read_write_link_snapshot() {
    let diagram = Diagram::build(aws(), View::Full).unwrap();
    assert_json_snapshot!(link(&diagram, "CART", "DOCDB"), @r###"
    {
      "source": "CART",
      "target": "DOCDB",
      "edgeSymbol": [
        "arrow",
        "arrow"
      ]
    }
    "###);
}

#[test]
fn test_basic_node_snapshot() {
    let diagram = Diagram::build(oci(), View::Basic).unwrap();
    assert_json_snapshot!(diagram.node("ATP").unwrap(), @r###"
    {
      "id": "ATP",
      "name": "ATP Database",
      "desc": "Data persistence, separated by service",
      "category": 0,
      "kind": "Oracle ATP",
      "icon": "images/tech/atp.png",
      "scale": 1.2
    }
    "###);
}

#[test]
fn test_basic_links_carry_no_hints() {
    let diagram = Diagram::build(oci(), View::Basic).unwrap();
    let pairs: Vec<_> = diagram
        .links
        .iter()
        .map(|l| (l.source.as_str(), l.target.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("LB", "STORE"),
            ("LB", "API"),
            ("API", "CATALOG"),
            ("CATALOG", "ATP"),
            ("STORE", "BUCKET"),
        ]
    );
    assert!(diagram
        .links
        .iter()
        .all(|l| l.line_style.is_none() && l.edge_symbol.is_none()));
}

#[test]
fn test_json_document_shape() {
    let diagram = Diagram::build(aws(), View::Full).unwrap();
    let json: serde_json::Value = serde_json::from_str(&diagram.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["cloud"], "aws");
    assert_eq!(json["view"], "full");
    assert_eq!(json["categories"].as_array().unwrap().len(), 4);
    assert_eq!(json["categories"][0]["name"], "Amazon Web Services");
    assert_eq!(json["categories"][0]["color"], "#ff9900");
    assert_eq!(json["nodes"].as_array().unwrap().len(), 19);
    assert_eq!(json["links"].as_array().unwrap().len(), 25);

    // Every link endpoint names an exported node.
    let ids: Vec<_> = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_str().unwrap().to_string())
        .collect();
    for link in json["links"].as_array().unwrap() {
        assert!(ids.contains(&link["source"].as_str().unwrap().to_string()));
        assert!(ids.contains(&link["target"].as_str().unwrap().to_string()));
    }
}

#[test]
fn test_yaml_export() {
    let yaml = Diagram::build(oci(), View::Basic).unwrap().to_yaml().unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["cloud"].as_str(), Some("oci"));
    assert_eq!(value["view"].as_str(), Some("basic"));
    assert_eq!(value["nodes"].as_sequence().unwrap().len(), 6);
}
