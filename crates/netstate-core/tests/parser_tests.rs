#![allow(clippy::unwrap_used, clippy::expect_used)]

use netstate_core::address::{canonicalize, parse_prefix};
use netstate_core::parsers::{
    parse_registry_neighbors, parse_registry_prefixes, parse_routes, parse_traffic, AttrValue,
    ROUTE_READY_BANNER,
};

const ROUTE_DUMP: &str = "BIRD 1.5.0 ready.
10.0.1.0/24        via 192.0.2.1 on eth0 [bgp1 12:00:01] * (100) [AS64501i]
\tType: BGP unicast univ
\tBGP.origin: IGP
\tBGP.as_path: 64501 64502
\tBGP.next_hop: 192.0.2.1
\tBGP.local_pref: 100
10.0.0.0/24        via 192.0.2.2 on eth1 [bgp2 12:00:02] * (100) [AS64503i]
\tType: BGP unicast univ
\tBGP.as_path: 64503
";

// ---------- traffic ----------

#[test]
fn test_traffic_duplicates_collapse() {
    let pairs = parse_traffic(
        "SRC=192.0.2.1 DST=198.51.100.1\n\
         SRC=192.0.2.1 DST=198.51.100.1\n",
    );
    assert_eq!(pairs.len(), 1);
}

#[test]
fn test_traffic_mapped_and_plain_sources_collapse() {
    let pairs = parse_traffic(
        "SRC=::ffff:192.0.2.1 DST=198.51.100.1\n\
         SRC=192.0.2.1 DST=198.51.100.1\n",
    );
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].source.to_string(), "192.0.2.1");
}

#[test]
fn test_traffic_output_is_sorted_by_join_key() {
    let pairs = parse_traffic(
        "SRC=2001:db8::1 DST=2001:db8::2\n\
         SRC=10.0.0.9 DST=10.0.0.1\n\
         SRC=10.0.0.10 DST=10.0.0.1\n",
    );
    let keys: Vec<String> = pairs.iter().map(|p| p.join_key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    // IPv4-mapped space sorts below 2001:db8::/32
    assert_eq!(pairs[0].source.to_string(), "10.0.0.9");
    assert_eq!(pairs[2].source.to_string(), "2001:db8::1");
}

#[test]
fn test_traffic_ignores_other_lines() {
    let pairs = parse_traffic(
        "tcpdump: listening on eth0\n\
         \x20\x20SRC=10.0.0.1 DST=10.0.0.2  \n\
         SRC=10.0.0.1 DST=10.0.0.2 LEN=84\n\
         \n",
    );
    assert_eq!(pairs.len(), 1);
}

#[test]
fn test_traffic_empty_input() {
    assert!(parse_traffic("").is_empty());
}

// ---------- routes ----------

#[test]
fn test_routes_without_banner_are_empty() {
    let without_banner = ROUTE_DUMP.replacen(ROUTE_READY_BANNER, "BIRD 1.6.0 ready.", 1);
    assert!(parse_routes(&without_banner).is_empty());
    assert!(parse_routes("").is_empty());
}

#[test]
fn test_routes_banner_may_follow_blank_lines() {
    let routes = parse_routes(&format!("\n\n{ROUTE_DUMP}"));
    assert_eq!(routes.len(), 2);
}

#[test]
fn test_routes_are_sorted_and_typed() {
    let routes = parse_routes(ROUTE_DUMP);
    assert_eq!(routes.len(), 2);

    let first = &routes[0];
    assert_eq!(first.prefix, parse_prefix("10.0.0.0/24").unwrap());
    assert_eq!(first.next_hop, Some(canonicalize("192.0.2.2").unwrap()));
    assert_eq!(first.next_hop_intf.as_deref(), Some("eth1"));
    assert_eq!(first.proto.as_deref(), Some("bgp2"));
    assert_eq!(first.as_path(), Some(&[64503][..]));

    let second = &routes[1];
    assert_eq!(second.as_path(), Some(&[64501, 64502][..]));
    assert_eq!(
        second.attribute("bgp.next_hop"),
        Some(&AttrValue::Address(canonicalize("192.0.2.1").unwrap()))
    );
    assert_eq!(second.attribute("bgp.local_pref"), Some(&AttrValue::Integer(100)));
    assert_eq!(
        second.attribute("bgp.origin"),
        Some(&AttrValue::Text("IGP".to_string()))
    );
    assert_eq!(
        second.attribute("type"),
        Some(&AttrValue::Tokens(vec![
            "BGP".to_string(),
            "unicast".to_string(),
            "univ".to_string()
        ]))
    );
}

#[test]
fn test_route_header_without_suffix() {
    let routes = parse_routes("BIRD 1.5.0 ready.\n2001:db8::/48    unreachable [static1 12:00] * (200)\n");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].prefix.to_string(), "2001:db8::/48");
    assert!(routes[0].next_hop.is_none());
    assert!(routes[0].proto.is_none());
}

#[test]
fn test_route_with_invalid_prefix_degrades_to_empty() {
    let routes = parse_routes("BIRD 1.5.0 ready.\n10.0.0.0/24 via 192.0.2.1 on eth0 [bgp1 x]\n10.0.0.0/40 via 192.0.2.1 on eth0 [bgp1 x]\n");
    assert!(routes.is_empty());
}

#[test]
fn test_route_banner_trailing_whitespace_is_tolerated() {
    let routes = parse_routes("BIRD 1.5.0 ready.  \r\n10.0.0.0/8 via 192.0.2.1 on eth0 [bgp1 x]\r\n");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].prefix.display_length(), 8);
}

// ---------- registry prefixes ----------

#[test]
fn test_registry_prefixes_are_sorted() {
    let prefixes = parse_registry_prefixes(
        r#"{"filter": [
            {"prefix": "2001:db8::/32", "exact": true},
            {"prefix": "192.0.2.0/24", "exact": true},
            {"prefix": "192.0.2.0/23", "exact": false}
        ]}"#,
    );
    let printed: Vec<String> = prefixes.iter().map(|p| p.prefix.to_string()).collect();
    assert_eq!(printed, vec!["192.0.2.0/23", "192.0.2.0/24", "2001:db8::/32"]);
}

#[test]
fn test_registry_prefixes_decode_failure_is_empty() {
    assert!(parse_registry_prefixes("").is_empty());
    assert!(parse_registry_prefixes("{\"filter\": 3}").is_empty());
    assert!(parse_registry_prefixes("{}").is_empty());
    assert!(parse_registry_prefixes("[]").is_empty());
}

#[test]
fn test_registry_prefixes_empty_filter() {
    assert!(parse_registry_prefixes(r#"{"filter": []}"#).is_empty());
}

#[test]
fn test_registry_bare_address_is_host_prefix() {
    let prefixes = parse_registry_prefixes(r#"{"filter": [{"prefix": "192.0.2.1"}]}"#);
    assert_eq!(prefixes[0].prefix.to_string(), "192.0.2.1/32");
}

// ---------- registry neighbors ----------

#[test]
fn test_neighbor_import_and_export_accumulate() {
    let neighbors = parse_registry_neighbors(
        "mp-import: from AS64500 accept ANY\n\
         mp-export: to AS64500 announce AS64501\n",
    );
    assert_eq!(neighbors.len(), 1);
    let policy = &neighbors["AS64500"];
    assert_eq!(policy.import, vec!["ANY"]);
    assert_eq!(policy.export, vec!["AS64501"]);
}

#[test]
fn test_neighbor_record_keeps_other_lines_out() {
    let neighbors = parse_registry_neighbors(
        "aut-num:        AS64501\n\
         as-name:        EXAMPLE\n\
         mp-import:      from AS64500 accept ANY\n\
         mp-import:      from AS64502 accept AS64502\n\
         mp-export:      to AS64502 announce AS64501:AS-CUSTOMERS   \n\
         source:         LAB\n",
    );
    let keys: Vec<&String> = neighbors.keys().collect();
    assert_eq!(keys, vec!["AS64500", "AS64502"]);
    assert_eq!(neighbors["AS64502"].export, vec!["AS64501:AS-CUSTOMERS"]);
}
