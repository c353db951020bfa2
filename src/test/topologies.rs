use crate::net::{NodeId, NodeRole, Topology, TopologyError};
use crate::topo::depin::{GATEWAY_EAST, GATEWAY_WEST, build_depin};
use crate::topo::line::build_line;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn neighbor(topo: &Topology, of: &str, nb: &str) -> Option<(f64, u32)> {
    topo.neighbor_records(of)?
        .into_iter()
        .find(|(id, _, _)| *id == nb)
        .map(|(_, l, b)| (l, b))
}

#[test]
fn connect_is_symmetric() {
    let mut topo = Topology::new();
    let a = topo.create_node("A");
    let b = topo.create_node("B");
    let link = topo.connect("A", "B", 12.5, 300).expect("connect A-B");

    assert_eq!(topo.link(link).endpoints(), (a, b));
    assert_eq!(topo.link_between(b, a), Some(topo.link(link)));
    assert_eq!(topo.node(a).link_to(b), Some(link));
    assert_eq!(topo.node(b).link_to(a), Some(link));

    assert_eq!(neighbor(&topo, "A", "B"), Some((12.5, 300)));
    assert_eq!(neighbor(&topo, "B", "A"), Some((12.5, 300)));
}

#[test]
fn connecting_same_pair_twice_is_a_noop() {
    let mut topo = Topology::new();
    topo.create_node("A");
    topo.create_node("B");
    let first = topo.connect("A", "B", 5.0, 100).unwrap();
    let again = topo.connect("B", "A", 99.0, 1).unwrap();

    assert_eq!(first, again);
    assert_eq!(topo.link_count(), 1);
    assert_eq!(topo.get_node("A").unwrap().adjacency().len(), 1);
    assert_eq!(topo.get_node("B").unwrap().adjacency().len(), 1);
    assert_eq!(neighbor(&topo, "A", "B"), Some((5.0, 100)));
    assert_eq!(neighbor(&topo, "B", "A"), Some((5.0, 100)));
}

#[test]
fn connect_with_unknown_id_reports_both_ids_and_creates_nothing() {
    let mut topo = Topology::new();
    topo.create_node("A");

    let err = topo.connect("A", "GHOST", 1.0, 10).unwrap_err();
    assert_eq!(
        err,
        TopologyError::UnknownNodes {
            a: "A".to_string(),
            b: "GHOST".to_string()
        }
    );
    let msg = err.to_string();
    assert!(msg.contains("A") && msg.contains("GHOST"), "{msg}");
    assert_eq!(topo.link_count(), 0);
    assert!(topo.get_node("A").unwrap().adjacency().is_empty());
}

#[test]
fn connect_ids_with_out_of_range_id_is_an_error() {
    let mut topo = Topology::new();
    let a = topo.create_node("A");
    assert!(!topo.contains(NodeId(7)));

    let err = topo.connect_ids(a, NodeId(7), 1.0, 10).unwrap_err();
    assert_eq!(
        err,
        TopologyError::UnknownNodes {
            a: "A".to_string(),
            b: "#7".to_string()
        }
    );
    assert!(topo.connect_ids(NodeId(3), NodeId(4), 1.0, 10).is_err());
    assert_eq!(topo.link_count(), 0);
    assert!(topo.node(a).adjacency().is_empty());
}

#[test]
fn connect_rejects_zero_latency_so_rewards_stay_finite() {
    let mut topo = Topology::new();
    topo.create_node("A");
    topo.create_node("B");

    assert_eq!(
        topo.connect("A", "B", 0.0, 10),
        Err(TopologyError::InvalidLatency(0.0))
    );
    assert!(matches!(
        topo.connect("A", "B", f64::NAN, 10),
        Err(TopologyError::InvalidLatency(_))
    ));
    assert_eq!(
        topo.connect("A", "B", -1.0, 10),
        Err(TopologyError::InvalidLatency(-1.0))
    );
    assert_eq!(
        topo.connect("A", "B", 1.0, 0),
        Err(TopologyError::InvalidBandwidth)
    );
    assert_eq!(
        topo.connect("A", "A", 1.0, 10),
        Err(TopologyError::SelfLoop("A".to_string()))
    );
    assert_eq!(topo.link_count(), 0);
}

#[test]
fn create_is_idempotent_and_keeps_existing_role() {
    let mut topo = Topology::new();
    let gw = topo.create_gateway("GW");
    let again = topo.create_node("GW");
    assert_eq!(gw, again);
    assert_eq!(topo.node_count(), 1);
    assert_eq!(topo.node(gw).role(), NodeRole::Gateway);
    assert_eq!(topo.gateways().collect::<Vec<_>>(), vec![gw]);

    let n = topo.create_node("N");
    assert_eq!(topo.create_gateway("N"), n);
    assert!(!topo.node(n).is_gateway());
    assert_eq!(topo.gateways().count(), 1);
}

#[test]
fn lookup_of_missing_node_is_none() {
    let topo = Topology::new();
    assert!(topo.get_node("NOPE").is_none());
    assert!(topo.neighbor_records("NOPE").is_none());
}

#[test]
fn neighbors_enumerate_in_insertion_order() {
    let mut topo = Topology::new();
    for name in ["HUB", "Z", "A", "M"] {
        topo.create_node(name);
    }
    topo.connect("HUB", "Z", 1.0, 10).unwrap();
    topo.connect("A", "HUB", 2.0, 20).unwrap();
    topo.connect("HUB", "M", 3.0, 30).unwrap();

    let order: Vec<&str> = topo
        .neighbor_records("HUB")
        .unwrap()
        .into_iter()
        .map(|(id, _, _)| id)
        .collect();
    assert_eq!(order, vec!["Z", "A", "M"]);
}

#[test]
fn learning_topology_creates_arms_lazily_in_neighbor_order() {
    let mut topo = Topology::with_learning();
    let hub = topo.create_node("HUB");
    let b = topo.create_node("B");
    let a = topo.create_node("A");
    assert_eq!(topo.node(hub).learner().unwrap().arms().count(), 0);

    topo.connect("HUB", "B", 1.0, 10).unwrap();
    topo.connect("HUB", "A", 1.0, 10).unwrap();
    topo.connect("HUB", "B", 1.0, 10).unwrap();

    let learner = topo.node(hub).learner().unwrap();
    let arms: Vec<_> = learner.arms().map(|(id, arm)| (id, arm.pulls())).collect();
    assert_eq!(arms, vec![(b, 0), (a, 0)]);
    assert_eq!(learner.total_pulls(), 0);
}

#[test]
fn enable_learning_attaches_fresh_state_to_every_node() {
    let topo = build_line(&["A", "B", "C"], &[5.0, 5.0], 100).unwrap();
    assert!(topo.nodes().iter().all(|n| n.learner().is_none()));

    let mut learning = topo.clone();
    learning.enable_learning();
    for node in learning.nodes() {
        let learner = node.learner().expect("learner attached");
        assert_eq!(learner.arms().count(), node.adjacency().len());
    }
    // 原拓扑不受影响
    assert!(topo.nodes().iter().all(|n| n.learner().is_none()));
}

#[test]
fn line_topology_marks_endpoints_as_gateways() {
    let topo = build_line(&["A", "B", "C"], &[5.0, 7.0], 100).unwrap();
    assert!(topo.get_node("A").unwrap().is_gateway());
    assert!(!topo.get_node("B").unwrap().is_gateway());
    assert!(topo.get_node("C").unwrap().is_gateway());
    assert_eq!(topo.link_count(), 2);
    assert_eq!(neighbor(&topo, "B", "C"), Some((7.0, 100)));
}

#[test]
fn depin_topology_is_reproducible_for_a_seed() {
    let a = build_depin(&mut ChaCha8Rng::seed_from_u64(42));
    let b = build_depin(&mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a.view(), b.view());

    assert_eq!(a.node_count(), 7);
    assert_eq!(a.link_count(), 10);
    assert!(a.get_node(GATEWAY_WEST).unwrap().is_gateway());
    assert!(a.get_node(GATEWAY_EAST).unwrap().is_gateway());

    let (lat, bw) = neighbor(&a, "NODE_2", "NODE_3").unwrap();
    assert!((5.0..=10.0).contains(&lat), "latency {lat}");
    assert!((800..=1000).contains(&bw), "bandwidth {bw}");
}

#[test]
fn view_is_sorted_and_renders_every_link_from_both_sides() {
    let mut topo = Topology::new();
    topo.create_node("NODE_B");
    topo.create_gateway("GW_A");
    topo.create_node("LONELY");
    topo.connect("NODE_B", "GW_A", 7.126, 250).unwrap();

    let view = topo.view();
    let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["GW_A", "LONELY", "NODE_B"]);

    let text = view.to_string();
    assert!(text.contains("NETWORK TOPOLOGY VISUALIZATION"));
    assert!(text.contains("-> Gateway(ID='GW_A'):"));
    assert!(text.contains("   -- (L: 7.13ms, BW: 250Mbps) --> Node(ID='NODE_B')"));
    assert!(text.contains("   -- (L: 7.13ms, BW: 250Mbps) --> Gateway(ID='GW_A')"));
    assert!(text.contains("   [No Connections]"));
}
