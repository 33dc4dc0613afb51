//! Property tests over generated family trees

use std::collections::HashSet;

use lineage::family::{find_person, HiddenGenerations, PersonNode, SpouseRecord};
use lineage::layout::calculate_node_width;
use lineage::{generate_tree_layout, get_boundaries, ConnectionKind, LayoutConfig, NodeKind};
use proptest::prelude::*;

fn family(has_spouse: bool, children: Vec<PersonNode>) -> PersonNode {
    let mut node = PersonNode::new("", "person").with_children(children);
    if has_spouse {
        node = node.with_spouse(SpouseRecord::new("partner"));
    }
    node
}

fn assign_ids(node: &mut PersonNode, next: &mut usize) {
    node.id = format!("p{}", *next);
    *next += 1;
    for child in node.children.iter_mut().flatten() {
        assign_ids(child, next);
    }
}

fn arb_tree() -> impl Strategy<Value = PersonNode> {
    let leaf = any::<bool>().prop_map(|has_spouse| family(has_spouse, Vec::new()));
    leaf.prop_recursive(5, 64, 4, |inner| {
        (any::<bool>(), prop::collection::vec(inner, 0..4))
            .prop_map(|(has_spouse, children)| family(has_spouse, children))
    })
    .prop_map(|mut tree| {
        let mut next = 0;
        assign_ids(&mut tree, &mut next);
        tree
    })
}

fn arb_case() -> impl Strategy<Value = (PersonNode, HiddenGenerations)> {
    (arb_tree(), prop::collection::vec(any::<bool>(), 0..64)).prop_map(|(tree, mask)| {
        let hidden: HiddenGenerations = mask
            .iter()
            .enumerate()
            .filter(|(_, hide)| **hide)
            .map(|(i, _)| format!("p{}", i))
            .collect();
        (tree, hidden)
    })
}

fn all_persons(root: &PersonNode) -> Vec<&PersonNode> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.valid_children());
    }
    out
}

fn descendant_ids(node: &PersonNode) -> HashSet<String> {
    all_persons(node)
        .into_iter()
        .skip(1)
        .map(|p| p.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn layout_is_deterministic((tree, hidden) in arb_case()) {
        let first = generate_tree_layout(Some(&tree), &hidden).unwrap();
        let second = generate_tree_layout(Some(&tree), &hidden).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn width_never_below_own_boxes((tree, hidden) in arb_case()) {
        let config = LayoutConfig::default();
        for person in all_persons(&tree) {
            let width = calculate_node_width(Some(person), &hidden, &config);
            prop_assert!(width >= config.person_width);
            if person.has_spouse() {
                prop_assert!(width >= config.couple_width());
            }
        }
    }

    #[test]
    fn nodes_fit_in_boundaries((tree, hidden) in arb_case()) {
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        let bounds = get_boundaries(&layout);
        for node in &layout.nodes {
            prop_assert!(bounds.contains(node), "{} outside {:?}", node.id, bounds);
        }
    }

    #[test]
    fn hidden_generation_suppresses_descendants((tree, hidden) in arb_case()) {
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        let drawn: HashSet<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();

        for node in layout.nodes.iter().filter(|n| n.kind == NodeKind::Person) {
            let person = find_person(&tree, &node.id).unwrap();
            if !hidden.is_hidden(&node.id) || !person.has_valid_children() {
                continue;
            }
            for id in descendant_ids(person) {
                prop_assert!(!drawn.contains(id.as_str()), "{} drawn under collapsed {}", id, node.id);
            }
            let stubs: Vec<_> = layout
                .connections_for(&node.id)
                .filter(|c| c.kind() == ConnectionKind::HiddenGeneration)
                .collect();
            prop_assert_eq!(stubs.len(), 1);
            prop_assert!(stubs[0].is_hidden());
        }
    }

    #[test]
    fn leaves_have_no_generation_connectors((tree, hidden) in arb_case()) {
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        for node in layout.nodes.iter().filter(|n| !n.has_children) {
            let generation_lines = layout
                .connections_for(&node.id)
                .filter(|c| c.kind() != ConnectionKind::Couple)
                .count();
            prop_assert_eq!(generation_lines, 0, "leaf {} has connectors", node.id);
        }
    }

    #[test]
    fn every_visible_person_is_drawn_once((tree, hidden) in arb_case()) {
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        let mut seen = HashSet::new();
        for node in &layout.nodes {
            prop_assert!(seen.insert(node.id.clone()), "{} drawn twice", node.id);
        }
        prop_assert!(layout.warnings.is_empty());
    }

    #[test]
    fn generations_sit_on_a_fixed_grid((tree, hidden) in arb_case()) {
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        for node in &layout.nodes {
            prop_assert_eq!(node.y, node.level as f64 * 320.0);
        }
    }

    #[test]
    fn no_duplicate_segments((tree, hidden) in arb_case()) {
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        let mut seen = HashSet::new();
        for connection in &layout.connections {
            let s = connection.segment();
            let key = [s.x1, s.y1, s.x2, s.y2].map(|v| (v + 0.0).to_bits());
            prop_assert!(seen.insert(key));
        }
    }
}
