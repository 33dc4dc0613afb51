//! Edge case tests for malformed and unusual family documents

// =============================================================================
// Skipped Children
// =============================================================================

mod skipped_children {
    use lineage::family::{HiddenGenerations, PersonNode};
    use lineage::{generate_tree_layout, LayoutWarning};

    fn positions(json: &str) -> Vec<(String, f64, f64)> {
        let tree = PersonNode::from_json(json).unwrap();
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();
        layout
            .nodes
            .into_iter()
            .map(|n| (n.id, n.x, n.y))
            .collect()
    }

    #[test]
    fn test_null_child_leaves_no_phantom_gap() {
        let with_null = positions(
            r#"{"id": "r", "children": [{"id": "a"}, null, {"id": "b"}]}"#,
        );
        let without = positions(r#"{"id": "r", "children": [{"id": "a"}, {"id": "b"}]}"#);
        assert_eq!(with_null, without);
    }

    #[test]
    fn test_child_without_id_leaves_no_phantom_gap() {
        let with_bad = positions(
            r#"{"id": "r", "children": [{"name": "no id", "children": [{"id": "lost"}]}, {"id": "a"}, {"id": "b"}]}"#,
        );
        let without = positions(r#"{"id": "r", "children": [{"id": "a"}, {"id": "b"}]}"#);
        assert_eq!(with_bad, without);
    }

    #[test]
    fn test_only_null_children_is_a_leaf() {
        let tree = PersonNode::from_json(r#"{"id": "r", "children": [null, null]}"#).unwrap();
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();
        assert_eq!(layout.nodes.len(), 1);
        assert!(!layout.nodes[0].has_children);
        assert!(layout.connections.is_empty());
    }

    #[test]
    fn test_null_children_in_hidden_generation_are_not_reported() {
        let tree =
            PersonNode::from_json(r#"{"id": "r", "children": [null, {"id": "a"}]}"#).unwrap();
        let hidden: HiddenGenerations = ["r"].into_iter().collect();
        let layout = generate_tree_layout(Some(&tree), &hidden).unwrap();
        assert!(layout.warnings.is_empty());
        assert_eq!(layout.connections.len(), 1);
    }

    #[test]
    fn test_warnings_name_the_parent() {
        let tree = PersonNode::from_json(
            r#"{"id": "r", "children": [{"id": "a", "children": [null]}]}"#,
        )
        .unwrap();
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();
        assert_eq!(
            layout.warnings,
            vec![LayoutWarning::NullChild {
                parent_id: "a".to_string(),
                index: 0
            }]
        );
    }
}

// =============================================================================
// Empty and Absent Trees
// =============================================================================

mod empty_trees {
    use lineage::family::{HiddenGenerations, PersonNode};
    use lineage::{generate_tree_layout, get_boundaries, Boundaries, LayoutWarning};

    #[test]
    fn test_absent_tree_default_viewport() {
        let layout = generate_tree_layout(None, &HiddenGenerations::new()).unwrap();
        assert!(layout.nodes.is_empty());
        assert!(layout.connections.is_empty());
        assert_eq!(
            get_boundaries(&layout),
            Boundaries {
                min_x: 0.0,
                min_y: 0.0,
                width: 800.0,
                height: 600.0
            }
        );
    }

    #[test]
    fn test_root_without_id() {
        let tree = PersonNode::from_json(r#"{"name": "Nobody", "children": [{"id": "a"}]}"#)
            .unwrap();
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.warnings, vec![LayoutWarning::MalformedRoot]);
    }

    #[test]
    fn test_boundaries_do_not_mutate_layout() {
        let tree = PersonNode::new("r", "R");
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();
        let before = layout.clone();
        let _ = get_boundaries(&layout);
        assert_eq!(layout, before);
    }
}

// =============================================================================
// Unusual Shapes
// =============================================================================

mod unusual_shapes {
    use lineage::family::{HiddenGenerations, PersonNode, SpouseRecord};
    use lineage::{generate_tree_layout, ConnectionKind, LayoutConfig, LayoutError};
    use lineage::FamilyTreeLayout;

    #[test]
    fn test_wide_family() {
        let children = (0..40).map(|i| PersonNode::new(format!("c{}", i), "child"));
        let tree = PersonNode::new("r", "R").with_children(children);
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();

        assert_eq!(layout.nodes.len(), 41);
        assert_eq!(layout.connections_of(ConnectionKind::ChildConnection).count(), 40);
        let first = layout.node("c0").unwrap();
        let last = layout.node("c39").unwrap();
        assert_eq!(last.x - first.x, 39.0 * 450.0);
    }

    #[test]
    fn test_deep_chain_within_limit() {
        let mut node = PersonNode::new("g62", "leaf");
        for level in (0..62).rev() {
            node = PersonNode::new(format!("g{}", level), "x")
                .with_spouse(SpouseRecord::new("s"))
                .with_child(node);
        }
        let layout = generate_tree_layout(Some(&node), &HiddenGenerations::new()).unwrap();
        assert_eq!(layout.nodes.len(), 125);
        assert_eq!(layout.node("g62").unwrap().level, 62);
    }

    #[test]
    fn test_deep_chain_beyond_limit() {
        let mut node = PersonNode::new("g20", "leaf");
        for level in (0..20).rev() {
            node = PersonNode::new(format!("g{}", level), "x").with_child(node);
        }
        let layout =
            FamilyTreeLayout::with_config(LayoutConfig::new().with_max_depth(10)).unwrap();
        let result = layout.generate(Some(&node), &HiddenGenerations::new());
        assert!(matches!(result, Err(LayoutError::DepthExceeded { depth: 11, .. })));
    }

    #[test]
    fn test_unicode_names_are_copied() {
        let tree = PersonNode::new("r", "Іван Петренко 👴");
        let layout = generate_tree_layout(Some(&tree), &HiddenGenerations::new()).unwrap();
        assert_eq!(layout.nodes[0].name, "Іван Петренко 👴");
        assert_eq!(layout.nodes[0].width, 250.0);
    }
}

// =============================================================================
// Deep JSON Documents
// =============================================================================

mod deep_documents {
    use lineage::family::HiddenGenerations;
    use lineage::{generate_tree_layout, layout_from_json, parse_tree, LayoutError, MAX_DOCUMENT_DEPTH};

    /// A line of couples from `g0` down to the single person `g{depth}`
    fn chain_json(depth: usize, leaf_fields: &str) -> String {
        let mut json = format!(r#"{{"id": "g{}", "name": "leaf"{}}}"#, depth, leaf_fields);
        for level in (0..depth).rev() {
            json = format!(
                r#"{{"id": "g{}", "name": "x", "spouse": {{"name": "s"}}, "children": [{}]}}"#,
                level, json
            );
        }
        json
    }

    const FULL_LEAF: &str = r#", "spouse": {"name": "t"}, "children": []"#;

    #[test]
    fn test_document_at_depth_limit() {
        let json = chain_json(MAX_DOCUMENT_DEPTH, FULL_LEAF);
        let layout = layout_from_json(&json, None).unwrap();
        assert_eq!(layout.nodes.len(), 2 * (MAX_DOCUMENT_DEPTH + 1));
        assert_eq!(layout.node("g62").unwrap().level, 62);
    }

    #[test]
    fn test_document_one_generation_past_limit() {
        let tree = parse_tree(&chain_json(MAX_DOCUMENT_DEPTH + 1, "")).unwrap();
        let err = generate_tree_layout(tree.as_ref(), &HiddenGenerations::new()).unwrap_err();
        match err {
            LayoutError::DepthExceeded { id, depth, max } => {
                assert_eq!(id, "g63");
                assert_eq!(depth, 63);
                assert_eq!(max, 62);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_document_nested_past_parser_limit() {
        for depth in [MAX_DOCUMENT_DEPTH + 1, MAX_DOCUMENT_DEPTH + 2, 200] {
            let leaf = if depth == MAX_DOCUMENT_DEPTH + 1 { FULL_LEAF } else { "" };
            let err = parse_tree(&chain_json(depth, leaf)).unwrap_err();
            assert!(
                matches!(err, LayoutError::DocumentTooDeep { max: 62, .. }),
                "depth {}: {}",
                depth,
                err
            );
            assert!(err.to_string().contains("Tree too deep"));
        }
    }

    #[test]
    fn test_layout_from_json_reports_depth() {
        let err = layout_from_json(&chain_json(100, ""), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LayoutError>(),
            Some(LayoutError::DocumentTooDeep { .. })
        ));
    }
}
