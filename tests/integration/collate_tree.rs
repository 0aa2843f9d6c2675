use benchreg::collate::{
    collate_entities, parse_nested_tree, CollateError, Collator, FileContent, Node,
};
use serde_json::json;
use tempfile::TempDir;

use crate::support::{build_registry, write_file};

#[test]
fn datasets_collate_to_category_and_leaves() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let nodes = parse_nested_tree(temp.path(), "dataset.yaml").unwrap();
    let value = serde_json::to_value(&nodes).unwrap();

    assert_eq!(
        value,
        json!({
            "datasets/MIMIC": {
                "name": "datasets/MIMIC",
                "data": {"README.md": "This is a README for the category."},
                "children": ["datasets/MIMIC/III", "datasets/MIMIC/IV"],
            },
            "datasets/MIMIC/III": {
                "name": "datasets/MIMIC/III",
                "data": {
                    "README.md": "This is a README.",
                    "dataset.yaml": {"foo": "bar"},
                    "predicates.yaml": {"predicate": "value"},
                    "refs.bib": "@article{foo, bar}",
                    "requirements.txt": ["numpy==1.21.0", "pandas==1.3.0"],
                },
                "children": [],
            },
            "datasets/MIMIC/IV": {
                "name": "datasets/MIMIC/IV",
                "data": {
                    "README.md": "This is another README.",
                    "dataset.yaml": {"foo": "baz"},
                    "predicates.yaml": {"predicate": "alt_value"},
                    "refs.bib": "@article{baz, qux}",
                    "requirements.txt": ["numpy==1.21.0", "pandas==1.3.0"],
                },
                "children": [],
            },
            "datasets/eICU": {
                "name": "datasets/eICU",
                "data": {
                    "dataset.yaml": {"foo": "quux"},
                    "predicates.yaml": {"predicate": "quuz"},
                },
                "children": [],
            },
        })
    );
}

#[test]
fn tasks_link_through_gap_directory() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let nodes = parse_nested_tree(temp.path(), "task.yaml").unwrap();
    let keys: Vec<&str> = nodes.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "tasks/mortality",
            "tasks/mortality/in_icu/first_24h",
            "tasks/readmission/30d",
        ]
    );
    assert!(!nodes.contains_key("tasks/mortality/in_icu"));
    assert!(!nodes.contains_key("tasks/readmission"));
    assert_eq!(
        nodes["tasks/mortality"].children,
        vec!["tasks/mortality/in_icu/first_24h"]
    );
    assert!(nodes["tasks/readmission/30d"].children.is_empty());
}

#[test]
fn models_collate_single_leaf() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let nodes = parse_nested_tree(temp.path(), "model.yaml").unwrap();
    assert_eq!(nodes.len(), 1);
    let model = &nodes["models/cehrbert"];
    assert_eq!(
        model.data["requirements.txt"],
        FileContent::Lines(vec!["numpy==1.21.0".to_string()])
    );
    assert_eq!(
        model.data["refs.bib"],
        FileContent::Text("@article{model, paper}".to_string())
    );
}

#[test]
fn unknown_indicator_yields_empty_mapping() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());
    assert!(parse_nested_tree(temp.path(), "non_existent.yaml")
        .unwrap()
        .is_empty());
}

#[test]
fn every_leaf_appears_as_a_key() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let collection = collate_entities(temp.path()).unwrap();
    for leaf in [
        "datasets/MIMIC/III",
        "datasets/MIMIC/IV",
        "datasets/eICU",
    ] {
        assert!(collection.datasets.contains_key(leaf), "missing {leaf}");
    }
    for leaf in ["tasks/mortality/in_icu/first_24h", "tasks/readmission/30d"] {
        assert!(collection.tasks.contains_key(leaf), "missing {leaf}");
    }
    assert!(collection.models.contains_key("models/cehrbert"));
}

#[test]
fn collation_is_idempotent() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let first = collate_entities(temp.path()).unwrap();
    let second = collate_entities(temp.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn gap_ancestor_with_descendants_at_different_depths() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "top/README.md", "top");
    write_file(root, "top/group/a/dataset.yaml", "a: 1");
    write_file(root, "top/group/b/README.md", "b");
    write_file(root, "top/group/b/deep/dataset.yaml", "deep: 1");
    write_file(root, "top/group/c/x/y/dataset.yaml", "c: 1");

    let collator = Collator::new(root).unwrap();
    let nodes = collator.collate("dataset.yaml").unwrap();

    assert!(!nodes.contains_key("top/group"));
    assert_eq!(
        nodes["top"].children,
        vec!["top/group/a", "top/group/b", "top/group/c/x/y"]
    );
    assert_eq!(nodes["top/group/b"].children, vec!["top/group/b/deep"]);
    for node in nodes.values() {
        let mut unique = node.children.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), node.children.len(), "duplicates in {}", node.name);
    }
}

#[test]
fn unrecognized_files_never_create_nodes() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "datasets/README.txt", "not recognized");
    write_file(root, "datasets/notes.yaml", "not: recognized");
    write_file(root, "datasets/foo/dataset.yaml", "foo: 1");
    write_file(root, "datasets/foo/extra/README.md", "inside a leaf but never read");

    let nodes = parse_nested_tree(root, "dataset.yaml").unwrap();
    assert_eq!(nodes.keys().collect::<Vec<_>>(), vec!["datasets/foo"]);
    assert_eq!(nodes["datasets/foo"].data.len(), 1);
}

#[test]
fn malformed_yaml_fails_the_whole_collation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "datasets/good/dataset.yaml", "foo: 1");
    write_file(root, "datasets/bad/dataset.yaml", "foo: [1, 2");

    let err = parse_nested_tree(root, "dataset.yaml").unwrap_err();
    assert!(matches!(err, CollateError::Yaml { .. }));
}

#[test]
fn data_from_leaf_reports_missing_and_non_directory() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let missing = temp.path().join("datasets/MIMIC/V");
    assert!(matches!(
        Node::data_from_leaf(&missing),
        Err(CollateError::NotFound(_))
    ));

    let file = temp.path().join("datasets/MIMIC/III/dataset.yaml");
    let err = Node::data_from_leaf(&file).unwrap_err();
    assert!(matches!(err, CollateError::NotADirectory(_)));
    assert!(err.to_string().contains("is not a directory"));
}
