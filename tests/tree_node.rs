// Author: Lukas Bower
// Purpose: Exercise storage tree construction, removal and naming.
#![forbid(unsafe_code)]

use n5_multiscale::metadata::{
    DataType, DatasetAttributes, DatasetMetadata, PixelResolution, SingleScaleMetadata,
};
use n5_multiscale::{Metadata, TreeNode};

fn build_pair() -> (TreeNode, TreeNode) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut root = TreeNode::new("/", false);
    let a = TreeNode::new("/a", false);
    let b = TreeNode::new("/b", false);
    root.add(a.clone());
    root.add(b.clone());
    (root, b)
}

#[test]
fn add_and_remove_track_child_count() {
    let (mut root, b) = build_pair();
    assert_eq!(root.children().len(), 2);

    let removed = root.remove(&b).expect("b is a child");
    assert_eq!(removed.path(), "/b");
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].path(), "/a");

    root.remove_all_children();
    assert!(root.children().is_empty());
}

#[test]
fn remove_matches_on_path_not_contents() {
    let mut root = TreeNode::new("/", false);
    let mut level = TreeNode::new("/em/s0", true);
    level.set_metadata(SingleScaleMetadata::new(
        "/em/s0",
        DatasetAttributes::new(vec![8; 3], vec![8; 3], DataType::Uint8),
        PixelResolution::new(vec![f64::NAN], "nm"),
        vec![1.0; 3],
    ));
    root.add(level.clone());
    root.add(TreeNode::new("/em/s1", true));

    let removed = root.remove(&level).expect("NaN metadata still matches by path");
    assert_eq!(removed.path(), "/em/s0");
    assert_eq!(root.children().len(), 1);

    let mut handle = TreeNode::new("/em/s1", true);
    handle.add(TreeNode::new("/em/s1/extra", false));
    assert!(root.remove(&handle).is_some());
    assert!(root.children().is_empty());
}

#[test]
fn children_keep_insertion_order_and_allow_duplicates() {
    let mut root = TreeNode::new("/", false);
    for path in ["/z", "/a", "/m", "/a"] {
        root.add(TreeNode::new(path, false));
    }
    let paths: Vec<&str> = root.children().iter().map(TreeNode::path).collect();
    assert_eq!(paths, vec!["/z", "/a", "/m", "/a"]);

    root.remove_path("/a");
    let paths: Vec<&str> = root.children().iter().map(TreeNode::path).collect();
    assert_eq!(paths, vec!["/z", "/m", "/a"]);
}

#[test]
fn children_mut_is_live() {
    let (mut root, _) = build_pair();
    root.children_mut().retain(|child| child.path() != "/a");
    assert_eq!(root.children().len(), 1);
    root.children_mut().push(TreeNode::new("/c", true));
    assert_eq!(root.child("c").map(TreeNode::is_dataset), Some(true));
}

#[test]
fn node_name_handles_both_separator_styles() {
    assert_eq!(TreeNode::new("/a/b/c", false).node_name(), "c");
    assert_eq!(TreeNode::new("/", false).node_name(), "");
    assert_eq!(
        TreeNode::new("\\a", false).node_name(),
        TreeNode::new("/a", false).node_name()
    );
    assert_eq!(TreeNode::new("/volumes/raw/", false).node_name(), "raw");
}

#[test]
fn metadata_can_be_replaced_and_taken() {
    let mut node = TreeNode::new("/raw", true);
    assert!(node.metadata().is_none());
    let attrs = DatasetAttributes::new(vec![100, 100], vec![10, 10], DataType::Uint16);
    node.set_metadata(DatasetMetadata::new("/raw", attrs));
    assert!(node.metadata().map(Metadata::is_dataset).unwrap_or(false));

    let taken = node.take_metadata().expect("metadata attached");
    assert_eq!(taken.path(), "/raw");
    assert!(node.metadata().is_none());
}

#[test]
fn dump_lists_every_path() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut root = TreeNode::new("/", false);
    let mut group = TreeNode::new("/em", false);
    group.add(TreeNode::new("/em/s0", true));
    group.add(TreeNode::new("/em/s1", true));
    root.add(group);
    let dump = root.print_recursive();
    assert_eq!(dump.lines().count(), 4);
    assert!(dump.contains("\n  /em/s1\n"));
}
