use firewheel::data_structures::{
    batch::{BatchStore, Topology},
    primitives::{make_cylinder, make_disk, make_sphere, make_torus},
};

#[test]
fn identical_parameters_give_identical_batches() {
    let a = make_torus(0.5, 0.005, 90, 20);
    let b = make_torus(0.5, 0.005, 90, 20);
    assert_eq!(a.vertex_bytes(), b.vertex_bytes());
    assert_eq!(a.indices(), b.indices());

    let a = make_sphere(0.0375, 20, 20);
    let b = make_sphere(0.0375, 20, 20);
    assert_eq!(a.vertex_bytes(), b.vertex_bytes());
}

#[test]
fn cone_has_a_full_top_rim_and_an_apex_at_the_base() {
    let slices = 20;
    let length = 0.25;
    let cone = make_cylinder(0.0, 1.0, length, slices, 1);

    let rim = cone
        .vertices()
        .iter()
        .filter(|v| (v.position[2] - length).abs() < 1.0e-6)
        .count();
    // the seam column is repeated with its own texture coordinate
    assert_eq!(rim, slices as usize + 1);

    let apex: Vec<_> = cone
        .vertices()
        .iter()
        .filter(|v| v.position[2].abs() < 1.0e-6)
        .collect();
    assert!(!apex.is_empty());
    assert!(apex
        .iter()
        .all(|v| v.position[0].abs() < 1.0e-6 && v.position[1].abs() < 1.0e-6));
    assert_eq!(rim + apex.len(), cone.vertices().len());
}

#[test]
fn cone_drops_degenerate_triangles() {
    let slices = 12;
    let cone = make_cylinder(0.0, 1.0, 0.25, slices, 1);
    assert_eq!(cone.topology(), Topology::TriangleList);
    // one real triangle per slice, the second half of each quad collapses
    assert_eq!(cone.indices().len(), 3 * slices as usize);
}

#[test]
fn store_hands_out_one_handle_per_distinct_batch() {
    let mut store = BatchStore::new();
    let spoke = store.insert(make_cylinder(0.005, 0.005, 0.5, 10, 10));
    let again = store.insert(make_cylinder(0.005, 0.005, 0.5, 10, 10));
    let cap = store.insert(make_disk(0.0, 0.075, 20, 1));
    assert_eq!(spoke, again);
    assert_ne!(spoke, cap);
    assert_eq!(store.len(), 2);
}
