//! Runs one preview frame over a small bracket scene and prints the plan.
//!
//! Run with `cargo run -p maquette-csg --example preview_pipeline`.
//! Set `RUST_LOG=debug` to watch the individual passes.

use maquette_csg::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let scene = bracket();
    let pipeline = Pipeline::new();
    let frame = pipeline.frame(&scene, &BuildOptions::default())?;

    println!(
        "{} job(s), {} product(s)",
        frame.plan().len(),
        frame.plan().products().count()
    );
    for (i, product) in frame.plan().products().enumerate() {
        println!("product {i}:");
        for job in product {
            let name = frame
                .working()
                .source(job.node)
                .map_or("(synthesized)", |node| node.name.as_str());
            let verb = match job.role {
                JobRole::Intersect => "intersect",
                JobRole::Subtract => "subtract",
            };
            println!("  {verb:9} {name} (peel {} layer(s))", job.depth_complexity);
        }
    }
    Ok(())
}

/// Two fused blocks with a pair of bolt holes drilled through.
fn bracket() -> Vec<SceneNode> {
    let body = SceneNode::group(
        GroupKind::Union,
        vec![
            SceneNode::solid("base", Solid::cuboid(3.0, 1.0, 2.0)),
            SceneNode::solid("rib", Solid::cuboid(1.0, 2.0, 1.0))
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.5, 0.0))),
        ],
    );
    let holes = SceneNode::group(
        GroupKind::Union,
        vec![
            SceneNode::solid("bolt_a", Solid::cylinder(0.3, 3.0))
                .with_transform(Transform::from_translation(Vec3::new(1.0, 0.0, 0.0))),
            SceneNode::solid("bolt_b", Solid::cylinder(0.3, 3.0))
                .with_transform(Transform::from_translation(Vec3::new(-1.0, 0.0, 0.0))),
        ],
    );
    vec![SceneNode::group(GroupKind::Difference, vec![body, holes])]
}
