/// Built-in demo scenes exercising the shape and animation engine
use std::time::Duration;

use nalgebra::{Point3, Vector3};
use shapemotion_core::{
    join_two, AnimationPath, Axis, Color, Mesh, PartOffset, Result, Rotation, RotationSpace, Scene,
    ShapeFactory, Timing,
};

/// Repeats for demos that should keep running until the user switches scene
const LOOPING: i64 = 10_000;

pub const SCENE_NAMES: &[&str] = &["spin", "orbit", "flight", "bird", "drones", "textured"];

/// Replace the scene contents with the named demo
pub fn load(name: &str, scene: &mut Scene, factory: &ShapeFactory) -> anyhow::Result<()> {
    scene.clear_shapes();
    match name {
        "spin" => spin(scene, factory)?,
        "orbit" => orbit(scene, factory)?,
        "flight" => flight(scene, factory)?,
        "bird" => bird(scene, factory)?,
        "drones" => drones(scene, factory)?,
        "textured" => textured(scene, factory)?,
        other => anyhow::bail!("unknown scene {:?}, expected one of {:?}", other, SCENE_NAMES),
    }
    Ok(())
}

/// Show a loaded mesh turning slowly
pub fn load_mesh(scene: &mut Scene, factory: &ShapeFactory, mesh: Mesh) -> Result<()> {
    scene.clear_shapes();
    let mut shape = factory.from_mesh("mesh", mesh);
    if let Some((min, max)) = shape.mesh().bounds() {
        // Fit into a 3-unit box centred on the origin
        let extent = (max - min).amax();
        let factor = if extent > 0.0 { 3.0 / extent } else { 1.0 };
        shape.transform.set_uniform_scale(factor);
        shape.transform.translation = -nalgebra::center(&min, &max).coords * factor;
    }
    let handle = scene.add_shape(shape);
    scene.animate(
        handle,
        AnimationPath::rotation_about(RotationSpace::World, Axis::Y, 360.0, looping(8000)?),
    )
}

fn looping(millis: u64) -> Result<Timing> {
    Timing::from_millis(millis)?.with_repeat(LOOPING)
}

fn spin(scene: &mut Scene, factory: &ShapeFactory) -> Result<()> {
    let faces = [
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
        Color::CYAN,
        Color::MAGENTA,
    ];
    let mut cube = factory.cube("cube", 1.5, &faces)?;
    cube.transform.set_trans_x(-1.8);
    cube.transform.set_rotation_by_euler_angles(30.0, 0.0, 20.0);

    let mut pyramid = factory.pyramid("pyramid", 4, 1.0, 1.5, &[Color::YELLOW])?;
    pyramid.transform.set_trans_x(1.8);

    let handles = scene.add_shapes([cube, pyramid]);
    // Spinning about its own tilted Y axis
    scene.animate(
        handles[0],
        AnimationPath::rotation_about(RotationSpace::Model, Axis::Y, 360.0, looping(4000)?),
    )?;
    scene.animate(
        handles[1],
        AnimationPath::rotation_about(RotationSpace::World, Axis::X, 180.0, looping(3000)?.reversing(true)),
    )?;
    scene.animate(
        handles[1],
        AnimationPath::scale(
            Vector3::new(1.5, 0.5, 1.5),
            Timing::from_millis(1500)?.with_repeat(LOOPING)?.reversing(true),
        ),
    )
}

fn orbit(scene: &mut Scene, factory: &ShapeFactory) -> Result<()> {
    let sun = factory.sphere("sun", 0.8, 16, 10, &[Color::YELLOW])?;
    let mut planet = factory.cube("planet", 0.5, &[Color::BLUE])?;
    planet.transform.set_trans_x(2.5);
    let mut comet = factory.tetrahedron("comet", 0.5, &[Color::RED, Color::GREEN, Color::CYAN, Color::WHITE])?;
    comet.transform.set_translation(1.5, -1.0, 0.0);

    let handles = scene.add_shapes([sun, planet, comet]);
    scene.animate(
        handles[1],
        AnimationPath::arc_around_axis(Point3::origin(), Point3::new(0.0, 1.0, 0.0), 360.0, looping(5000)?)?,
    )?;
    scene.animate(
        handles[1],
        AnimationPath::rotation_about(RotationSpace::Model, Axis::Y, 360.0, looping(1000)?),
    )?;
    scene.animate(
        handles[2],
        AnimationPath::spiral_around_axis(
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
            3.0,
            1.6,
            2.0,
            Timing::from_millis(6000)?.with_repeat(LOOPING)?.reversing(true),
        )?,
    )
}

fn flight(scene: &mut Scene, factory: &ShapeFactory) -> Result<()> {
    let mut plane = factory.airplane("plane", Color::GREY, Color::BLUE)?;
    plane.transform.set_uniform_scale(0.8);
    plane.transform.set_translation(-3.0, -1.0, 0.0);
    let start = Point3::new(-3.0, -1.0, 0.0);
    let control = Point3::new(0.0, 3.0, 0.0);
    let target = Point3::new(3.0, -1.0, 0.0);
    // Nose along the initial tangent of the curve
    plane.transform.align_with(Axis::X, control - start, false, 0.0)?;

    let handle = scene.add_shape(plane);
    let climb = Timing::from_millis(3000)?;
    scene.animate(handle, AnimationPath::bezier_quadratic(control, target, climb))?;
    // Pitch over the top so the nose follows the curve
    scene.animate(
        handle,
        AnimationPath::rotation_about(RotationSpace::World, Axis::Z, -90.0, climb),
    )?;

    // Then turn around and fly home
    let turn = Timing::from_millis(1000)?.with_start_delay(climb.end());
    let home = Timing::from_millis(3000)?.with_start_delay(turn.end());
    scene.animate(
        handle,
        AnimationPath::rotation_about(RotationSpace::World, Axis::Y, 180.0, turn),
    )?;
    scene.animate(handle, AnimationPath::linear(start, home))
}

fn bird(scene: &mut Scene, factory: &ShapeFactory) -> Result<()> {
    let parts = factory.bird("bird", Color::BLUE, Color::CYAN)?;
    let mut shape = parts.shape;
    shape.transform.set_translation(2.0, 0.0, 0.0);
    shape.transform.set_rotation_by_euler_angles(0.0, 90.0, 0.0);
    let handle = scene.add_shape(shape);

    let flap = looping(600)?;
    scene.animate(
        handle,
        AnimationPath::vertex_hinge(parts.left_wing.collect(), parts.left_hinge.0, parts.left_hinge.1, 35.0, flap)?,
    )?;
    scene.animate(
        handle,
        AnimationPath::vertex_hinge(parts.right_wing.collect(), parts.right_hinge.0, parts.right_hinge.1, 35.0, flap)?,
    )?;
    // Circle the origin, turning to keep facing along the circle
    scene.animate(
        handle,
        AnimationPath::arc_around_axis(Point3::origin(), Point3::new(0.0, 1.0, 0.0), 360.0, looping(6000)?)?,
    )?;
    scene.animate(
        handle,
        AnimationPath::rotation_about(RotationSpace::World, Axis::Y, 360.0, looping(6000)?),
    )
}

fn drones(scene: &mut Scene, factory: &ShapeFactory) -> Result<()> {
    let drone = factory.drone("drone", Color::GREY, Color::RED)?;
    let pad = factory.cuboid("pad", 1.2, 0.1, 1.2, &[Color::GREEN])?;
    let mut lander = join_two(
        "lander",
        &pad,
        PartOffset::identity(),
        &drone,
        PartOffset::translated(0.0, 0.2, 0.0).with_rotation(Rotation::euler(0.0, 45.0, 0.0)),
    )?;
    lander.transform.set_translation(0.0, -1.5, 0.0);

    let mut first = drone.clone();
    first.transform.set_translation(2.0, -1.0, 0.0);
    let mut second = drone;
    second.transform.set_translation(-2.0, 1.0, 0.0);
    second.transform.set_uniform_scale(0.7);

    let handles = scene.add_shapes([lander, first, second]);
    let climb = Timing::from_millis(5000)?.with_repeat(LOOPING)?.reversing(true);
    scene.animate(
        handles[1],
        AnimationPath::spiral_around_axis(Point3::origin(), Point3::new(0.0, 1.0, 0.0), 2.0, 0.5, 2.5, climb)?,
    )?;
    scene.animate(
        handles[1],
        AnimationPath::rotation_about(RotationSpace::Model, Axis::Y, 720.0, climb),
    )?;
    scene.animate(
        handles[2],
        AnimationPath::bezier_cubic(
            Point3::new(-2.0, 3.0, 2.0),
            Point3::new(2.0, 3.0, -2.0),
            Point3::new(2.0, 1.0, 0.0),
            Timing::from_millis(4000)?
                .with_start_delay(Duration::from_millis(500))
                .with_repeat(LOOPING)?
                .reversing(true),
        ),
    )
}

fn textured(scene: &mut Scene, factory: &ShapeFactory) -> Result<()> {
    let cube = factory.textured_cube("crate", 2.0, "checker")?;
    let mut floor = factory.textured_square("floor", "checker")?;
    floor.transform.set_uniform_scale(5.0);
    floor.transform.set_trans_y(-1.5);
    floor.transform.align_with(Axis::Z, Vector3::y(), false, 0.0)?;

    let handles = scene.add_shapes([cube, floor]);
    scene.animate(
        handles[0],
        AnimationPath::rotation(RotationSpace::World, Vector3::new(1.0, 1.0, 0.0), 360.0, looping(6000)?)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapemotion_core::{Texture, TextureAssets};

    fn assets() -> TextureAssets {
        let mut assets = TextureAssets::new();
        assets.insert(
            "checker",
            Texture::checkerboard(16, 4, Color::WHITE, Color::GREY).unwrap(),
        );
        assets
    }

    #[test]
    fn test_every_scene_loads_and_ticks() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let mut scene = Scene::new();
        for name in SCENE_NAMES {
            load(name, &mut scene, &factory).unwrap();
            assert!(!scene.shapes().is_empty(), "{} is empty", name);
            assert!(scene.is_animating(), "{} is static", name);
            for _ in 0..50 {
                scene.tick(Duration::from_millis(33)).unwrap();
            }
        }
    }

    #[test]
    fn test_unknown_scene_is_an_error() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let mut scene = Scene::new();
        assert!(load("nope", &mut scene, &factory).is_err());
    }

    #[test]
    fn test_textured_scene_needs_its_texture() {
        let assets = TextureAssets::new();
        let factory = ShapeFactory::new(&assets);
        let mut scene = Scene::new();
        assert!(load("textured", &mut scene, &factory).is_err());
    }

    #[test]
    fn test_flight_returns_home() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let mut scene = Scene::new();
        load("flight", &mut scene, &factory).unwrap();
        for _ in 0..(7100 / 20) {
            scene.tick(Duration::from_millis(20)).unwrap();
        }
        assert!(!scene.is_animating());
        let home = scene.shapes()[0].transform.translation;
        assert!((home - Vector3::new(-3.0, -1.0, 0.0)).norm() < 1e-3);
    }
}
