use approx::assert_relative_eq;
use glint::{Camera, Light, ReflectionMode, Scene, Settings, Sphere, Tracer};
use nalgebra::{Point3, Vector3};

const W: u32 = 60;
const H: u32 = 40;

fn centered_sphere(reflectivity: f32) -> Sphere {
    Sphere {
        position: Point3::new(0.0, 0.0, -2.5),
        radius: 1.0,
        reflectivity,
        ..Default::default()
    }
}

fn render(scene: &Scene, settings: Settings) -> glint::PixelBuffer {
    Tracer::new(settings).render(scene, &Camera::for_viewport(W, H), W, H)
}

#[test]
fn empty_scene_is_background_everywhere() {
    let scene = Scene::new().with_light(Light::default()).unwrap();
    let frame = render(&scene, Settings::default());

    assert_eq!(frame.as_slice().len(), (W * H * 4) as usize);
    for pixel in frame.as_slice().chunks_exact(4) {
        assert_eq!(pixel, [0.1, 0.1, 0.1, 1.0]);
    }
}

#[test]
fn center_pixel_hits_sphere_front() {
    let scene = Scene::new()
        .with_sphere(centered_sphere(0.0))
        .unwrap()
        .with_light(Light::default())
        .unwrap();

    let camera = Camera::for_viewport(W, H);
    let ray = camera.primary_ray(W / 2, H / 2, W, H);
    let hit = Tracer::default().trace_ray(&ray, &scene).unwrap();

    // 카메라는 원점, 구의 앞면은 z = -1.5
    assert_relative_eq!(hit.distance, 2.5 - 1.0, epsilon = 1e-6);

    let frame = render(&scene, Settings::default());
    let [r, g, b, a] = frame.pixel(W / 2, H / 2);
    assert_eq!(r, 1.0);
    assert_relative_eq!(g, 0.7, epsilon = 1e-6);
    assert_relative_eq!(b, 0.7, epsilon = 1e-6);
    assert_eq!(a, 1.0);

    // 모서리는 구를 벗어남
    assert_eq!(frame.pixel(0, 0), [0.1, 0.1, 0.1, 1.0]);
}

#[test]
fn full_mirror_without_bounces_is_black() {
    let scene = Scene::new()
        .with_sphere(centered_sphere(1.0))
        .unwrap()
        .with_light(Light::default())
        .unwrap();
    let settings = Settings {
        max_depth: 0,
        ..Default::default()
    };

    let frame = render(&scene, settings);
    assert_eq!(frame.pixel(W / 2, H / 2), [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(frame.pixel(0, H - 1), [0.1, 0.1, 0.1, 1.0]);
}

#[test]
fn bright_light_is_clamped() {
    let scene = Scene::new()
        .with_sphere(centered_sphere(0.0))
        .unwrap()
        .with_light(Light {
            intensity: 100.0,
            ..Default::default()
        })
        .unwrap();

    let frame = render(&scene, Settings::default());
    assert_eq!(frame.pixel(W / 2, H / 2), [1.0, 1.0, 1.0, 1.0]);
    assert!(frame
        .as_slice()
        .iter()
        .all(|channel| (0.0..=1.0).contains(channel)));
    assert!(frame.as_slice().chunks_exact(4).all(|pixel| pixel[3] == 1.0));
}

#[test]
fn demo_render_is_deterministic() {
    let scene = Scene::demo().unwrap();
    let first = render(&scene, Settings::default());
    let second = render(&scene, Settings::default());
    assert_eq!(first, second);

    // 배경이 아닌 픽셀이 있어야 함
    assert!(first
        .as_slice()
        .chunks_exact(4)
        .any(|pixel| pixel != [0.1, 0.1, 0.1, 1.0]));
}

#[test]
fn reflection_mode_changes_multi_light_reflections() {
    let scene = Scene::demo().unwrap();
    let per_light = render(&scene, Settings::default());
    let per_hit = render(
        &scene,
        Settings {
            reflection_mode: ReflectionMode::PerHit,
            ..Default::default()
        },
    );

    assert_ne!(per_light, per_hit);
}

#[test]
fn miss_ignores_lights() {
    let scene = Scene::new()
        .with_light(Light {
            intensity: 1000.0,
            color: Vector3::new(1.0, 0.0, 0.0),
            ..Default::default()
        })
        .unwrap();
    let tracer = Tracer::default();
    let ray = Camera::for_viewport(W, H).primary_ray(5, 7, W, H);
    assert_eq!(tracer.shade(&scene, &ray, 0), tracer.settings.background);
}

#[test]
fn render_to_writes_flipped_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    glint::render_to(&path).unwrap();

    let image = image::open(&path).unwrap().into_rgba8();
    assert_eq!(image.dimensions(), (glint::WIDTH, glint::HEIGHT));
    assert!(image.pixels().all(|p| p[3] == 255));

    let frame = Tracer::default().render(
        &Scene::demo().unwrap(),
        &Camera::for_viewport(glint::WIDTH, glint::HEIGHT),
        glint::WIDTH,
        glint::HEIGHT,
    );
    assert_eq!(image, frame.to_rgba8());
}
