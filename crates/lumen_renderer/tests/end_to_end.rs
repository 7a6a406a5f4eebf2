//! Whole-pipeline checks: scene description in, pixels out.

use lumen_core::{
    ImageBuffer, ImageResult, ImageSink, MaterialDescription, MaterialKind, PpmWriter,
    RenderSettings, SceneDescription, Shading,
};
use lumen_math::{Color, Vec3};
use lumen_renderer::{render, render_image, render_pixel, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SKY: Color = Color::new(150, 200, 255);

/// Counts pixels without storing them.
#[derive(Default)]
struct CountingSink {
    dimensions: Option<(u32, u32)>,
    pixels: u64,
    finished: bool,
}

impl ImageSink for CountingSink {
    fn begin(&mut self, width: u32, height: u32) -> ImageResult<()> {
        self.dimensions = Some((width, height));
        Ok(())
    }

    fn write_pixel(&mut self, _color: Color) -> ImageResult<()> {
        self.pixels += 1;
        Ok(())
    }

    fn finish(&mut self) -> ImageResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// One diffuse unit sphere three units in front of a camera at the origin.
fn single_sphere_scene() -> SceneDescription {
    SceneDescription::new(SceneDescription::reference().camera).with_sphere(
        Vec3::new(0.0, 0.0, -3.0),
        1.0,
        MaterialDescription::new(Color::new(200, 240, 255), 0.5, MaterialKind::Diffuse),
    )
}

#[test]
fn test_center_pixel_after_one_bounce_is_between_sky_and_black() {
    let settings = RenderSettings::default()
        .with_resolution(11, 11)
        .with_quality(1, 2);
    let world = World::from_description(&single_sphere_scene(), &settings).unwrap();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let color = render_pixel(&world, 5, 5, &settings, &mut rng);

        assert_ne!(color, SKY);
        assert_ne!(color, Color::new(200, 240, 255));
        for (channel, sky) in color.to_array().into_iter().zip(SKY.to_array()) {
            assert!(channel > 0 && channel < sky, "{color:?}");
        }
    }
}

#[test]
fn test_center_pixel_with_depth_one_is_black() {
    let settings = RenderSettings::default()
        .with_resolution(11, 11)
        .with_quality(1, 1);
    let world = World::from_description(&single_sphere_scene(), &settings).unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(render_pixel(&world, 5, 5, &settings, &mut rng), Color::BLACK);
}

#[test]
fn test_pixel_count_independent_of_samples_and_scene() {
    let scenes = [single_sphere_scene(), SceneDescription::reference()];

    for scene in &scenes {
        for samples in [1, 3] {
            let settings = RenderSettings::default()
                .with_resolution(7, 5)
                .with_quality(samples, 3);
            let world = World::from_description(scene, &settings).unwrap();

            let mut sink = CountingSink::default();
            let mut rng = StdRng::seed_from_u64(1);
            render(&world, &settings, &mut sink, &mut rng).unwrap();

            assert_eq!(sink.dimensions, Some((7, 5)));
            assert_eq!(sink.pixels, 35);
            assert!(sink.finished);
        }
    }
}

#[test]
fn test_reference_scene_renders_bounded_colors() {
    let settings = RenderSettings::default()
        .with_resolution(16, 9)
        .with_quality(2, 4)
        .with_seed(2024);
    let world = World::from_description(&SceneDescription::reference(), &settings).unwrap();

    let image = render_image(&world, &settings).unwrap();
    assert_eq!((image.width, image.height), (16, 9));

    // Every bounce halves the light, so nothing can outshine the sky
    for pixel in &image.pixels {
        assert!(pixel.r <= SKY.r && pixel.g <= SKY.g && pixel.b <= SKY.b);
    }

    // The terrain fills the bottom row, the top row sees open sky
    assert_ne!(image.get(8, 8), SKY);
    assert_eq!(image.get(0, 0), SKY);
}

#[test]
fn test_normal_shading_render() {
    let mut settings = RenderSettings::default()
        .with_resolution(11, 11)
        .with_quality(1, 4)
        .with_seed(3);
    settings.shading = Shading::Normals;
    let world = World::from_description(&single_sphere_scene(), &settings).unwrap();

    let image = render_image(&world, &settings).unwrap();
    let center = image.get(5, 5);
    // Facing the camera: normal leans toward +Z
    assert_ne!(center, SKY);
    assert!(center.b > 200);
    assert_eq!(image.get(0, 0), SKY);
}

#[test]
fn test_render_straight_to_ppm() {
    let settings = RenderSettings::default()
        .with_resolution(4, 3)
        .with_quality(1, 2);
    let world = World::from_description(&single_sphere_scene(), &settings).unwrap();

    let mut writer = PpmWriter::new(Vec::new());
    let mut rng = StdRng::seed_from_u64(8);
    render(&world, &settings, &mut writer, &mut rng).unwrap();
    assert_eq!(writer.written(), 12);

    let text = String::from_utf8(writer.into_inner()).unwrap();
    let parsed = lumen_core::read_ppm(text.as_bytes()).unwrap();
    assert_eq!((parsed.width, parsed.height), (4, 3));

    let mut again = ImageBuffer::default();
    let mut rng = StdRng::seed_from_u64(8);
    render(&world, &settings, &mut again, &mut rng).unwrap();
    assert_eq!(parsed, again);
}
