use relcat_core::config::{CoverConfig, SiteLayout};
use relcat_core::cover::art::{ArtSpec, RADIUS_STEP, STROKE_COUNT};
use relcat_core::cover::write_cover;
use relcat_core::{encode_png, generate_cover, generate_cover_with_font, CaptionFont};

fn fallback_png(date: &str, title: &str) -> Vec<u8> {
    let config = CoverConfig::default();
    let image = generate_cover_with_font(date, title, &config, &CaptionFont::fallback());
    encode_png(&image).unwrap()
}

#[test]
fn same_inputs_encode_to_identical_bytes() {
    let first = fallback_png("20250816", "Chromatic Echo");
    let second = fallback_png("20250816", "Chromatic Echo");
    assert_eq!(first, second);

    let config = CoverConfig::default();
    let loaded_a = encode_png(&generate_cover("20250816", "Chromatic Echo", &config)).unwrap();
    let loaded_b = encode_png(&generate_cover("20250816", "Chromatic Echo", &config)).unwrap();
    assert_eq!(loaded_a, loaded_b);
}

#[test]
fn different_dates_change_the_image() {
    assert_ne!(
        fallback_png("20250816", "Echo"),
        fallback_png("20250817", "Echo")
    );
}

#[test]
fn base_radius_grows_by_fixed_step() {
    let spec = ArtSpec::derive("20250816", "Echo", 1024);
    assert_eq!(spec.strokes.len(), STROKE_COUNT);
    assert_eq!(spec.strokes[0].base_radius, 80.0);
    for pair in spec.strokes.windows(2) {
        assert_eq!(pair[1].base_radius - pair[0].base_radius, RADIUS_STEP);
    }
}

#[test]
fn hue_shifts_with_last_two_date_digits() {
    let spec = ArtSpec::derive("20250816", "Echo", 1024);
    let hues = spec.strokes.iter().map(|s| s.hue).collect::<Vec<_>>();
    assert_eq!(hues[0], 48);
    assert_eq!(hues[1], 63);
    assert_eq!(hues[23], (23 * 15 + 48) % 360);

    let plain = ArtSpec::derive("launch", "Echo", 1024);
    assert_eq!(plain.seed, 0);
    assert_eq!(plain.strokes[2].hue, 30);
}

#[test]
fn caption_joins_title_and_date() {
    let spec = ArtSpec::derive("20250816", "Chromatic Echo", 1024);
    assert_eq!(spec.caption, "Chromatic Echo — 20250816");
}

#[test]
fn canvas_is_square_with_caption_in_bottom_right() {
    let config = CoverConfig::default();
    let image = generate_cover_with_font("20250816", "Echo", &config, &CaptionFont::fallback());
    assert_eq!(image.dimensions(), (1024, 1024));

    // Caption band: right of center, above the 30px bottom margin.
    let caption_pixels = (900..1004)
        .flat_map(|x| (960..994).map(move |y| (x, y)))
        .filter(|&(x, y)| image.get_pixel(x, y).0 == [235, 235, 235])
        .count();
    assert!(caption_pixels > 0);

    // Nothing is drawn inside the bottom margin.
    assert!((0..1024).all(|x| image.get_pixel(x, 1020).0 == [0, 0, 0]));
}

#[test]
fn stroke_outline_is_drawn_at_first_vertex() {
    let config = CoverConfig::default();
    let image = generate_cover_with_font("20250816", "Echo", &config, &CaptionFont::fallback());
    let spec = ArtSpec::derive("20250816", "Echo", 1024);
    let (x, y) = spec.strokes[0].vertices(spec.center())[0];
    assert_ne!(image.get_pixel(x.round() as u32, y.round() as u32).0, [0, 0, 0]);
}

#[test]
fn very_long_title_stays_on_canvas() {
    let config = CoverConfig::default();
    let title = "An extremely long release title ".repeat(20);
    let image = generate_cover_with_font("20250816", &title, &config, &CaptionFont::fallback());
    // Left margin column stays clear of caption ink.
    assert!((940..1004).all(|y| image.get_pixel(5, y).0 == [0, 0, 0]));
}

#[test]
fn missing_preferred_font_falls_back() {
    let config = CoverConfig {
        font_path: Some("/nonexistent/DejaVuSans.ttf".into()),
        ..CoverConfig::default()
    };
    assert!(CaptionFont::load(&config).is_fallback());
    let image = generate_cover("20250816", "Echo", &config);
    assert_eq!(image.dimensions(), (1024, 1024));
}

#[test]
fn write_cover_names_file_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let layout = SiteLayout::new(dir.path().join("dist"), dir.path().join("site"));
    let config = CoverConfig {
        font_path: Some("/nonexistent/font.ttf".into()),
        ..CoverConfig::default()
    };

    let path = write_cover(&layout, "20250816", "Echo", &config).unwrap();
    assert_eq!(path, dir.path().join("dist").join("cover-20250816.png"));
    assert_eq!(
        std::fs::read(&path).unwrap(),
        fallback_png("20250816", "Echo")
    );
}

#[test]
fn write_cover_replaces_previous_cover_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let dist = dir.path().join("nested").join("dist");
    let layout = SiteLayout::new(&dist, dir.path().join("site"));
    let config = CoverConfig {
        font_path: Some("/nonexistent/font.ttf".into()),
        ..CoverConfig::default()
    };

    write_cover(&layout, "20250816", "First", &config).unwrap();
    let path = write_cover(&layout, "20250816", "Second", &config).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), fallback_png("20250816", "Second"));
    let entries = std::fs::read_dir(&dist).unwrap().count();
    assert_eq!(entries, 1);
}
