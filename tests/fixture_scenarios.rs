use chromakey::{chroma_key, Rgb, RgbImage};
use serde::Deserialize;

const SCENARIOS: &str = include_str!("data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    width: usize,
    height: usize,
    key: [u8; 3],
    threshold: f64,
    fg: Vec<[u8; 3]>,
    bg: Vec<[u8; 3]>,
    expected: Vec<[u8; 3]>,
}

fn image(pixels: &[[u8; 3]], width: usize, height: usize) -> RgbImage {
    let pixels = pixels.iter().copied().map(Rgb::from).collect();
    RgbImage::from_pixels(pixels, width, height).expect("fixture dimensions")
}

#[test]
fn scenarios_match_expected_output() {
    let scenarios: Vec<Scenario> =
        serde_json::from_str(SCENARIOS).expect("Failed to parse scenarios");
    assert!(!scenarios.is_empty());

    for sc in scenarios {
        let fg = image(&sc.fg, sc.width, sc.height);
        let bg = image(&sc.bg, sc.width, sc.height);
        let expected = image(&sc.expected, sc.width, sc.height);

        let out = chroma_key(&fg, &bg, Rgb::from(sc.key), sc.threshold)
            .unwrap_or_else(|err| panic!("{}: {err}", sc.name));
        assert_eq!(out, expected, "scenario {}", sc.name);
    }
}
