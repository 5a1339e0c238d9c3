#![cfg(feature = "rayon")]

use chromakey::kernel::rayon::{composite_par, image_to_hsv_par};
use chromakey::{image_to_hsv, pixel_to_hsv, Compositor, KeyConfig, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_image(rng: &mut StdRng, width: usize, height: usize) -> RgbImage {
    let key = Rgb::new(0, 255, 0);
    let pixels = (0..width * height)
        .map(|_| {
            if rng.random_bool(0.3) {
                key
            } else {
                Rgb::new(rng.random(), rng.random(), rng.random())
            }
        })
        .collect();
    RgbImage::from_pixels(pixels, width, height).unwrap()
}

#[test]
fn parallel_matches_sequential_composite() {
    let mut rng = StdRng::seed_from_u64(41);
    let fg = make_image(&mut rng, 97, 61);
    let bg = make_image(&mut rng, 97, 61);

    for threshold in [0.5, 1.0, 1.3, 2.0, 4.0] {
        let base_cfg = KeyConfig {
            key: Rgb::new(0, 255, 0),
            threshold,
            parallel: false,
        };
        let seq = Compositor::new(base_cfg).composite(&fg, &bg).unwrap();
        let par = Compositor::new(KeyConfig {
            parallel: true,
            ..base_cfg
        })
        .composite(&fg, &bg)
        .unwrap();
        assert_eq!(seq, par, "threshold {threshold}");
    }
}

#[test]
fn parallel_helpers_match_sequential_building_blocks() {
    let mut rng = StdRng::seed_from_u64(42);
    let fg = make_image(&mut rng, 33, 17);
    let bg = make_image(&mut rng, 33, 17);
    assert_eq!(image_to_hsv_par(&fg), image_to_hsv(&fg));

    let key = Rgb::new(0, 255, 0);
    let par = composite_par(&fg, &bg, pixel_to_hsv(key), 1.3).unwrap();
    let seq = chromakey::chroma_key(&fg, &bg, key, 1.3).unwrap();
    assert_eq!(par, seq);
}

#[test]
fn parallel_masks_match_sequential_masks() {
    let mut rng = StdRng::seed_from_u64(43);
    let fg = make_image(&mut rng, 20, 20);
    let cfg = KeyConfig {
        threshold: 1.4,
        ..KeyConfig::default()
    };
    let seq = Compositor::new(cfg).masks(&fg).unwrap();
    let par = Compositor::new(KeyConfig {
        parallel: true,
        ..cfg
    })
    .masks(&fg)
    .unwrap();
    assert_eq!(seq, par);
}
