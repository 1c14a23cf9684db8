#![cfg(target_arch = "wasm32")]

use tulip_swing::config::SceneConfig;
use tulip_swing::model::{build_tulip, Part};
use tulip_swing::scene::Scene;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn tulip_builds_in_browser() {
    let tulip = build_tulip();
    assert_eq!(tulip.parts(Part::Petal).count(), 3);
    assert_eq!(tulip.parts(Part::Leaf).count(), 2);
    assert_eq!(tulip.parts(Part::Stem).count(), 1);
}

#[wasm_bindgen_test]
fn config_parses_in_browser() {
    let config = SceneConfig::from_yaml("swing:\n  sensitivity: 0.2").unwrap();
    assert_eq!(config.swing.sensitivity, 0.2);
}

#[wasm_bindgen_test]
fn scene_follows_pointer() {
    let mut scene = Scene::default();
    scene.resize(640, 480, 1.0);
    scene.pointer_move(0.0, 240.0);

    for _ in 0..10 {
        scene.tick(0.016);
    }
    assert!(scene.animation.swing().rotation < 0.0);
    assert!((scene.animation.swing().target + 0.1).abs() < 1e-6);
}
