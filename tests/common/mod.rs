#![allow(dead_code)]

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use boxmark::geometry::Rect;

pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        failure_persistence: Some(Box::new(FileFailurePersistence::Off)),
        ..ProptestConfig::default()
    }
}

pub fn arb_rect() -> impl Strategy<Value = Rect> {
    (0..500i32, 0..500i32, 1..300i32, 1..300i32)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

pub fn arb_rects(max: usize) -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(arb_rect(), 1..=max)
}

/// Writes a blank PNG of the given size and returns its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(width, height)
        .save(&path)
        .expect("write test image");
    path
}
