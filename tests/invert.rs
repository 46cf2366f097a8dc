#![allow(missing_docs)]
//! Host-level tests for strips wired from the top of the cylinder down.

use led_corkscrew::color::{Gamma, RGB8};
use led_corkscrew::grid::Grid;
use led_corkscrew::{Corkscrew, CorkscrewInput, Gap};

fn forward_and_inverted(input: CorkscrewInput) -> (Corkscrew, Corkscrew) {
    (Corkscrew::new(input), Corkscrew::new(input.with_invert(true)))
}

fn distinct_image(width: u16, height: u16) -> Grid {
    let mut image = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            image.set(x, y, RGB8::new(x as u8 * 13, y as u8 * 11, 99));
        }
    }
    image
}

#[test]
fn inverted_tiles_mirror_forward_tiles() {
    let (mut forward, mut inverted) = forward_and_inverted(CorkscrewInput::new(19.0, 288));
    let last = forward.size() - 1;
    for index in 0..forward.size() {
        assert_eq!(
            inverted.at_wrap(index as f32),
            forward.at_wrap((last - index) as f32),
            "index {index}"
        );
    }
}

#[test]
fn inverted_screen_map_runs_backwards() {
    for input in [
        CorkscrewInput::new(19.0, 288),
        CorkscrewInput::new(2.0, 10).with_gap(Gap::new(3, 0.25)),
    ] {
        let (forward, inverted) = forward_and_inverted(input);
        let (forward_map, inverted_map) = (forward.to_screen_map(), inverted.to_screen_map());
        let last = forward_map.len() - 1;
        for (index, point) in inverted_map.iter() {
            assert_eq!(point.to_array(), forward_map[last - index].to_array(), "index {index}");
        }
    }
}

#[test]
fn inverted_strip_reads_the_same_image_backwards() {
    let (mut forward, mut inverted) = forward_and_inverted(CorkscrewInput::new(19.0, 288));
    let image = distinct_image(forward.cylinder_width(), forward.cylinder_height());
    forward.read_from(&image);
    inverted.read_from(&image);
    assert_eq!(forward.buffer(), inverted.buffer());

    let forward_strip = forward.strip_colors(Gamma::Linear);
    let inverted_strip = inverted.strip_colors(Gamma::Linear);
    assert!(forward_strip.iter().any(|pixel| *pixel != forward_strip[0]));
    let reversed: Vec<RGB8> = forward_strip.iter().rev().copied().collect();
    assert_eq!(inverted_strip, reversed);
}
