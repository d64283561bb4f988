//! Validates window extraction, adjacency fitting, and decoding against
//! hand-computed alphabets

use ndarray::{Array2, array};
use wavetile::spatial::Direction;
use wavetile::{FitOptions, WindowEncoder};

fn checkerboard() -> Array2<char> {
    array![
        ['a', 'b', 'a', 'b'],
        ['b', 'a', 'b', 'a'],
        ['a', 'b', 'a', 'b'],
        ['b', 'a', 'b', 'a'],
    ]
}

fn horizontal_stripes() -> Array2<char> {
    array![
        ['a', 'a', 'a', 'a'],
        ['b', 'b', 'b', 'b'],
        ['a', 'a', 'a', 'a'],
        ['b', 'b', 'b', 'b'],
    ]
}

#[test]
fn test_uniform_sample_has_one_self_compatible_tile() {
    let sample = Array2::from_elem((4, 4), 'r');
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&sample, 2, FitOptions::default());

    assert_eq!(pattern.tile_count(), 1);
    assert_eq!(pattern.probabilities(), &[1.0]);
    for dir in Direction::ALL {
        assert_eq!(pattern.compatible(0, dir), &[0]);
    }
    assert!(!pattern.has_isolated_tile());
}

#[test]
fn test_checkerboard_edge_lists() {
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&checkerboard(), 2, FitOptions::default());

    // Nine corners: five of the a-topped window, four of the b-topped one
    assert_eq!(pattern.tile_count(), 2);
    assert!((pattern.probability(0) - 5.0 / 9.0).abs() < 1e-12);
    assert!((pattern.probability(1) - 4.0 / 9.0).abs() < 1e-12);

    // A one-cell shift in any direction lands on the other window
    for dir in Direction::ALL {
        assert_eq!(pattern.compatible(0, dir), &[1]);
        assert_eq!(pattern.compatible(1, dir), &[0]);
    }
}

#[test]
fn test_stripe_edges_with_horizontal_wrap() {
    let options = FitOptions {
        horizontal_wrap: true,
        ..FitOptions::default()
    };
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&horizontal_stripes(), 2, options);

    assert_eq!(pattern.tile_count(), 2);
    // Three row pairs by four wrapped columns: the a-over-b window appears
    // twice as often as b-over-a
    assert!((pattern.probability(0) - 8.0 / 12.0).abs() < 1e-12);
    assert!((pattern.probability(1) - 4.0 / 12.0).abs() < 1e-12);

    // Horizontal shifts re-match the same stripe window
    assert_eq!(pattern.compatible(0, Direction::Left), &[0]);
    assert_eq!(pattern.compatible(0, Direction::Right), &[0]);
    assert_eq!(pattern.compatible(1, Direction::Left), &[1]);
    assert_eq!(pattern.compatible(1, Direction::Right), &[1]);

    // Vertically the stripes must keep alternating
    assert_eq!(pattern.compatible(0, Direction::Down), &[1]);
    assert_eq!(pattern.compatible(0, Direction::Up), &[1]);
    assert_eq!(pattern.compatible(1, Direction::Down), &[0]);
    assert_eq!(pattern.compatible(1, Direction::Up), &[0]);
}

#[test]
fn test_adjacency_is_symmetric() {
    let sample = array![
        ['a', 'b', 'c', 'a', 'b'],
        ['c', 'a', 'b', 'c', 'a'],
        ['b', 'c', 'a', 'b', 'c'],
        ['a', 'a', 'b', 'b', 'c'],
        ['c', 'b', 'a', 'c', 'a'],
    ];
    let options = FitOptions {
        horizontal_wrap: true,
        vertical_wrap: true,
        rotate: true,
    };
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&sample, 3, options);

    for first in 0..pattern.tile_count() {
        for dir in Direction::ALL {
            for &second in pattern.compatible(first, dir) {
                assert!(
                    pattern.compatible(second, dir.inverse()).contains(&first),
                    "tile {second} follows {first} in {dir:?} but not the reverse"
                );
            }
        }
    }
}

#[test]
fn test_probabilities_normalize_to_one() {
    let samples = [checkerboard(), horizontal_stripes()];
    for rotate in [false, true] {
        for sample in &samples {
            let options = FitOptions {
                rotate,
                ..FitOptions::default()
            };
            let mut encoder = WindowEncoder::new();
            let pattern = encoder.fit(sample, 2, options);

            assert!(pattern.probabilities().iter().all(|&p| p > 0.0));
            let total: f64 = pattern.probabilities().iter().sum();
            assert!(
                (total - 1.0).abs() < 1e-12,
                "probabilities sum to {total} with rotate = {rotate}"
            );
        }
    }
}

#[test]
fn test_rotation_augmentation_expands_the_alphabet() {
    let options = FitOptions {
        rotate: true,
        ..FitOptions::default()
    };
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&horizontal_stripes(), 2, options);

    // The two stripe windows plus their two vertical-stripe quarter turns,
    // each seen nine times across 9 corners x 4 rotations
    assert_eq!(pattern.tile_count(), 4);
    for tile in 0..4 {
        assert!((pattern.probability(tile) - 0.25).abs() < 1e-12);
    }
}

#[test]
fn test_decode_reconstructs_wrapped_sample() {
    // All sixteen values distinct, so every wrapped window is unique
    let sample = Array2::from_shape_fn((4, 4), |(row, col)| row * 4 + col);
    let options = FitOptions {
        horizontal_wrap: true,
        vertical_wrap: true,
        rotate: false,
    };
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&sample, 2, options);
    assert_eq!(pattern.tile_count(), 16);

    // Wave holding each corner's window id tiles the original sample
    let wave = Array2::from_shape_fn((3, 3), |(row, col)| {
        let flat = vec![
            sample[(row, col)],
            sample[(row, col + 1)],
            sample[(row + 1, col)],
            sample[(row + 1, col + 1)],
        ];
        (0..encoder.window_count())
            .find(|&id| encoder.window(id) == Some(flat.as_slice()))
            .expect("every sample window is in the alphabet")
    });

    assert_eq!(encoder.decode(&wave), sample);
}

#[test]
fn test_exact_window_sample_is_a_single_tile() {
    let sample = array![[1, 2], [3, 4]];
    let mut encoder = WindowEncoder::new();
    let pattern = encoder.fit(&sample, 2, FitOptions::default());

    assert_eq!(pattern.tile_count(), 1);
    assert_eq!(pattern.probabilities(), &[1.0]);
    // Four distinct values cannot overlap themselves under any shift
    for dir in Direction::ALL {
        assert!(pattern.compatible(0, dir).is_empty());
    }
    assert!(pattern.has_isolated_tile());

    let wave = Array2::zeros((1, 1));
    assert_eq!(encoder.decode(&wave), sample);
}

#[test]
fn test_refit_replaces_the_alphabet() {
    let mut encoder = WindowEncoder::new();
    let first = encoder.fit(&checkerboard(), 2, FitOptions::default());
    assert_eq!(first.tile_count(), 2);

    let uniform = Array2::from_elem((3, 3), 'z');
    let second = encoder.fit(&uniform, 2, FitOptions::default());
    assert_eq!(second.tile_count(), 1);
    assert_eq!(encoder.window_count(), 1);
    assert_eq!(encoder.window(0), Some(['z'; 4].as_slice()));
}

#[test]
#[should_panic(expected = "at least 1")]
fn test_zero_window_size_is_rejected() {
    let mut encoder = WindowEncoder::new();
    let _ = encoder.fit(&checkerboard(), 0, FitOptions::default());
}

#[test]
#[should_panic(expected = "fitted")]
fn test_decode_requires_a_fit() {
    let encoder: WindowEncoder<char> = WindowEncoder::new();
    let _ = encoder.decode(&Array2::zeros((2, 2)));
}
