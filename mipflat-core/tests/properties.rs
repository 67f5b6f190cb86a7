use mipflat_core::{PixelBuffer, reshape};

const SHAPES: &[(usize, usize)] = &[
    (1, 1),
    (1, 2),
    (1, 4),
    (1, 8),
    (2, 8),
    (1, 32),
    (4, 64),
    (16, 32),
    (8, 8),
    (32, 4),
];

fn filled(width: usize, height: usize, bytes_per_pixel: usize) -> PixelBuffer {
    let len = width * height * bytes_per_pixel;
    let data = (0..len).map(|i| (i * 7 % 256) as u8).collect();
    PixelBuffer::new(width, height, bytes_per_pixel, data).unwrap()
}

fn sorted(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.sort_unstable();
    bytes
}

#[test]
fn test_conservation() {
    for &(w, h) in SHAPES {
        for bpp in [1, 3, 4, 8] {
            for stop in [false, true] {
                let input = filled(w, h, bpp);
                let expected_bytes = sorted(input.data().to_vec());
                let out = reshape(input, stop).unwrap();

                assert_eq!(out.width() * out.height(), w * h);
                assert_eq!(out.bytes_per_pixel(), bpp);
                assert_eq!(out.data().len(), w * h * bpp);
                assert_eq!(out.data().len() % out.height(), 0);
                assert_eq!(sorted(out.into_data()), expected_bytes);
            }
        }
    }
}

#[test]
fn test_full_run_terminates_squared() {
    for &(w, h) in SHAPES {
        let out = reshape(filled(w, h, 2), false).unwrap();
        assert!(out.height() <= out.width(), "{w}x{h} -> {:?}", out.size());
    }
}

#[test]
fn test_early_stop_height_not_smaller() {
    for &(w, h) in SHAPES {
        let full = reshape(filled(w, h, 1), false).unwrap();
        let early = reshape(filled(w, h, 1), true).unwrap();
        assert!(early.height() >= full.height(), "{w}x{h}");
    }
}

#[test]
fn test_early_stop_at_most_one_step_short() {
    for &(w, h) in SHAPES {
        let full = reshape(filled(w, h, 1), false).unwrap();
        let early = reshape(filled(w, h, 1), true).unwrap();
        assert!(early.height() <= full.height() * 2, "{w}x{h}");
    }
}

#[test]
fn test_identity_idempotent() {
    for &(w, h) in SHAPES.iter().filter(|(w, h)| h <= w) {
        let input = filled(w, h, 4);
        let once = reshape(input.clone(), false).unwrap();
        let twice = reshape(once.clone(), false).unwrap();
        assert_eq!(once, input);
        assert_eq!(twice, once);
    }
}

#[test]
fn test_full_result_is_fixed_point() {
    for &(w, h) in SHAPES {
        let once = reshape(filled(w, h, 1), false).unwrap();
        let twice = reshape(once.clone(), false).unwrap();
        assert_eq!(twice, once);
    }
}
