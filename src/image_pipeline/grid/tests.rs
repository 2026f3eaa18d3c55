use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::grid::{Channel, DecodedImage, Grid, PlaneLayout};

#[test]
fn test_from_vec_rejects_wrong_length() {
    let result = Grid::from_vec(3, 2, vec![0u8; 5]);

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::DimensionMismatch { expected: 6, actual: 5, .. }
    ));
}

#[test]
fn test_from_vec_overflowing_shape_is_invalid() {
    let result = Grid::from_vec(usize::MAX, 2, vec![0u8; 4]);

    assert!(matches!(result.unwrap_err(), PipelineError::InvalidDimensions(usize::MAX, 2)));
}

#[test]
fn test_rows_and_get_are_row_major() {
    let grid = Grid::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).unwrap();

    assert_eq!(grid.get(1, 0), 4);
    assert_eq!(grid.row(0), &[1, 2, 3]);
    assert_eq!(grid.rows().count(), 2);
}

#[test]
fn test_strided_takes_exact_output_size() {
    let grid = Grid::from_fn(8, 4, |row, col| (row * 10 + col) as u8);
    let sub = grid.strided(2, 4, 2, 2).unwrap();

    assert_eq!(sub.as_slice(), &[0, 4, 20, 24]);
}

#[test]
fn test_strided_out_of_range_is_invalid() {
    let grid = Grid::from_fn(4, 4, |_, _| 0u8);

    assert!(matches!(
        grid.strided(2, 2, 3, 2).unwrap_err(),
        PipelineError::InvalidDimensions(2, 3)
    ));
}

#[test]
fn test_quantize_rounds_and_clamps() {
    let grid = Grid::from_vec(4, 1, vec![-3.2, 12.5, 254.6, 300.0]).unwrap();

    assert_eq!(grid.quantize().as_slice(), &[0, 13, 255, 255]);
}

#[test]
fn test_yuv420_layout_checks_chroma_size() {
    let y = Grid::from_vec(4, 2, vec![0u8; 8]).unwrap();
    let cb = Grid::from_vec(2, 1, vec![0u8; 2]).unwrap();
    let cr_wrong = Grid::from_vec(4, 2, vec![0u8; 8]).unwrap();

    let result = DecodedImage::new(4, 2, PlaneLayout::Yuv420, vec![y.clone(), cb.clone(), cr_wrong]);
    assert!(matches!(result.unwrap_err(), PipelineError::DimensionMismatch { .. }));

    let image = DecodedImage::new(4, 2, PlaneLayout::Yuv420, vec![y, cb.clone(), cb]).unwrap();
    assert_eq!(image.plane(Channel::Cr).unwrap().width(), 2);
    assert_eq!(image.planes().len(), 3);
}

#[test]
fn test_channel_file_suffixes() {
    assert_eq!(Channel::Y.file_suffix(), "Y");
    assert_eq!(Channel::Cb.file_suffix(), "U");
    assert_eq!(Channel::Cr.file_suffix(), "V");
    assert_eq!(Channel::Cb.to_string(), "Cb");
}
