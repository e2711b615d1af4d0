pub mod export;
pub mod patterns;

pub use export::{handle_grid_csv, handle_legend_csv, handle_preview, PreviewQuery};
pub use export::{__path_handle_grid_csv, __path_handle_legend_csv, __path_handle_preview};
pub use patterns::{
    handle_create_from_image, handle_create_pattern, handle_get_pattern, ImagePatternQuery,
    PatternResponse, PixelPatternRequest,
};
pub use patterns::{
    __path_handle_create_from_image, __path_handle_create_pattern, __path_handle_get_pattern,
};
