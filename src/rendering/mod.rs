pub mod export;
pub mod preview;

pub use export::{grid_csv, legend_csv};
pub use preview::{render_png, PreviewOptions};
