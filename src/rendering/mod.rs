pub mod indexed_png;

pub use indexed_png::encode_indexed_png;
