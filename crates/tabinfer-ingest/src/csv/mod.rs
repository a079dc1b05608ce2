//! CSV reading utilities.

mod reader;

pub use reader::{
    MAX_FILE_SIZE, check_encoding, check_file_size, read_csv_bytes, read_csv_file,
    validate_encoding, validate_frame_shape,
};
