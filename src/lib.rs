pub mod converter;
pub mod error;
pub mod reader;
pub mod record;
pub mod value_conversion;
pub mod writer;

// Re-export commonly used items for convenience
pub use converter::{ConversionSummary, SongConverter};
pub use error::{ConvertError, RecordError};
pub use record::{transform_record, Record, INTEGER_FIELDS, LIST_FIELDS};

use std::path::Path;

/// Input file read when no path is given
pub const DEFAULT_INPUT: &str = "Beatles_Songs.csv";

/// Output file written when no path is given
pub const DEFAULT_OUTPUT: &str = "songs.json";

/// Converts a song CSV file to a JSON file with default settings (no BOM)
pub fn convert_csv_to_json(
    input_path: &Path,
    output_path: &Path,
) -> Result<ConversionSummary, ConvertError> {
    SongConverter::new().convert(input_path, output_path)
}
