//! City file loading.
//!
//! Each non-blank line holds whitespace-separated integers: a label
//! (ignored beyond ordering) followed by the x and y coordinates. The
//! city id is the 1-based line position among non-blank lines. Columns
//! past the second coordinate are ignored.

use crate::error::{Result, TspError};
use crate::geometry::{Cities, City};
use std::path::Path;
use tracing::debug;

/// Reads and parses a city file.
pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Cities> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TspError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cities = parse_cities(&text)?;
    debug!(path = %path.display(), cities = cities.len(), "loaded city file");
    Ok(cities)
}

/// Parses city lines from text.
///
/// # Errors
///
/// [`TspError::Load`] naming the 1-based line number when a line has a
/// non-integer token or fewer than three integers.
pub fn parse_cities(text: &str) -> Result<Cities> {
    let mut locations = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| TspError::Load {
                    line: line_no,
                    message: format!("`{token}` is not an integer"),
                })
            })
            .collect::<Result<Vec<i64>>>()?;
        if values.len() < 3 {
            return Err(TspError::Load {
                line: line_no,
                message: "expected a label and two coordinates".into(),
            });
        }
        locations.push(City::new(values[1] as f64, values[2] as f64));
    }
    Ok(Cities::new(locations))
}
