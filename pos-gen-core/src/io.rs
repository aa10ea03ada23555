use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{GenError, Result};

/// Reads a whole file into a `String`.
///
/// The path is kept in the error so callers can report which file failed.
pub(crate) fn read_to_string<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|source| GenError::Io { path: path.to_path_buf(), source })?;
	Ok(contents)
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	Ok(read_to_string(filename)?.lines().map(str::to_owned).collect())
}

/// Reads and deserializes a JSON file.
pub(crate) fn read_json<T: DeserializeOwned, P: AsRef<Path>>(filename: P) -> Result<T> {
	let contents = read_to_string(filename)?;
	Ok(serde_json::from_str(&contents)?)
}
