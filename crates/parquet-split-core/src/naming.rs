//! Output naming derived from input paths.

use std::borrow::Cow;
use std::path::Path;

/// Final path segment of the input, extension included.
pub fn input_file_name(path: &Path) -> Option<Cow<'_, str>> {
    path.file_name().map(|name| name.to_string_lossy())
}

/// Base name shared by the train and test outputs of one input.
///
/// The final path segment truncated at its first `.`, so `data/a.b.csv`
/// becomes `a`. A leading dot is part of the name: `.hidden.csv` becomes
/// `.hidden` and `.hidden` stays as is.
pub fn output_base_name(path: &Path) -> Option<String> {
    let name = input_file_name(path)?;
    let leading = usize::from(name.starts_with('.'));
    let base = match name[leading..].find('.') {
        Some(0) | None => &name[..],
        Some(end) => &name[..leading + end],
    };
    Some(base.to_string())
}
