use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use crate::input::{json::JsonDocument, text::TextDocument};

pub mod json;
pub mod text;

/// A stat request, independent of the document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Query {
    Bus { name: String },
    Stop { name: String },
    /// Answered with a GeoJSON `FeatureCollection` of routes and served stops rather
    /// than an SVG drawing. A document's `render_settings` are accepted but ignored.
    Map,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// JSON when the input starts with `{`, text otherwise.
    #[default]
    Auto,
    Text,
    Json,
}

pub enum Document {
    Text(TextDocument),
    Json(JsonDocument),
}

impl Document {
    pub fn parse(input: &str, format: Format) -> Result<Self> {
        let format = match format {
            Format::Auto if input.trim_start().starts_with('{') => Format::Json,
            Format::Auto => Format::Text,
            f => f,
        };

        Ok(match format {
            Format::Json => Self::Json(input.parse()?),
            _ => Self::Text(input.parse()?),
        })
    }

    /// Reads a whole document from `path`, or from stdin when no path is given.
    pub fn read<P: AsRef<Path>>(path: Option<P>, format: Format) -> Result<Self> {
        let mut input = String::new();
        match path {
            Some(path) => {
                let path = path.as_ref();
                File::open(path)
                    .and_then(|mut f| f.read_to_string(&mut input))
                    .with_context(|| format!("reading {path:?}"))?;
            }
            None => {
                io::stdin()
                    .read_to_string(&mut input)
                    .context("reading stdin")?;
            }
        }

        Self::parse(&input, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("{\"base_requests\": [], \"stat_requests\": []}", true)]
    #[case("  \n{\"base_requests\": []}", true)]
    #[case("0\n0\n", false)]
    fn auto_detects_format(#[case] input: &str, #[case] is_json: bool) {
        let document = Document::parse(input, Format::Auto).unwrap();
        assert_eq!(matches!(document, Document::Json(_)), is_json);
    }

    #[rstest]
    fn explicit_format_is_respected() {
        assert!(Document::parse("{}", Format::Text).is_err());
    }
}
