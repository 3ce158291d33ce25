use std::collections::BTreeMap;
use std::io::{self, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use motionsdk_format::AnyElement;
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Separated values, one row per frame.
    Csv,
    /// One JSON object per frame.
    Json,
    /// One table per frame.
    Table,
}

/// Sample array with its wire type preserved for display.
#[derive(Serialize)]
#[serde(untagged)]
enum Values<'a> {
    Float(&'a [f32]),
    Integer(&'a [i16]),
}

impl<'a> Values<'a> {
    fn of(element: &'a AnyElement) -> Self {
        match element {
            AnyElement::Configurable(e) => Values::Float(e.values()),
            AnyElement::Preview(e) => Values::Float(e.values()),
            AnyElement::Sensor(e) => Values::Float(e.values()),
            AnyElement::Raw(e) => Values::Integer(e.values()),
        }
    }

    fn to_strings(&self) -> Vec<String> {
        match self {
            Values::Float(values) => values.iter().map(ToString::to_string).collect(),
            Values::Integer(values) => values.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Serialize)]
struct DeviceOutput<'a> {
    key: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    values: Values<'a>,
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    frame: usize,
    service: &'a str,
    devices: Vec<DeviceOutput<'a>>,
}

/// Writes decoded frames to a byte sink in the selected format.
pub struct FramePrinter<W> {
    out: W,
    format: OutputFormat,
    separator: String,
    frames: usize,
}

impl<W: Write> FramePrinter<W> {
    pub fn new(out: W, format: OutputFormat, separator: impl Into<String>) -> Self {
        Self {
            out,
            format,
            separator: separator.into(),
            frames: 0,
        }
    }

    /// Column header row. Only the separated format has one.
    pub fn header(&mut self, columns: &[String]) -> io::Result<()> {
        if self.format == OutputFormat::Csv {
            writeln!(self.out, "{}", columns.join(&self.separator))?;
        }
        Ok(())
    }

    pub fn frame(
        &mut self,
        elements: &[AnyElement],
        names: &BTreeMap<u32, String>,
    ) -> io::Result<()> {
        self.frames += 1;
        match self.format {
            OutputFormat::Csv => {
                let row: Vec<String> = elements
                    .iter()
                    .flat_map(|element| Values::of(element).to_strings())
                    .collect();
                writeln!(self.out, "{}", row.join(&self.separator))?;
            }
            OutputFormat::Json => {
                let out = FrameOutput {
                    frame: self.frames,
                    service: elements.first().map_or("", |e| e.service().name()),
                    devices: elements
                        .iter()
                        .map(|element| DeviceOutput {
                            key: element.key(),
                            name: names.get(&element.key()).map(String::as_str),
                            values: Values::of(element),
                        })
                        .collect(),
                };
                let line = serde_json::to_string(&out).map_err(io::Error::other)?;
                writeln!(self.out, "{line}")?;
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["KEY", "NAME", "VALUES"]);
                for element in elements {
                    table.add_row(vec![
                        element.key().to_string(),
                        names.get(&element.key()).cloned().unwrap_or_default(),
                        Values::of(element).to_strings().join(" "),
                    ]);
                }
                writeln!(self.out, "frame {}", self.frames)?;
                writeln!(self.out, "{table}")?;
            }
        }
        self.out.flush()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

/// Print a list of labelled fields.
pub fn print_fields(fields: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Csv => {
            for (name, value) in fields {
                println!("{name},{value}");
            }
        }
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(value.as_str())))
                .collect();
            println!("{}", serde_json::Value::Object(object));
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in fields {
                table.add_row(vec![name.to_string(), value.clone()]);
            }
            println!("{table}");
        }
    }
}
