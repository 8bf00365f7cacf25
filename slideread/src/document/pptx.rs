//! PPTX slide-deck text extraction.
//!
//! A PPTX file is a zip archive; each slide lives at
//! `ppt/slides/slideN.xml` and its visible text sits in `<a:t>` runs.

use super::TextSource;
use crate::error::ConvertError;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Text source for slide-deck (PPTX) documents.
pub struct SlideDeckSource {
    path: PathBuf,
}

impl SlideDeckSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for SlideDeckSource {
    fn extract(&self) -> Result<String, ConvertError> {
        let file = File::open(&self.path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| ConvertError::Document(format!("{}: {}", self.path.display(), e)))?;

        // Archive entry order is arbitrary; deck order comes from the
        // slide number in the part name.
        let mut slide_names: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| Some((slide_number(name)?, name.to_string())))
            .collect();
        slide_names.sort_by_key(|(number, _)| *number);

        let mut slides = Vec::new();
        for (_, name) in slide_names {
            let mut xml = String::new();
            archive
                .by_name(&name)
                .map_err(|e| ConvertError::Document(format!("{}: {}", name, e)))?
                .read_to_string(&mut xml)?;

            let text = slide_text(&xml)?;
            if !text.is_empty() {
                slides.push(text);
            }
        }

        Ok(slides.join("\n"))
    }
}

/// Parse the slide index out of a `ppt/slides/slideN.xml` entry name.
fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Collect one slide's text runs, paragraph breaks as newlines.
fn slide_text(xml: &str) -> Result<String, ConvertError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_run = false,
                b"a:p" => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ConvertError::Document(format!("slide XML: {}", e)))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ConvertError::Document(format!("slide XML: {}", e))),
            _ => {}
        }
    }

    Ok(out.trim().to_string())
}

/// Write a minimal PPTX archive with one slide per entry in `slides`.
#[cfg(test)]
pub(crate) fn write_test_deck(path: &std::path::Path, slides: &[&str]) {
    use std::io::Write;

    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    // Written in reverse to prove extraction orders by slide number,
    // not by archive position.
    for (i, body) in slides.iter().enumerate().rev() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree><p:sp><p:txBody>{}</p:txBody></p:sp></p:spTree></p:cSld>
</p:sld>"#,
            body
        );
        writer
            .start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}
