/// XML descriptor loading.
///
/// A descriptor is any well-formed XML document. Every element carrying an
/// `Accelerator` attribute contributes one shortcut, in document order, no
/// matter how deeply it is nested:
///
/// ```xml
/// <KeyboardShortcuts>
///   <KeyboardShortcut CommandName="App.Commands.Save" Accelerator="Ctrl+S" />
///   <Group>
///     <KeyboardShortcut CommandName="App.Commands.Open" Accelerator="Ctrl+O" />
///   </Group>
/// </KeyboardShortcuts>
/// ```
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::UTF_8;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use super::entry::{ShortcutEntry, UNKNOWN_COMMAND};
use super::errors::ShortcutError;
use super::list::ShortcutList;

const ACCELERATOR_ATTR: &[u8] = b"Accelerator";
const COMMAND_NAME_ATTR: &[u8] = b"CommandName";

/// Loader options.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Only consider elements with this name. `None` matches any element.
    pub element: Option<String>,
}

impl LoadOptions {
    fn accepts(&self, name: &[u8]) -> bool {
        self.element
            .as_deref()
            .is_none_or(|wanted| wanted.as_bytes() == name)
    }
}

/// Read and parse a descriptor file.
///
/// # Errors
///
/// Returns `ShortcutError::Io` if the file cannot be read, and
/// `ShortcutError::Parse` if it cannot be decoded or is not well-formed XML.
pub fn load_file(path: &Path, opts: &LoadOptions) -> Result<ShortcutList, ShortcutError> {
    let bytes = fs::read(path)?;
    let content = decode(&bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read descriptor");
    let list = parse_str(&content, opts)?;
    debug!(path = %path.display(), count = list.len(), "parsed descriptor");
    Ok(list)
}

/// Decode file bytes to text.
///
/// A UTF-8, UTF-16LE or UTF-16BE byte order mark selects the encoding and is
/// dropped. Without one the bytes must be UTF-8.
fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, ShortcutError> {
    let (text, encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        return Err(ShortcutError::parse(format!(
            "Invalid character in the given encoding ({})",
            encoding.name()
        )));
    }
    Ok(text)
}

/// Parse a descriptor document held in memory.
///
/// # Errors
///
/// Returns `ShortcutError::Parse` for syntax errors, mismatched or unclosed
/// elements, a missing root element, multiple root elements, or text outside
/// the root element.
pub fn parse_str(xml: &str, opts: &LoadOptions) -> Result<ShortcutList, ShortcutError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);

    let mut list = ShortcutList::new();
    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            ShortcutError::parse(format!(
                "XML parse error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(ref e) => {
                check_root(&mut seen_root, &open, &reader, e)?;
                collect(e, opts, &reader, &mut list)?;
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(ref e) => {
                check_root(&mut seen_root, &open, &reader, e)?;
                collect(e, opts, &reader, &mut list)?;
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(ref t) if open.is_empty() => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(ShortcutError::parse(format!(
                        "Data at the root level is invalid (byte {})",
                        reader.buffer_position()
                    )));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(ShortcutError::parse(format!(
            "Unexpected end of file: element <{unclosed}> is not closed"
        )));
    }
    if !seen_root {
        return Err(ShortcutError::parse("Root element is missing"));
    }

    Ok(list)
}

fn check_root(
    seen_root: &mut bool,
    open: &[String],
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<(), ShortcutError> {
    if !open.is_empty() {
        return Ok(());
    }
    if *seen_root {
        return Err(ShortcutError::parse(format!(
            "There are multiple root elements: <{}> at byte {}",
            String::from_utf8_lossy(e.name().as_ref()),
            reader.buffer_position()
        )));
    }
    *seen_root = true;
    Ok(())
}

/// Push the element's shortcut onto `list` if it carries a non-empty accelerator.
fn collect(
    e: &BytesStart<'_>,
    opts: &LoadOptions,
    reader: &Reader<&[u8]>,
    list: &mut ShortcutList,
) -> Result<(), ShortcutError> {
    let mut command_name: Option<String> = None;
    let mut accelerator: Option<String> = None;

    // Attributes are always walked so duplicate or malformed ones fail the
    // document even on elements that are not shortcuts.
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            ShortcutError::parse(format!(
                "attribute error at byte {}: {err}",
                reader.buffer_position()
            ))
        })?;
        let key = attr.key.as_ref();
        if key != ACCELERATOR_ATTR && key != COMMAND_NAME_ATTR {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|err| {
                ShortcutError::parse(format!(
                    "invalid attribute value at byte {}: {err}",
                    reader.buffer_position()
                ))
            })?
            .into_owned();
        if key == ACCELERATOR_ATTR {
            accelerator = Some(value);
        } else {
            command_name = Some(value);
        }
    }

    if !opts.accepts(e.name().as_ref()) {
        return Ok(());
    }

    match accelerator {
        Some(accelerator) if !accelerator.is_empty() => {
            let command_name = command_name.unwrap_or_else(|| UNKNOWN_COMMAND.to_owned());
            trace!(%command_name, %accelerator, "shortcut");
            list.push(ShortcutEntry {
                command_name,
                accelerator,
            });
        }
        _ => {}
    }
    Ok(())
}
