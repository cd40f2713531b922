//! SpreadsheetML 2003 workbook export.
//!
//! One worksheet named `foods` with a header row. Numbers are typed `Number`,
//! everything else `String`; missing cells are written as empty `<Cell/>`
//! elements so column positions stay aligned.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use fdc_model::{CellValue, ConsolidatedTable, FOOD_ID_COLUMN};

use crate::error::{ExportError, Result};

/// SpreadsheetML namespace.
pub const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Name of the single worksheet.
pub const WORKSHEET_NAME: &str = "foods";

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> io::Result<()> {
    xml.write_event(event)
        .map_err(|e| io::Error::other(e.to_string()))
}

fn write_data_cell<W: Write>(
    xml: &mut Writer<W>,
    data_type: &str,
    text: &str,
) -> io::Result<()> {
    emit(xml, Event::Start(BytesStart::new("Cell")))?;
    let mut data = BytesStart::new("Data");
    data.push_attribute(("ss:Type", data_type));
    emit(xml, Event::Start(data))?;
    emit(xml, Event::Text(BytesText::new(text)))?;
    emit(xml, Event::End(BytesEnd::new("Data")))?;
    emit(xml, Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn write_cell<W: Write>(xml: &mut Writer<W>, cell: &CellValue) -> io::Result<()> {
    match cell {
        CellValue::Missing => emit(xml, Event::Empty(BytesStart::new("Cell"))),
        CellValue::Number(value) if value.is_finite() => {
            write_data_cell(xml, "Number", &value.to_string())
        }
        other => write_data_cell(xml, "String", &other.to_string()),
    }
}

/// Writes the workbook to `writer`.
pub fn write_spreadsheet_to<W: Write>(table: &ConsolidatedTable, writer: W) -> io::Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 1);

    emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(&mut xml, Event::PI(BytesPI::new(r#"mso-application progid="Excel.Sheet""#)))?;

    let mut workbook = BytesStart::new("Workbook");
    workbook.push_attribute(("xmlns", SPREADSHEET_NS));
    workbook.push_attribute(("xmlns:ss", SPREADSHEET_NS));
    emit(&mut xml, Event::Start(workbook))?;

    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", WORKSHEET_NAME));
    emit(&mut xml, Event::Start(worksheet))?;
    emit(&mut xml, Event::Start(BytesStart::new("Table")))?;

    emit(&mut xml, Event::Start(BytesStart::new("Row")))?;
    write_data_cell(&mut xml, "String", FOOD_ID_COLUMN)?;
    for label in table.labels() {
        write_data_cell(&mut xml, "String", label)?;
    }
    emit(&mut xml, Event::End(BytesEnd::new("Row")))?;

    for (food_id, cells) in table.rows() {
        emit(&mut xml, Event::Start(BytesStart::new("Row")))?;
        write_data_cell(&mut xml, "Number", &food_id.to_string())?;
        for cell in cells {
            write_cell(&mut xml, cell)?;
        }
        emit(&mut xml, Event::End(BytesEnd::new("Row")))?;
    }

    emit(&mut xml, Event::End(BytesEnd::new("Table")))?;
    emit(&mut xml, Event::End(BytesEnd::new("Worksheet")))?;
    emit(&mut xml, Event::End(BytesEnd::new("Workbook")))?;
    xml.into_inner().flush()
}

pub fn write_spreadsheet(table: &ConsolidatedTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    write_spreadsheet_to(table, BufWriter::new(file)).map_err(|e| ExportError::Xml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
