use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::poll::{io_common::parse_setup_amount, *};

pub fn read_xlsx_roster(path: &str, worksheet_name: Option<&str>) -> PollResult<Vec<GameRecord>> {
    let wrange = get_range(path, worksheet_name)?;
    read_roster_range(&wrange)
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> PollResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

fn read_roster_range(wrange: &Range<DataType>) -> PollResult<Vec<GameRecord>> {
    let mut iter = wrange.rows();
    let header = iter.next();
    debug!("read_roster_range: header: {:?}", header);

    let mut res: Vec<GameRecord> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // Excel rows start at 1 and the first one is the header.
        let lineno = idx + 2;
        debug!("read_roster_range: lineno: {:?} row: {:?}", lineno, row);
        if row.iter().all(|c| *c == DataType::Empty) {
            continue;
        }
        let name = read_cell(row.get(0), lineno)?;
        let genre = read_cell(row.get(1), lineno)?;
        let setup_amount = parse_setup_amount(&read_cell(row.get(2), lineno)?, lineno)?;
        res.push(GameRecord::new(name.trim(), genre.trim(), setup_amount));
    }
    Ok(res)
}

fn read_cell(cell: Option<&DataType>, lineno: usize) -> PollResult<String> {
    match cell {
        Some(DataType::String(s)) => Ok(s.clone()),
        Some(DataType::Int(i)) => Ok(i.to_string()),
        // Whole numbers are stored as floats by most spreadsheet tools.
        Some(DataType::Float(f)) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        Some(DataType::Float(f)) => Ok(f.to_string()),
        Some(DataType::Empty) => Ok("".to_string()),
        None => CsvLineTooShortSnafu { lineno }.fail(),
        Some(x) => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}
