// Primitives for reading CSV files.

use std::io::Read;

use csv::Reader;

use crate::poll::{io_common::parse_setup_amount, *};

// The first line is the header.
const FIRST_DATA_LINE: usize = 2;

pub fn read_csv_roster(path: &str) -> PollResult<Vec<GameRecord>> {
    read_roster_records(open_reader(path)?)
}

pub fn read_csv_history(path: &str) -> PollResult<Vec<ParsedPlay>> {
    read_history_records(open_reader(path)?)
}

fn open_reader(path: &str) -> PollResult<Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(OpeningCsvSnafu { path })
}

fn read_roster_records<R: Read>(rdr: Reader<R>) -> PollResult<Vec<GameRecord>> {
    let mut res: Vec<GameRecord> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + FIRST_DATA_LINE;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_roster_records: lineno: {:?} row: {:?}", lineno, line);
        let name = line.get(0).context(CsvLineTooShortSnafu { lineno })?;
        let genre = line.get(1).context(CsvLineTooShortSnafu { lineno })?;
        let setup_amount = line
            .get(2)
            .context(CsvLineTooShortSnafu { lineno })
            .and_then(|s| parse_setup_amount(s, lineno))?;
        res.push(GameRecord::new(name, genre, setup_amount));
    }
    Ok(res)
}

fn read_history_records<R: Read>(rdr: Reader<R>) -> PollResult<Vec<ParsedPlay>> {
    let mut res: Vec<ParsedPlay> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + FIRST_DATA_LINE;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_history_records: lineno: {:?} row: {:?}", lineno, line);
        let name = line.get(0).context(CsvLineTooShortSnafu { lineno })?;
        let date = line.get(1).context(CsvLineTooShortSnafu { lineno })?;
        res.push(ParsedPlay {
            name: name.to_string(),
            date: date.to_string(),
        });
    }
    Ok(res)
}
