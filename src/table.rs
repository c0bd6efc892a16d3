use std::fs::File;
use std::io;
use std::path::Path;
use csv;
use failure::Error;

use super::report::ReportRow;

/// One usable row of the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    pub nickname: String,
    pub url: String,
}

// accepted spellings for the two input columns, in priority order
const NICKNAME_COLUMNS: [&str; 2] = ["Nickname", "nickname"];
const URL_COLUMNS: [&str; 4] = ["Link", "link", "URL", "url"];

/// Read the input CSV of nicknames and video links. Rows without a
/// usable link value are skipped.
pub fn read_video_table(path: &Path) -> Result<Vec<VideoRecord>, Error> {
    let file = File::open(path)?;
    parse_video_table(file)
}

fn parse_video_table(input: impl io::Read) -> Result<Vec<VideoRecord>, Error> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let nickname_col = column_index(&headers, &NICKNAME_COLUMNS);
    let url_col = column_index(&headers, &URL_COLUMNS);

    let mut videos = Vec::new();
    for record in reader.records() {
        let record = record?;
        let url = url_col
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|url| !url.is_empty());
        let url = match url {
            Some(url) => url,
            None => continue,
        };
        let nickname = nickname_col
            .and_then(|idx| record.get(idx))
            .filter(|nickname| !nickname.is_empty())
            .unwrap_or("N/A");
        videos.push(VideoRecord {
            nickname: nickname.to_string(),
            url: url.to_string(),
        });
    }
    Ok(videos)
}

fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names.iter()
        .filter_map(|name| headers.iter().position(|header| header == *name))
        .next()
}

/// Write the report; the column order is fixed by `ReportRow`'s field
/// order and the header comes from its field names.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), Error> {
    let file = File::create(path)?;
    write_rows(file, rows)
}

fn write_rows(output: impl io::Write, rows: &[ReportRow]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(output);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
