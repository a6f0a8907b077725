//! Tandem repeat intervals and self-alignment coordinates from `DBdump` / `LAdump`.
//!
//! Both dumps are line oriented. A marker line introduces a read, and every
//! following data line belongs to it until the next marker:
//!
//! ```text
//! R 5                     P 5 5 n >
//! T0 2 10 20 30 40        C 0 15 0 15
//! ```
//!
//! Lines of any other record type are skipped, so raw tool output and
//! streams carrying both dumps parse alike.

use crate::libs::command::{
    alignment_dump, tool_exit_message, tr_dump, DumpSource, Handles, ReadRange,
};
use crate::libs::error::{DumpError, Result};
use crate::libs::model::{sort_canonical, ReadDump, SelfAlignment, TandemRepeat};
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

/// The marker tag and data tag of one dump type.
#[derive(Debug, Clone, Copy)]
struct RecordKind {
    marker: &'static str,
    data: &'static str,
}

const TR_RECORDS: RecordKind = RecordKind {
    marker: "R",
    data: "T0",
};

const ALIGNMENT_RECORDS: RecordKind = RecordKind {
    marker: "P",
    data: "C",
};

/// Walks a dump and hands each data line of reads within `range` to `on_data`.
///
/// Stops reading at the first marker past `range.end`.
fn scan_dump<R, F>(reader: R, kind: RecordKind, range: ReadRange, mut on_data: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(u64, &[&str], &str) -> Result<()>,
{
    let mut current: Option<u64> = None;

    for line in reader.lines() {
        // A tool dying mid-stream leaves the last read cut short
        let line = line.map_err(|e| match tool_exit_message(&e) {
            Some(message) => DumpError::malformed(current, "", message),
            None => DumpError::Io(e),
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        if fields[0] == kind.marker {
            let id = fields
                .get(1)
                .ok_or_else(|| DumpError::malformed(current, &line, "read marker without an ID"))?
                .parse::<u64>()
                .map_err(|_| DumpError::malformed(current, &line, "non-integer read ID"))?;
            if let Some(prev) = current {
                if id < prev {
                    return Err(DumpError::malformed(
                        Some(prev),
                        &line,
                        format!("read {} appears after read {}", id, prev),
                    ));
                }
            }
            if id > range.end {
                break;
            }
            current = Some(id);
        } else if fields[0] == kind.data {
            let id = current.ok_or_else(|| {
                DumpError::malformed(None, &line, "data line before any read marker")
            })?;
            if id < range.start {
                continue;
            }
            on_data(id, &fields, &line)?;
        }
    }

    Ok(())
}

fn parse_fields(read_id: u64, fields: &[&str], line: &str) -> Result<Vec<i64>> {
    fields
        .iter()
        .map(|f| {
            f.parse::<i64>().map_err(|_| {
                DumpError::malformed(Some(read_id), line, format!("non-integer field `{}`", f))
            })
        })
        .collect()
}

/// Parses `DBdump -r -h -mtan` output into tandem repeats per read.
///
/// Reads whose `T0` count is zero get no entry.
pub fn parse_tr_dump<R: BufRead>(
    reader: R,
    range: ReadRange,
) -> Result<BTreeMap<u64, Vec<TandemRepeat>>> {
    let mut trs: BTreeMap<u64, Vec<TandemRepeat>> = BTreeMap::new();

    scan_dump(reader, TR_RECORDS, range, |read_id, fields, line| {
        // T0 <n> <b1> <e1> ... <bn> <en>
        let values = parse_fields(read_id, &fields[1..], line)?;
        let n = match values.first() {
            Some(&n) if n >= 0 => n,
            _ => {
                return Err(DumpError::malformed(
                    Some(read_id),
                    line,
                    "missing or negative interval count",
                ))
            }
        };
        let coords = values.len() - 1;
        if coords % 2 != 0 || (coords / 2) as i64 != n {
            return Err(DumpError::malformed(
                Some(read_id),
                line,
                format!("{} intervals announced, {} coordinates given", n, coords),
            ));
        }
        if n > 0 {
            let entry = trs.entry(read_id).or_default();
            for pair in values[1..].chunks(2) {
                entry.push(TandemRepeat::new(pair[0], pair[1]));
            }
        }
        Ok(())
    })?;

    Ok(trs)
}

/// Parses `LAdump -c` output into self alignments per read, in dump order.
pub fn parse_alignment_dump<R: BufRead>(
    reader: R,
    range: ReadRange,
) -> Result<BTreeMap<u64, Vec<SelfAlignment>>> {
    let mut alignments: BTreeMap<u64, Vec<SelfAlignment>> = BTreeMap::new();

    scan_dump(reader, ALIGNMENT_RECORDS, range, |read_id, fields, line| {
        // C <ab> <ae> <bb> <be>
        if fields.len() != 5 {
            return Err(DumpError::malformed(
                Some(read_id),
                line,
                format!("expected 5 fields, got {}", fields.len()),
            ));
        }
        let v = parse_fields(read_id, &fields[1..], line)?;
        alignments
            .entry(read_id)
            .or_default()
            .push(SelfAlignment::new(v[0], v[1], v[2], v[3]));
        Ok(())
    })?;

    Ok(alignments)
}

/// Joins both maps into one `ReadDump` per read, ascending by ID.
pub fn merge_dumps(
    mut trs: BTreeMap<u64, Vec<TandemRepeat>>,
    mut alignments: BTreeMap<u64, Vec<SelfAlignment>>,
) -> Vec<ReadDump> {
    let ids: BTreeSet<u64> = trs.keys().chain(alignments.keys()).copied().collect();

    ids.into_iter()
        .map(|id| {
            let mut alns = alignments.remove(&id).unwrap_or_default();
            sort_canonical(&mut alns);
            ReadDump {
                id,
                trs: trs.remove(&id).unwrap_or_default(),
                alignments: alns,
            }
        })
        .collect()
}

/// Loads every read in `[start, end]` that has tandem repeats or self alignments.
pub fn load_range(
    start: u64,
    end: u64,
    handles: &Handles,
    source: &dyn DumpSource,
) -> Result<Vec<ReadDump>> {
    let range = ReadRange::new(start, end)?;

    let trs = parse_tr_dump(source.open(&tr_dump(handles, range))?, range)?;
    let alignments = parse_alignment_dump(source.open(&alignment_dump(handles, range))?, range)?;
    let dumps = merge_dumps(trs, alignments);

    log::debug!(
        "Loaded {} reads, {} TRs, {} alignments for reads {}",
        dumps.len(),
        dumps.iter().map(|d| d.trs.len()).sum::<usize>(),
        dumps.iter().map(|d| d.alignments.len()).sum::<usize>(),
        range
    );
    Ok(dumps)
}

/// Loads a single read. A read without data is an empty `ReadDump`.
pub fn load_single(read_id: u64, handles: &Handles, source: &dyn DumpSource) -> Result<ReadDump> {
    let range = ReadRange::single(read_id);

    let trs = parse_tr_dump(source.open(&tr_dump(handles, range))?, range)?;
    let alignments = parse_alignment_dump(source.open(&alignment_dump(handles, range))?, range)?;

    Ok(merge_dumps(trs, alignments)
        .into_iter()
        .find(|d| d.id == read_id)
        .unwrap_or_else(|| ReadDump::new(read_id)))
}
