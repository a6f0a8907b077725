//! Alignment paths from `LAshow4pathplot -a`.
//!
//! Each alignment is a block: a tab separated header
//!
//! ```text
//! aread  bread  ab  ae  bb  be  diffs
//! ```
//!
//! (numbers may carry `,` thousands separators), followed by the A band,
//! the symbol band and the B band, wrapped at a fixed width and interleaved
//! row by row: A, symbol, B, A, symbol, B, ...
//!
//! The bands extend past the aligned region. `[` and `]` mark the alignment
//! ends; where the window runs off the read, filler glyphs take their place.

use crate::libs::command::{path_dump, tool_exit_message, DumpSource, Handles};
use crate::libs::error::{DumpError, Result};
use crate::libs::model::{AlignmentPath, EditOp, SelfAlignment};
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// Glyphs used by the path dump. They differ between tool versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathGlyphs {
    /// Pads the bands beyond the read boundary
    pub filler: u8,
    /// Exact match in the symbol band
    pub matched: u8,
    pub gap: u8,
    pub open: u8,
    pub close: u8,
}

impl Default for PathGlyphs {
    fn default() -> Self {
        Self {
            filler: b'.',
            matched: b'|',
            gap: b'-',
            open: b'[',
            close: b']',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathHeader {
    pub aread: u64,
    pub bread: u64,
    pub alignment: SelfAlignment,
    pub diffs: i64,
}

/// One block with its bands reassembled, not yet trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBlock {
    pub header: PathHeader,
    pub aseq: String,
    pub symbols: String,
    pub bseq: String,
}

/// Header lines are the only tab separated lines of the dump.
fn parse_header(line: &str, read_id: u64) -> Result<Option<PathHeader>> {
    if !line.contains('\t') {
        return Ok(None);
    }

    let cleaned: String = line.chars().filter(|c| *c != ',' && *c != ' ').collect();
    let fields: Vec<&str> = cleaned.split('\t').filter(|f| !f.is_empty()).collect();
    if fields.len() != 7 {
        return Err(DumpError::malformed(
            Some(read_id),
            line,
            format!("expected 7 header fields, got {}", fields.len()),
        ));
    }

    let mut v = [0i64; 7];
    for (slot, field) in v.iter_mut().zip(&fields) {
        *slot = field.parse::<i64>().map_err(|_| {
            DumpError::malformed(Some(read_id), line, format!("non-integer header field `{}`", field))
        })?;
    }
    if v[0] < 0 || v[1] < 0 {
        return Err(DumpError::malformed(Some(read_id), line, "negative read ID"));
    }

    Ok(Some(PathHeader {
        aread: v[0] as u64,
        bread: v[1] as u64,
        alignment: SelfAlignment::new(v[2], v[3], v[4], v[5]),
        diffs: v[6],
    }))
}

struct BlockBuilder {
    header: PathHeader,
    bands: [String; 3],
    rows: usize,
    a_row_len: usize,
}

impl BlockBuilder {
    fn new(header: PathHeader) -> Self {
        Self {
            header,
            bands: Default::default(),
            rows: 0,
            a_row_len: 0,
        }
    }

    /// The next row is a symbol row.
    fn expects_symbols(&self) -> bool {
        self.rows % 3 == 1
    }

    /// Symbol rows are padded to the width of their A row, as trailing blanks
    /// may have been stripped.
    fn push_row(&mut self, row: &str) {
        match self.rows % 3 {
            0 => {
                self.a_row_len = row.len();
                self.bands[0].push_str(row);
            }
            1 => {
                self.bands[1].push_str(row);
                for _ in row.len()..self.a_row_len {
                    self.bands[1].push(' ');
                }
            }
            _ => self.bands[2].push_str(row),
        }
        self.rows += 1;
    }

    fn finish(self, read_id: u64) -> Result<PathBlock> {
        let unterminated = |message: String| DumpError::UnterminatedBlock {
            read_id,
            alignment: Some(self.header.alignment),
            message,
        };

        if self.rows == 0 || self.rows % 3 != 0 {
            return Err(unterminated(format!(
                "{} band lines, expected a positive multiple of 3",
                self.rows
            )));
        }
        let [aseq, symbols, bseq] = self.bands;
        if aseq.len() != symbols.len() || aseq.len() != bseq.len() {
            return Err(unterminated(format!(
                "band lengths differ: {} / {} / {}",
                aseq.len(),
                symbols.len(),
                bseq.len()
            )));
        }

        Ok(PathBlock {
            header: self.header,
            aseq,
            symbols,
            bseq,
        })
    }
}

/// Reads every block of a path dump, keeping only those `keep` accepts.
///
/// Rejected blocks are read past without buffering, so their band lines
/// are never checked.
pub fn parse_path_dump<R, F>(reader: R, read_id: u64, keep: F) -> Result<Vec<PathBlock>>
where
    R: BufRead,
    F: Fn(&PathHeader) -> bool,
{
    let mut blocks = Vec::new();
    let mut current: Option<BlockBuilder> = None;
    let mut in_block = false;

    for line in reader.lines() {
        let line = line.map_err(|e| match tool_exit_message(&e) {
            Some(message) => DumpError::UnterminatedBlock {
                read_id,
                alignment: current.as_ref().map(|b| b.header.alignment),
                message,
            },
            None => DumpError::Io(e),
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            // Under an A row of pure filler the symbol row is blank
            if let Some(builder) = current.as_mut() {
                if builder.expects_symbols() {
                    builder.push_row(line);
                }
            }
            continue;
        }

        if let Some(header) = parse_header(line, read_id)? {
            if let Some(builder) = current.take() {
                blocks.push(builder.finish(read_id)?);
            }
            in_block = true;
            if keep(&header) {
                current = Some(BlockBuilder::new(header));
            }
            continue;
        }

        if !in_block {
            return Err(DumpError::malformed(
                Some(read_id),
                line,
                "alignment band before any header",
            ));
        }
        if let Some(builder) = current.as_mut() {
            if !line.is_ascii() {
                return Err(DumpError::malformed(Some(read_id), line, "non-ASCII alignment band"));
            }
            builder.push_row(line);
        }
    }

    if let Some(builder) = current.take() {
        blocks.push(builder.finish(read_id)?);
    }

    Ok(blocks)
}

/// The `[start, end)` window of the bands that lies inside the alignment.
///
/// A bracket wins over filler. Without a bracket, blank padding at an end is
/// passed over, and if a run of columns where either band shows filler
/// follows, padding and run are cut together. An end without filler is kept
/// as is.
///
/// ```
/// use trdump::libs::path::{find_boundary, PathGlyphs};
/// let glyphs = PathGlyphs::default();
/// assert_eq!(find_boundary(b"...XYZ", b"...ABC", &glyphs), (3, 6));
/// assert_eq!(find_boundary(b"  ...XYZ", b"  ...ABC", &glyphs), (5, 8));
/// assert_eq!(find_boundary(b"GG[ACGT]CC", b"TT[ACCT]GA", &glyphs), (3, 7));
/// ```
pub fn find_boundary(aseq: &[u8], bseq: &[u8], glyphs: &PathGlyphs) -> (usize, usize) {
    let n = aseq.len().min(bseq.len());
    let (aseq, bseq) = (&aseq[..n], &bseq[..n]);
    let is_filler = |i: usize| aseq[i] == glyphs.filler || bseq[i] == glyphs.filler;
    let is_blank = |i: usize| aseq[i] == b' ' && bseq[i] == b' ';

    let start = match aseq
        .iter()
        .position(|&c| c == glyphs.open)
        .or_else(|| bseq.iter().position(|&c| c == glyphs.open))
    {
        Some(i) => i + 1,
        None => {
            let mut s = 0;
            while s < n && is_blank(s) {
                s += 1;
            }
            if s < n && is_filler(s) {
                while s < n && is_filler(s) {
                    s += 1;
                }
                s
            } else {
                0
            }
        }
    };

    let end = match aseq
        .iter()
        .rposition(|&c| c == glyphs.close)
        .or_else(|| bseq.iter().rposition(|&c| c == glyphs.close))
    {
        Some(i) => i,
        None => {
            let mut e = n;
            while e > start && is_blank(e - 1) {
                e -= 1;
            }
            if e > start && is_filler(e - 1) {
                while e > start && is_filler(e - 1) {
                    e -= 1;
                }
                e
            } else {
                n
            }
        }
    };

    (start, end.max(start))
}

/// Classifies each column on its own: match glyph, then a gap in A, then a gap in B.
pub fn convert_symbols(aseq: &[u8], bseq: &[u8], symbols: &[u8], glyphs: &PathGlyphs) -> Vec<EditOp> {
    symbols
        .iter()
        .zip(aseq.iter().zip(bseq))
        .map(|(&s, (&a, &b))| {
            if s == glyphs.matched {
                EditOp::Match
            } else if a == glyphs.gap {
                EditOp::Insertion
            } else if b == glyphs.gap {
                EditOp::Deletion
            } else {
                EditOp::Mismatch
            }
        })
        .collect()
}

/// Trims a block to its alignment window and encodes the edits.
pub fn build_path(block: &PathBlock, glyphs: &PathGlyphs) -> AlignmentPath {
    let (start, end) = find_boundary(block.aseq.as_bytes(), block.bseq.as_bytes(), glyphs);

    let window = |band: &str| band.as_bytes().get(start..end).unwrap_or_default().to_vec();
    let aseq = window(&block.aseq);
    let bseq = window(&block.bseq);
    let symbols = window(&block.symbols);

    AlignmentPath {
        ops: convert_symbols(&aseq, &bseq, &symbols, glyphs),
        aseq: String::from_utf8_lossy(&aseq).into_owned(),
        bseq: String::from_utf8_lossy(&bseq).into_owned(),
    }
}

/// Edit paths for the alignments of `read_id` that are in `cover`.
///
/// An empty cover set returns at once without running the path dump. Cover
/// alignments the dump does not show are missing from the result.
pub fn extract_paths(
    read_id: u64,
    cover: &HashSet<SelfAlignment>,
    handles: &Handles,
    source: &dyn DumpSource,
    glyphs: &PathGlyphs,
) -> Result<HashMap<SelfAlignment, AlignmentPath>> {
    if cover.is_empty() {
        return Ok(HashMap::new());
    }

    let reader = source.open(&path_dump(handles, read_id))?;
    let blocks = parse_path_dump(reader, read_id, |header| {
        if header.aread != read_id {
            log::warn!(
                "Skipping path block of read {} in the dump of read {}",
                header.aread,
                read_id
            );
            return false;
        }
        cover.contains(&header.alignment)
    })?;

    let paths: HashMap<SelfAlignment, AlignmentPath> = blocks
        .iter()
        .map(|block| (block.header.alignment, build_path(block, glyphs)))
        .collect();

    if paths.len() < cover.len() {
        log::debug!(
            "Read {}: {} of {} cover alignments have no path",
            read_id,
            cover.len() - paths.len(),
            cover.len()
        );
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::command::TextSource;
    use std::io::Cursor;

    /// Lays out one block the way the tool wraps it.
    fn wrap_block(header: &str, aseq: &str, symbols: &str, bseq: &str, width: usize) -> String {
        let mut text = format!("{}\n", header);
        let mut pos = 0;
        while pos < aseq.len() {
            let end = (pos + width).min(aseq.len());
            for band in [aseq, symbols, bseq] {
                text.push_str(&band[pos..end]);
                text.push('\n');
            }
            pos = end;
        }
        text
    }

    const HEADER: &str = "5\t5\t103\t111\t0\t9\t3";
    const ASEQ: &str = "...ACG-TACGT..";
    const SYMBOLS: &str = ":::|||*|*|*|::";
    const BSEQ: &str = "...ACGATTC-T..";

    fn handles() -> Handles {
        Handles::new("reads.db", "TAN.reads.las")
    }

    fn cover_of(alns: &[SelfAlignment]) -> HashSet<SelfAlignment> {
        alns.iter().copied().collect()
    }

    #[test]
    fn test_reassemble_wrapped_bands() {
        let text = wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 5);
        let blocks = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header.alignment, SelfAlignment::new(103, 111, 0, 9));
        assert_eq!(blocks[0].header.diffs, 3);
        assert_eq!(blocks[0].aseq, ASEQ);
        assert_eq!(blocks[0].symbols, SYMBOLS);
        assert_eq!(blocks[0].bseq, BSEQ);
    }

    #[test]
    fn test_no_filler_is_unchanged() {
        let aseq = "ACGTTGCAACGT";
        let bseq = "ACGATGCA-CGT";
        let symbols = "|||*||||*|||";
        for width in [1, 4, 5, 100] {
            let text = wrap_block(HEADER, aseq, symbols, bseq, width);
            let blocks = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap();
            let path = build_path(&blocks[0], &PathGlyphs::default());
            assert_eq!(path.aseq, aseq);
            assert_eq!(path.bseq, bseq);
            assert_eq!(path.ops.len(), aseq.len());
        }
    }

    #[test]
    fn test_trim_leading_filler() {
        let glyphs = PathGlyphs::default();
        assert_eq!(find_boundary(b"...XYZ", b"...ABC", &glyphs), (3, 6));
        // Filler in one band is enough
        assert_eq!(find_boundary(b"GGAXYZ", b"...ABC", &glyphs), (3, 6));
        assert_eq!(find_boundary(b"..AXYZ", b"...ABC", &glyphs), (3, 6));
        // Nothing but filler
        assert_eq!(find_boundary(b"....", b"....", &glyphs), (4, 4));
    }

    #[test]
    fn test_trim_trailing_filler() {
        let glyphs = PathGlyphs::default();
        assert_eq!(find_boundary(b"XYZ..", b"ABC..", &glyphs), (0, 3));
        assert_eq!(find_boundary(b"..XYZ..", b"..ABCG.", &glyphs), (2, 5));
    }

    #[test]
    fn test_trim_padding_before_filler() {
        let glyphs = PathGlyphs::default();
        assert_eq!(find_boundary(b"  ...ACGT", b"  ...ACGA", &glyphs), (5, 9));
        assert_eq!(find_boundary(b"ACGT...  ", b"ACGA...  ", &glyphs), (0, 4));
        assert_eq!(find_boundary(b" ..ACGT.. ", b" ..ACGA.. ", &glyphs), (3, 7));
        // Padding alone is not a read boundary
        assert_eq!(find_boundary(b"  ACGT  ", b"  ACGA  ", &glyphs), (0, 8));
        // Filler further in is not at the end
        assert_eq!(find_boundary(b"AC..GT", b"AC..GA", &glyphs), (0, 6));
    }

    #[test]
    fn test_trim_brackets() {
        let glyphs = PathGlyphs::default();
        assert_eq!(find_boundary(b"GG[ACGT]CC", b"TT[ACCT]GA", &glyphs), (3, 7));
        // Bracket at one end, filler at the other
        assert_eq!(find_boundary(b"...ACGT]CC", b"...ACCT]GA", &glyphs), (3, 7));
        assert_eq!(find_boundary(b"GG[ACGT..", b"TT[ACCT..", &glyphs), (3, 7));
    }

    #[test]
    fn test_filler_across_wrap() {
        // The leading run spans the first two physical rows
        let text = wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 2);
        let blocks = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap();
        let path = build_path(&blocks[0], &PathGlyphs::default());
        assert_eq!(path.aseq, "ACG-TACGT");
        assert_eq!(path.bseq, "ACGATTC-T");
        assert_eq!(path.fcigar(), "===I=X=D=");
    }

    #[test]
    fn test_blank_symbol_row_under_filler() {
        let text = "5\t5\t3\t6\t0\t3\t0\n...\n   \n...\nACG\n|||\nACG\n";
        let blocks = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap();
        assert_eq!(blocks[0].symbols, "   |||");
        let path = build_path(&blocks[0], &PathGlyphs::default());
        assert_eq!(path.aseq, "ACG");
        assert_eq!(path.fcigar(), "===");

        // Trailing blanks stripped from the symbol row, and a blank line between blocks
        let text = "5\t5\t3\t6\t0\t3\t0\n...\n\n...\nACG\n||\nACG\n\n5\t5\t1\t2\t0\t1\t0\nA\n|\nA\n";
        let blocks = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].symbols, "   || ");
        assert_eq!(build_path(&blocks[0], &PathGlyphs::default()).fcigar(), "==X");
        assert_eq!(blocks[1].aseq, "A");
    }

    #[test]
    fn test_convert_symbols() {
        let glyphs = PathGlyphs::default();
        let ops = convert_symbols(b"A-GTC", b"A-G-A", b"||*** ", &glyphs);
        assert_eq!(
            ops,
            vec![
                EditOp::Match,
                EditOp::Match,
                EditOp::Mismatch,
                EditOp::Deletion,
                EditOp::Mismatch
            ]
        );
        // A gap in A wins over a gap in B
        assert_eq!(convert_symbols(b"-", b"-", b"*", &glyphs), vec![EditOp::Insertion]);

        let first = convert_symbols(b"ACG-TACGT", b"ACGATTC-T", b"|||*|*|*|", &glyphs);
        for _ in 0..10 {
            assert_eq!(
                convert_symbols(b"ACG-TACGT", b"ACGATTC-T", b"|||*|*|*|", &glyphs),
                first
            );
        }
    }

    #[test]
    fn test_custom_glyphs() {
        let glyphs = PathGlyphs {
            filler: b'~',
            matched: b':',
            gap: b'_',
            ..Default::default()
        };
        let block = PathBlock {
            header: parse_header(HEADER, 5).unwrap().unwrap(),
            aseq: "~~AC_G".to_string(),
            symbols: "  ::x:".to_string(),
            bseq: "~~ACTG".to_string(),
        };
        let path = build_path(&block, &glyphs);
        assert_eq!(path.aseq, "AC_G");
        assert_eq!(path.fcigar(), "==I=");
    }

    #[test]
    fn test_header_with_separators() {
        let header = parse_header("12\t12\t1,203\t 4,870\t10\t3,702\t  311", 12)
            .unwrap()
            .unwrap();
        assert_eq!(header.aread, 12);
        assert_eq!(header.alignment, SelfAlignment::new(1203, 4870, 10, 3702));
        assert_eq!(header.diffs, 311);

        assert!(parse_header("ACGT", 12).unwrap().is_none());
    }

    #[test]
    fn test_malformed_header() {
        let err = parse_path_dump(Cursor::new("5\t5\t1\t2\n"), 5, |_| true).unwrap_err();
        match err {
            DumpError::MalformedDump { read_id, line, .. } => {
                assert_eq!(read_id, Some(5));
                assert_eq!(line, "5\t5\t1\t2");
            }
            other => panic!("Expected MalformedDump, got {:?}", other),
        }

        let err = parse_path_dump(Cursor::new("5\t5\t1\t2\tx\t4\t0\n"), 5, |_| true).unwrap_err();
        assert!(err.to_string().contains("non-integer header field `x`"));

        let err = parse_path_dump(Cursor::new("ACGT\n"), 5, |_| true).unwrap_err();
        assert!(err.to_string().contains("before any header"));
    }

    #[test]
    fn test_unterminated_block() {
        // Stream cut after the symbol row of a kept block
        let text = format!("{}\n...ACG\n:::|||\n", HEADER);
        let err = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap_err();
        match err {
            DumpError::UnterminatedBlock { read_id, alignment, .. } => {
                assert_eq!(read_id, 5);
                assert_eq!(alignment, Some(SelfAlignment::new(103, 111, 0, 9)));
            }
            other => panic!("Expected UnterminatedBlock, got {:?}", other),
        }

        // Header with no bands at all, followed by another block
        let text = format!("{}\n{}", HEADER, wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 5));
        let err = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap_err();
        assert!(matches!(err, DumpError::UnterminatedBlock { .. }));

        // Unequal band lengths
        let text = format!("{}\nACGT\n||||\nACG\n", HEADER);
        let err = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap_err();
        assert!(err.to_string().contains("band lengths differ"));
    }

    #[test]
    fn test_discarded_blocks_stay_in_sync() {
        let wanted = SelfAlignment::new(103, 111, 0, 9);
        // A truncated block that is not wanted, then the wanted one
        let mut text = String::from("5\t5\t40\t90\t0\t50\t7\nAAAA\n||||\n");
        text.push_str(&wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 3));
        text.push_str("5\t5\t200\t260\t100\t160\t2\nCCCC\n||||\nCCCC\n");

        let source = TextSource::new("", "", &text);
        let paths = extract_paths(5, &cover_of(&[wanted]), &handles(), &source, &PathGlyphs::default())
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[&wanted].fcigar(), "===I=X=D=");
    }

    #[test]
    fn test_empty_cover_skips_query() {
        let source = TextSource::new("", "", &wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 5));
        let paths =
            extract_paths(5, &HashSet::new(), &handles(), &source, &PathGlyphs::default()).unwrap();
        assert!(paths.is_empty());
        assert_eq!(source.opened(), 0);

        let wanted = SelfAlignment::new(103, 111, 0, 9);
        extract_paths(5, &cover_of(&[wanted]), &handles(), &source, &PathGlyphs::default()).unwrap();
        assert_eq!(source.opened(), 1);
    }

    #[test]
    fn test_absent_cover_key() {
        let source = TextSource::new("", "", &wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 5));
        let present = SelfAlignment::new(103, 111, 0, 9);
        let absent = SelfAlignment::new(1, 2, 3, 4);
        let paths = extract_paths(
            5,
            &cover_of(&[present, absent]),
            &handles(),
            &source,
            &PathGlyphs::default(),
        )
        .unwrap();
        assert!(paths.contains_key(&present));
        assert!(!paths.contains_key(&absent));
    }

    #[test]
    fn test_foreign_read_blocks_are_skipped() {
        let aln = SelfAlignment::new(103, 111, 0, 9);
        let mut text = wrap_block("6\t6\t103\t111\t0\t9\t3", "AAAA", "||||", "AAAA", 4);
        text.push_str(&wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 4));
        let source = TextSource::new("", "", &text);
        let paths =
            extract_paths(5, &cover_of(&[aln]), &handles(), &source, &PathGlyphs::default()).unwrap();
        assert_eq!(paths[&aln].aseq, "ACG-TACGT");
    }

    #[test]
    fn test_path_lengths_agree() {
        let text = wrap_block(HEADER, ASEQ, SYMBOLS, BSEQ, 4);
        let blocks = parse_path_dump(Cursor::new(text), 5, |_| true).unwrap();
        let path = build_path(&blocks[0], &PathGlyphs::default());
        assert_eq!(path.aseq.len(), path.bseq.len());
        assert_eq!(path.aseq.len(), path.ops.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_killed_tool() {
        use crate::libs::command::{Invocation, ProcessSource, QueryKind};

        let inv = Invocation {
            kind: QueryKind::Paths,
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "printf '5\\t5\\t3\\t6\\t0\\t3\\t0\\nACG\\n|||\\nACG\\n'; kill -9 $$".to_string(),
            ],
        };
        let reader = ProcessSource.open(&inv).unwrap();
        match parse_path_dump(reader, 5, |_| true).unwrap_err() {
            DumpError::UnterminatedBlock {
                read_id,
                alignment,
                message,
            } => {
                assert_eq!(read_id, 5);
                assert_eq!(alignment, Some(SelfAlignment::new(3, 6, 0, 3)));
                assert!(message.contains("signal: 9"));
            }
            other => panic!("Expected UnterminatedBlock, got {:?}", other),
        }
    }
}
