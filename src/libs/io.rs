use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens `stdin`, a plain file, or a gzipped file (by `.gz` extension).
///
/// ```
/// use std::io::{BufRead, Write};
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("ladump.txt");
/// std::fs::write(&path, "P 1 1 n >\nC 10 20 0 10\n").unwrap();
///
/// let reader = trdump::reader(path.to_str().unwrap()).unwrap();
/// assert_eq!(reader.lines().collect::<Vec<_>>().len(), 2);
/// ```
pub fn reader(input: &str) -> std::io::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("could not open {}: {}", path.display(), e))
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> std::io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}
