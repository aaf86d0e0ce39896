//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! input/output. Compressed input is read with a multi-member decoder, so bgzip
//! (BGZF) files, which are a series of concatenated gzip members, read the same
//! as regular gzip.

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::io::{self, BufWriter};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::CoverageError;

/// Check if a file is a gzipped by looking for the magic numbers
pub fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let mut file = File::open(file_path.as_ref())?;
    let mut buffer = [0; 2];
    match file.read_exact(&mut buffer) {
        Ok(()) => Ok(buffer == [0x1f, 0x8b]),
        // too short to be gzip
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Fail with [`CoverageError::SourceUnavailable`] if `path` does not exist.
pub fn ensure_exists(path: &Path) -> Result<(), CoverageError> {
    if !path.exists() {
        return Err(CoverageError::SourceUnavailable {
            path: path.display().to_string(),
            reason: "file does not exist".to_string(),
        });
    }
    Ok(())
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and
/// gzip-compressed input to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - The path to the file. Compression is detected from the file's magic
    ///   number, not its extension.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader, decompressing if needed.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let is_gzipped = is_gzipped_file(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }

    /// Return the first line that is not blank and does not start with `comment`, without
    /// the trailing newline; `None` if there is no such line.
    pub fn first_data_line(&self, comment: &str) -> io::Result<Option<String>> {
        let mut buf_reader = self.reader()?;
        let mut line = String::new();
        while buf_reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim_end();
            if !trimmed.is_empty() && !trimmed.starts_with(comment) {
                return Ok(Some(trimmed.to_string()));
            }
            line.clear();
        }
        Ok(None)
    }

    /// Detect the number of whitespace-delimited columns *from the first data line*.
    /// This is not robust against ragged delimited data formats.
    pub fn detect_columns(&self, comment: &str) -> Result<Option<usize>, CoverageError> {
        let line = self.first_data_line(comment)?;
        Ok(line.map(|x| x.split_whitespace().count()))
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file.
///
/// This struct is used to handle operations on an output file, such as writing to the file.
/// This abstracts writing both plaintext and gzip-compressed files.
pub struct OutputFile {
    destination: OutputDestination,
    pub header: Option<Vec<String>>,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - The path to the file. If the file extension is `.gz`, `OutputFile`
    ///   will automatically write gzip-compressed output.
    /// * `header` - An optional vector of strings representing commented header lines to be written to the file.
    pub fn new(filepath: impl Into<PathBuf>, header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
            header,
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout(header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::Stdout,
            header,
        }
    }

    /// Opens the file and returns a writer. If a header is set, it is written first,
    /// each line prefixed with `#`.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let mut writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => {
                let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
                if is_gzip {
                    Box::new(BufWriter::new(GzEncoder::new(
                        File::create(path)?,
                        Compression::default(),
                    )))
                } else {
                    Box::new(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        if let Some(entries) = &self.header {
            for entry in entries {
                writeln!(writer, "#{}", entry)?;
            }
        }
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{temp_depthfile, write_gzip};

    #[test]
    fn test_first_data_line_skips_comments() {
        let file = temp_depthfile();
        write_gzip(file.path(), "#CHROM\tPOS\ta.bam\n\nchr1\t10\t3\n").unwrap();
        let input = InputFile::new(file.path());
        assert_eq!(
            input.first_data_line("#").unwrap(),
            Some("chr1\t10\t3".to_string())
        );
        assert_eq!(input.detect_columns("#").unwrap(), Some(3));
    }

    #[test]
    fn test_plaintext_and_empty_input() {
        let file = temp_depthfile();
        std::fs::write(file.path(), "").unwrap();
        let input = InputFile::new(file.path());
        assert!(!is_gzipped_file(file.path()).unwrap());
        assert_eq!(input.first_data_line("#").unwrap(), None);

        std::fs::write(file.path(), "chr2 5 1 2 3\n").unwrap();
        assert_eq!(input.detect_columns("#").unwrap(), Some(5));
    }

    #[test]
    fn test_ensure_exists() {
        let result = ensure_exists(Path::new("does/not/exist.bgz"));
        assert!(matches!(
            result,
            Err(CoverageError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_gzip_output_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv.gz");
        {
            let output = OutputFile::new(&path, Some(vec!["region chr1:1-2".to_string()]));
            let mut writer = output.writer().unwrap();
            writeln!(writer, "chr1\t1\t0").unwrap();
        }
        assert!(is_gzipped_file(&path).unwrap());
        let input = InputFile::new(&path);
        assert_eq!(
            input.first_data_line("#").unwrap(),
            Some("chr1\t1\t0".to_string())
        );
    }
}
