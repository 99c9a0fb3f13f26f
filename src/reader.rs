use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::iter::Peekable;
use std::path::Path;

use getset::Getters;
use log::{debug, warn};
use niffler::compression::Format;

use crate::error::Result;

/// niffler needs this many bytes to sniff the compression format.
const SNIFF_LENGTH: u64 = 5;

/// Lines of a plain or compressed text file, terminators stripped.
pub struct VcfLines<R: BufRead> {
    inner: R,
}

impl VcfLines<Box<dyn BufRead>> {
    /// Open `path`, transparently decompressing gzip/bgzip content.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcf_flatten::reader::VcfLines;
    ///
    /// let plain = VcfLines::from_path("resources/example.vcf").unwrap();
    /// let gzipped = VcfLines::from_path("resources/example.vcf.gz").unwrap();
    /// assert!(plain.map(Result::unwrap).eq(gzipped.map(Result::unwrap)));
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader: Box<dyn Read> = if file.metadata()?.len() < SNIFF_LENGTH {
            Box::new(file)
        } else {
            let (reader, format) = niffler::get_reader(Box::new(file))?;
            debug!("{}: detected compression {:?}", path.display(), format);
            if has_compressed_suffix(path) != (format != Format::No) {
                warn!(
                    "{}: file name and content disagree about compression, reading it as {:?}",
                    path.display(),
                    format
                );
            }
            reader
        };
        Ok(Self::new(Box::new(BufReader::new(reader))))
    }
}

fn has_compressed_suffix(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("gz") | Some("bgz")
    )
}

impl<R: BufRead> VcfLines<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> Iterator for VcfLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.inner.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let len = line.trim_end_matches(&['\n', '\r'][..]).len();
                line.truncate(len);
                Some(Ok(line))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// Count the leading lines that start with `#`, stopping at the first data line.
///
/// # Examples
///
/// ```
/// use vcf_flatten::reader::{count_comments, VcfLines};
///
/// let lines = VcfLines::from_path("resources/example.vcf").unwrap();
/// assert_eq!(count_comments(lines).unwrap(), 4);
/// ```
pub fn count_comments<I>(lines: I) -> Result<usize>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut comments = 0;
    for line in lines {
        if !is_comment(&line?) {
            break;
        }
        comments += 1;
    }
    Ok(comments)
}

/// The leading comment block of a VCF file.
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct Header {
    /// Every leading `#` line, verbatim.
    lines: Vec<String>,
    /// Column names from the last comment line (conventionally `#CHROM ... FORMAT sample1 ...`),
    /// with the leading `#` removed. Empty if there is no such line.
    columns: Vec<String>,
}

impl Header {
    /// Consume the leading comment lines of `lines`, leaving it at the first data line.
    /// A read error is left in place for the caller to encounter.
    pub fn read<I>(lines: &mut Peekable<I>) -> Self
    where
        I: Iterator<Item = Result<String>>,
    {
        let mut comments = Vec::new();
        while let Some(Ok(line)) =
            lines.next_if(|line| matches!(line, Ok(line) if is_comment(line)))
        {
            comments.push(line);
        }
        Self::from_lines(comments)
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        let columns = match lines.last() {
            Some(last) if !last.starts_with("##") => last[1..]
                .trim_end()
                .split('\t')
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        };
        Self { lines, columns }
    }

    /// Number of comment lines, equal to [`count_comments`] over the same file.
    pub fn comment_count(&self) -> usize {
        self.lines.len()
    }
}

/// Header plus the data lines that follow it.
pub struct VcfReader<R: BufRead> {
    header: Header,
    lines: Peekable<VcfLines<R>>,
    line_no: usize,
}

impl VcfReader<Box<dyn BufRead>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(VcfLines::from_path(path)?))
    }
}

impl<R: BufRead> VcfReader<R> {
    pub fn new(lines: VcfLines<R>) -> Self {
        let mut lines = lines.peekable();
        let header = Header::read(&mut lines);
        debug!("read {} header lines", header.comment_count());
        Self {
            line_no: header.comment_count(),
            header,
            lines,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    /// 1-based line number and the line itself.
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            if is_comment(&line) {
                debug!("line {}: skipping comment after the header", self.line_no);
                continue;
            }
            return Some(Ok((self.line_no, line)));
        }
    }
}
