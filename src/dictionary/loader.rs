//! Line-oriented dictionary files.
//!
//! Each non-blank line holds `word frequency [pos]` separated by whitespace:
//!
//! ```text
//! 中国 3 ns
//! 北京大学 2053 nt
//! 云计算 5
//! ```
//!
//! Files are streamed into a [`TokenSink`] through a single `load` call. The
//! first malformed line ends the stream; the lines before it stay applied
//! and the error is returned once the sink has released its lock.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use log::debug;

use crate::dictionary::TokenSink;
use crate::error::{Result, SegDictError};
use crate::token::Token;

/// Load every line of `path` into `target`.
pub fn load_dictionary<S, P>(target: &S, path: P) -> Result<()>
where
    S: TokenSink,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = TokenReader::new(BufReader::new(file), path);
    target.load(&mut reader);
    debug!(
        "read {} tokens from '{}'",
        reader.tokens_read(),
        path.display()
    );
    reader.finish()
}

/// Streaming parser yielding one [`Token`] per dictionary line.
///
/// The iterator stops at the first error; [`TokenReader::finish`] reports it.
pub struct TokenReader<R> {
    lines: Lines<R>,
    path: PathBuf,
    line_no: usize,
    tokens_read: usize,
    error: Option<SegDictError>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap `reader`; `path` is only used in error messages.
    pub fn new<P: AsRef<Path>>(reader: R, path: P) -> Self {
        TokenReader {
            lines: reader.lines(),
            path: path.as_ref().to_path_buf(),
            line_no: 0,
            tokens_read: 0,
            error: None,
        }
    }

    /// Number of tokens yielded so far.
    pub fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    /// Consume the reader, returning the error that stopped it, if any.
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    self.error = Some(err.into());
                    return None;
                }
            };
            self.line_no += 1;

            let content = if self.line_no == 1 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };

            match parse_line(content) {
                Ok(Some(token)) => {
                    self.tokens_read += 1;
                    return Some(token);
                }
                Ok(None) => continue,
                Err(message) => {
                    self.error = Some(SegDictError::parse(&self.path, self.line_no, message));
                    return None;
                }
            }
        }
    }
}

/// Parse a single dictionary line. Blank lines yield `Ok(None)`.
///
/// ```
/// use segdict::dictionary::loader::parse_line;
/// use segdict::token::TokenSource;
///
/// let token = parse_line("中国 3 ns").unwrap().unwrap();
/// assert_eq!((token.text(), token.frequency(), token.pos()), ("中国", 3.0, "ns"));
/// assert!(parse_line("   ").unwrap().is_none());
/// assert!(parse_line("中国 many").is_err());
/// ```
pub fn parse_line(line: &str) -> std::result::Result<Option<Token>, String> {
    let mut fields = line.split_whitespace();
    let Some(word) = fields.next() else {
        return Ok(None);
    };

    let raw_freq = fields
        .next()
        .ok_or_else(|| format!("missing frequency for '{word}'"))?;
    let frequency: f64 = raw_freq
        .parse()
        .map_err(|_| format!("invalid frequency '{raw_freq}' for '{word}'"))?;
    if !frequency.is_finite() || frequency < 0.0 {
        return Err(format!(
            "frequency must be a finite, non-negative number, got '{raw_freq}'"
        ));
    }

    let pos = fields.next().unwrap_or("");
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field '{extra}' after part-of-speech tag"));
    }

    Ok(Some(Token::new(word, frequency, pos)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::token::TokenSource;

    #[test]
    fn test_parse_line_variants() {
        let token = parse_line("北京大学 2053 nt").unwrap().unwrap();
        assert_eq!(token, Token::new("北京大学", 2053.0, "nt"));

        let token = parse_line("\t云计算  5 ").unwrap().unwrap();
        assert_eq!(token.pos(), "");
        assert_eq!(token.frequency(), 5.0);

        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("中国").is_err());
        assert!(parse_line("中国 -1").is_err());
        assert!(parse_line("中国 NaN").is_err());
        assert!(parse_line("中国 inf").is_err());
        assert!(parse_line("中国 1 ns extra").is_err());
    }

    #[test]
    fn test_reader_skips_blank_lines_and_bom() {
        let input = "\u{feff}中国 3 ns\n\n北京 5\n";
        let tokens: Vec<Token> = TokenReader::new(Cursor::new(input), "dict.txt").collect();

        assert_eq!(
            tokens,
            vec![Token::new("中国", 3.0, "ns"), Token::untagged("北京", 5.0)]
        );
    }

    #[test]
    fn test_reader_stops_at_first_error() {
        let input = "中国 3\n北京 oops\n上海 4\n";
        let mut reader = TokenReader::new(Cursor::new(input), "dict.txt");

        let tokens: Vec<Token> = reader.by_ref().collect();
        assert_eq!(tokens, vec![Token::untagged("中国", 3.0)]);
        assert_eq!(reader.tokens_read(), 1);
        assert!(reader.next().is_none());

        match reader.finish() {
            Err(SegDictError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
