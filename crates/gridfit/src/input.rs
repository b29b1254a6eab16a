//! Line-oriented reading of interactive requests.
//!
//! Malformed lines are reported on the output and skipped, so only valid
//! values ever reach the session.

use std::io::{self, BufRead, Write};

use gridfit_core::{CharacterGrid, Pid};
use tracing::warn;

const SIZE_PROMPT: &str = "size: ";
const PID_PROMPT: &str = "PID: ";

/// Prompts for and yields requested grids until end of input.
pub struct RequestStream<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> RequestStream<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    /// Next valid grid, or `None` at end of input.
    pub fn next_grid(&mut self) -> io::Result<Option<CharacterGrid>> {
        loop {
            let Some(line) = prompt_line(&mut self.input, &mut self.output, SIZE_PROMPT)? else {
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }

            match line.parse::<CharacterGrid>() {
                Ok(grid) => {
                    writeln!(self.output, "received: {}", grid)?;
                    return Ok(Some(grid));
                }
                Err(e) => {
                    warn!(event = "cli.input.size_rejected", line = %line, error = %e);
                    writeln!(self.output, "invalid size '{}': {}", line, e)?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Iterator for RequestStream<R, W> {
    type Item = io::Result<CharacterGrid>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_grid().transpose()
    }
}

/// Prompt until a valid PID is entered, or `None` at end of input.
pub fn read_pid<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<Pid>> {
    loop {
        let Some(line) = prompt_line(input, output, PID_PROMPT)? else {
            return Ok(None);
        };
        if line.is_empty() {
            continue;
        }

        match line.parse::<Pid>() {
            Ok(pid) => {
                writeln!(output, "received: {}", pid)?;
                return Ok(Some(pid));
            }
            Err(e) => writeln!(output, "invalid PID: {}", e)?,
        }
    }
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: u16, rows: u16) -> CharacterGrid {
        CharacterGrid::new(columns, rows).unwrap()
    }

    #[test]
    fn test_stream_yields_valid_sizes_in_order() {
        let input = "100x30\n80x24\n80x24\n";
        let stream = RequestStream::new(input.as_bytes(), Vec::new());

        let grids: Vec<CharacterGrid> = stream.map(|r| r.unwrap()).collect();
        assert_eq!(grids, vec![grid(100, 30), grid(80, 24), grid(80, 24)]);
    }

    #[test]
    fn test_stream_skips_malformed_lines() {
        let input = "wide\n0x24\n\n120 x 40\n";
        let mut output = Vec::new();
        let grids: Vec<CharacterGrid> = RequestStream::new(input.as_bytes(), &mut output)
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(grids, vec![grid(120, 40)]);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("invalid size 'wide'"));
        assert!(text.contains("invalid size '0x24'"));
        assert!(text.contains("received: 120x40"));
    }

    #[test]
    fn test_stream_prompts_and_echoes() {
        let mut output = Vec::new();
        let mut stream = RequestStream::new("80x24\n".as_bytes(), &mut output);

        assert_eq!(stream.next_grid().unwrap(), Some(grid(80, 24)));
        assert_eq!(stream.next_grid().unwrap(), None);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("size: received: 80x24\n"));
    }

    #[test]
    fn test_read_pid_retries_until_valid() {
        let mut output = Vec::new();
        let pid = read_pid(&mut "abc\n0\n4321\n".as_bytes(), &mut output).unwrap();

        assert_eq!(pid, Some(Pid::from_raw(4321)));
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("invalid PID").count(), 2);
        assert!(text.contains("received: 4321"));
    }

    #[test]
    fn test_read_pid_at_eof() {
        let mut output = Vec::new();
        assert_eq!(read_pid(&mut "".as_bytes(), &mut output).unwrap(), None);
    }
}
