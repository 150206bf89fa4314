//! Styled terminal output for the dev runner.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

const BANNER: &str = r"
   ___   __   _  _  ____  ____  _  _
  / __) / _\ ( \( )(_  _)(  _ \( \/ )
 ( (_ \/    \/    /  )(   )   / )  /
  \___/\_/\_/\_)\_) (__) (_)\_)(__/
";

/// Console abstraction the supervisor writes through.
///
/// Generic over the sink so tests capture output in a buffer. Lines end with
/// an explicit carriage return: the command loop runs the terminal in raw
/// mode, where a bare newline does not return the cursor.
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    /// Console over the operator's terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    /// Console over an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Borrow the sink (tests inspect captured output through this).
    pub fn sink(&self) -> &W {
        &self.out
    }

    /// Neutral status line.
    pub fn info(&mut self, msg: &str) -> io::Result<()> {
        self.line(&format!("{} {msg}", "[info]".cyan()))
    }

    /// Warning line.
    pub fn warn(&mut self, msg: &str) -> io::Result<()> {
        self.line(&format!("{} {msg}", "[warn]".yellow()))
    }

    /// Error line.
    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        self.line(&format!("{} {msg}", "[error]".red()))
    }

    /// Success line.
    pub fn success(&mut self, msg: &str) -> io::Result<()> {
        self.line(&format!("{} {msg}", "[ok]".green()))
    }

    /// Inline prompt, no trailing newline.
    pub fn prompt(&mut self, msg: &str) -> io::Result<()> {
        write!(self.out, "{msg}")?;
        self.out.flush()
    }

    /// Clear the screen and home the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    /// Print the help banner with the command table.
    pub fn banner(&mut self) -> io::Result<()> {
        for row in BANNER.lines() {
            self.line(&format!("{}", row.magenta()))?;
        }
        self.line("  r  restart the application")?;
        self.line("  c  clear the screen")?;
        self.line("  i  version information")?;
        self.line("  q  quit the dev server")?;
        self.line("")
    }

    /// Print the framework version line.
    pub fn version(&mut self) -> io::Result<()> {
        self.line(&format!("gantry {}", gantry_lib::VERSION))
    }

    fn line(&mut self, msg: &str) -> io::Result<()> {
        write!(self.out, "{msg}\r\n")?;
        self.out.flush()
    }
}
