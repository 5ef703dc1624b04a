use std::{fmt, iter, ops::Range, str::FromStr};

use itertools::{iproduct, Itertools};
use log::{debug, trace};
use num::{bigint::ParseBigIntError, BigUint, ToPrimitive};
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
pub enum Axis {
    #[strum(serialize = "row")]
    Row,
    #[strum(serialize = "column")]
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rect {
        width: usize,
        height: usize,
    },
    Rotate {
        axis: Axis,
        index: usize,
        // kept whole, only the axis length decides what it reduces to
        amount: BigUint,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Rect { width, height } => write!(f, "rect {width}x{height}"),
            Command::Rotate {
                axis,
                index,
                amount,
            } => {
                let label = match axis {
                    Axis::Row => 'y',
                    Axis::Column => 'x',
                };
                write!(f, "rotate {axis} {label}={index} by {amount}")
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("no command provided")]
    Empty,

    #[error("unknown command `{found}`")]
    UnknownCommand { found: String, at: Range<usize> },

    #[error("unknown rotation axis `{found}`")]
    UnknownAxis { found: String, at: Range<usize> },

    #[error("expected {expected}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        at: Range<usize>,
    },

    #[error("`{found}` is not a number")]
    BadNumber {
        found: String,
        at: Range<usize>,
        #[source]
        source: ParseBigIntError,
    },

    #[error("`{command}` takes {expected} words, found {found}")]
    WrongTokenCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
}

impl CommandParseError {
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            CommandParseError::UnknownCommand { at, .. }
            | CommandParseError::UnknownAxis { at, .. }
            | CommandParseError::UnexpectedToken { at, .. }
            | CommandParseError::BadNumber { at, .. } => Some(at.clone()),
            CommandParseError::Empty | CommandParseError::WrongTokenCount { .. } => None,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Token<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Token<'a> {
    fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    fn sub(&self, start: usize, text: &'a str) -> Token<'a> {
        Token {
            text,
            offset: self.offset + start,
        }
    }

    fn number(&self) -> Result<BigUint, CommandParseError> {
        self.text
            .parse()
            .map_err(|source| CommandParseError::BadNumber {
                found: self.text.to_string(),
                at: self.span(),
                source,
            })
    }

    // Anything too big for a usize is off the screen anyway
    fn saturating_number(&self) -> Result<usize, CommandParseError> {
        Ok(self.number()?.to_usize().unwrap_or(usize::MAX))
    }

    fn unexpected(&self, expected: &'static str) -> CommandParseError {
        CommandParseError::UnexpectedToken {
            expected,
            found: self.text.to_string(),
            at: self.span(),
        }
    }
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    s.split_whitespace()
        .map(|text| Token {
            text,
            // split_whitespace yields subslices of s
            offset: text.as_ptr() as usize - s.as_ptr() as usize,
        })
        .collect()
}

fn parse_rect(args: &[Token]) -> Result<Command, CommandParseError> {
    let size = match args {
        [size] => size,
        _ => Err(CommandParseError::WrongTokenCount {
            command: "rect",
            expected: 2,
            found: args.len() + 1,
        })?,
    };

    let (width, height) = size
        .text
        .split_once('x')
        .ok_or_else(|| size.unexpected("<W>x<H>"))?;

    Ok(Command::Rect {
        width: size.sub(0, width).saturating_number()?,
        height: size.sub(width.len() + 1, height).saturating_number()?,
    })
}

fn parse_rotate(args: &[Token]) -> Result<Command, CommandParseError> {
    let (axis, target, by, amount) = match args {
        [axis, target, by, amount] => (axis, target, by, amount),
        _ => Err(CommandParseError::WrongTokenCount {
            command: "rotate",
            expected: 5,
            found: args.len() + 1,
        })?,
    };

    let axis = axis
        .text
        .parse::<Axis>()
        .map_err(|_| CommandParseError::UnknownAxis {
            found: axis.text.to_string(),
            at: axis.span(),
        })?;

    // The x=/y= label is decoration; either letter is accepted on either axis.
    let index = match target
        .text
        .strip_prefix("x=")
        .or_else(|| target.text.strip_prefix("y="))
    {
        Some(index) => target.sub(2, index),
        None => *target,
    };

    if by.text != "by" {
        Err(by.unexpected("`by`"))?
    }

    Ok(Command::Rotate {
        axis,
        index: index.saturating_number()?,
        amount: amount.number()?,
    })
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s);
        let (keyword, args) = tokens.split_first().ok_or(CommandParseError::Empty)?;

        match keyword.text {
            "rect" => parse_rect(args),
            "rotate" => parse_rotate(args),
            _ => Err(CommandParseError::UnknownCommand {
                found: keyword.text.to_string(),
                at: keyword.span(),
            }),
        }
    }
}

fn reduce(amount: &BigUint, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (amount % BigUint::from(len)).to_usize().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: usize,
    height: usize,
    // pixels[y][x]
    pixels: Vec<Vec<bool>>,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.iter() {
            for &lit in row {
                write!(f, "{}", if lit { '#' } else { '.' })?
            }
            writeln!(f)?
        }

        Ok(())
    }
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![vec![false; width]; height],
        }
    }

    pub fn rect(&mut self, width: usize, height: usize) {
        for (y, x) in iproduct!(0..height.min(self.height), 0..width.min(self.width)) {
            self.pixels[y][x] = true;
        }
    }

    pub fn rotate_row(&mut self, y: usize, amount: usize) {
        let (width, height) = (self.width, self.height);
        let Some(row) = self.pixels.get_mut(y) else {
            trace!("row {y} is off a {width}x{height} screen");
            return;
        };

        if let Some(shift) = amount.checked_rem(width) {
            row.rotate_right(shift);
        }
    }

    pub fn rotate_column(&mut self, x: usize, amount: usize) {
        if x >= self.width {
            trace!("column {x} is off a {}x{} screen", self.width, self.height);
            return;
        }

        if let Some(shift) = amount.checked_rem(self.height) {
            let mut column = self.pixels.iter().map(|row| row[x]).collect::<Vec<_>>();
            column.rotate_right(shift);
            for (row, lit) in self.pixels.iter_mut().zip(column) {
                row[x] = lit;
            }
        }
    }

    pub fn apply(&mut self, command: &Command) {
        debug!("{command}");

        match command {
            &Command::Rect { width, height } => self.rect(width, height),
            Command::Rotate {
                axis: Axis::Row,
                index,
                amount,
            } => self.rotate_row(*index, reduce(amount, self.width)),
            Command::Rotate {
                axis: Axis::Column,
                index,
                amount,
            } => self.rotate_column(*index, reduce(amount, self.height)),
        }
    }

    pub fn apply_cmd(&mut self, line: &str) -> Result<(), CommandParseError> {
        let command = line.parse::<Command>()?;
        self.apply(&command);
        Ok(())
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&lit| lit).count()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn bordered(&self) -> String {
        let edge = format!("|{}|", "-".repeat(self.width));

        iter::once(edge.clone())
            .chain(self.render().lines().map(|line| format!("|{line}|")))
            .chain(iter::once(edge))
            .join("\n")
    }
}

// Letters are easier to read with wide blocks
pub fn prettify(output: &str) -> String {
    output.replace('#', "██").replace('.', "░░")
}

#[derive(Error, Debug)]
#[error("line {line_number}")]
pub struct BadCommand {
    pub line_number: usize,
    pub line: String,
    #[source]
    pub source: CommandParseError,
}

impl BadCommand {
    pub fn report(&self) -> String {
        util::render_bad_input(&self.line, self.source.span(), self.source.to_string())
    }
}

// Stops at the first malformed line, blank ones are skipped
pub fn run_commands(
    input: impl Iterator<Item = impl Into<String>>,
    width: usize,
    height: usize,
) -> Result<Screen, BadCommand> {
    let mut screen = Screen::new(width, height);

    for (i, line) in input.enumerate() {
        let line: String = line.into();
        if line.trim().is_empty() {
            continue;
        }

        screen.apply_cmd(&line).map_err(|source| BadCommand {
            line_number: i + 1,
            line,
            source,
        })?;
    }

    Ok(screen)
}

pub fn get_lit_pixels(
    input: impl Iterator<Item = impl Into<String>>,
    width: usize,
    height: usize,
) -> Result<usize, BadCommand> {
    Ok(run_commands(input, width, height)?.lit_count())
}
