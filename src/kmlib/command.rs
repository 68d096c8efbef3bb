use crate::kmlib::Error;
use std::{fmt, path::PathBuf, str::FromStr};

/// A resolved user action, one per input line.
///
/// Grammar (whitespace separated):
/// ```text
/// step | next | n
/// add
/// move-point I X Y      (alias mp)
/// move-centroid I X Y   (alias mc)
/// pin I C
/// unpin I
/// reset
/// load PATH
/// show
/// quit | exit
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Step,
    AddCentroid,
    MovePoint { index: usize, x: f64, y: f64 },
    MoveCentroid { index: usize, x: f64, y: f64 },
    Pin { index: usize, cluster: usize },
    Unpin { index: usize },
    Reset,
    Load(PathBuf),
    Show,
    Quit,
}

impl Action {
    /// None for blank lines and `#` comments
    pub fn parse_line(line: &str) -> Option<Result<Action, Error>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(line.parse())
    }
}

fn arg<T: FromStr>(parts: &[&str], pos: usize, line: &str) -> Result<T, Error> {
    parts
        .get(pos)
        .ok_or_else(|| Error::InvalidCommand(format!("missing argument in `{}`", line)))?
        .parse()
        .map_err(|_| Error::InvalidCommand(format!("bad argument `{}` in `{}`", parts[pos], line)))
}

fn arity(parts: &[&str], n: usize, line: &str) -> Result<(), Error> {
    if parts.len() != n + 1 {
        return Err(Error::InvalidCommand(format!(
            "`{}` takes {} arguments",
            line, n
        )));
    }
    Ok(())
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = parts.first() else {
            return Err(Error::InvalidCommand("empty command".to_string()));
        };

        let action = match name.to_ascii_lowercase().as_str() {
            "step" | "next" | "n" => {
                arity(&parts, 0, line)?;
                Action::Step
            }
            "add" => {
                arity(&parts, 0, line)?;
                Action::AddCentroid
            }
            "move-point" | "mp" => {
                arity(&parts, 3, line)?;
                Action::MovePoint {
                    index: arg(&parts, 1, line)?,
                    x: arg(&parts, 2, line)?,
                    y: arg(&parts, 3, line)?,
                }
            }
            "move-centroid" | "mc" => {
                arity(&parts, 3, line)?;
                Action::MoveCentroid {
                    index: arg(&parts, 1, line)?,
                    x: arg(&parts, 2, line)?,
                    y: arg(&parts, 3, line)?,
                }
            }
            "pin" => {
                arity(&parts, 2, line)?;
                Action::Pin {
                    index: arg(&parts, 1, line)?,
                    cluster: arg(&parts, 2, line)?,
                }
            }
            "unpin" => {
                arity(&parts, 1, line)?;
                Action::Unpin {
                    index: arg(&parts, 1, line)?,
                }
            }
            "reset" => {
                arity(&parts, 0, line)?;
                Action::Reset
            }
            "load" => {
                arity(&parts, 1, line)?;
                Action::Load(PathBuf::from(parts[1]))
            }
            "show" => Action::Show,
            "quit" | "exit" => Action::Quit,
            _ => return Err(Error::InvalidCommand(format!("unknown command `{}`", name))),
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Step => write!(f, "step"),
            Action::AddCentroid => write!(f, "add"),
            Action::MovePoint { index, x, y } => write!(f, "move-point {} {} {}", index, x, y),
            Action::MoveCentroid { index, x, y } => {
                write!(f, "move-centroid {} {} {}", index, x, y)
            }
            Action::Pin { index, cluster } => write!(f, "pin {} {}", index, cluster),
            Action::Unpin { index } => write!(f, "unpin {}", index),
            Action::Reset => write!(f, "reset"),
            Action::Load(path) => write!(f, "load {}", path.display()),
            Action::Show => write!(f, "show"),
            Action::Quit => write!(f, "quit"),
        }
    }
}
