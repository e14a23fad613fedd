use anyhow::{Context, Result, bail};
use std::str::{FromStr, Lines};

use crate::input::Query;

/// A line-oriented document: a count of base commands followed by the commands,
/// then an optional count of stat requests followed by the requests.
#[derive(Debug, Default)]
pub struct TextDocument {
    pub commands: Vec<Command>,
    pub queries: Vec<Query>,
}

impl FromStr for TextDocument {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines();

        let commands = match read_count(&mut lines)? {
            Some(n) => read_section(&mut lines, n, "base")?,
            None => vec![],
        };

        let queries = match read_count(&mut lines)? {
            Some(n) => read_section(&mut lines, n, "stat")?,
            None => vec![],
        };

        Ok(Self { commands, queries })
    }
}

fn read_count(lines: &mut Lines<'_>) -> Result<Option<usize>> {
    let Some(line) = lines.find(|l| !l.trim().is_empty()) else {
        return Ok(None);
    };

    let count = line
        .trim()
        .parse()
        .with_context(|| format!("expected a request count, found {line:?}"))?;
    Ok(Some(count))
}

fn read_section<T>(lines: &mut Lines<'_>, count: usize, section: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = anyhow::Error>,
{
    (0..count)
        .map(|i| {
            let line = lines
                .next()
                .with_context(|| format!("{section} section ended after {i} of {count} lines"))?;
            line.parse()
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Stop,
    Bus,
}

/// `<kind> <id>: <description>`, e.g. `Stop Marushkino: 55.595884, 37.209755`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub id: String,
    pub description: String,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (head, description) = s
            .split_once(':')
            .with_context(|| format!("missing ':' in command {s:?}"))?;
        let (kind, id) = head
            .split_once(' ')
            .with_context(|| format!("missing name in command {s:?}"))?;

        let kind = match kind {
            "Stop" => CommandKind::Stop,
            "Bus" => CommandKind::Bus,
            _ => bail!("unexpected command {kind:?} in {s:?}"),
        };

        let id = id.trim();
        if id.is_empty() {
            bail!("missing name in command {s:?}");
        }

        Ok(Self {
            kind,
            id: id.to_owned(),
            description: description.trim().to_owned(),
        })
    }
}

impl FromStr for Query {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let query = match s.split_once(' ') {
            Some(("Bus", name)) => Query::Bus {
                name: name.trim().to_owned(),
            },
            Some(("Stop", name)) => Query::Stop {
                name: name.trim().to_owned(),
            },
            _ => bail!("unexpected stat request {s:?}"),
        };
        Ok(query)
    }
}
