//! `Session` — feeds a stream of command lines to a [`RoadMap`].

use std::io::{self, BufRead, Write};

use log::{debug, info};
use thiserror::Error;

use nr_core::MapError;
use nr_graph::{DijkstraPathFinder, PathFinder};
use nr_routes::RoadMap;

use crate::{Command, ParseError, parse_line};

/// Why one line was rejected.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("not valid UTF-8")]
    Encoding,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Map(#[from] MapError),

    /// Writing output failed.  Ends the session rather than the line.
    #[error("output: {0}")]
    Io(#[from] io::Error),
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines:  usize,
    pub errors: usize,
}

pub struct Session<P: PathFinder = DijkstraPathFinder> {
    map: RoadMap<P>,
}

impl<P: PathFinder> Session<P> {
    pub fn new(map: RoadMap<P>) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &RoadMap<P> {
        &self.map
    }

    pub fn into_map(self) -> RoadMap<P> {
        self.map
    }

    /// Run every line of `input`.  Descriptions go to `out`; each rejected
    /// line is reported on `err` as `ERROR <line>` (1-based).
    ///
    /// Only I/O failures end the session early.
    pub fn run<R, W, E>(&mut self, mut input: R, mut out: W, mut err: E) -> io::Result<RunSummary>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            summary.lines += 1;
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            let result = match std::str::from_utf8(&buf) {
                Ok(line) => self.execute_line(line, &mut out),
                Err(_) => Err(CommandError::Encoding),
            };
            match result {
                Ok(()) => {}
                Err(CommandError::Io(e)) => return Err(e),
                Err(e) => {
                    debug!("line {}: {e}", summary.lines);
                    summary.errors += 1;
                    writeln!(err, "ERROR {}", summary.lines)?;
                }
            }
        }

        out.flush()?;
        err.flush()?;
        info!(
            "{} lines, {} errors; {} cities, {} roads, {} routes",
            summary.lines,
            summary.errors,
            self.map.graph().city_count(),
            self.map.graph().segment_count(),
            self.map.routes().len(),
        );
        Ok(summary)
    }

    /// Parse and execute a single line.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), CommandError> {
        match parse_line(line)? {
            Some(command) => self.execute(command, out),
            None => Ok(()),
        }
    }

    pub fn execute<W: Write>(&mut self, command: Command<'_>, out: &mut W) -> Result<(), CommandError> {
        let map = &mut self.map;
        match command {
            Command::AddRoad { city1, city2, length, year } => map.add_road(city1, city2, length, year)?,
            Command::RepairRoad { city1, city2, year } => map.repair_road(city1, city2, year)?,
            Command::GetRouteDescription { id } => {
                // An unused number prints an empty line; only a number out
                // of range is an error.
                map.config().check_route_id(id)?;
                writeln!(out, "{}", map.describe_route(id))?;
            }
            Command::NewRoute { id, city1, city2 } => map.new_route(id, city1, city2)?,
            Command::ExtendRoute { id, city } => map.extend_route(id, city)?,
            Command::RemoveRoad { city1, city2 } => map.remove_road(city1, city2)?,
            Command::RemoveRoute { id } => map.remove_route(id)?,
            Command::DeclareRoute { id, start, legs } => map.declare_route(id, start, &legs)?,
        }
        Ok(())
    }
}
