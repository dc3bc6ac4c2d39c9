//! Plain-text roadmap loader.
//!
//! # Format
//!
//! Whitespace-delimited tokens; line breaks carry no meaning.
//!
//! ```text
//! <vertex count>
//! <degree> <x> <y>        one record per vertex
//! <edge count>
//! <from> <to>             one record per edge, 0-based vertex indices
//! ```
//!
//! For example, a unit square with one diagonal:
//!
//! ```text
//! 4
//! 3 0 0
//! 2 1 0
//! 3 1 1
//! 2 0 1
//! 5
//! 0 1
//! 1 2
//! 2 3
//! 3 0
//! 0 2
//! ```
//!
//! Anything after the last edge record is ignored.  Record numbers in error
//! messages are 1-based.  A declared count larger than the records left in
//! the stream is rejected before anything is allocated for it.

use std::io::Read;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use log::error;

use nav_core::{NavConfig, Vec2, VertexId};

use crate::graph::{RoadmapGraph, RoadmapGraphBuilder};
use crate::{RoadmapError, RoadmapResult};

impl RoadmapGraph {
    /// Load a roadmap from a file.
    pub fn load_file(path: impl AsRef<Path>, config: &NavConfig) -> RoadmapResult<RoadmapGraph> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            error!("error opening roadmap file {}: {e}", path.display());
            RoadmapError::Io(e)
        })?;
        Self::load_str(&text, config)
    }

    /// Like [`load_file`](Self::load_file) but accepts any `Read` source.
    pub fn load_reader<R: Read>(mut reader: R, config: &NavConfig) -> RoadmapResult<RoadmapGraph> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::load_str(&text, config)
    }

    /// Parse a roadmap held in memory.
    pub fn load_str(text: &str, config: &NavConfig) -> RoadmapResult<RoadmapGraph> {
        let mut tokens = Tokens::new(text);

        // ── Vertices ──────────────────────────────────────────────────────
        let vertex_count: usize = tokens
            .next()
            .ok_or_else(|| parse_error("roadmap didn't start with an integer vertex count"))?;
        if u32::try_from(vertex_count).is_err() {
            return Err(parse_error(format!("vertex count {vertex_count} is too large")));
        }
        // Declared counts are untrusted until the stream can back them.
        if vertex_count > tokens.remaining() / VERTEX_TOKENS {
            return Err(parse_error(format!(
                "vertex count {vertex_count} exceeds the {} records present",
                tokens.remaining() / VERTEX_TOKENS
            )));
        }

        let mut builder = RoadmapGraphBuilder::with_capacity(vertex_count);
        for i in 0..vertex_count {
            let Some((degree, pos)) = tokens.vertex_record() else {
                return Err(parse_error(format!("format error for vertex {}", i + 1)));
            };
            builder.add_vertex(degree, pos);
        }

        // ── Edges ─────────────────────────────────────────────────────────
        let edge_count: usize = tokens
            .next()
            .ok_or_else(|| parse_error("didn't find edge count when expected"))?;
        if edge_count > tokens.remaining() / EDGE_TOKENS {
            return Err(parse_error(format!(
                "edge count {edge_count} exceeds the {} records present",
                tokens.remaining() / EDGE_TOKENS
            )));
        }

        for e in 0..edge_count {
            let Some((from, to)) = tokens.edge_record() else {
                return Err(parse_error(format!("format error for edge {}", e + 1)));
            };
            for vertex in [from, to] {
                if vertex >= vertex_count {
                    error!(
                        "edge {} references vertex {vertex}; only {vertex_count} vertices declared",
                        e + 1
                    );
                    return Err(RoadmapError::UnknownVertex { edge: e + 1, vertex, vertex_count });
                }
            }
            builder.add_edge(VertexId(from as u32), VertexId(to as u32))?;
        }

        builder.build(config)
    }
}

const VERTEX_TOKENS: usize = 3;
const EDGE_TOKENS: usize = 2;

struct Tokens<'a> {
    iter:      SplitWhitespace<'a>,
    remaining: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let iter = text.split_whitespace();
        Self { remaining: iter.clone().count(), iter }
    }

    fn remaining(&self) -> usize {
        self.remaining
    }

    fn next<T: FromStr>(&mut self) -> Option<T> {
        let token = self.iter.next()?;
        self.remaining -= 1;
        token.parse().ok()
    }

    /// `<degree> <x> <y>`; `nan` and `inf` coordinates are format errors.
    fn vertex_record(&mut self) -> Option<(usize, Vec2)> {
        let degree = self.next()?;
        let pos = Vec2::new(self.next()?, self.next()?);
        pos.is_finite().then_some((degree, pos))
    }

    /// `<from> <to>`
    fn edge_record(&mut self) -> Option<(usize, usize)> {
        Some((self.next()?, self.next()?))
    }
}

fn parse_error(msg: impl Into<String>) -> RoadmapError {
    let msg = msg.into();
    error!("error parsing roadmap: {msg}");
    RoadmapError::Parse(msg)
}
