use crate::kmlib::{Color, Phase, Result};
use itertools::Itertools;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CentroidView {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub members: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PointView {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub cluster: Option<usize>,
    pub fixed: bool,
    pub color: Color,
}

/// Full observable state after a mutation
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub iteration: u64,
    pub phase: Phase,
    /// Label of the step the next `step` runs
    pub next_step: &'static str,
    pub inertia: f64,
    pub centroids: Vec<CentroidView>,
    pub points: Vec<PointView>,
}

/// Consumer of engine state. Redraws the whole scene on every call.
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;
}

fn rgb(color: &Color) -> String {
    format!("rgb({})", color.iter().join(","))
}

/// Plain text scene dump
pub struct TextRenderer<W: Write> {
    out: W,
    show_points: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, show_points: bool) -> Self {
        Self { out, show_points }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        writeln!(
            self.out,
            "Iteration: {}\tNext Iteration ({})\tinertia {:.3}",
            snapshot.iteration, snapshot.next_step, snapshot.inertia
        )?;
        for c in &snapshot.centroids {
            writeln!(
                self.out,
                "  centroid {} ({:.2}, {:.2}) {} members={}",
                c.index,
                c.x,
                c.y,
                rgb(&c.color),
                c.members
            )?;
        }
        if self.show_points {
            for p in &snapshot.points {
                let cluster = p.cluster.map_or("-".to_string(), |c| c.to_string());
                let pin = if p.fixed { " *" } else { "" };
                writeln!(
                    self.out,
                    "  point {} ({:.2}, {:.2}) -> {}{}",
                    p.index, p.x, p.y, cluster, pin
                )?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON document per line
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot).map_err(std::io::Error::from)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
