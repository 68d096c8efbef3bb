use crate::kmlib::{Action, Canvas, ClusteringEngine, JsonDataset, RenderSink, Result};
use rand::Rng;
use std::io::BufRead;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Actions read, including rejected ones
    pub actions: u64,
    /// Actions the parser or engine refused
    pub failed: u64,
    pub renders: u64,
}

/// Drives an engine from a stream of user actions.
///
/// The session is the input-source side of the engine: it clamps dragged
/// positions to the canvas, turns `load` into a dataset source, and redraws
/// through the sink after every action that went through. A refused action is
/// logged and skipped; only I/O failures on the input or the sink end the run.
pub struct Session<R: Rng, S: RenderSink> {
    engine: ClusteringEngine<R>,
    sink: S,
    canvas: Canvas,
    stats: SessionStats,
}

impl<R: Rng, S: RenderSink> Session<R, S> {
    pub fn new(engine: ClusteringEngine<R>, sink: S, canvas: Canvas) -> Self {
        Self {
            engine,
            sink,
            canvas,
            stats: SessionStats::default(),
        }
    }

    pub fn engine(&self) -> &ClusteringEngine<R> {
        &self.engine
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_parts(self) -> (ClusteringEngine<R>, S) {
        (self.engine, self.sink)
    }

    pub fn render(&mut self) -> Result<()> {
        self.sink.render(&self.engine.snapshot())?;
        self.stats.renders += 1;
        Ok(())
    }

    /// Apply one action to the engine. Engine errors are returned untouched.
    pub fn apply(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Step => {
                let phase = self.engine.step()?;
                debug!("ran {} step", phase);
            }
            Action::AddCentroid => {
                let idx = self.engine.add_centroid()?;
                debug!("added centroid {}", idx);
            }
            Action::MovePoint { index, x, y } => {
                let (x, y) = self.canvas.clamp(*x, *y);
                self.engine.move_point(*index, x, y)?;
            }
            Action::MoveCentroid { index, x, y } => {
                let (x, y) = self.canvas.clamp(*x, *y);
                self.engine.move_centroid(*index, x, y)?;
            }
            Action::Pin { index, cluster } => self.engine.pin_point(*index, *cluster)?,
            Action::Unpin { index } => self.engine.unpin_point(*index)?,
            Action::Reset => self.engine.reset()?,
            Action::Load(path) => self
                .engine
                .load_source(Box::new(JsonDataset::new(path, self.canvas)))?,
            Action::Show | Action::Quit => {}
        }
        Ok(())
    }

    /// Apply and redraw. Returns false once the user quits.
    pub fn handle(&mut self, action: &Action) -> Result<bool> {
        self.stats.actions += 1;
        if *action == Action::Quit {
            return Ok(false);
        }

        match self.apply(action) {
            Ok(()) => self.render()?,
            Err(e) => {
                warn!("`{}` rejected: {}", action, e);
                self.stats.failed += 1;
            }
        }
        Ok(true)
    }

    /// Render the starting state, then handle every line of `input` until it
    /// ends or a `quit` is read.
    pub fn run<B: BufRead>(&mut self, input: B) -> Result<SessionStats> {
        self.render()?;
        for line in input.lines() {
            let line = line?;
            let action = match Action::parse_line(&line) {
                None => continue,
                Some(Ok(action)) => action,
                Some(Err(e)) => {
                    self.stats.actions += 1;
                    self.stats.failed += 1;
                    warn!("{}", e);
                    continue;
                }
            };
            if !self.handle(&action)? {
                break;
            }
        }
        info!(
            "session finished after {} actions ({} rejected)",
            self.stats.actions, self.stats.failed
        );
        Ok(self.stats)
    }
}
