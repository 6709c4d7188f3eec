use std::time::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
}

/// Hierarchial timing of the steps of one command. Spans are logged as they finish; when the
/// Timer is dropped, the whole breakdown is repeated, followed by any notes and warnings.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<TimerSpan>,

    outermost_name: String,

    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new(name: impl AsRef<str>) -> Timer {
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.as_ref().to_string(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    // TODO Shouldn't use this much.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end, to avoid having to scroll up and find
    /// interesting debug stuff.
    pub fn note(&mut self, line: String) {
        log::info!("{}", line);
        self.notes.push(line);
    }

    /// Log immediately, and repeat with the summary.
    pub fn warn(&mut self, line: String) {
        log::warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn start(&mut self, name: impl AsRef<str>) {
        log::debug!("{}...", name.as_ref());
        self.stack.push(TimerSpan {
            name: name.as_ref().to_string(),
            started_at: Instant::now(),
            nested_results: Vec::new(),
        });
    }

    pub fn stop(&mut self, name: impl AsRef<str>) {
        let name = name.as_ref();
        if !self.stack.iter().any(|s| s.name == name) {
            log::warn!("Timer stopped {}, but it was never started", name);
            return;
        }
        // Spans abandoned by an early return get closed along with their parent.
        loop {
            let span = match self.stack.pop() {
                Some(span) => span,
                None => return,
            };
            let done = span.name == name;
            self.finish(span);
            if done {
                return;
            }
        }
    }

    fn finish(&mut self, span: TimerSpan) {
        let line = format!(
            "{} took {}",
            span.name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        log::info!("{}", line);

        let padding = "  ".repeat(self.stack.len());
        let results = match self.stack.last_mut() {
            Some(parent) => &mut parent.nested_results,
            None => &mut self.results,
        };
        results.push(format!("{}- {}", padding, line));
        results.extend(span.nested_results);
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        let outermost = self.outermost_name.clone();
        self.stop(outermost);

        if std::thread::panicking() {
            return;
        }
        for line in &self.results {
            log::info!("{}", line);
        }
        if !self.notes.is_empty() {
            log::info!("{} notes:", self.notes.len());
            for line in &self.notes {
                log::info!("{}", line);
            }
        }
        if !self.warnings.is_empty() {
            log::warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                log::warn!("{}", line);
            }
        }
    }
}
