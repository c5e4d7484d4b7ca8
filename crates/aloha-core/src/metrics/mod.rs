//! In-process metric registry.
//!
//! A `Registry` is built once at startup and passed explicitly to whoever
//! records into it and to the exposition endpoint. Each series name can be
//! registered exactly once; a second registration under the same name is an
//! error the caller should treat as fatal.

mod series;

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{AlohaError, Result};

pub use series::{CounterVec, HistogramVec, DEFAULT_BUCKETS};
use series::{validate_buckets, Desc};

/// Content type of `Registry::render` output.
pub const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Naming options for a new series.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    pub subsystem: Option<String>,
    pub name: String,
    pub help: String,
}

impl Opts {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            subsystem: None,
            name: name.into(),
            help: help.into(),
        }
    }

    /// Prefix the series name with `<subsystem>_`.
    pub fn subsystem(mut self, subsystem: impl Into<String>) -> Self {
        let s = subsystem.into();
        self.subsystem = if s.is_empty() { None } else { Some(s) };
        self
    }

    pub fn fq_name(&self) -> String {
        match &self.subsystem {
            Some(s) => format!("{}_{}", s, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone)]
enum Collector {
    Counter(Arc<CounterVec>),
    Histogram(Arc<HistogramVec>),
}

impl Collector {
    fn render(&self, out: &mut String) {
        match self {
            Collector::Counter(c) => c.render(out),
            Collector::Histogram(h) => h.render(out),
        }
    }
}

#[derive(Default)]
pub struct Registry {
    series: DashMap<String, Collector>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter vector. Fails if the name is taken or malformed.
    pub fn register_counter(&self, opts: Opts, label_names: &[&str]) -> Result<Arc<CounterVec>> {
        let desc = Desc::new(opts.fq_name(), opts.help, label_names, &[])?;
        let counter = Arc::new(CounterVec::new(desc));
        self.insert(counter.name().to_string(), Collector::Counter(Arc::clone(&counter)))?;
        Ok(counter)
    }

    /// Register a histogram vector with the given bucket upper bounds.
    /// `le` is reserved for bucket lines and cannot be used as a label name.
    pub fn register_histogram(
        &self,
        opts: Opts,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        let name = opts.fq_name();
        validate_buckets(&name, buckets)?;
        let desc = Desc::new(name, opts.help, label_names, &["le"])?;
        let hist = Arc::new(HistogramVec::new(desc, buckets.to_vec()));
        self.insert(hist.name().to_string(), Collector::Histogram(Arc::clone(&hist)))?;
        Ok(hist)
    }

    fn insert(&self, name: String, collector: Collector) -> Result<()> {
        match self.series.entry(name) {
            Entry::Occupied(e) => Err(AlohaError::AlreadyRegistered(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(collector);
                Ok(())
            }
        }
    }

    /// Registered series names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.series.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Render every series in Prometheus text exposition format (v0.0.4),
    /// sorted by series name.
    pub fn render(&self) -> String {
        let mut collectors: Vec<(String, Collector)> = self
            .series
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        collectors.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (_, c) in collectors {
            c.render(&mut out);
        }
        out
    }
}
