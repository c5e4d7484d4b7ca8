//! Counter and histogram vectors with positional label values.
//!
//! Label sets are keyed in a `DashMap`; each value is a bundle of atomics, so
//! recording from many request tasks at once needs no extra locking. The
//! first observation of a label set takes the shard write lock once, later
//! ones only a read lock.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::error::{AlohaError, Result};

type LabelKey = Vec<String>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn fmt_float(v: f64) -> String {
    if v == f64::INFINITY {
        "+Inf".to_string()
    } else {
        format!("{v}")
    }
}

fn valid_name(name: &str, allow_colon: bool) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let ok_first = first.is_ascii_alphabetic() || first == '_' || (allow_colon && first == ':');
    ok_first && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || (allow_colon && c == ':'))
}

/// Name, help text and label names of one registered series.
#[derive(Debug, Clone)]
pub(crate) struct Desc {
    name: String,
    help: String,
    label_names: Vec<String>,
}

impl Desc {
    pub(crate) fn new(name: String, help: String, label_names: &[&str], reserved: &[&str]) -> Result<Self> {
        if !valid_name(&name, true) {
            return Err(AlohaError::InvalidSeries(format!("bad metric name: {name:?}")));
        }
        let mut seen: Vec<String> = Vec::with_capacity(label_names.len());
        for l in label_names {
            if !valid_name(l, false) || l.starts_with("__") {
                return Err(AlohaError::InvalidSeries(format!("{name}: bad label name {l:?}")));
            }
            if reserved.contains(l) {
                return Err(AlohaError::InvalidSeries(format!("{name}: label {l:?} is reserved")));
            }
            if seen.iter().any(|s| s.as_str() == *l) {
                return Err(AlohaError::InvalidSeries(format!("{name}: duplicate label {l:?}")));
            }
            seen.push(l.to_string());
        }
        Ok(Self { name, help, label_names: seen })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    fn key(&self, values: &[&str]) -> Result<LabelKey> {
        if values.len() != self.label_names.len() {
            return Err(AlohaError::LabelCardinality {
                series: self.name.clone(),
                expected: self.label_names.len(),
                got: values.len(),
            });
        }
        Ok(values.iter().map(|v| v.to_string()).collect())
    }

    /// `k1="v1",k2="v2"` for one label set (empty when the series has no labels).
    fn label_str(&self, values: &[String]) -> String {
        self.label_names
            .iter()
            .zip(values)
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn header(&self, kind: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} {}", self.name, kind);
    }
}

/// Monotonic counter partitioned by label values.
#[derive(Debug)]
pub struct CounterVec {
    desc: Desc,
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub(crate) fn new(desc: Desc) -> Self {
        Self { desc, map: DashMap::new() }
    }

    /// Fully-qualified series name.
    pub fn name(&self) -> &str {
        self.desc.name()
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.add(values, 1)
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, values: &[&str], v: u64) -> Result<()> {
        let key = self.desc.key(values)?;
        if let Some(counter) = self.map.get(&key) {
            counter.fetch_add(v, Ordering::Relaxed);
            return Ok(());
        }
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value for one label set (0 if never incremented).
    pub fn get(&self, values: &[&str]) -> u64 {
        let key: LabelKey = values.iter().map(|v| v.to_string()).collect();
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across every label set.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    /// Render in Prometheus text exposition format.
    pub(crate) fn render(&self, out: &mut String) {
        self.desc.header("counter", out);
        let mut rows: Vec<(LabelKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (key, val) in rows {
            let label_str = self.desc.label_str(&key);
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", self.desc.name, val);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", self.desc.name, label_str, val);
            }
        }
    }
}

/// Default upper bounds, in seconds, for request latency histograms.
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

pub(crate) fn validate_buckets(name: &str, buckets: &[f64]) -> Result<()> {
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(AlohaError::InvalidSeries(format!("{name}: bucket bounds must be finite")));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(AlohaError::InvalidSeries(format!(
            "{name}: bucket bounds must be strictly increasing"
        )));
    }
    Ok(())
}

struct AtomicHistogram {
    count: AtomicU64,
    /// `f64` bit pattern; updated with a CAS loop.
    sum_bits: AtomicU64,
    /// Cumulative: bucket `i` counts every observation `<= bounds[i]`.
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_bits: AtomicU64::new(0f64.to_bits()),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn observe(&self, bounds: &[f64], v: f64) {
        for (i, &le) in bounds.iter().enumerate() {
            if v <= le {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
        let _ = self
            .sum_bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + v).to_bits())
            });
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }
}

/// Bucketed distribution of observed values, partitioned by label values.
pub struct HistogramVec {
    desc: Desc,
    bounds: Vec<f64>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    pub(crate) fn new(desc: Desc, bounds: Vec<f64>) -> Self {
        Self { desc, bounds, map: DashMap::new() }
    }

    /// Fully-qualified series name.
    pub fn name(&self) -> &str {
        self.desc.name()
    }

    /// Bucket upper bounds (without the implicit `+Inf`).
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Record one observation (seconds, for latency series).
    pub fn observe(&self, values: &[&str], v: f64) -> Result<()> {
        let key = self.desc.key(values)?;
        if let Some(hist) = self.map.get(&key) {
            hist.observe(&self.bounds, v);
            return Ok(());
        }
        let n = self.bounds.len();
        let hist = self.map.entry(key).or_insert_with(|| AtomicHistogram::new(n));
        hist.observe(&self.bounds, v);
        Ok(())
    }

    /// Number of observations for one label set.
    pub fn sample_count(&self, values: &[&str]) -> u64 {
        let key: LabelKey = values.iter().map(|v| v.to_string()).collect();
        self.map
            .get(&key)
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum of observed values for one label set.
    pub fn sample_sum(&self, values: &[&str]) -> f64 {
        let key: LabelKey = values.iter().map(|v| v.to_string()).collect();
        self.map.get(&key).map(|h| h.sum()).unwrap_or(0.0)
    }

    /// Observations across every label set.
    pub fn total_count(&self) -> u64 {
        self.map
            .iter()
            .map(|r| r.value().count.load(Ordering::Relaxed))
            .sum()
    }

    /// Render in Prometheus text exposition format.
    pub(crate) fn render(&self, out: &mut String) {
        self.desc.header("histogram", out);
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        let name = &self.desc.name;
        for key in keys {
            let Some(hist) = self.map.get(&key) else {
                continue;
            };
            let label_str = self.desc.label_str(&key);
            let prefix = if label_str.is_empty() {
                String::new()
            } else {
                format!("{label_str},")
            };

            for (i, &le) in self.bounds.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, fmt_float(le), count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = fmt_float(hist.sum());
            if label_str.is_empty() {
                let _ = writeln!(out, "{name}_sum {sum}");
                let _ = writeln!(out, "{name}_count {count}");
            } else {
                let _ = writeln!(out, "{name}_sum{{{label_str}}} {sum}");
                let _ = writeln!(out, "{name}_count{{{label_str}}} {count}");
            }
        }
    }
}
