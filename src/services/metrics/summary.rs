use prometheus::core::{Collector, Desc};
use prometheus::proto::{self, LabelPair, MetricFamily, MetricType, Quantile};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default number of observations kept per child for quantile estimation
pub const SUMMARY_WINDOW: usize = 500;

const QUANTILE_LABEL: &str = "quantile";

/// Options for a summary vector
#[derive(Debug, Clone)]
pub struct SummaryOpts {
    pub name: String,
    pub help: String,
    /// quantile -> absolute error tolerance
    pub objectives: Vec<(f64, f64)>,
    /// Most recent observations kept per child
    pub window: usize,
}

impl SummaryOpts {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, help: S2) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            objectives: Vec::new(),
            window: SUMMARY_WINDOW,
        }
    }

    pub fn objectives(mut self, objectives: Vec<(f64, f64)>) -> Self {
        self.objectives = objectives;
        self
    }

    /// Larger windows give steadier quantiles at the cost of memory and
    /// slower reaction to shifts in the distribution.
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

#[derive(Debug, Default)]
struct SummaryState {
    count: u64,
    sum: f64,
    window: VecDeque<f64>,
}

#[derive(Debug)]
struct SummaryCore {
    capacity: usize,
    state: Mutex<SummaryState>,
}

impl SummaryCore {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(SummaryState {
                window: VecDeque::with_capacity(capacity),
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SummaryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A single summary child bound to one label-value combination
#[derive(Debug, Clone)]
pub struct Summary {
    core: Arc<SummaryCore>,
}

impl Summary {
    pub fn observe(&self, value: f64) {
        let mut state = self.core.lock();
        state.count += 1;
        state.sum += value;
        if state.window.len() == self.core.capacity {
            state.window.pop_front();
        }
        state.window.push_back(value);
    }

    pub fn get_sample_count(&self) -> u64 {
        self.core.lock().count
    }

    pub fn get_sample_sum(&self) -> f64 {
        self.core.lock().sum
    }
}

/// Summary collector partitioned by label values.
///
/// The `prometheus` crate has no summary type; this fills the gap with a
/// sliding window of recent observations per child and nearest-rank
/// quantiles computed at scrape time.
#[derive(Clone)]
pub struct SummaryVec {
    desc: Desc,
    objectives: Vec<(f64, f64)>,
    window: usize,
    children: Arc<Mutex<HashMap<Vec<String>, Summary>>>,
}

impl fmt::Debug for SummaryVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryVec")
            .field("name", &self.desc.fq_name)
            .field("objectives", &self.objectives)
            .field("window", &self.window)
            .finish()
    }
}

impl SummaryVec {
    pub fn new(opts: SummaryOpts, label_names: &[&str]) -> prometheus::Result<Self> {
        if label_names.contains(&QUANTILE_LABEL) {
            return Err(prometheus::Error::Msg(format!(
                "'{}' is reserved for summary quantiles",
                QUANTILE_LABEL
            )));
        }
        if let Some((q, _)) = opts.objectives.iter().find(|(q, _)| !(0.0..=1.0).contains(q)) {
            return Err(prometheus::Error::Msg(format!(
                "quantile {} out of range [0, 1]",
                q
            )));
        }
        if opts.window == 0 {
            return Err(prometheus::Error::Msg(
                "summary window must hold at least one observation".to_string(),
            ));
        }

        let desc = Desc::new(
            opts.name,
            opts.help,
            label_names.iter().map(|l| l.to_string()).collect(),
            HashMap::new(),
        )?;

        let mut objectives = opts.objectives;
        objectives.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = objectives.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(prometheus::Error::Msg(format!(
                "duplicate quantile {} in objectives",
                pair[0].0
            )));
        }

        Ok(Self {
            desc,
            objectives,
            window: opts.window,
            children: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn get_metric_with_label_values(&self, vals: &[&str]) -> prometheus::Result<Summary> {
        let expect = self.desc.variable_labels.len();
        if vals.len() != expect {
            return Err(prometheus::Error::InconsistentCardinality {
                expect,
                got: vals.len(),
            });
        }

        let key: Vec<String> = vals.iter().map(|v| v.to_string()).collect();
        let mut children = self.children.lock().unwrap_or_else(|e| e.into_inner());
        let window = self.window;
        let child = children.entry(key).or_insert_with(|| Summary {
            core: Arc::new(SummaryCore::new(window)),
        });
        Ok(child.clone())
    }

    /// Panics on label cardinality mismatch, same as the built-in vectors.
    pub fn with_label_values(&self, vals: &[&str]) -> Summary {
        self.get_metric_with_label_values(vals)
            .unwrap_or_else(|e| panic!("summary '{}': {}", self.desc.fq_name, e))
    }

    pub fn objectives(&self) -> &[(f64, f64)] {
        &self.objectives
    }

    fn build_metric(&self, label_values: &[String], child: &Summary) -> proto::Metric {
        let mut pairs: Vec<LabelPair> = self
            .desc
            .variable_labels
            .iter()
            .zip(label_values)
            .map(|(name, value)| {
                let mut pair = LabelPair::default();
                pair.set_name(name.clone());
                pair.set_value(value.clone());
                pair
            })
            .collect();
        pairs.sort_by(|a, b| a.get_name().cmp(b.get_name()));

        let state = child.core.lock();
        let mut sorted: Vec<f64> = state.window.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut summary = proto::Summary::default();
        summary.set_sample_count(state.count);
        summary.set_sample_sum(state.sum);
        for (q, _) in &self.objectives {
            let mut quantile = Quantile::default();
            quantile.set_quantile(*q);
            quantile.set_value(nearest_rank(&sorted, *q));
            summary.mut_quantile().push(quantile);
        }

        let mut metric = proto::Metric::default();
        for pair in pairs {
            metric.mut_label().push(pair);
        }
        metric.set_summary(summary);
        metric
    }
}

impl Collector for SummaryVec {
    fn desc(&self) -> Vec<&Desc> {
        vec![&self.desc]
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut family = MetricFamily::default();
        family.set_name(self.desc.fq_name.clone());
        family.set_help(self.desc.help.clone());
        family.set_field_type(MetricType::SUMMARY);

        let children = self.children.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries: Vec<_> = children.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (label_values, child) in entries {
            family.mut_metric().push(self.build_metric(label_values, child));
        }

        vec![family]
    }
}

/// Nearest-rank quantile over an ascending slice; NaN when empty.
fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}
